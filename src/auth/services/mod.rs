//! Session issuing and verification.

mod session;

pub use session::{MIN_SECRET_BYTES, SessionCodec, SessionConfigError, SessionSecret};
