//! HTTP/JSON surface of the portal.
//!
//! Handlers are thin: they extract the verified [`session::CurrentActor`],
//! call one service operation and map failures through [`error::ApiError`].
//! The area gates in [`session`] guard the client portal, employee and admin
//! route groups.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;
pub mod views;

pub use error::{ApiError, ErrorCode};
pub use router::build_router;
pub use session::CurrentActor;
pub use state::AppState;
