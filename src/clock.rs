//! Clock implementations beyond [`mockable::DefaultClock`].

use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Clock frozen at a chosen instant until explicitly advanced.
///
/// Clones share the same instant, so a test can hand one clone to a service
/// and advance the other.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use mockable::Clock;
/// use portico::clock::FixedClock;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).single().expect("valid date");
/// let clock = FixedClock::at(start);
/// clock.advance(Duration::minutes(5));
/// assert_eq!(clock.utc(), start + Duration::minutes(5));
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    /// Creates a clock reading `instant`.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(instant)),
        }
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.write() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
            .read()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// Type-erased clock shared by the running application.
///
/// Services are generic over their clock; the server instantiates them with
/// this wrapper so the same wiring runs on [`mockable::DefaultClock`] in
/// production and on a [`FixedClock`] in tests.
#[derive(Clone)]
pub struct SharedClock(Arc<dyn Clock + Send + Sync>);

impl SharedClock {
    /// Wraps any clock.
    #[must_use]
    pub fn new(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self(Arc::new(clock))
    }

    /// Wraps the system clock.
    #[must_use]
    pub fn system() -> Self {
        Self::new(mockable::DefaultClock)
    }
}

impl std::fmt::Debug for SharedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedClock").field(&self.0.utc()).finish()
    }
}

impl Clock for SharedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.local()
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.utc()
    }
}
