//! Shared world state for messaging BDD scenarios.

use std::collections::HashMap;

use portico::app::Services;
use portico::auth::domain::Actor;
use portico::clock::SharedClock;
use portico::config::PorticoConfig;
use portico::directory::domain::{Client, User};
use portico::messaging::{
    domain::{Conversation, Message},
    services::MessagingServiceError,
};
use rstest::fixture;

/// Password given to every scenario account.
pub const SCENARIO_PASSWORD: &str = "scenario-password";

/// Scenario world for messaging behaviour tests.
pub struct MessagingWorld {
    /// Services under test.
    pub services: Services,
    /// Registered clients by name.
    pub clients: HashMap<String, Client>,
    /// Registered users by display name.
    pub people: HashMap<String, User>,
    /// The conversation the scenario is about.
    pub conversation: Option<Conversation>,
    /// Result of the last attempt to start a conversation.
    pub last_start: Option<Result<(Conversation, Option<Message>), MessagingServiceError>>,
}

impl MessagingWorld {
    /// Creates a world over empty in-memory stores with cheap hashing.
    ///
    /// # Panics
    ///
    /// Panics when the test hashing cost is rejected.
    #[must_use]
    pub fn new() -> Self {
        let mut config = PorticoConfig::default();
        config.passwords.memory_kib = 64;
        config.passwords.iterations = 1;
        let services = Services::in_memory(&config, &SharedClock::system())
            .expect("test hashing cost should be accepted");
        Self {
            services,
            clients: HashMap::new(),
            people: HashMap::new(),
            conversation: None,
            last_start: None,
        }
    }

    /// Looks up a registered user by display name.
    ///
    /// # Errors
    ///
    /// Returns an error when no such user was registered.
    pub fn person(&self, name: &str) -> Result<&User, eyre::Report> {
        self.people
            .get(name)
            .ok_or_else(|| eyre::eyre!("no user named '{name}' in scenario world"))
    }

    /// Returns the actor for a registered user.
    ///
    /// # Errors
    ///
    /// Returns an error when no such user was registered.
    pub fn actor(&self, name: &str) -> Result<Actor, eyre::Report> {
        self.person(name).map(Actor::from)
    }

    /// Returns the scenario conversation.
    ///
    /// # Errors
    ///
    /// Returns an error when no conversation was started.
    pub fn conversation(&self) -> Result<&Conversation, eyre::Report> {
        self.conversation
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no conversation in scenario world"))
    }
}

impl Default for MessagingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MessagingWorld {
    MessagingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Derives a login email from a display name and domain.
#[must_use]
pub fn email_for(name: &str, domain: &str) -> String {
    format!("{}@{domain}.test", name.to_lowercase())
}
