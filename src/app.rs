//! Wiring of the in-memory adapters into the application services.

use std::sync::Arc;

use crate::clock::SharedClock;
use crate::config::PorticoConfig;
use crate::directory::{
    adapters::{Argon2PasswordHasher, InMemoryDirectory},
    ports::PasswordHashingError,
    services::DirectoryService,
};
use crate::messaging::{adapters::InMemoryMessagingRepository, services::MessagingService};
use crate::notification::{
    adapters::InMemoryNotificationRepository, services::NotificationService,
};
use crate::project::{adapters::InMemoryProjectRepository, services::ProjectService};

/// Directory service as wired by the application.
pub type AppDirectory = DirectoryService<InMemoryDirectory, SharedClock>;
/// Project service as wired by the application.
pub type AppProjects = ProjectService<InMemoryProjectRepository, SharedClock>;
/// Messaging service as wired by the application.
pub type AppMessaging = MessagingService<InMemoryMessagingRepository, SharedClock>;
/// Notification service as wired by the application.
pub type AppNotifications = NotificationService<InMemoryNotificationRepository, SharedClock>;

/// Every application service, sharing one directory and one notification
/// inbox.
#[derive(Clone)]
pub struct Services {
    /// Tenants, users and login.
    pub directory: Arc<AppDirectory>,
    /// Client projects.
    pub projects: Arc<AppProjects>,
    /// Conversations and read state.
    pub messaging: Arc<AppMessaging>,
    /// Notification inbox.
    pub notifications: Arc<AppNotifications>,
}

impl Services {
    /// Builds empty in-memory stores and the services over them.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashingError`] when the configured Argon2 cost is
    /// rejected.
    pub fn in_memory(
        config: &PorticoConfig,
        clock: &SharedClock,
    ) -> Result<Self, PasswordHashingError> {
        let hasher = Argon2PasswordHasher::with_cost(
            config.passwords.memory_kib,
            config.passwords.iterations,
        )?;
        let shared = Arc::new(clock.clone());
        let users = Arc::new(InMemoryDirectory::new());
        let notifications = Arc::new(NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::clone(&shared),
        ));
        let directory = Arc::new(DirectoryService::new(
            Arc::clone(&users),
            Arc::new(hasher),
            Arc::clone(&shared),
        ));
        let projects = Arc::new(ProjectService::new(
            Arc::new(InMemoryProjectRepository::new()),
            users.clone(),
            notifications.clone(),
            Arc::clone(&shared),
        ));
        let messaging = Arc::new(MessagingService::new(
            Arc::new(InMemoryMessagingRepository::new()),
            users,
            notifications.clone(),
            shared,
            config.messaging,
        ));
        Ok(Self {
            directory,
            projects,
            messaging,
            notifications,
        })
    }
}
