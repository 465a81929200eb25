//! Shared unit-test fixtures: a small directory of tenants and people.

use std::sync::Arc;

use crate::auth::domain::Actor;
use crate::clock::FixedClock;
use crate::directory::{
    adapters::InMemoryDirectory,
    domain::{Client, ClientSlug, EmailAddress, PasswordHash, User, UserProfile, UserRole},
    ports::DirectoryRepository,
};
use crate::notification::{adapters::InMemoryNotificationRepository, services::NotificationService};
use chrono::{TimeZone, Utc};

pub type TestNotifier = NotificationService<InMemoryNotificationRepository, FixedClock>;

pub fn fixed_clock() -> FixedClock {
    let start = Utc
        .with_ymd_and_hms(2026, 3, 2, 8, 30, 0)
        .single()
        .expect("valid timestamp");
    FixedClock::at(start)
}

/// Two tenants, two staff members and three client users.
pub struct People {
    pub directory: Arc<InMemoryDirectory>,
    pub acme: Client,
    pub globex: Client,
    pub admin: User,
    pub employee: User,
    pub consultant: User,
    pub acme_pat: User,
    pub acme_lee: User,
    pub globex_sam: User,
}

impl People {
    pub async fn seed(clock: &FixedClock) -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let acme = client(&directory, "Acme", "acme", clock).await;
        let globex = client(&directory, "Globex", "globex", clock).await;
        let admin = user(&directory, "ada@firm.test", UserRole::Admin, None, clock).await;
        let employee = user(&directory, "eve@firm.test", UserRole::Employee, None, clock).await;
        let consultant = user(&directory, "carl@firm.test", UserRole::Employee, None, clock).await;
        let acme_pat = user(&directory, "pat@acme.test", UserRole::Client, Some(&acme), clock).await;
        let acme_lee = user(&directory, "lee@acme.test", UserRole::Client, Some(&acme), clock).await;
        let globex_sam =
            user(&directory, "sam@globex.test", UserRole::Client, Some(&globex), clock).await;
        Self {
            directory,
            acme,
            globex,
            admin,
            employee,
            consultant,
            acme_pat,
            acme_lee,
            globex_sam,
        }
    }

    pub fn notifier(clock: &FixedClock) -> Arc<TestNotifier> {
        Arc::new(NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::new(clock.clone()),
        ))
    }
}

pub fn actor(user: &User) -> Actor {
    Actor::from(user)
}

async fn client(
    directory: &InMemoryDirectory,
    name: &str,
    slug: &str,
    clock: &FixedClock,
) -> Client {
    let created = Client::new(name, ClientSlug::new(slug).expect("valid slug"), clock)
        .expect("valid client");
    directory
        .store_client(&created)
        .await
        .expect("store client");
    created
}

async fn user(
    directory: &InMemoryDirectory,
    email: &str,
    role: UserRole,
    tenant: Option<&Client>,
    clock: &FixedClock,
) -> User {
    let address = EmailAddress::new(email).expect("valid email");
    let name = email.split('@').next().unwrap_or(email).to_owned();
    let profile =
        UserProfile::new(address, name, role, tenant.map(Client::id)).expect("valid profile");
    let created = User::new(profile, PasswordHash::from_phc("$fixture$"), clock);
    directory.store_user(&created).await.expect("store user");
    created
}
