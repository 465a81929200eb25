//! Unit tests for demo data loading.

use super::{DEMO_ADMIN_EMAIL, DEMO_PASSWORD, SeedOutcome, load_demo_data};
use crate::app::Services;
use crate::auth::domain::Actor;
use crate::clock::SharedClock;
use crate::config::PorticoConfig;
use crate::fixtures::fixed_clock;
use crate::project::{domain::ProjectStatus, ports::ProjectFilter};
use rstest::{fixture, rstest};

#[fixture]
fn services() -> Services {
    let mut config = PorticoConfig::default();
    config.passwords.memory_kib = 64;
    config.passwords.iterations = 1;
    Services::in_memory(&config, &SharedClock::new(fixed_clock())).expect("cheap argon2 params")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn loads_once_then_skips(services: Services) {
    let first = load_demo_data(&services).await.expect("seeding should succeed");
    let second = load_demo_data(&services).await.expect("reseeding should succeed");

    assert_eq!(
        first,
        SeedOutcome::Loaded {
            users: 7,
            projects: 4,
            conversations: 2,
        }
    );
    assert_eq!(second, SeedOutcome::Skipped);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_accounts_share_the_documented_password(services: Services) {
    load_demo_data(&services).await.expect("seeding should succeed");

    let admin = services
        .directory
        .authenticate(DEMO_ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .expect("admin can sign in");
    let client = services
        .directory
        .authenticate("jordan@northwind.test", DEMO_PASSWORD)
        .await
        .expect("client can sign in");

    assert!(Actor::from(&admin).is_staff());
    assert!(client.client_id().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_cover_several_states(services: Services) {
    load_demo_data(&services).await.expect("seeding should succeed");
    let admin = services
        .directory
        .authenticate(DEMO_ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .expect("admin can sign in");

    let all = services
        .projects
        .list_visible(&Actor::from(&admin), ProjectFilter::any())
        .await
        .expect("projects should load");

    let mut statuses: Vec<ProjectStatus> = all.iter().map(|p| p.status()).collect();
    statuses.sort_by_key(|status| status.as_str());
    assert_eq!(
        statuses,
        vec![
            ProjectStatus::Active,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
            ProjectStatus::Planning,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_conversation_has_unread_reply(services: Services) {
    load_demo_data(&services).await.expect("seeding should succeed");
    let jordan = services
        .directory
        .authenticate("jordan@northwind.test", DEMO_PASSWORD)
        .await
        .expect("client can sign in");
    let morgan = services
        .directory
        .authenticate("morgan@portico.test", DEMO_PASSWORD)
        .await
        .expect("employee can sign in");

    let jordan_unread = services
        .messaging
        .unread_total(&Actor::from(&jordan))
        .await
        .expect("count should load");
    let morgan_unread = services
        .messaging
        .unread_total(&Actor::from(&morgan))
        .await
        .expect("count should load");

    assert_eq!((jordan_unread, morgan_unread), (1, 0));
}
