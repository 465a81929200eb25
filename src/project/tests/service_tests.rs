//! Unit tests for project service scoping and notifications.

use std::sync::Arc;

use crate::auth::domain::Actor;
use crate::clock::FixedClock;
use crate::fixtures::{People, TestNotifier, actor, fixed_clock};
use crate::notification::{
    domain::NotificationKind,
    ports::{DeliveryError, sink::MockNotificationSink},
};
use crate::project::{
    adapters::InMemoryProjectRepository,
    domain::{Project, ProjectDomainError, ProjectStatus},
    ports::ProjectFilter,
    services::{CreateProjectRequest, ProjectService, ProjectServiceError},
};
use chrono::Duration;

type TestService = ProjectService<InMemoryProjectRepository, FixedClock>;

struct Harness {
    clock: FixedClock,
    people: People,
    notifier: Arc<TestNotifier>,
    service: TestService,
}

async fn harness() -> Harness {
    let clock = fixed_clock();
    let people = People::seed(&clock).await;
    let notifier = People::notifier(&clock);
    let service = ProjectService::new(
        Arc::new(InMemoryProjectRepository::new()),
        people.directory.clone(),
        notifier.clone(),
        Arc::new(clock.clone()),
    );
    Harness {
        clock,
        people,
        notifier,
        service,
    }
}

impl Harness {
    fn staff(&self) -> Actor {
        actor(&self.people.employee)
    }

    async fn create_for_acme(&self, name: &str) -> Project {
        self.service
            .create(
                &self.staff(),
                CreateProjectRequest::new(self.people.acme.id(), name),
            )
            .await
            .expect("project creation should succeed")
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn client_users_cannot_create_projects() {
    let h = harness().await;

    let result = h
        .service
        .create(
            &actor(&h.people.acme_pat),
            CreateProjectRequest::new(h.people.acme.id(), "Sneaky"),
        )
        .await;

    assert!(matches!(result, Err(ProjectServiceError::AccessDenied(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_requires_existing_client() {
    let h = harness().await;
    let missing = crate::directory::domain::ClientId::new();

    let result = h
        .service
        .create(&h.staff(), CreateProjectRequest::new(missing, "Ghost"))
        .await;

    assert!(matches!(result, Err(ProjectServiceError::UnknownClient(id)) if id == missing));
}

#[tokio::test(flavor = "multi_thread")]
async fn clients_only_see_their_tenant() {
    let h = harness().await;
    let acme_project = h.create_for_acme("Acme site").await;
    let globex_project = h
        .service
        .create(
            &h.staff(),
            CreateProjectRequest::new(h.people.globex.id(), "Globex audit"),
        )
        .await
        .expect("project creation should succeed");
    let pat = actor(&h.people.acme_pat);

    let visible = h
        .service
        .list_visible(&pat, ProjectFilter::any())
        .await
        .expect("list should succeed");
    let cross_tenant = h
        .service
        .list_visible(&pat, ProjectFilter::any().for_client(h.people.globex.id()))
        .await
        .expect("list should succeed");
    let hidden = h.service.find(&pat, globex_project.id()).await;
    let staff_view = h
        .service
        .list_visible(&h.staff(), ProjectFilter::any())
        .await
        .expect("list should succeed");

    assert_eq!(visible, vec![acme_project]);
    assert!(cross_tenant.is_empty());
    assert!(matches!(hidden, Err(ProjectServiceError::NotFound(_))));
    assert_eq!(staff_view.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn portal_listing_checks_tenant() {
    let h = harness().await;
    h.create_for_acme("Acme site").await;

    let own = h
        .service
        .list_for_client(&actor(&h.people.acme_pat), h.people.acme.id())
        .await
        .expect("own tenant is visible");
    let other = h
        .service
        .list_for_client(&actor(&h.people.globex_sam), h.people.acme.id())
        .await;

    assert_eq!(own.len(), 1);
    assert!(matches!(other, Err(ProjectServiceError::AccessDenied(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_is_newest_update_first_and_filterable() {
    let h = harness().await;
    let older = h.create_for_acme("Older").await;
    h.clock.advance(Duration::minutes(5));
    let newer = h.create_for_acme("Newer").await;
    h.clock.advance(Duration::minutes(5));
    h.service
        .change_status(&h.staff(), older.id(), ProjectStatus::Active)
        .await
        .expect("planning to active");

    let all = h
        .service
        .list_visible(&h.staff(), ProjectFilter::any())
        .await
        .expect("list should succeed");
    let planning = h
        .service
        .list_visible(&h.staff(), ProjectFilter::any().with_status(ProjectStatus::Planning))
        .await
        .expect("list should succeed");

    let order: Vec<_> = all.iter().map(Project::id).collect();
    assert_eq!(order, vec![older.id(), newer.id()]);
    assert_eq!(planning.iter().map(Project::id).collect::<Vec<_>>(), vec![newer.id()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn status_change_notifies_client_users_and_team() {
    let h = harness().await;
    let project = h.create_for_acme("Acme site").await;
    h.service
        .assign_member(&h.staff(), project.id(), h.people.consultant.id())
        .await
        .expect("consultant is staff");

    h.service
        .change_status(&h.staff(), project.id(), ProjectStatus::Active)
        .await
        .expect("planning to active");

    for recipient in [&h.people.acme_pat, &h.people.acme_lee, &h.people.consultant] {
        let inbox = h
            .notifier
            .list(&actor(recipient), true)
            .await
            .expect("inbox should load");
        assert_eq!(inbox.len(), 1, "{} should be notified", recipient.email());
        let notification = inbox.first().expect("one notification");
        assert_eq!(notification.kind(), NotificationKind::ProjectStatusChanged);
        assert_eq!(notification.title(), "Acme site is now active");
    }
    for bystander in [&h.people.employee, &h.people.globex_sam] {
        let count = h
            .notifier
            .unread_count(&actor(bystander))
            .await
            .expect("count should load");
        assert_eq!(count, 0);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn disallowed_transition_is_a_domain_error() {
    let h = harness().await;
    let project = h.create_for_acme("Acme site").await;

    let result = h
        .service
        .change_status(&h.staff(), project.id(), ProjectStatus::Completed)
        .await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Domain(
            ProjectDomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn progress_rejected_once_cancelled() {
    let h = harness().await;
    let project = h.create_for_acme("Acme site").await;
    h.service
        .change_status(&h.staff(), project.id(), ProjectStatus::Cancelled)
        .await
        .expect("planning to cancelled");

    let over = h.service.update_progress(&h.staff(), project.id(), 150).await;
    let closed = h.service.update_progress(&h.staff(), project.id(), 50).await;

    assert!(matches!(
        over,
        Err(ProjectServiceError::Domain(ProjectDomainError::InvalidProgress(150)))
    ));
    assert!(matches!(
        closed,
        Err(ProjectServiceError::Domain(ProjectDomainError::Closed(_)))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn only_active_staff_join_teams() {
    let h = harness().await;
    let project = h.create_for_acme("Acme site").await;

    let client_member = h
        .service
        .assign_member(&h.staff(), project.id(), h.people.acme_pat.id())
        .await;
    let first = h
        .service
        .assign_member(&h.staff(), project.id(), h.people.consultant.id())
        .await
        .expect("staff may join");
    let second = h
        .service
        .assign_member(&h.staff(), project.id(), h.people.consultant.id())
        .await
        .expect("repeat assignment is harmless");

    assert!(matches!(client_member, Err(ProjectServiceError::InvalidMember(_))));
    assert_eq!(first.team(), &[h.people.consultant.id()]);
    assert_eq!(second.team(), first.team());
}

#[tokio::test(flavor = "multi_thread")]
async fn workload_lists_assigned_projects() {
    let h = harness().await;
    let staffed = h.create_for_acme("Staffed").await;
    h.create_for_acme("Unstaffed").await;
    h.service
        .assign_member(&h.staff(), staffed.id(), h.people.consultant.id())
        .await
        .expect("staff may join");

    let workload = h
        .service
        .list_assigned(&actor(&h.people.consultant))
        .await
        .expect("workload should load");

    assert_eq!(workload.iter().map(Project::id).collect::<Vec<_>>(), vec![staffed.id()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_notifications_do_not_undo_status_change() {
    let clock = fixed_clock();
    let people = People::seed(&clock).await;
    let mut sink = MockNotificationSink::new();
    sink.expect_deliver()
        .returning(|_, _| Err(DeliveryError("inbox offline".to_owned())));
    let service = ProjectService::new(
        Arc::new(InMemoryProjectRepository::new()),
        people.directory.clone(),
        Arc::new(sink),
        Arc::new(clock.clone()),
    );
    let staff = actor(&people.employee);
    let project = service
        .create(&staff, CreateProjectRequest::new(people.acme.id(), "Acme site"))
        .await
        .expect("project creation should succeed");

    let updated = service
        .change_status(&staff, project.id(), ProjectStatus::Active)
        .await
        .expect("status change survives delivery failure");

    assert_eq!(updated.status(), ProjectStatus::Active);
}
