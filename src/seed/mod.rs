//! Demo tenants, people, projects and conversations.
//!
//! Every demo account signs in with [`DEMO_PASSWORD`]. Data is only loaded
//! into an empty directory, so calling [`load_demo_data`] twice is harmless.

use crate::app::Services;
use crate::auth::domain::Actor;
use crate::directory::{
    domain::{Client, User, UserRole},
    services::{DirectoryServiceError, RegisterUserRequest},
};
use crate::messaging::services::{MessagingServiceError, StartConversationRequest};
use crate::project::{
    domain::{Project, ProjectStatus},
    services::{CreateProjectRequest, ProjectServiceError},
};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "portico-demo";

/// Email of the demo administrator.
pub const DEMO_ADMIN_EMAIL: &str = "avery@portico.test";

/// Errors raised while loading demo data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Directory registration failed.
    #[error(transparent)]
    Directory(#[from] DirectoryServiceError),
    /// Project set-up failed.
    #[error(transparent)]
    Project(#[from] ProjectServiceError),
    /// Conversation set-up failed.
    #[error(transparent)]
    Messaging(#[from] MessagingServiceError),
}

/// What [`load_demo_data`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held data.
    Skipped,
    /// Demo data was inserted.
    Loaded {
        /// Users created.
        users: usize,
        /// Projects created.
        projects: usize,
        /// Conversations created.
        conversations: usize,
    },
}

struct Tenant {
    client: Client,
    people: Vec<User>,
}

/// Inserts the demo dataset when the directory is empty.
///
/// # Errors
///
/// Returns [`SeedError`] when any service rejects the demo data.
pub async fn load_demo_data(services: &Services) -> Result<SeedOutcome, SeedError> {
    if !services.directory.list_clients().await?.is_empty() {
        info!("directory not empty, skipping demo data");
        return Ok(SeedOutcome::Skipped);
    }

    let admin = register(services, DEMO_ADMIN_EMAIL, "Avery Stone", UserRole::Admin, None)
        .await?;
    let morgan = register(
        services,
        "morgan@portico.test",
        "Morgan Lee",
        UserRole::Employee,
        None,
    )
    .await?;
    let riley = register(
        services,
        "riley@portico.test",
        "Riley Chen",
        UserRole::Employee,
        None,
    )
    .await?;

    let northwind = tenant(
        services,
        ("Northwind Traders", "northwind"),
        &[
            ("jordan@northwind.test", "Jordan Price"),
            ("casey@northwind.test", "Casey Ward"),
        ],
    )
    .await?;
    let contoso = tenant(
        services,
        ("Contoso Health", "contoso"),
        &[
            ("taylor@contoso.test", "Taylor Brooks"),
            ("quinn@contoso.test", "Quinn Ellis"),
        ],
    )
    .await?;

    let operator = Actor::from(&admin);
    let mut projects = 0;

    let replatform = project(
        services,
        &operator,
        CreateProjectRequest::new(northwind.client.id(), "E-commerce replatform")
            .with_description("Move the storefront to a headless commerce stack.")
            .with_budget_cents(12_000_000)
            .with_due_date(demo_date(2026, 11, 30)),
    )
    .await?;
    staff(services, &operator, &replatform, &morgan).await?;
    advance(services, &operator, &replatform, &[ProjectStatus::Active]).await?;
    services
        .projects
        .update_progress(&operator, replatform.id(), 45)
        .await?;
    projects += 1;

    project(
        services,
        &operator,
        CreateProjectRequest::new(northwind.client.id(), "Data warehouse audit")
            .with_description("Assess the reporting pipeline ahead of the Q1 close."),
    )
    .await?;
    projects += 1;

    let portal = project(
        services,
        &operator,
        CreateProjectRequest::new(contoso.client.id(), "Patient portal")
            .with_description("Self-service appointments and results.")
            .with_budget_cents(8_500_000),
    )
    .await?;
    staff(services, &operator, &portal, &riley).await?;
    advance(services, &operator, &portal, &[ProjectStatus::Active]).await?;
    services
        .projects
        .update_progress(&operator, portal.id(), 30)
        .await?;
    advance(services, &operator, &portal, &[ProjectStatus::OnHold]).await?;
    projects += 1;

    let review = project(
        services,
        &operator,
        CreateProjectRequest::new(contoso.client.id(), "Compliance review"),
    )
    .await?;
    staff(services, &operator, &review, &riley).await?;
    advance(
        services,
        &operator,
        &review,
        &[ProjectStatus::Active, ProjectStatus::Completed],
    )
    .await?;
    projects += 1;

    let conversations =
        seed_conversations(services, &northwind, &contoso, &morgan, &riley).await?;

    let users = 3 + northwind.people.len() + contoso.people.len();
    info!(users, projects, conversations, "loaded demo data");
    Ok(SeedOutcome::Loaded {
        users,
        projects,
        conversations,
    })
}

async fn seed_conversations(
    services: &Services,
    northwind: &Tenant,
    contoso: &Tenant,
    morgan: &User,
    riley: &User,
) -> Result<usize, SeedError> {
    let mut opened = 0;
    if let Some(jordan) = northwind.people.first() {
        let as_jordan = Actor::from(jordan);
        let (kickoff, _) = services
            .messaging
            .start_conversation(
                &as_jordan,
                StartConversationRequest::new("Replatform kick-off", vec![morgan.id()])
                    .with_opening_message("Can we walk through the migration plan this week?"),
            )
            .await?;
        services
            .messaging
            .post_message(
                &Actor::from(morgan),
                kickoff.id(),
                "Absolutely. I've shared a draft timeline; Thursday works for us.",
            )
            .await?;
        opened += 1;
    }
    if let Some(taylor) = contoso.people.first() {
        services
            .messaging
            .start_conversation(
                &Actor::from(riley),
                StartConversationRequest::new("Portal pause", vec![taylor.id()])
                    .with_opening_message(
                        "We've paused the portal while the vendor contract is renewed.",
                    ),
            )
            .await?;
        opened += 1;
    }
    Ok(opened)
}

async fn register(
    services: &Services,
    email: &str,
    name: &str,
    role: UserRole,
    client: Option<&Client>,
) -> Result<User, SeedError> {
    let mut request = RegisterUserRequest::new(email, name, role, DEMO_PASSWORD);
    if let Some(tenant) = client {
        request = request.for_client(tenant.id());
    }
    Ok(services.directory.register_user(request).await?)
}

async fn tenant(
    services: &Services,
    (name, slug): (&str, &str),
    people: &[(&str, &str)],
) -> Result<Tenant, SeedError> {
    let client = services.directory.register_client(name, slug).await?;
    let mut users = Vec::with_capacity(people.len());
    for (email, display_name) in people {
        let user = register(services, email, display_name, UserRole::Client, Some(&client)).await?;
        users.push(user);
    }
    Ok(Tenant {
        client,
        people: users,
    })
}

async fn project(
    services: &Services,
    operator: &Actor,
    request: CreateProjectRequest,
) -> Result<Project, SeedError> {
    Ok(services.projects.create(operator, request).await?)
}

async fn staff(
    services: &Services,
    operator: &Actor,
    project: &Project,
    member: &User,
) -> Result<(), SeedError> {
    services
        .projects
        .assign_member(operator, project.id(), member.id())
        .await?;
    Ok(())
}

async fn advance(
    services: &Services,
    operator: &Actor,
    project: &Project,
    path: &[ProjectStatus],
) -> Result<(), SeedError> {
    for status in path {
        services
            .projects
            .change_status(operator, project.id(), *status)
            .await?;
    }
    Ok(())
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests;
