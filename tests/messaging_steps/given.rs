//! Given steps for messaging BDD scenarios.

use super::world::{MessagingWorld, SCENARIO_PASSWORD, email_for, run_async};
use eyre::WrapErr;
use portico::directory::{domain::UserRole, services::RegisterUserRequest};
use rstest_bdd_macros::given;

#[given(r#"a client organisation "{client}""#)]
fn a_client_organisation(world: &mut MessagingWorld, client: String) -> Result<(), eyre::Report> {
    let slug = client.to_lowercase();
    let created = run_async(world.services.directory.register_client(&client, &slug))
        .wrap_err("register scenario client")?;
    world.clients.insert(client, created);
    Ok(())
}

#[given(r#""{name}" works for "{client}""#)]
fn works_for(
    world: &mut MessagingWorld,
    name: String,
    client: String,
) -> Result<(), eyre::Report> {
    let tenant = world
        .clients
        .get(&client)
        .ok_or_else(|| eyre::eyre!("no client named '{client}' in scenario world"))?;
    let request = RegisterUserRequest::new(
        email_for(&name, tenant.slug().as_str()),
        name.clone(),
        UserRole::Client,
        SCENARIO_PASSWORD,
    )
    .for_client(tenant.id());
    let user = run_async(world.services.directory.register_user(request))
        .wrap_err("register scenario client user")?;
    world.people.insert(name, user);
    Ok(())
}

#[given(r#""{name}" is an employee"#)]
fn is_an_employee(world: &mut MessagingWorld, name: String) -> Result<(), eyre::Report> {
    let request = RegisterUserRequest::new(
        email_for(&name, "portico"),
        name.clone(),
        UserRole::Employee,
        SCENARIO_PASSWORD,
    );
    let user = run_async(world.services.directory.register_user(request))
        .wrap_err("register scenario employee")?;
    world.people.insert(name, user);
    Ok(())
}
