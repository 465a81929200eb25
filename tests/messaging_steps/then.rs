//! Then steps for messaging BDD scenarios.

use super::world::{MessagingWorld, run_async};
use portico::messaging::{domain::MessagingDomainError, services::MessagingServiceError};
use portico::notification::domain::NotificationKind;
use rstest_bdd_macros::then;

#[then(r#""{name}" has {count:u64} unread messages"#)]
fn has_unread(world: &mut MessagingWorld, name: String, count: u64) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let unread = run_async(world.services.messaging.unread_total(&actor))
        .map_err(|err| eyre::eyre!("unread_total failed: {err}"))?;
    if unread != count {
        return Err(eyre::eyre!(
            "expected {name} to have {count} unread, found {unread}"
        ));
    }
    Ok(())
}

#[then(r#""{name}" cannot open the conversation"#)]
fn cannot_open(world: &mut MessagingWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let id = world.conversation()?.id();
    let result = run_async(world.services.messaging.get_conversation(&actor, id));
    if !matches!(result, Err(MessagingServiceError::ConversationNotFound(_))) {
        return Err(eyre::eyre!("expected conversation to be hidden, got {result:?}"));
    }
    Ok(())
}

#[then("starting the conversation fails because the tenants differ")]
fn start_fails_mixed_tenants(world: &MessagingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_start
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing start result in scenario world"))?;
    if !matches!(
        result,
        Err(MessagingServiceError::Domain(MessagingDomainError::MixedTenants))
    ) {
        return Err(eyre::eyre!("expected mixed tenant error, got {result:?}"));
    }
    Ok(())
}

#[then(r#""{name}" has a new message notification about "{subject}""#)]
fn has_notification(
    world: &mut MessagingWorld,
    name: String,
    subject: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let inbox = run_async(world.services.notifications.list(&actor, true))
        .map_err(|err| eyre::eyre!("listing notifications failed: {err}"))?;
    let found = inbox.iter().any(|notification| {
        notification.kind() == NotificationKind::NewMessage
            && notification.body().starts_with(&subject)
    });
    if !found {
        return Err(eyre::eyre!(
            "expected a new message notification about '{subject}' for {name}"
        ));
    }
    Ok(())
}
