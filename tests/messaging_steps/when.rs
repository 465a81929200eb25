//! When steps for messaging BDD scenarios.

use super::world::{MessagingWorld, run_async};
use eyre::WrapErr;
use portico::messaging::services::StartConversationRequest;
use rstest_bdd_macros::when;

#[when(r#""{sender}" starts a conversation "{subject}" with "{invitee}" saying "{text}""#)]
fn starts_conversation(
    world: &mut MessagingWorld,
    sender: String,
    subject: String,
    invitee: String,
    text: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&sender)?;
    let invited = world.person(&invitee)?.id();
    let request =
        StartConversationRequest::new(subject, vec![invited]).with_opening_message(text);
    let result = run_async(world.services.messaging.start_conversation(&actor, request));
    if let Ok((conversation, _)) = &result {
        world.conversation = Some(conversation.clone());
    }
    world.last_start = Some(result);
    Ok(())
}

#[when(r#""{name}" replies "{text}""#)]
fn replies(world: &mut MessagingWorld, name: String, text: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let id = world.conversation()?.id();
    run_async(world.services.messaging.post_message(&actor, id, &text))
        .wrap_err("post scenario reply")?;
    Ok(())
}

#[when(r#""{name}" marks the conversation read"#)]
fn marks_read(world: &mut MessagingWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let id = world.conversation()?.id();
    run_async(world.services.messaging.mark_read(&actor, id, None))
        .wrap_err("mark scenario conversation read")?;
    Ok(())
}
