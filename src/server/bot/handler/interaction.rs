//! Button interaction handling.
//!
//! The only component the bot posts is the delete button on archive replies. Clicks
//! are checked against the archive owner and the clicker's guild permissions before
//! anything is removed.

use chrono::Utc;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::server::{
    bot::{
        command::ButtonAction,
        handler::Handler,
        permission::can_delete_archive,
        reply::{deleted_embed, error_embed},
    },
    error::AppError,
    service::archive::ArchiveService,
};

/// Handles a message component interaction.
///
/// Unknown custom ids are logged and ignored. Failures are logged and, when
/// possible, answered with an ephemeral error.
pub async fn handle_component(handler: &Handler, ctx: Context, component: ComponentInteraction) {
    let Some(action) = ButtonAction::parse(&component.data.custom_id) else {
        tracing::debug!(
            "Ignoring component with unknown custom id {}",
            component.data.custom_id
        );
        return;
    };

    let response = match handle_action(handler, &component, action).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                "Failed to handle button click from user {}: {}",
                component.user.id,
                e
            );
            ephemeral(&e.user_message())
        }
    };

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to interaction {}: {}", component.id, e);
    }
}

async fn handle_action(
    handler: &Handler,
    component: &ComponentInteraction,
    action: ButtonAction,
) -> Result<CreateInteractionResponse, AppError> {
    match action {
        ButtonAction::DeleteArchive { token } => delete_archive(handler, component, &token).await,
    }
}

async fn delete_archive(
    handler: &Handler,
    component: &ComponentInteraction,
    token: &str,
) -> Result<CreateInteractionResponse, AppError> {
    let service = ArchiveService::new(&handler.db, &handler.settings);

    let Some(archive) = service.get(token, Utc::now()).await? else {
        return Ok(ephemeral("That archive no longer exists."));
    };

    let user_id = component.user.id.get();
    let permissions = component.member.as_ref().and_then(|m| m.permissions);

    if !can_delete_archive(archive.owner_id, user_id, permissions) {
        tracing::warn!(
            "User {} tried to delete archive {} owned by {}",
            user_id,
            archive.token,
            archive.owner_id
        );
        return Ok(ephemeral(
            "Only the archive owner or a moderator can delete it.",
        ));
    }

    if !service.delete(token).await? {
        return Ok(ephemeral("That archive no longer exists."));
    }

    Ok(deleted_update(&archive.file_name))
}

/// Replaces the archive reply with a deletion notice, dropping its buttons and attached file.
fn deleted_update(file_name: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(deleted_embed(file_name))
            .components(vec![])
            .files(Vec::new()),
    )
}

fn ephemeral(message: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(error_embed(message))
            .ephemeral(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Expected: message update with no components and an empty attachment list
    #[test]
    fn deleted_update_clears_buttons_and_attachments() {
        let payload = serde_json::to_value(deleted_update("logs.zip")).unwrap();

        assert_eq!(payload["type"], json!(7));
        assert_eq!(payload["data"]["components"], json!([]));
        assert_eq!(payload["data"]["attachments"], json!([]));
        assert!(payload["data"]["embeds"][0]["description"]
            .as_str()
            .unwrap()
            .contains("logs.zip"));
    }
}
