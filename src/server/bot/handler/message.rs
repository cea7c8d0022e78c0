use chrono::Utc;
use serenity::all::{Attachment, Context, CreateAttachment, CreateMessage, Message};

use crate::server::{
    bot::{
        command::Command,
        handler::Handler,
        reply::{
            archive_components, archive_created_embed, archives_embed, error_embed, help_embed,
            select_uploads, unzip_embed,
        },
    },
    error::{archive::ArchiveError, AppError},
    model::archive::{ArchiveLocation, NamedFile},
    service::archive::{codec::flatten_name, ArchiveService},
};

/// Handle message creation in a guild channel or DM
///
/// Messages from bots and messages that are not a known command are ignored.
/// Command failures are logged and answered with an error embed.
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some(command) = Command::parse(&message.content) else {
        return;
    };

    tracing::debug!(
        "Command {:?} from user {} in channel {}",
        command,
        message.author.id,
        message.channel_id
    );

    let reply = match run_command(handler, &message, command).await {
        Ok(reply) => reply,
        Err(e) => {
            match &e {
                AppError::ArchiveErr(_) | AppError::FetchErr(_) | AppError::BadRequest(_) => {
                    tracing::warn!("Refused command from user {}: {}", message.author.id, e)
                }
                _ => tracing::error!("Failed to handle command from user {}: {}", message.author.id, e),
            }
            CreateMessage::new().embed(error_embed(&e.user_message()))
        }
    };

    if let Err(e) = message
        .channel_id
        .send_message(&ctx.http, reply.reference_message(&message))
        .await
    {
        tracing::error!(
            "Failed to send reply in channel {}: {}",
            message.channel_id,
            e
        );
    }
}

async fn run_command(
    handler: &Handler,
    message: &Message,
    command: Command,
) -> Result<CreateMessage, AppError> {
    match command {
        Command::Zip { name } => zip_attachments(handler, message, name.as_deref()).await,
        Command::Unzip => unzip_attachment(handler, message).await,
        Command::Archives => list_archives(handler, message).await,
        Command::Help => Ok(CreateMessage::new().embed(help_embed(
            &handler.settings.limits,
            handler.settings.ttl.num_hours(),
        ))),
    }
}

/// Downloads every attachment on the message and stores them as one archive.
///
/// Counts and declared sizes are checked before anything is downloaded.
async fn zip_attachments(
    handler: &Handler,
    message: &Message,
    name: Option<&str>,
) -> Result<CreateMessage, AppError> {
    let limits = handler.settings.limits;

    if message.attachments.is_empty() {
        return Err(ArchiveError::Empty.into());
    }
    if message.attachments.len() > limits.max_entries {
        return Err(ArchiveError::TooManyEntries {
            count: message.attachments.len(),
            limit: limits.max_entries,
        }
        .into());
    }
    let declared: u64 = message.attachments.iter().map(|a| u64::from(a.size)).sum();
    if declared > limits.max_total_bytes {
        return Err(ArchiveError::TotalTooLarge {
            size: declared,
            limit: limits.max_total_bytes,
        }
        .into());
    }

    let mut files = Vec::with_capacity(message.attachments.len());
    for attachment in &message.attachments {
        files.push(
            handler
                .fetcher
                .fetch_attachment(attachment, limits.max_entry_bytes)
                .await?,
        );
    }

    let location = ArchiveLocation {
        guild_id: message.guild_id.map(|id| id.get()),
        channel_id: message.channel_id.get(),
    };

    let created = ArchiveService::new(&handler.db, &handler.settings)
        .create_from_files(message.author.id.get(), location, name, files)
        .await?;

    let attach = created.archive.size_bytes <= handler.max_upload_bytes;
    let embed = archive_created_embed(&created.archive, &created.packed.entries, attach)?;

    let mut reply = CreateMessage::new()
        .embed(embed)
        .components(archive_components(&created.archive, &handler.app_url));

    if attach {
        reply = reply.add_file(CreateAttachment::bytes(
            created.packed.bytes,
            created.archive.file_name.clone(),
        ));
    }

    Ok(reply)
}

/// Downloads the message's `.zip` attachment, lists it and re-uploads what fits.
async fn unzip_attachment(handler: &Handler, message: &Message) -> Result<CreateMessage, AppError> {
    let attachment = find_zip_attachment(&message.attachments)
        .ok_or_else(|| AppError::BadRequest("Attach a .zip file to unpack.".to_string()))?;

    let NamedFile { name, data } = handler
        .fetcher
        .fetch_attachment(attachment, handler.settings.limits.max_total_bytes)
        .await?;

    let unpacked = ArchiveService::new(&handler.db, &handler.settings)
        .unpack(data)
        .await?;

    let uploads = select_uploads(&unpacked.files, handler.max_upload_bytes);

    tracing::info!(
        "Unpacked {} for user {}: {} entries, {} attached",
        name,
        message.author.id,
        unpacked.entries.len(),
        uploads.len()
    );

    let embed = unzip_embed(&name, &unpacked.entries, uploads.len());
    let files: Vec<CreateAttachment> = uploads
        .into_iter()
        .map(|extracted| {
            CreateAttachment::bytes(
                extracted.file.data.clone(),
                flatten_name(&extracted.file.name),
            )
        })
        .collect();

    Ok(CreateMessage::new().embed(embed).add_files(files))
}

async fn list_archives(handler: &Handler, message: &Message) -> Result<CreateMessage, AppError> {
    let archives = ArchiveService::new(&handler.db, &handler.settings)
        .list_for_owner(message.author.id.get(), Utc::now())
        .await?;

    Ok(CreateMessage::new().embed(archives_embed(&archives, &handler.app_url)))
}

/// First attachment whose name ends in `.zip`, ignoring case.
fn find_zip_attachment(attachments: &[Attachment]) -> Option<&Attachment> {
    attachments
        .iter()
        .find(|a| a.filename.to_ascii_lowercase().ends_with(".zip"))
}
