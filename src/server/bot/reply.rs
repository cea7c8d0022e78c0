//! Embed, button and attachment builders for bot replies.
//!
//! Listing text is built by plain functions so it can be checked without Discord
//! types, then dropped into embeds here.

use chrono::{DateTime, Utc};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, Timestamp,
};

use crate::server::{
    bot::command::ButtonAction,
    error::{archive::format_bytes, internal::InternalError, AppError},
    model::archive::{Archive, ArchiveLimits, EntrySummary, ExtractedFile},
};

const SUCCESS_COLOR: u32 = 0x2ECC71;
const INFO_COLOR: u32 = 0x3498DB;
const ERROR_COLOR: u32 = 0xE74C3C;

/// Discord caps embed descriptions at 4096 characters.
const MAX_DESCRIPTION_CHARS: usize = 4000;
/// Discord accepts at most 10 attachments per message.
pub const MAX_UPLOAD_FILES: usize = 10;

const SHA_PREFIX_CHARS: usize = 12;

/// Builds the reply for a newly created archive.
///
/// # Arguments
/// - `archive` - Stored archive record
/// - `entries` - Entry listing from packing
/// - `attached` - Whether the archive file is attached to the reply
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed ready for posting
/// - `Err(AppError::InternalErr)` - Creation time cannot be expressed as a Discord timestamp
pub fn archive_created_embed(
    archive: &Archive,
    entries: &[EntrySummary],
    attached: bool,
) -> Result<CreateEmbed, AppError> {
    let mut embed = CreateEmbed::new()
        .title(format!("📦 {}", archive.file_name))
        .color(SUCCESS_COLOR)
        .description(entry_listing(entries, MAX_DESCRIPTION_CHARS))
        .field("Files", archive.entry_count.to_string(), true)
        .field("Size", format_bytes(archive.size_bytes), true)
        .field("Expires", relative_time(archive.expires_at), true)
        .field(
            "SHA-256",
            format!("`{}`", archive.sha256),
            false,
        );

    if !attached {
        embed = embed.field(
            "Download",
            "Too large to attach here, use the download button.",
            false,
        );
    }

    Ok(embed
        .footer(CreateEmbedFooter::new(format!("Archive {}", archive.token)))
        .timestamp(discord_timestamp(archive.created_at)?))
}

/// Download link and delete button for an archive.
pub fn archive_components(archive: &Archive, app_url: &str) -> Vec<CreateActionRow> {
    let delete = ButtonAction::DeleteArchive {
        token: archive.token.clone(),
    };

    vec![CreateActionRow::Buttons(vec![
        CreateButton::new_link(archive.download_url(app_url)).label("Download"),
        CreateButton::new(delete.custom_id())
            .label("Delete")
            .style(ButtonStyle::Danger),
    ])]
}

/// Builds the reply for an unpacked archive.
///
/// # Arguments
/// - `file_name` - Name of the uploaded archive
/// - `entries` - Entry listing from extraction
/// - `uploaded` - Number of extracted files attached to the reply
pub fn unzip_embed(file_name: &str, entries: &[EntrySummary], uploaded: usize) -> CreateEmbed {
    let files = entries.iter().filter(|e| !e.is_dir).count();
    let total: u64 = entries.iter().map(|e| e.size_bytes).sum();

    let mut embed = CreateEmbed::new()
        .title(format!("📂 {}", file_name))
        .color(INFO_COLOR)
        .description(entry_listing(entries, MAX_DESCRIPTION_CHARS))
        .field("Files", files.to_string(), true)
        .field("Uncompressed", format_bytes(total), true);

    if uploaded < files {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Attached {} of {} files",
            uploaded, files
        )));
    }

    embed
}

/// Lists a user's live archives.
pub fn archives_embed(archives: &[Archive], app_url: &str) -> CreateEmbed {
    let description = if archives.is_empty() {
        "You have no stored archives.".to_string()
    } else {
        let lines: Vec<String> = archives
            .iter()
            .map(|archive| {
                format!(
                    "[{}]({}) - {} files, {} - expires {}",
                    archive.file_name,
                    archive.download_url(app_url),
                    archive.entry_count,
                    format_bytes(archive.size_bytes),
                    relative_time(archive.expires_at)
                )
            })
            .collect();
        truncate_lines(&lines, MAX_DESCRIPTION_CHARS)
    };

    CreateEmbed::new()
        .title("Your archives")
        .color(INFO_COLOR)
        .description(description)
}

pub fn help_embed(limits: &ArchiveLimits, ttl_hours: i64) -> CreateEmbed {
    CreateEmbed::new()
        .title("Archivist")
        .color(INFO_COLOR)
        .field(
            "!zip [name]",
            "Attach files to the message to pack them into a ZIP archive.",
            false,
        )
        .field(
            "!unzip",
            "Attach a .zip file to list its contents and get the files back.",
            false,
        )
        .field("!archives", "List your stored archives.", false)
        .field(
            "Limits",
            format!(
                "{} files, {} per file, {} total. Archives are kept for {} hours.",
                limits.max_entries,
                format_bytes(limits.max_entry_bytes),
                format_bytes(limits.max_total_bytes),
                ttl_hours
            ),
            false,
        )
}

pub fn error_embed(message: &str) -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR).description(message)
}

pub fn deleted_embed(file_name: &str) -> CreateEmbed {
    CreateEmbed::new()
        .color(INFO_COLOR)
        .description(format!("🗑️ `{}` was deleted.", file_name))
}

/// Renders one line per entry, truncated to fit `max_chars`.
///
/// Files show size and digest prefix when known; directories show a trailing slash only.
pub fn entry_listing(entries: &[EntrySummary], max_chars: usize) -> String {
    if entries.is_empty() {
        return "Archive is empty.".to_string();
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            if entry.is_dir {
                return format!("`{}`", entry.name);
            }
            match &entry.sha256 {
                Some(sha) => format!(
                    "`{}` - {} - `{}`",
                    entry.name,
                    format_bytes(entry.size_bytes),
                    &sha[..sha.len().min(SHA_PREFIX_CHARS)]
                ),
                None => format!("`{}` - {}", entry.name, format_bytes(entry.size_bytes)),
            }
        })
        .collect();

    truncate_lines(&lines, max_chars)
}

/// Joins lines with newlines, replacing the tail with `...and N more` when too long.
fn truncate_lines(lines: &[String], max_chars: usize) -> String {
    let mut out = String::new();

    for (index, line) in lines.iter().enumerate() {
        let remaining = lines.len() - index;
        let more = format!("...and {} more", remaining);

        let needed = line.chars().count() + usize::from(!out.is_empty());
        // Keep room for the "more" line unless this is the last one
        let reserve = if remaining > 1 { more.len() + 1 } else { 0 };

        if out.chars().count() + needed + reserve > max_chars {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&more);
            return out;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }

    out
}

/// Picks extracted files to attach, in archive order, within Discord's per-message limits.
///
/// Files that would push the total past `max_bytes` are skipped; smaller later files
/// may still fit.
pub fn select_uploads(files: &[ExtractedFile], max_bytes: u64) -> Vec<&ExtractedFile> {
    let mut selected = Vec::new();
    let mut total: u64 = 0;

    for file in files {
        if selected.len() == MAX_UPLOAD_FILES {
            break;
        }
        let size = file.file.data.len() as u64;
        if total + size > max_bytes {
            continue;
        }
        total += size;
        selected.push(file);
    }

    selected
}

fn relative_time(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

fn discord_timestamp(at: DateTime<Utc>) -> Result<Timestamp, AppError> {
    Timestamp::from_unix_timestamp(at.timestamp()).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: at.timestamp(),
            reason: e.to_string(),
        }
        .into()
    })
}
