//! Test factory for creating Serenity Attachment objects.

use serenity::all::Attachment;

/// Creates a test Serenity Attachment hosted on Discord's CDN.
///
/// The URL is derived from the attachment ID and file name the same way Discord
/// builds CDN links.
///
/// # Arguments
/// - `attachment_id` - Discord attachment ID (snowflake)
/// - `filename` - File name as uploaded
/// - `size` - Declared size in bytes
///
/// # Panics
/// - If the JSON cannot be deserialized into an Attachment (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let attachment = create_test_attachment(123456789, "notes.txt", 42);
/// assert_eq!(attachment.size, 42);
/// ```
pub fn create_test_attachment(attachment_id: u64, filename: &str, size: u32) -> Attachment {
    let url = format!(
        "https://cdn.discordapp.com/attachments/800000000000000000/{}/{}",
        attachment_id, filename
    );

    serde_json::from_value(serde_json::json!({
        "id": attachment_id.to_string(),
        "filename": filename,
        "size": size,
        "url": url,
        "proxy_url": url.replace("cdn.discordapp.com", "media.discordapp.net"),
        "content_type": null,
        "ephemeral": false,
    }))
    .expect("Failed to create test attachment - invalid JSON structure")
}
