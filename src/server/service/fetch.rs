//! Attachment downloads over the shared HTTP client.
//!
//! Only HTTPS links on Discord's attachment hosts are fetched, and bodies are read in
//! chunks so a response larger than the limit is abandoned as soon as it crosses it.

use serenity::all::Attachment;
use url::Url;

use crate::server::{error::fetch::FetchError, model::archive::NamedFile};

const ALLOWED_HOSTS: [&str; 2] = ["cdn.discordapp.com", "media.discordapp.net"];

#[derive(Clone)]
pub struct AttachmentFetcher {
    client: reqwest::Client,
}

impl AttachmentFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Downloads a message attachment into memory.
    ///
    /// The declared attachment size is checked before any request is made.
    ///
    /// # Arguments
    /// - `attachment` - Attachment from a Discord message
    /// - `max_bytes` - Largest body accepted
    ///
    /// # Returns
    /// - `Ok(NamedFile)` - Attachment name and content
    /// - `Err(FetchError::TooLarge)` - Declared or received size exceeds `max_bytes`
    /// - `Err(FetchError)` - URL refused, non-success status, or transport failure
    pub async fn fetch_attachment(
        &self,
        attachment: &Attachment,
        max_bytes: u64,
    ) -> Result<NamedFile, FetchError> {
        if u64::from(attachment.size) > max_bytes {
            return Err(FetchError::TooLarge {
                name: attachment.filename.clone(),
                limit: max_bytes,
            });
        }

        let data = self
            .fetch(&attachment.url, &attachment.filename, max_bytes)
            .await?;

        tracing::debug!(
            "Fetched attachment {} ({} bytes)",
            attachment.filename,
            data.len()
        );

        Ok(NamedFile::new(attachment.filename.clone(), data))
    }

    /// Downloads `url` into memory, refusing bodies larger than `max_bytes`.
    pub async fn fetch(&self, url: &str, name: &str, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
        let url = validate_url(url)?;
        self.download(url, name, max_bytes).await
    }

    /// Reads the body of an already validated URL.
    ///
    /// The declared content length is checked first, then the running total of
    /// received chunks.
    async fn download(&self, url: Url, name: &str, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let too_large = || FetchError::TooLarge {
            name: name.to_string(),
            limit: max_bytes,
        };

        let declared = response.content_length();
        if declared.is_some_and(|len| len > max_bytes) {
            return Err(too_large());
        }

        let mut body = Vec::with_capacity(declared.unwrap_or(0) as usize);
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

/// Parses `url` and checks it points at a Discord attachment host over HTTPS.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|_| FetchError::DisallowedUrl(url.to_string()))?;

    let host_allowed = parsed
        .host_str()
        .is_some_and(|host| ALLOWED_HOSTS.contains(&host));

    if parsed.scheme() != "https" || !host_allowed || parsed.port().is_some() {
        return Err(FetchError::DisallowedUrl(url.to_string()));
    }

    Ok(parsed)
}
