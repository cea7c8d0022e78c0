use thiserror::Error;

/// Failures while downloading an attachment.
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL is not an HTTPS link on one of Discord's attachment hosts.
    #[error("Refusing to fetch '{0}'")]
    DisallowedUrl(String),

    /// Remote responded with a non-success status.
    #[error("Fetching '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// Body is, or grew, larger than allowed.
    #[error("Download of '{name}' exceeds {limit} bytes")]
    TooLarge { name: String, limit: u64 },

    /// Transport failure.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    /// Message shown to the user in chat.
    pub fn user_message(&self) -> String {
        match self {
            Self::DisallowedUrl(_) => "Only files uploaded to Discord can be used.".to_string(),
            Self::TooLarge { name, limit } => format!(
                "`{}` is too large (limit {}).",
                name,
                super::archive::format_bytes(*limit)
            ),
            Self::Status { .. } | Self::Request(_) => {
                "Couldn't download one of the attachments, please try again.".to_string()
            }
        }
    }
}
