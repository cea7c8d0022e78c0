//! Chat command and button parsing.
//!
//! Commands are plain messages starting with `!`. Anything that does not name a known
//! verb is ignored so ordinary conversation never triggers a reply.

pub const PREFIX: char = '!';

const DELETE_ARCHIVE_PREFIX: &str = "archive:delete:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pack the message's attachments, optionally under a chosen name.
    Zip { name: Option<String> },
    /// Unpack the message's `.zip` attachment.
    Unzip,
    /// List the caller's live archives.
    Archives,
    Help,
}

impl Command {
    pub fn parse(content: &str) -> Option<Self> {
        let rest = content.trim().strip_prefix(PREFIX)?;

        let (verb, args) = match rest.split_once(char::is_whitespace) {
            Some((verb, args)) => (verb, args.trim()),
            None => (rest, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "zip" => Some(Self::Zip {
                name: (!args.is_empty()).then(|| args.to_string()),
            }),
            "unzip" => Some(Self::Unzip),
            "archives" => Some(Self::Archives),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Action encoded in a message component's custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    DeleteArchive { token: String },
}

impl ButtonAction {
    pub fn parse(custom_id: &str) -> Option<Self> {
        let token = custom_id.strip_prefix(DELETE_ARCHIVE_PREFIX)?;
        if token.is_empty() {
            return None;
        }

        Some(Self::DeleteArchive {
            token: token.to_string(),
        })
    }

    pub fn custom_id(&self) -> String {
        match self {
            Self::DeleteArchive { token } => format!("{}{}", DELETE_ARCHIVE_PREFIX, token),
        }
    }
}
