//! Discord bot integration for packing and unpacking ZIP archives in chat.
//!
//! The bot listens for prefix commands in guild channels and DMs and for clicks on the
//! buttons it attaches to its own replies. It is initialized during server startup and
//! runs in a separate tokio task to avoid blocking the HTTP server.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability and channel metadata
//! - `GUILD_MESSAGES` - Messages in guild channels
//! - `DIRECT_MESSAGES` - Messages sent to the bot directly
//! - `MESSAGE_CONTENT` - Message text and attachments (privileged intent)

pub mod command;
pub mod handler;
pub mod permission;
pub mod reply;
pub mod start;
