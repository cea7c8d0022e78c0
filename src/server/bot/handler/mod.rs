use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Interaction, Message, Ready};
use serenity::async_trait;

use crate::server::service::{archive::ArchiveSettings, fetch::AttachmentFetcher};

pub mod interaction;
pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub settings: ArchiveSettings,
    pub fetcher: AttachmentFetcher,
    /// Public base URL for download links.
    pub app_url: String,
    /// Largest file the bot uploads back to a channel.
    pub max_upload_bytes: u64,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        settings: ArchiveSettings,
        fetcher: AttachmentFetcher,
        app_url: String,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            db,
            settings,
            fetcher,
            app_url,
            max_upload_bytes,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a message is sent in a channel the bot can see, including DMs
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }

    /// Called for slash commands, buttons and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Component(component) = interaction {
            interaction::handle_component(self, ctx, component).await;
        }
    }
}
