use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Gateway events the bot subscribes to.
///
/// `MESSAGE_CONTENT` is a privileged intent and must be enabled in the Discord
/// Developer Portal, otherwise command text arrives empty.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Builds the Discord client without connecting it.
///
/// Building and starting are split so the caller can keep `client.http` for other
/// tasks before the gateway connection takes over the client.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `handler` - Event handler with database and archive dependencies
///
/// # Returns
/// - `Ok(Client)` - Configured client ready to start
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(config: &Config, handler: Handler) -> Result<Client, AppError> {
    let client = Client::builder(&config.discord_bot_token, intents())
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Runs the Discord client until the gateway connection ends.
///
/// Should be called from within a tokio::spawn task since it will not return while the
/// bot is connected.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
