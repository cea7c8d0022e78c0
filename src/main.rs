mod model;
mod server;

use crate::server::{
    bot::{self, handler::Handler},
    config::Config,
    error::AppError,
    scheduler::archive_cleanup,
    service::fetch::AttachmentFetcher,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let settings = startup::setup_archive_settings(&config).await?;

    tracing::info!("Starting server");

    let handler = Handler::new(
        db.clone(),
        settings.clone(),
        AttachmentFetcher::new(http_client),
        config.app_url.clone(),
        config.max_upload_bytes,
    );
    let bot_client = bot::start::init_bot(&config, handler).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let scheduler_db = db.clone();
    let scheduler_settings = settings.clone();
    tokio::spawn(async move {
        if let Err(e) = archive_cleanup::start_scheduler(scheduler_db, scheduler_settings).await {
            tracing::error!("Archive cleanup scheduler error: {}", e);
        }
    });

    let router = server::router::router()
        .with_state(AppState::new(db, settings, config.app_url.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
