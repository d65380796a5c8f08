use log::info;
use recipe_relay::{router, AppConfig, RelayBuilder, RelayError};

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    config.log_summary();

    let app = router(RelayBuilder::new().config(config.clone()).build()?);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("recipe-relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("recipe-relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
