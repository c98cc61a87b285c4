use card_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 1. .env is optional
    let _ = dotenvy::dotenv();

    // 2. Configuration, then logging
    let config = Config::from_env()?;
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Card server starting..."
    );

    // 3. Serve until Ctrl-C
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
