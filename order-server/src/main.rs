use order_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(config.log_dir.as_deref());

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Starting order server"
    );

    let state = ServerState::initialize(&config)?;
    Server::with_state(config, state).run().await?;

    Ok(())
}
