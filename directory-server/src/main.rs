use directory_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env and logging
    setup_environment()?;

    print_banner();
    tracing::info!("Directory server starting...");

    // 2. Configuration
    let config = Config::from_env()?;

    // 3. Backend, lookups, caches
    let state = ServerState::initialize(&config)?;

    // 4. Serve until Ctrl-C / SIGTERM
    if let Err(e) = Server::with_state(config, state).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
