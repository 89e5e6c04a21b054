/**
 * docchat Server Entry Point
 *
 * Loads `.env`, installs logging, reads the configuration and runs the
 * server until Ctrl+C / SIGTERM. An occupied port exits with status 1.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use docchat::backend::server::{run, LifecycleError, ServerConfig};
    use tracing_subscriber::EnvFilter;

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("docchat=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        "Starting docchat server on {}:{} ({})",
        config.host,
        config.port,
        config.environment
    );

    match run(config).await {
        Ok(()) => Ok(()),
        Err(LifecycleError::AddrInUse(addr)) => {
            tracing::error!("Port {} is already in use, exiting", addr.port());
            eprintln!("Port {} is already in use", addr.port());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin docchat-server --features ssr");
    std::process::exit(1);
}
