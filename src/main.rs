use tracing::info;
use verifier::{api::Server, config::Config};

/// The main entry point for the verifier application.
///
/// This function initializes logging, loads the application configuration,
/// and starts the verification endpoint.
#[tokio::main] // Marks the async main function to be run by the Tokio runtime.
async fn main() -> anyhow::Result<()> {
    // Initialize logging using tracing_subscriber.
    // This sets up a default formatter that prints logs to stdout.
    tracing_subscriber::fmt::init();

    // Load the application configuration from the specified TOML file.
    let config = Config::load("config/default.toml")?;
    info!("Verifier starting with config: {:?}", config);

    // Create the API server hosting the verification endpoint.
    // It builds the validator from the configured contract rules.
    let server = Server::new(config);

    // Start the server. This binds to the configured port and serves
    // verification requests until the process is stopped.
    server.start().await?;

    Ok(())
}
