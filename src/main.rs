//! Envios CLI application
//!
//! Command-line driver client: log in against the shipments backend, list
//! shipments by status and move them between delivery states.

use std::process;

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use envios_driver::auth::CredentialStore;
use envios_driver::cli::{
    Cli, Commands, handle_list, handle_login, handle_logout, handle_status, handle_statuses,
    handle_update,
};
use envios_driver::config::AppConfig;
use envios_driver::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        debug!("Command failed ({}): {:?}", e.category(), e);
        eprintln!("Error: {}", e);
        if e.is_recoverable() {
            eprintln!("This looks temporary; try again in a moment.");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);

    info!("Envios v{} starting", env!("CARGO_PKG_VERSION"));

    let store = CredentialStore::open_default()?;
    debug!("Credential file: {}", store.path().display());

    match cli.command {
        Commands::Login(args) => handle_login(args, &config, &store).await,
        Commands::Logout => handle_logout(&store),
        Commands::Status => handle_status(&config, &store).await,
        Commands::List(args) => handle_list(args, &config, &store).await,
        Commands::Update(args) => handle_update(args, &config, &store).await,
        Commands::Statuses => handle_statuses(),
    }
}

/// Initialize logging from CLI flags, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = match (&config.logging.level, cli.has_verbosity_flag()) {
        (Some(level), false) => level.clone(),
        _ => cli.log_level().to_string().to_lowercase(),
    };

    // RUST_LOG wins over both
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("envios_driver={}", log_level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
