//! Item store service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use item_store::api::docs::openapi_json;
use item_store::api::{create_router, AppState};
use item_store::config::Config;
use item_store::error::ServiceError;
use item_store::metrics;
use item_store::store::ItemStore;
use item_store::utils::shutdown_signal;

/// In-memory item catalog HTTP service.
#[derive(Parser, Debug)]
#[command(name = "item-store")]
#[command(about = "CRUD HTTP service over an in-memory item catalog")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address (overrides HOST).
    #[arg(long)]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document to stdout.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("item_store=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Openapi) => cmd_openapi(),
        Some(Command::Serve { port, host }) => cmd_serve(port, host).await,
        None => cmd_serve(args.port, args.host).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ITEM STORE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Environment: {}", config.environment);
    println!("  Seed Items: {}", config.seed_items);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the OpenAPI document.
fn cmd_openapi() -> anyhow::Result<()> {
    println!("{}", openapi_json().map_err(ServiceError::from)?);
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>, host_override: Option<String>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ServiceError::from(e)
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(host) = host_override {
        config.host = host;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    info!("Environment: {}", config.environment);

    let store = if config.seed_items {
        ItemStore::new()
    } else {
        ItemStore::empty()
    };
    if store.is_empty() {
        info!("Item store initialized empty");
    } else {
        info!("Item store initialized with {} items", store.len());
    }

    // Create app state
    let mut app_state = AppState::new(store, config.environment.as_str());
    match metrics::install_recorder() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    // Start HTTP server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("HTTP server stopped");
    Ok(())
}
