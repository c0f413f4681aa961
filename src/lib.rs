pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod merge;
pub mod scheduler;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

pub use config::Config;
use db::Store;
use scheduler::Scheduler;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "daemon" | "-d" | "--daemon" => run_daemon(config).await,

        "sync" | "check" | "-c" => run_single_sync(config).await,

        "pokemon" | "p" => cmd_pokemon(&config).await,

        "list" | "ls" | "l" => cmd_list_users(&config).await,

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        _ => {
            println!("Unknown command: {}", args[1]);
            println!();
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Graphsync - Facebook Graph user mirror");
    println!("Keeps stored Graph profiles fresh and breeds novelty pokemon on the side");
    println!();
    println!("USAGE:");
    println!("  graphsync <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("  daemon            Run the web server and background scheduler");
    println!("  sync              Run one sync pass over all stored users");
    println!("  pokemon           Generate and store one random pokemon");
    println!("  list, ls          List all stored users");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  graphsync daemon              # Serve HTTP and run both jobs");
    println!("  graphsync sync                # Refresh every stored profile now");
    println!("  graphsync list                # Print id::name::username per user");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml to change the database path, schedule, or port.");
}

async fn run_daemon(config: Config) -> anyhow::Result<()> {
    info!(
        "Graphsync v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    let shared = Arc::new(SharedState::new(config.clone()).await?);
    let api_state = api::create_app_state(shared.clone());

    let scheduler = Scheduler::new(shared, config.scheduler.clone());
    let scheduler_handle = tokio::spawn(async move {
        if let Err(e) = scheduler.start().await {
            error!("Scheduler error: {}", e);
        }
    });

    let server_handle: Option<tokio::task::JoinHandle<()>> = if config.server.enabled {
        let port = config.server.port;
        info!("Starting web server on port {}", port);

        let app = api::router(api_state);
        let addr = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        Some(tokio::spawn(async move {
            info!("Web server running at http://0.0.0.0:{}", port);
            if let Err(e) = axum::serve(listener, app).await {
                error!("Web server error: {}", e);
            }
        }))
    } else {
        None
    };

    info!("Daemon running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    scheduler_handle.abort();
    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Daemon stopped");

    Ok(())
}

async fn run_single_sync(config: Config) -> anyhow::Result<()> {
    let shared = Arc::new(SharedState::new(config).await?);

    let report = shared.sync.sync_users().await?;
    println!(
        "✓ Sync complete: {} users, {} updated, {} skipped",
        report.total, report.synced, report.skipped
    );

    Ok(())
}

async fn cmd_pokemon(config: &Config) -> anyhow::Result<()> {
    let shared = SharedState::new(config.clone()).await?;

    let created = shared.pokemon.create_random().await?;
    println!(
        "✓ Created: {} (#{}, {})",
        created.name, created.number, created.poke_type
    );

    Ok(())
}

async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users stored.");
        println!();
        println!("Add one via the web UI: /add_user/?q_user=<name>");
        return Ok(());
    }

    println!("Stored Users ({} total)", users.len());
    println!("{:-<60}", "");

    for user in users {
        println!("{}::{}::{}", user.id, user.name, user.username);
    }

    Ok(())
}
