pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod scheduler;
pub mod services;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
pub use config::Config;
use domain::ImdbId;
use scheduler::{AppState, Scheduler};
use services::NormalizeError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        if let Some(port) = config.observability.metrics_port {
            builder
                .with_http_listener(([0, 0, 0, 0], port))
                .install()
                .context("Failed to install Prometheus exporter")?;
            info!("Prometheus exporter listening on port {}", port);
        } else {
            builder
                .install_recorder()
                .context("Failed to install Prometheus recorder")?;
            info!("Prometheus metrics recorder initialized");
        }
    }

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "normarr")?
            .extra_field("env", "production")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "daemon" | "-d" | "--daemon" => run_daemon(config).await,

        "check" | "-c" | "--check" => run_single_check(config).await,

        "discover" | "d" => cmd_discover(&config).await,

        "normalize" | "n" => {
            if args.len() < 3 {
                println!("Usage: normarr normalize <imdbId>");
                println!("Example: normarr normalize tt0944947");
                return Ok(());
            }
            cmd_normalize(&config, &args[2]).await
        }

        "status" | "s" => cmd_status(&config).await,

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
    println!("Normarr - Title Catalog Normalizer");
    println!("Flattens a relational title catalog into per-title documents");
    println!();
    println!("USAGE:");
    println!("  normarr <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  discover          Scan the catalog and schedule normalization jobs");
    println!("  normalize <id>    Normalize a single title by its identifier");
    println!("  status            Show database health and pending job count");
    println!("  check             Run one discovery pass and drain the queue");
    println!("  daemon            Run as background daemon with scheduler + worker");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  normarr discover                  # Schedule every eligible title");
    println!("  normarr normalize tt0944947       # Normalize one title now");
    println!("  normarr daemon                    # Periodic discovery + queue worker");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml to configure database, scheduler, observability.");
}

async fn run_daemon(config: Config) -> anyhow::Result<()> {
    info!(
        "Normarr v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    let state = Arc::new(AppState::new(config.clone()).await?);
    let scheduler = Scheduler::new(Arc::clone(&state), config.scheduler.clone());

    let scheduler_handle = tokio::spawn(async move {
        if let Err(e) = scheduler.start().await {
            error!("Scheduler error: {}", e);
        }
    });

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
    info!("Daemon stopped");

    Ok(())
}

async fn run_single_check(config: Config) -> anyhow::Result<()> {
    info!("Running single check...");

    let state = Arc::new(AppState::new(config.clone()).await?);
    let scheduler = Scheduler::new(Arc::clone(&state), config.scheduler.clone());

    scheduler.run_once().await?;

    info!("Check complete");
    Ok(())
}

async fn cmd_discover(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone()).await?;

    let count = state.discovery.run().await?;

    println!("✓ Scheduled {} titles for normalization", count);
    println!("Run 'normarr daemon' to process the queue.");

    Ok(())
}

async fn cmd_normalize(config: &Config, id: &str) -> anyhow::Result<()> {
    let state = AppState::new(config.clone()).await?;

    match state.normalizer.execute(&ImdbId::new(id)).await {
        Ok(()) => {
            println!("✓ Normalized: {}", id);
            Ok(())
        }
        Err(NormalizeError::NotFound(_)) => {
            println!("Title {} not found in the source catalog.", id);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone()).await?;

    state.store.ping().await?;
    let pending = state.queue.pending_count().await?;

    println!("Database: ok");
    println!("Pending normalization jobs: {}", pending);

    Ok(())
}
