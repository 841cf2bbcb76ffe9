pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use db::Store;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder();
        for (key, value) in &config.observability.loki_labels {
            builder = builder.label(key, value)?;
        }

        let (layer, task) = builder.extra_field("env", "production")?.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server(config, prometheus_handle).await,

        Some(Commands::Init) => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        Some(Commands::Seed) => cmd_seed(&config).await,

        Some(Commands::Waitlist) => cmd_waitlist(&config).await,

        Some(Commands::Areas) => cmd_areas(&config).await,

        Some(Commands::Status) => cmd_status(&config).await,

        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "LocalPulse v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;
    let state = api::create_app_state(config, prometheus_handle).await?;
    let app = api::router(state).await;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("🌐 Web Server running at http://0.0.0.0:{port}");
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {e}");
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {e}");
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    db::seed::seed_demo(&store).await?;

    println!("✓ Demo data inserted.");
    println!("Run 'localpulse serve' and open the dashboard to browse it.");

    Ok(())
}

async fn cmd_waitlist(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let entries = store.list_waitlist().await?;

    if entries.is_empty() {
        println!("No waitlist signups yet.");
        return Ok(());
    }

    println!("Waitlist Signups ({} total)", entries.len());
    println!("{:-<70}", "");

    for entry in entries {
        println!("• {}", entry.email);
        println!(
            "  Market: {} | Type: {} | Signed up: {}",
            entry.market_interest.as_deref().unwrap_or("?"),
            entry.business_type.as_deref().unwrap_or("?"),
            entry.created_at
        );
    }

    Ok(())
}

async fn cmd_areas(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let areas = store.list_tracked_areas().await?;

    if areas.is_empty() {
        println!("No tracked areas configured.");
        println!();
        println!("POST /api/tracked-areas or run 'localpulse seed' to add some.");
        return Ok(());
    }

    println!("Tracked Areas ({} total)", areas.len());
    println!("{:-<70}", "");

    for area in areas {
        let badge = if area.last_scan.is_some() {
            "Active"
        } else {
            "Pending"
        };

        println!("• {} ({})", area.name, area.location);
        println!("  Status: {badge} | Added: {}", area.created_at);
    }

    Ok(())
}

async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    println!("LocalPulse v{}", env!("CARGO_PKG_VERSION"));
    println!("{:-<70}", "");
    println!("Tracked areas:    {}", store.count_tracked_areas().await?);
    println!("Businesses:       {}", store.count_businesses().await?);
    println!("Alerts:           {}", store.count_alerts().await?);
    println!("Waitlist signups: {}", store.count_waitlist().await?);

    Ok(())
}
