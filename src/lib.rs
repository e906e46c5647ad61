pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, DatasetCommands, MetadataCommands};
pub use config::Config;
use models::dataset::NewDataset;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        return cmd_init();
    }

    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    init_tracing(&config)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve => run_server(config, prometheus_handle).await,

        Commands::Search { query, limit } => {
            cli::cmd_search(config, &query.join(" "), limit).await
        }

        Commands::Tile { dataset, z, x, file } => cli::cmd_tile(&config, &dataset, z, x, &file).await,

        Commands::Popular => cli::cmd_popular(&config).await,

        Commands::Datasets { command } => match command {
            DatasetCommands::List => cli::cmd_datasets_list(&config).await,
            DatasetCommands::Register {
                slug,
                title,
                min_zoom,
                max_zoom,
                tile_size,
                status,
                description,
                mission,
            } => {
                let dataset = NewDataset {
                    tiles_generated: status == "completed",
                    description,
                    source_mission: mission,
                    tile_size,
                    min_zoom,
                    max_zoom,
                    processing_status: status,
                    ..NewDataset::new(&slug, &title)
                };
                cli::cmd_datasets_register(&config, dataset).await
            }
        },

        Commands::Metadata { command } => match command {
            MetadataCommands::List { dataset } => {
                cli::cmd_metadata_list(&config, dataset.as_deref()).await
            }
            MetadataCommands::Add {
                dataset,
                filename,
                size,
                width,
                height,
                bands,
                url,
            } => {
                let image = cli::SourceImage {
                    filename,
                    file_size: size,
                    width,
                    height,
                    bands,
                    nasa_api_url: url,
                };
                cli::cmd_metadata_add(&config, &dataset, image).await
            }
        },

        Commands::Init => cmd_init(),
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
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
            builder = builder.label(key.as_str(), value.as_str())?;
        }
        let (layer, task) = builder.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Created config.toml with default settings");
    } else {
        println!("config.toml already exists");
    }
    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Orrery v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.server.enabled {
        warn!("HTTP server disabled in config (server.enabled = false)");
        return Ok(());
    }

    let port = config.server.port;
    let api_state = api::create_app_state_from_config(config, prometheus_handle).await?;

    let app = api::router(api_state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
