pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use constants::{intervals, limits};
use models::MediaType;
use services::CarouselRotator;
use state::SharedState;

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

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_daemon(config, prometheus_handle).await,

        Some(Commands::Search { query }) => cmd_search(config, &query.join(" ")).await,

        Some(Commands::Trending { tv, limit, watch }) => {
            cmd_trending(config, tv, limit, watch).await
        }

        Some(Commands::InitConfig) => {
            if Config::create_default_if_missing()? {
                println!("Created config.toml");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }

        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_daemon(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "Trendarr v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    let api_state = api::create_app_state_from_config(config.clone(), prometheus_handle).await?;

    let server_handle: Option<tokio::task::JoinHandle<()>> = if config.server.enabled {
        let port = config.server.port;
        info!("Starting Web API on port {}", port);

        let app = api::router(api_state).await;
        let addr = format!("0.0.0.0:{}", port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        Some(tokio::spawn(async move {
            info!("Web Server running at http://0.0.0.0:{}", port);
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

    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Daemon stopped");

    Ok(())
}

async fn cmd_search(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let results = state
        .search_service
        .search(query)
        .await
        .map_err(|e| anyhow::anyhow!("Search failed: {e}"))?;

    if results.is_empty() {
        println!("No results for \"{}\"", query);
        return Ok(());
    }

    println!("Results for \"{}\":", query);
    println!("{:-<70}", "");
    for item in results.iter().take(20) {
        let year = item
            .release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
            .unwrap_or("????");
        let rating = item
            .vote_average
            .map_or_else(|| "  - ".to_string(), |v| format!("{v:4.1}"));
        println!(
            "  [{:>5}] {} | {} ({}) | {}",
            item.id, item.media_type, item.title, year, rating
        );
    }

    Ok(())
}

async fn cmd_trending(
    config: Config,
    tv: bool,
    limit: Option<usize>,
    watch: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let media_type = if tv { MediaType::Tv } else { MediaType::Movie };

    let entries = state
        .trending_service
        .top(media_type, limit.unwrap_or(limits::LIST_TRENDING))
        .await?;

    if entries.is_empty() {
        println!("No trending {} yet. Counters fill in as searches happen.", media_type);
        return Ok(());
    }

    println!("Trending {} (top {}):", media_type, entries.len());
    println!("{:-<70}", "");
    for (rank, entry) in entries.iter().enumerate() {
        println!("  {:>2}. {:>5} searches | {}", rank + 1, entry.count, entry.title);
    }

    if !watch || entries.len() < 2 {
        return Ok(());
    }

    println!();
    println!("Watching carousel rotation. Press Ctrl+C to stop.");

    let mut rotator = CarouselRotator::new(intervals::CAROUSEL_ADVANCE);
    rotator.set_len(entries.len());
    let mut index_rx = rotator.watch_index();

    println!("  » {}", entries[rotator.active_index()].title);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            changed = index_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let index = *index_rx.borrow();
                println!("  » {}", entries[index].title);
            }
        }
    }

    Ok(())
}
