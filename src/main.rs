use anyhow::{Context, Result};
use pipeline_monitor::cli::commands::{ServeCommand, ValidateCommand};
use pipeline_monitor::cli::output::*;
use pipeline_monitor::cli::{Cli, Command};
use pipeline_monitor::core::config::MonitorConfig;
use pipeline_monitor::core::PipelineRegistry;
use pipeline_monitor::metrics::MetricsExporter;
use pipeline_monitor::server::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    init_tracing(cli.verbose)?;

    match &cli.command {
        Command::Serve(cmd) => serve(cmd).await?,
        Command::Validate(cmd) => validate(cmd)?,
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "pipeline_monitor=debug,tower_http=debug"
    } else {
        "pipeline_monitor=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to set logging subscriber")
}

async fn serve(cmd: &ServeCommand) -> Result<()> {
    let config = match &cmd.file {
        Some(file) => MonitorConfig::from_file(file)
            .with_context(|| format!("Failed to load seed configuration from {}", file))?,
        None => MonitorConfig::demo(),
    };

    let registry = Arc::new(PipelineRegistry::from_config(&config)?);
    let exporter = Arc::new(MetricsExporter::new().context("Failed to create metrics exporter")?);
    let app = create_router(AppState::new(registry.clone(), exporter));

    let addr = cmd.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!(
        "{} Monitoring {} pipeline(s) on {}",
        ROCKET,
        style(registry.len()).cyan(),
        style(format!("http://{}", addr)).bold()
    );
    info!("Listening on {}", addr);
    info!("  Dashboard: http://{}/", addr);
    info!("  JSON API:  http://{}/pipeline", addr);
    info!("  Metrics:   http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn validate(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating seed configuration...", INFO);

    match MonitorConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Seed configuration is valid!", CHECK);
            println!("  Pipelines: {}", style(config.pipelines.len()).cyan());
            println!("  Stages: {}", style(config.stage_count()).cyan());
            for pipeline in &config.pipelines {
                println!("{}", format_pipeline(pipeline));
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
