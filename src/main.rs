use anyhow::Context;
use offshore_runner::adapters::inbound::FilesystemJobSource;
use offshore_runner::adapters::outbound::{init_run_logger, spawn_buffered_logger, write_summary_json, CommandEngine};
use offshore_runner::application::BatchService;
use offshore_runner::domains::logger::parse_level;
use offshore_runner::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "offshore-runner.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `log` records belong to fast_log, so no LogTracer bridge is installed here.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::load(Some(config_path.as_path())).with_context(|| format!("loading {}", config_path.display()))?;
    info!(config = %config_path.display(), "configuration loaded");

    let level = parse_level(&config.logging.level);
    let mut logger = init_run_logger(config.logging.file.as_deref(), level);
    let mut drain = None;
    if let Some(capacity) = config.logging.buffer_capacity {
        let (buffered, handle) = spawn_buffered_logger(logger, capacity);
        logger = buffered;
        drain = Some(handle);
    }

    let service = BatchService::new(
        Arc::new(FilesystemJobSource::new(&config.batch.input_extension)),
        Arc::new(CommandEngine::new(config.engine.clone())),
        logger,
        config.runner_options(),
    );

    let summary = service
        .run(
            &config.batch.input_dir,
            &config.batch.output_dir,
            config.worker_count(),
            config.batch.delete_on_success,
        )
        .await?;

    // the service owns the last logger handle; dropping it lets the drain finish
    drop(service);
    if let Some(handle) = drain {
        handle.await?;
    }
    log::logger().flush();

    if let Some(report) = &config.batch.report_file {
        write_summary_json(report, &summary).await?;
        info!(report = %report.display(), "summary written");
    }

    if !summary.all_succeeded() {
        error!(failed = summary.failed_jobs, total = summary.total_jobs, "batch finished with failures");
        std::process::exit(1);
    }
    Ok(())
}
