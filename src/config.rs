use crate::adapters::outbound::EngineCommand;
use crate::domains::batch::{default_worker_count, RunnerOptions};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables with this prefix override file values,
/// e.g. `ORCFX__BATCH__WORKERS=6`.
pub const ENV_PREFIX: &str = "ORCFX";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub batch: BatchConfig,
    pub engine: EngineCommand,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Defaults to one less than the number of cores.
    pub workers: Option<usize>,
    pub delete_on_success: bool,
    /// Give up on workers still running after this many seconds.
    pub timeout_seconds: Option<u64>,
    pub input_extension: String,
    pub allow_empty: bool,
    /// Where to write the JSON summary, if anywhere.
    pub report_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
    /// Route progress lines through a bounded background buffer.
    pub buffer_capacity: Option<usize>,
}

impl Config {
    /// Parse a TOML file on its own, without defaults or overrides.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Defaults, then the TOML file if it exists, then `ORCFX__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder().add_source(::config::Config::try_from(&Config::default())?);
        if let Some(p) = path {
            builder = builder.add_source(::config::File::from(p).format(::config::FileFormat::Toml).required(false));
        }
        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn worker_count(&self) -> usize {
        self.batch.workers.unwrap_or_else(default_worker_count)
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            worker_count: self.worker_count(),
            delete_on_success: self.batch.delete_on_success,
            timeout: self.batch.timeout_seconds.map(Duration::from_secs),
            allow_empty: self.batch.allow_empty,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch: BatchConfig {
                input_dir: PathBuf::from("cases"),
                output_dir: PathBuf::from("results"),
                workers: None,
                delete_on_success: true,
                timeout_seconds: None,
                input_extension: "dat".to_string(),
                allow_empty: false,
                report_file: None,
            },
            engine: EngineCommand {
                program: "run-simulation".to_string(),
                args: vec!["{input}".to_string(), "{output}".to_string()],
                result_extension: "sim".to_string(),
            },
            logging: LoggingConfig {
                file: None,
                level: "info".to_string(),
                buffer_capacity: None,
            },
        }
    }
}
