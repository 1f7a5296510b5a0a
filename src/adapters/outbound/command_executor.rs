use crate::common::ExecutorError;
use crate::domains::batch::{DynExecutor, ExecutionOutcome, ExecutorProvider, JobExecutor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// How to invoke the engine for one input file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineCommand {
    pub program: String,
    /// Arguments; `{input}`, `{output}` and `{output_dir}` are substituted per job.
    pub args: Vec<String>,
    /// Extension of the result file the engine writes, without the dot.
    pub result_extension: String,
}

impl EngineCommand {
    pub fn result_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        // case names carry decimals, so the extension is appended rather than swapped
        let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        output_dir.join(format!("{}.{}", stem, self.result_extension))
    }

    fn expand_args(&self, input: &Path, output_dir: &Path) -> Vec<String> {
        let output = self.result_path(input, output_dir);
        self.args
            .iter()
            .map(|a| {
                a.replace("{input}", &input.display().to_string())
                    .replace("{output_dir}", &output_dir.display().to_string())
                    .replace("{output}", &output.display().to_string())
            })
            .collect()
    }
}

/// Runs every job in its own engine process. A process still running when the
/// job is cancelled is killed.
pub struct CommandExecutor {
    command: EngineCommand,
    output_dir: PathBuf,
}

impl CommandExecutor {
    pub fn new(command: EngineCommand, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl JobExecutor for CommandExecutor {
    async fn run(&self, file_path: &Path) -> Result<ExecutionOutcome, ExecutorError> {
        let args = self.command.expand_args(file_path, &self.output_dir);
        debug!(program = %self.command.program, ?args, "starting engine process");

        let output = Command::new(&self.command.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                return Ok(ExecutionOutcome::incomplete());
            }
            let code = output.status.code().unwrap_or(-1);
            return Err(ExecutorError::Engine(format!("exit code {}: {}", code, stderr)));
        }

        let result = self.command.result_path(file_path, &self.output_dir);
        let artifact = tokio::fs::try_exists(&result).await.unwrap_or(false).then_some(result);
        Ok(ExecutionOutcome::completed(artifact))
    }
}

/// Hands out a `CommandExecutor` per output directory.
pub struct CommandEngine {
    command: EngineCommand,
}

impl CommandEngine {
    pub fn new(command: EngineCommand) -> Self {
        Self { command }
    }
}

impl ExecutorProvider for CommandEngine {
    fn executor_for(&self, output_dir: &Path) -> DynExecutor {
        Arc::new(CommandExecutor::new(self.command.clone(), output_dir))
    }
}
