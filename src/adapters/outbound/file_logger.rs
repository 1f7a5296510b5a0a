use crate::domains::logger::RunLogger;
use chrono::Local;
use std::sync::Arc;

/// Writes through the `log` facade, which `fast_log` routes to a file and the
/// console. Only one such logger can be installed per process.
struct FileLogger;

impl FileLogger {
    fn stamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl RunLogger for FileLogger {
    fn info(&self, msg: &str) {
        log::info!("{} {}", Self::stamp(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{} {}", Self::stamp(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{} {}", Self::stamp(), msg);
    }
}

/// Install the `fast_log` appender for `path` and return a logger writing to it.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<Arc<dyn RunLogger>, String> {
    fast_log::init(fast_log::config::Config::new().console().file(path).level(level))
        .map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
    Ok(Arc::new(FileLogger))
}
