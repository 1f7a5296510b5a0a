use crate::domains::logger::{DynLogger, RunLogger};
use std::sync::Arc;

/// Forwards every message to each of its sinks, in order.
pub struct TeeLogger {
    sinks: Vec<DynLogger>,
}

impl TeeLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }
}

impl RunLogger for TeeLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// File logger when `path` is given and can be opened, console otherwise.
///
/// `fast_log` already echoes to the console, so a working file logger is used
/// on its own.
pub fn init_run_logger(path: Option<&str>, level: log::LevelFilter) -> DynLogger {
    let console = crate::adapters::outbound::init_console_logger();
    match path {
        Some(p) => match crate::adapters::outbound::init_file_logger(p, level) {
            Ok(file) => file,
            Err(e) => {
                console.warn(&e);
                console
            }
        },
        None => console,
    }
}

/// Tee the run logger into an extra sink, e.g. a capture used by a caller.
pub fn with_extra_sink(primary: DynLogger, extra: DynLogger) -> DynLogger {
    Arc::new(TeeLogger::new(vec![primary, extra]))
}
