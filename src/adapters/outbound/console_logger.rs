use crate::domains::logger::RunLogger;
use std::sync::Arc;

/// Progress lines on stdout, problems on stderr.
struct ConsoleLogger {
    prefix: Option<String>,
}

impl ConsoleLogger {
    fn line(&self, msg: &str) -> String {
        match &self.prefix {
            Some(p) => format!("[{}] {}", p, msg),
            None => msg.to_string(),
        }
    }
}

impl RunLogger for ConsoleLogger {
    fn info(&self, msg: &str) { println!("{}", self.line(msg)); }
    fn warn(&self, msg: &str) { println!("WARN: {}", self.line(msg)); }
    fn error(&self, msg: &str) { eprintln!("ERROR: {}", self.line(msg)); }
}

/// Console logger, the fallback when no log file is configured.
pub fn init_console_logger() -> Arc<dyn RunLogger> {
    Arc::new(ConsoleLogger { prefix: None })
}

/// Console logger that tags every line, e.g. with the run name.
pub fn init_prefixed_console_logger(prefix: &str) -> Arc<dyn RunLogger> {
    Arc::new(ConsoleLogger { prefix: Some(prefix.to_string()) })
}
