use crate::domains::logger::RunLogger;
use std::sync::Arc;

struct Silent;

impl RunLogger for Silent {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Discards everything; the default for tests that only look at results.
pub fn init_noop_logger() -> Arc<dyn RunLogger> {
    Arc::new(Silent)
}
