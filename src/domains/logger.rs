use std::sync::Arc;

/// Progress and diagnostics sink for batch runs. Calls never fail from the
/// caller's side; an implementation that cannot write drops the line.
pub trait RunLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn RunLogger>;

/// Parse a level name from configuration, falling back to `Info`.
pub fn parse_level(name: &str) -> log::LevelFilter {
    name.parse().unwrap_or(log::LevelFilter::Info)
}
