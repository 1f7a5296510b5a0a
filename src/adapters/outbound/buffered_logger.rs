use crate::domains::logger::{DynLogger, RunLogger};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

enum Level {
    Info,
    Warn,
    Error,
}

struct Entry {
    level: Level,
    msg: String,
}

impl Entry {
    fn write_to(&self, sink: &dyn RunLogger) {
        match self.level {
            Level::Info => sink.info(&self.msg),
            Level::Warn => sink.warn(&self.msg),
            Level::Error => sink.error(&self.msg),
        }
    }
}

struct BufferedLogger {
    sender: mpsc::Sender<Entry>,
    sink: DynLogger,
}

impl BufferedLogger {
    // Never waits on the channel. A full or closed buffer hands the line
    // straight to the sink, so nothing is lost but order may shift.
    fn push(&self, level: Level, msg: &str) {
        let entry = Entry { level, msg: msg.to_string() };
        if let Err(TrySendError::Full(entry) | TrySendError::Closed(entry)) = self.sender.try_send(entry) {
            entry.write_to(self.sink.as_ref());
        }
    }
}

impl RunLogger for BufferedLogger {
    fn info(&self, msg: &str) { self.push(Level::Info, msg); }
    fn warn(&self, msg: &str) { self.push(Level::Warn, msg); }
    fn error(&self, msg: &str) { self.push(Level::Error, msg); }
}

/// Decouple workers from a slow sink. A background task drains up to
/// `capacity` pending lines into `sink`; it ends once every clone of the
/// returned logger is dropped and the buffer is empty, so awaiting the handle
/// flushes everything. Must be called inside a tokio runtime.
pub fn spawn_buffered_logger(sink: DynLogger, capacity: usize) -> (DynLogger, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::channel::<Entry>(capacity.max(1));

    let drain_sink = sink.clone();
    let drain = tokio::spawn(async move {
        while let Some(entry) = receiver.recv().await {
            entry.write_to(drain_sink.as_ref());
        }
    });

    (Arc::new(BufferedLogger { sender, sink }), drain)
}

/// Like [`spawn_buffered_logger`], for callers that never need to flush.
pub fn init_buffered_logger(sink: DynLogger, capacity: usize) -> DynLogger {
    spawn_buffered_logger(sink, capacity).0
}
