use offshore_runner::adapters::outbound::{
    init_buffered_logger, init_noop_logger, init_prefixed_console_logger, init_run_logger, spawn_buffered_logger,
    with_extra_sink, TeeLogger,
};
use offshore_runner::domains::logger::{parse_level, DynLogger, RunLogger};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl RunLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[tokio::test]
async fn test_buffered_and_noop_logger() {
    let capture = Arc::new(BridgeCapture::new());
    let bridge = capture.clone() as DynLogger;

    let buffered = init_buffered_logger(bridge.clone(), 8);
    buffered.info("one");
    buffered.warn("two");
    buffered.error("three");

    // let the background task drain
    tokio::time::sleep(Duration::from_millis(50)).await;

    {
        let msgs = capture.messages.lock().unwrap();
        assert_eq!(msgs.as_slice(), ["INFO:one", "WARN:two", "ERR:three"]);
    }

    let noop = init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");
}

#[tokio::test]
async fn test_buffered_logger_flushes_everything_on_shutdown() {
    let capture = Arc::new(BridgeCapture::new());
    let (buffered, drain) = spawn_buffered_logger(capture.clone(), 2);

    for i in 0..100 {
        buffered.info(&format!("line {}", i));
    }
    buffered.info("NUMBER OF JOBS WITH ERROR: 0");

    drop(buffered);
    drain.await.unwrap();

    let msgs = capture.messages.lock().unwrap();
    assert_eq!(msgs.len(), 101);
    assert!(msgs.iter().any(|m| m == "INFO:NUMBER OF JOBS WITH ERROR: 0"));
}

#[test]
fn test_tee_forwards_to_every_sink() {
    let first = Arc::new(BridgeCapture::new());
    let second = Arc::new(BridgeCapture::new());
    let tee = TeeLogger::new(vec![first.clone() as DynLogger, second.clone() as DynLogger]);

    tee.info("Worker 1/2: running \"LC1.dat\" (1/3) ...");
    tee.warn("slow disk");

    assert_eq!(first.messages.lock().unwrap().len(), 2);
    assert_eq!(*first.messages.lock().unwrap(), *second.messages.lock().unwrap());
}

#[test]
fn test_run_logger_without_file_still_reaches_extra_sink() {
    let capture = Arc::new(BridgeCapture::new());
    let console = init_run_logger(None, parse_level("info"));
    let logger = with_extra_sink(console, capture.clone());

    logger.info("BATCH SIMULATION");
    logger.error("LC3.dat failed");

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m == "INFO:BATCH SIMULATION"));
    assert!(msgs.iter().any(|m| m == "ERR:LC3.dat failed"));
}

#[test]
fn test_prefixed_console_logger_accepts_all_levels() {
    let logger = init_prefixed_console_logger("run-7");
    logger.info("started");
    logger.warn("no report file configured");
    logger.error("engine missing");
}

#[test]
fn test_level_names_fall_back_to_info() {
    assert_eq!(parse_level("debug"), log::LevelFilter::Debug);
    assert_eq!(parse_level("WARN"), log::LevelFilter::Warn);
    assert_eq!(parse_level("chatty"), log::LevelFilter::Info);
}
