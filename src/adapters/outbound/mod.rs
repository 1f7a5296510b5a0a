pub mod buffered_logger;
pub mod case_files;
pub mod command_executor;
pub mod console_logger;
pub mod file_logger;
pub mod noop_logger;
pub mod report;
pub mod tee_logger;

pub use buffered_logger::*;
pub use case_files::*;
pub use command_executor::*;
pub use console_logger::*;
pub use file_logger::*;
pub use noop_logger::*;
pub use report::*;
pub use tee_logger::*;
