pub mod batch;
pub mod lines;
pub mod loadcases;
pub mod logger;

pub use batch::*;
pub use lines::*;
pub use loadcases::*;
pub use logger::*;
