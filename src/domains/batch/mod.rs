pub mod events;
pub mod executor;
pub mod job;
pub mod partition;
pub mod runner;
pub mod source;
pub mod summary;

pub use events::*;
pub use executor::*;
pub use job::*;
pub use partition::*;
pub use runner::*;
pub use source::*;
pub use summary::*;
