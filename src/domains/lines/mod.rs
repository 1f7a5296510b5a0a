pub mod browser;
pub mod connectivity;
pub mod sorter;
pub mod types;

pub use browser::*;
pub use connectivity::*;
pub use sorter::*;
pub use types::*;
