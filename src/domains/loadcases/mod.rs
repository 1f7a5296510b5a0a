pub mod matrix;
pub mod wave;
pub mod writer;

pub use matrix::*;
pub use wave::*;
pub use writer::*;
