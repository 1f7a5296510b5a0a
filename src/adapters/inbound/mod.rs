pub mod job_files;
pub mod model_file;

pub use job_files::*;
pub use model_file::*;
