pub mod file;
pub mod job;
pub mod traits;

// Re-export
pub use file::FileLogRepository;
pub use job::FileJobRepository;
pub use traits::{JobRepository, LogRepository};
