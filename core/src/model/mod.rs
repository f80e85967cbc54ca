pub mod job;
pub mod log_entry;
pub mod stats;
pub mod alert;
