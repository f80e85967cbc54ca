use crate::model::job::JobRecord;
use crate::model::log_entry::LogEntry;
use anyhow::Result;
use uuid::Uuid;

pub trait JobRepository {
    fn get(&self) -> Result<Option<JobRecord>>;
    fn save(&self, job: &JobRecord) -> Result<()>;
}

pub trait LogRepository {
    fn create(&self, entry: LogEntry) -> Result<LogEntry>;
    fn create_many(&self, entries: Vec<LogEntry>) -> Result<usize>;
    fn list(&self) -> Result<Vec<LogEntry>>;
    fn delete(&self, id: &Uuid) -> Result<()>;
}
