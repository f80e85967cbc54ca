use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde_json;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::model::log_entry::LogEntry;
use crate::repository::traits::LogRepository;

const LOG_FILE_NAME: &str = "logs.json";

#[derive(Clone)]
pub struct FileLogRepository {
    file_path: PathBuf,
}

impl FileLogRepository {
    pub fn new(config: &Config) -> Result<Self> {
        let path = config.file(LOG_FILE_NAME);

        // Initialize with an empty JSON array
        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<LogEntry>::new())?;
            writer.flush()?;
        }

        Ok(FileLogRepository { file_path: path })
    }

    fn read_logs(&self) -> Result<Vec<LogEntry>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let logs: Vec<LogEntry> = serde_json::from_reader(reader)
            .with_context(|| format!("Corrupt log file {}", self.file_path.display()))?;
        debug!(count = logs.len(), path = %self.file_path.display(), "read log entries");
        Ok(logs)
    }

    fn write_logs(&self, logs: &[LogEntry]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, logs)?;
        writer.flush()?;
        debug!(count = logs.len(), path = %self.file_path.display(), "wrote log entries");
        Ok(())
    }
}

impl LogRepository for FileLogRepository {
    fn create(&self, entry: LogEntry) -> Result<LogEntry> {
        let mut logs = self.read_logs()?;
        logs.push(entry.clone());
        self.write_logs(&logs)?;
        Ok(entry)
    }

    fn create_many(&self, entries: Vec<LogEntry>) -> Result<usize> {
        let mut logs = self.read_logs()?;
        let count = entries.len();
        logs.extend(entries);
        self.write_logs(&logs)?;
        Ok(count)
    }

    fn list(&self) -> Result<Vec<LogEntry>> {
        self.read_logs()
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut logs = self.read_logs()?;
        let initial_len = logs.len();
        logs.retain(|l| l.id != *id);

        if logs.len() == initial_len {
            return Err(anyhow!("Log entry with ID {} not found", id));
        }

        self.write_logs(&logs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn repo(dir: &tempfile::TempDir) -> FileLogRepository {
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        FileLogRepository::new(&config).unwrap()
    }

    #[test]
    fn test_create_list_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo(&tmp);
        assert!(repo.list().unwrap().is_empty());

        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let first = repo.create(LogEntry::new(date, 8.0)).unwrap();
        repo.create(LogEntry::absence(date)).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);

        repo.delete(&first.id).unwrap();
        let logs = repo.list().unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].is_absence_marker());

        assert!(repo.delete(&first.id).is_err());
    }

    #[test]
    fn test_persists_across_instances() {
        let tmp = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        repo(&tmp).create_many(vec![LogEntry::new(date, 4.0), LogEntry::new(date, 3.5)]).unwrap();

        let logs = repo(&tmp).list().unwrap();
        assert_eq!(logs.iter().map(|l| l.hours).sum::<f64>(), 7.5);
    }
}
