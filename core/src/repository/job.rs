use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::model::job::JobRecord;
use crate::repository::traits::JobRepository;

const JOB_FILE_NAME: &str = "job.json";

#[derive(Clone)]
pub struct FileJobRepository {
    file_path: PathBuf,
}

impl FileJobRepository {
    pub fn new(config: &Config) -> Self {
        Self { file_path: config.file(JOB_FILE_NAME) }
    }
}

impl JobRepository for FileJobRepository {
    fn get(&self) -> Result<Option<JobRecord>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.file_path)?;
        let job: JobRecord = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt job file {}", self.file_path.display()))?;
        debug!(path = %self.file_path.display(), "read job record");
        Ok(Some(job))
    }

    fn save(&self, job: &JobRecord) -> Result<()> {
        let content = serde_json::to_string_pretty(job)?;
        fs::write(&self.file_path, content)?;
        debug!(path = %self.file_path.display(), "wrote job record");
        Ok(())
    }
}
