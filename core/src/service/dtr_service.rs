use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::model::job::JobRecord;
use crate::model::log_entry::LogEntry;
use crate::model::stats::Stats;
use crate::repository::{JobRepository, LogRepository};
use crate::service::dto::{entries_from_raw, ImportSummary, RawJobInfo, RawLog, WeeklyHistory};
use crate::usecase::attendance::AttendanceAggregator;
use crate::usecase::history::HistoryUseCase;

pub struct DtrService<J: JobRepository, L: LogRepository> {
    job_repo: J,
    log_repo: L,
}

impl<J: JobRepository, L: LogRepository> DtrService<J, L> {
    pub fn new(job_repo: J, log_repo: L) -> Self {
        Self { job_repo, log_repo }
    }

    pub fn job(&self) -> Result<Option<JobRecord>> {
        self.job_repo.get()
    }

    /// Stores the job. An existing start date is kept unless `force` is set.
    pub fn setup_job(&self, mut job: JobRecord, force: bool) -> Result<JobRecord> {
        if !force {
            if let Some(existing) = self.job_repo.get()?.and_then(|j| j.start_date) {
                if job.start_date.is_some_and(|d| d != existing) {
                    info!(kept = %existing, "start date already set, keeping it");
                }
                job.start_date = Some(existing);
            }
        }
        self.job_repo.save(&job)?;
        info!(start = ?job.start_date, target = job.target_hours(), "job saved");
        Ok(job)
    }

    pub fn add_log(&self, date: NaiveDate, hours: f64, note: Option<String>) -> Result<LogEntry> {
        if !hours.is_finite() || hours < 0.0 {
            bail!("Hours must be a non-negative number, got {}", hours);
        }
        let entry = self.log_repo.create(LogEntry::new(date, hours).with_note(note))?;
        info!(id = %entry.id, %date, hours, "logged hours");
        Ok(entry)
    }

    pub fn mark_absent(&self, date: NaiveDate, note: Option<String>) -> Result<LogEntry> {
        let entry = self.log_repo.create(LogEntry::absence(date).with_note(note))?;
        info!(id = %entry.id, %date, "marked absent");
        Ok(entry)
    }

    /// All entries, newest date first.
    pub fn logs(&self) -> Result<Vec<LogEntry>> {
        let mut logs = self.log_repo.list()?;
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    /// Deletes the single entry whose id starts with `id_prefix`.
    pub fn delete_log(&self, id_prefix: &str) -> Result<LogEntry> {
        let prefix = id_prefix.trim().to_lowercase();
        if prefix.is_empty() {
            bail!("Empty log id");
        }

        let mut matches: Vec<LogEntry> = self
            .log_repo
            .list()?
            .into_iter()
            .filter(|l| l.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => Err(anyhow!("No log entry matches id '{}'", id_prefix)),
            1 => {
                let entry = matches.remove(0);
                self.log_repo.delete(&entry.id)?;
                info!(id = %entry.id, "deleted log entry");
                Ok(entry)
            }
            n => Err(anyhow!("Ambiguous id '{}' matches {} entries", id_prefix, n)),
        }
    }

    pub fn stats(&self, today: NaiveDate) -> Result<Stats> {
        let job = self.job_repo.get()?.unwrap_or_default();
        let logs = self.log_repo.list()?;
        Ok(AttendanceAggregator::compute(&job, &logs, today))
    }

    pub fn history(&self) -> Result<Vec<WeeklyHistory>> {
        let logs = self.log_repo.list()?;
        Ok(HistoryUseCase::weekly_history(&logs))
    }

    /// Loads a backend export: a job-info object and/or a list of logs.
    pub fn import(&self, job_json: Option<&str>, logs_json: Option<&str>) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        if let Some(json) = job_json {
            let raw: RawJobInfo = serde_json::from_str(json).context("Job info is not a JSON object")?;
            self.setup_job(raw.into_job(), true)?;
            summary.job_imported = true;
        }

        if let Some(json) = logs_json {
            let raw: Vec<RawLog> = serde_json::from_str(json).context("Logs are not a JSON array")?;
            let (entries, skipped) = entries_from_raw(raw);
            summary.logs_imported = self.log_repo.create_many(entries)?;
            summary.logs_skipped = skipped;
        }

        info!(?summary, "import finished");
        Ok(summary)
    }
}
