pub mod config;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;
pub mod wizard;

pub use config::Config;
pub use model::alert::{Alert, Severity};
pub use model::job::JobRecord;
pub use model::log_entry::LogEntry;
pub use model::stats::Stats;
pub use repository::{FileJobRepository, FileLogRepository, JobRepository, LogRepository};
pub use input::{parse_args, expand_key, ParsedInput, LOG_KEYS};
pub use time::{parse_hours, parse_lenient_date, parse_log_date};
pub use service::dtr_service::DtrService;
pub use service::dto::{ImportSummary, WeeklyHistory};
pub use usecase::attendance::AttendanceAggregator;
pub use usecase::history::HistoryUseCase;
pub use wizard::{JobSetupForm, Wizard, WizardForm, WizardState};

pub type FileDtrService = DtrService<FileJobRepository, FileLogRepository>;

/// Opens the file-backed service rooted at `config.data_dir`.
pub fn open(config: &Config) -> anyhow::Result<FileDtrService> {
    Ok(DtrService::new(FileJobRepository::new(config), FileLogRepository::new(config)?))
}
