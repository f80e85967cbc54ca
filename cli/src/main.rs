mod history;
mod logging;
mod report;
mod setup;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use dtr_core::{
    open, parse_args, parse_hours, parse_log_date, Config, FileDtrService, JobRecord, LOG_KEYS,
};
use tracing::debug;

use crate::tui::app::DashboardApp;

#[derive(Parser)]
#[command(name = "dtr")]
#[command(about = "Daily time record for internship hours", long_about = None)]
struct Cli {
    /// Where job.json and logs.json live (default: ~/.dtr)
    #[arg(long, global = true, env = "DTR_HOME")]
    data_dir: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<String>,

    /// Debug logging to stderr (overridden by DTR_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Set up the job: start date and required hours
    Init {
        #[arg(long)]
        name: Option<String>,
        /// Start date (YYYY-MM-DD, today, -3d, mon...)
        #[arg(long)]
        start: Option<String>,
        /// Required hours
        #[arg(long)]
        hours: Option<String>,
        /// Replace an existing start date
        #[arg(long)]
        force: bool,
    },
    /// Show the job record
    Job,
    /// Log hours (usage: log 8h date:yesterday note:"onboarding")
    Log {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Mark a day absent (usage: absent date:mon note:sick)
    Absent {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List log entries, newest first
    List,
    /// Delete a log entry by id prefix
    Rm { id: String },
    /// Print progress and attendance
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Weekly breakdown of log entries
    History,
    /// Import a backend export
    Import {
        /// Job info JSON object
        #[arg(long)]
        job: Option<PathBuf>,
        /// Logs JSON array
        #[arg(long)]
        logs: Option<PathBuf>,
    },
    /// Open the dashboard
    Dash,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = Config::new(cli.data_dir)?;
    debug!(data_dir = %config.data_dir.display(), "using data directory");
    let service = open(&config)?;

    let today = match cli.today.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid --today '{}'", s))?,
        None => Local::now().date_naive(),
    };

    match cli.command {
        Some(Commands::Init { name, start, hours, force }) => {
            let existing = service.job()?;
            let job = if start.is_none() && hours.is_none() {
                setup::run_wizard(existing.as_ref(), today, force)?
            } else {
                job_from_flags(existing.as_ref(), name, start, hours, today)?
            };
            let entered_start = job.start_date;
            let saved = service.setup_job(job, force)?;
            if let Some(warning) = kept_start_warning(entered_start, saved.start_date) {
                println!("Warning: {}", warning);
            }
            println!("Job saved.");
            report::print_job(&saved);
        }
        Some(Commands::Job) => match service.job()? {
            Some(job) => report::print_job(&job),
            None => println!("No job set up yet. Run `dtr init`."),
        },
        Some(Commands::Log { args }) => {
            let (parsed, errors) = parse_args(&args, LOG_KEYS);
            for e in errors {
                println!("Warning: {}", e);
            }
            let hours_str = match parsed.words.as_slice() {
                [h] => h,
                [] => bail!("Hours are required, e.g. `dtr log 8h`"),
                _ => bail!("Expected one hours value, got {:?}. Use note:\"...\" for text", parsed.words),
            };
            let hours = parse_hours(hours_str)?;
            let date = entry_date(parsed.metadata.get("date"), today)?;

            let entry = service.add_log(date, hours, parsed.metadata.get("note").cloned())?;
            println!("Logged {:.1}h on {} (ID: {})", entry.hours, entry.date, entry.short_id());
            print_progress(&service, today)?;
        }
        Some(Commands::Absent { args }) => {
            let (parsed, errors) = parse_args(&args, LOG_KEYS);
            for e in errors {
                println!("Warning: {}", e);
            }
            if !parsed.words.is_empty() {
                println!("Warning: ignoring {:?}", parsed.words);
            }
            let date = entry_date(parsed.metadata.get("date"), today)?;

            let entry = service.mark_absent(date, parsed.metadata.get("note").cloned())?;
            println!("Marked {} absent (ID: {})", entry.date, entry.short_id());
        }
        Some(Commands::List) => report::print_logs(&service.logs()?),
        Some(Commands::Rm { id }) => {
            let entry = service.delete_log(&id)?;
            println!("Deleted {:.1}h on {} (ID: {})", entry.hours, entry.date, entry.short_id());
        }
        Some(Commands::Stats { json }) => {
            let stats = service.stats(today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                report::print_stats(&stats, today);
            }
        }
        Some(Commands::History) => history::show_history(&service.history()?),
        Some(Commands::Import { job, logs }) => {
            if job.is_none() && logs.is_none() {
                bail!("Nothing to import: pass --job and/or --logs");
            }
            let job_json = read_optional(job.as_ref())?;
            let logs_json = read_optional(logs.as_ref())?;

            let summary = service.import(job_json.as_deref(), logs_json.as_deref())?;
            if summary.job_imported {
                println!("Job imported.");
            }
            println!("Imported {} log entries, skipped {}.", summary.logs_imported, summary.logs_skipped);
        }
        Some(Commands::Dash) | None => {
            let app = DashboardApp::new(
                service.job()?.unwrap_or_default(),
                service.stats(today)?,
                service.history()?,
                today,
            );
            tui::run(app)?;
        }
    }
    Ok(())
}

fn entry_date(input: Option<&String>, today: NaiveDate) -> Result<NaiveDate> {
    match input {
        Some(s) => parse_log_date(s, today),
        None => Ok(today),
    }
}

fn job_from_flags(
    existing: Option<&JobRecord>,
    name: Option<String>,
    start: Option<String>,
    hours: Option<String>,
    today: NaiveDate,
) -> Result<JobRecord> {
    let mut job = existing.cloned().unwrap_or_default();
    if name.is_some() {
        job.name = name;
    }
    if let Some(s) = start {
        job.start_date = Some(parse_log_date(&s, today)?);
    }
    if let Some(h) = hours {
        let hours = parse_hours(&h)?;
        if hours <= 0.0 {
            bail!("Required hours must be greater than zero");
        }
        job.total_hours = Some(hours);
    }
    if job.start_date.is_none() {
        bail!("A start date is required: pass --start");
    }
    Ok(job)
}

/// Set when the service kept a stored start date over the one entered.
fn kept_start_warning(entered: Option<NaiveDate>, saved: Option<NaiveDate>) -> Option<String> {
    match (entered, saved) {
        (Some(entered), Some(saved)) if entered != saved => Some(format!(
            "start date {} is already set; ignoring {}. Use --force to change it",
            saved, entered
        )),
        _ => None,
    }
}

fn read_optional(path: Option<&PathBuf>) -> Result<Option<String>> {
    path.map(|p| fs::read_to_string(p).with_context(|| format!("Could not read {}", p.display())))
        .transpose()
}

fn print_progress(service: &FileDtrService, today: NaiveDate) -> Result<()> {
    let stats = service.stats(today)?;
    if stats.target_hours > 0.0 {
        println!(
            "  {:.1} / {:.1}h ({:.1}%), {:.1}h to go",
            stats.total_hours_logged, stats.target_hours, stats.percent_complete, stats.remaining_hours
        );
    }
    Ok(())
}
