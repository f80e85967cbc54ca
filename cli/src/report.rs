use chrono::NaiveDate;
use dtr_core::{Alert, JobRecord, LogEntry, Severity, Stats};
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify};
use tabled::settings::object::Rows;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Stat")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Cuts `s` to at most `width` display columns, ending in an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn print_job(job: &JobRecord) {
    println!("Job:            {}", job.name.as_deref().unwrap_or("-"));
    println!(
        "Start date:     {}",
        job.start_date.map(|d| d.format("%Y-%m-%d (%a)").to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("Required hours: {:.1}", job.target_hours());
}

pub fn print_logs(logs: &[LogEntry]) {
    if logs.is_empty() {
        println!("No log entries yet.");
        return;
    }

    let rows: Vec<LogRow> = logs.iter().map(|l| LogRow {
        id: l.short_id(),
        date: l.date.format("%Y-%m-%d %a").to_string(),
        hours: if l.is_absence_marker() { "absent".to_string() } else { format!("{:.1}", l.hours) },
        note: truncate(l.note.as_deref().unwrap_or(""), 40),
    }).collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn print_stats(stats: &Stats, today: NaiveDate) {
    for alert in Alert::from_stats(stats) {
        let color = match alert.severity() {
            Severity::Info => "\x1b[36m",
            Severity::Success => "\x1b[32m",
            Severity::Warning => "\x1b[33m",
        };
        println!("{}{}\x1b[0m", color, alert.message());
    }

    println!("\n{} {:.1}% ({:.1} / {:.1}h)\n", progress_bar(stats.ratio(), 30), stats.percent_complete, stats.total_hours_logged, stats.target_hours);

    let rows = vec![
        StatRow { label: "As of", value: today.format("%Y-%m-%d").to_string() },
        StatRow { label: "Hours logged", value: format!("{:.1}", stats.total_hours_logged) },
        StatRow { label: "Remaining hours", value: format!("{:.1}", stats.remaining_hours) },
        StatRow { label: "Days logged", value: stats.days_logged.to_string() },
        StatRow { label: "Days since start", value: stats.days_since_start.to_string() },
        StatRow { label: "Absent days", value: stats.absent_days.to_string() },
        StatRow { label: "Marked absent", value: stats.absence_entries.to_string() },
    ];

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
