use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::model::job::JobRecord;
use crate::model::log_entry::LogEntry;
use crate::time::parse_lenient_date;

/// Job info as the backend returns it. Every field is optional and numbers
/// may arrive as strings.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawJobInfo {
    #[serde(default, alias = "company", alias = "title")]
    pub name: Option<String>,
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "totalHours")]
    pub total_hours: Option<Value>,
}

impl RawJobInfo {
    pub fn into_job(self) -> JobRecord {
        JobRecord {
            name: self.name.filter(|n| !n.trim().is_empty()),
            start_date: self.start_date.as_deref().and_then(parse_lenient_date),
            total_hours: self.total_hours.as_ref().and_then(lenient_number),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawLog {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub hours: Option<Value>,
    #[serde(default, alias = "notes", alias = "description")]
    pub note: Option<String>,
}

impl RawLog {
    /// `None` when the date is missing or unreadable. Unusable hours fall
    /// back to 0.
    pub fn into_entry(self) -> Option<LogEntry> {
        let date = self.date.as_deref().and_then(parse_lenient_date)?;
        let hours = self
            .hours
            .as_ref()
            .and_then(lenient_number)
            .filter(|h| *h >= 0.0)
            .unwrap_or(0.0);
        Some(LogEntry::new(date, hours).with_note(self.note))
    }
}

fn lenient_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if n.is_finite() { Some(n) } else { None }
}

/// Converts raw backend logs, dropping rows without a usable date.
pub fn entries_from_raw(raw: Vec<RawLog>) -> (Vec<LogEntry>, usize) {
    let mut entries = Vec::with_capacity(raw.len());
    let mut skipped = 0;
    for (i, row) in raw.into_iter().enumerate() {
        let date = row.date.clone();
        match row.into_entry() {
            Some(entry) => entries.push(entry),
            None => {
                warn!(row = i, date = ?date, "skipping log row without a usable date");
                skipped += 1;
            }
        }
    }
    (entries, skipped)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ImportSummary {
    pub job_imported: bool,
    pub logs_imported: usize,
    pub logs_skipped: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HistoryStats {
    pub total_hours: f64,
    pub entries: usize,
    pub absence_entries: usize,
}

impl HistoryStats {
    pub fn add(&mut self, other: &HistoryStats) {
        self.total_hours += other.total_hours;
        self.entries += other.entries;
        self.absence_entries += other.absence_entries;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyHistory {
    pub date: String, // YYYY-MM-DD
    pub day_of_week: String, // Mon, Tue...
    pub entries: Vec<LogEntry>,
    pub stats: HistoryStats,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeeklyHistory {
    pub year: i32,
    pub week: u32,
    pub days: Vec<DailyHistory>,
    pub stats: HistoryStats,
}
