use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::model::log_entry::LogEntry;
use crate::service::dto::{DailyHistory, HistoryStats, WeeklyHistory};

pub struct HistoryUseCase;

impl HistoryUseCase {
    /// Groups entries by ISO week and day, newest first on both levels.
    pub fn weekly_history(logs: &[LogEntry]) -> Vec<WeeklyHistory> {
        // (Year, Week) -> Date -> Entries
        let mut weekly_data: BTreeMap<(i32, u32), BTreeMap<NaiveDate, Vec<LogEntry>>> = BTreeMap::new();

        for log in logs {
            let iso = log.date.iso_week();
            weekly_data
                .entry((iso.year(), iso.week()))
                .or_default()
                .entry(log.date)
                .or_default()
                .push(log.clone());
        }

        let mut history = Vec::new();
        for ((year, week), days_map) in weekly_data.into_iter().rev() {
            let mut week_stats = HistoryStats::default();
            let mut days = Vec::new();

            for (day, entries) in days_map.into_iter().rev() {
                let stats = HistoryStats {
                    total_hours: entries.iter().map(|e| e.hours).sum(),
                    entries: entries.len(),
                    absence_entries: entries.iter().filter(|e| e.is_absence_marker()).count(),
                };
                week_stats.add(&stats);

                days.push(DailyHistory {
                    date: day.format("%Y-%m-%d").to_string(),
                    day_of_week: day.format("%a").to_string(),
                    entries,
                    stats,
                });
            }

            history.push(WeeklyHistory {
                year,
                week,
                days,
                stats: week_stats,
            });
        }

        history
    }
}
