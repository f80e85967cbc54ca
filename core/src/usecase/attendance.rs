use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::model::job::JobRecord;
use crate::model::log_entry::LogEntry;
use crate::model::stats::{Stats, COMPLETED_PERCENT, NEAR_COMPLETION_PERCENT};

/// Derives progress and attendance figures from a job and its log entries.
///
/// Never fails: a missing target gives 0% progress, a missing or future
/// start date gives zero elapsed and absent days.
pub struct AttendanceAggregator;

impl AttendanceAggregator {
    pub fn compute(job: &JobRecord, logs: &[LogEntry], today: NaiveDate) -> Stats {
        let target_hours = job.target_hours();

        // 1. Hours
        let total_hours_logged: f64 = logs.iter().map(|l| l.hours).sum();
        let percent_complete = if target_hours > 0.0 {
            (total_hours_logged * 100.0 / target_hours).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let remaining_hours = (target_hours - total_hours_logged).max(0.0);

        // 2. Day coverage
        let logged_dates: BTreeSet<NaiveDate> = logs.iter().map(|l| l.date).collect();
        let days_logged = logged_dates.len() as u32;
        let absence_entries = logs.iter().filter(|l| l.is_absence_marker()).count() as u32;

        // 3. Elapsed range [start, today]
        let start = job.start_date.filter(|s| *s <= today);
        let (days_since_start, absent_days, current_absent_streak) = match start {
            Some(start) => {
                let elapsed = (today - start).num_days() + 1;
                let days_since_start = u32::try_from(elapsed).unwrap_or(u32::MAX);
                let covered = logged_dates.range(start..=today).count() as u32;
                let streak = absent_streak(&logged_dates, start, today);
                (days_since_start, days_since_start - covered, streak)
            }
            None => (0, 0, 0),
        };

        Stats {
            target_hours,
            total_hours_logged,
            percent_complete,
            remaining_hours,
            days_logged,
            days_since_start,
            absent_days,
            absence_entries,
            current_absent_streak,
            is_near_completion: percent_complete >= NEAR_COMPLETION_PERCENT,
            is_completed: percent_complete >= COMPLETED_PERCENT,
            has_started: start.is_some(),
        }
    }

    pub fn compute_now(job: &JobRecord, logs: &[LogEntry]) -> Stats {
        Self::compute(job, logs, Local::now().date_naive())
    }
}

fn absent_streak(logged: &BTreeSet<NaiveDate>, start: NaiveDate, today: NaiveDate) -> u32 {
    match logged.range(start..=today).next_back() {
        Some(last) => (today - *last).num_days() as u32,
        None => u32::try_from((today - start).num_days() + 1).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn job(start: &str, total: f64) -> JobRecord {
        JobRecord::new(None, d(start), total)
    }

    fn two_logs() -> Vec<LogEntry> {
        vec![
            LogEntry::new(d("2025-05-01"), 8.0),
            LogEntry::new(d("2025-05-02"), 8.0),
        ]
    }

    #[test]
    fn test_logged_every_day() {
        let stats = AttendanceAggregator::compute(&job("2025-05-01", 100.0), &two_logs(), d("2025-05-02"));

        assert_eq!(stats.total_hours_logged, 16.0);
        assert_eq!(stats.percent_complete, 16.0);
        assert_eq!(stats.remaining_hours, 84.0);
        assert_eq!(stats.days_logged, 2);
        assert_eq!(stats.days_since_start, 2);
        assert_eq!(stats.absent_days, 0);
        assert_eq!(stats.current_absent_streak, 0);
        assert!(!stats.is_near_completion);
    }

    #[test]
    fn test_missing_days_are_absent() {
        let stats = AttendanceAggregator::compute(&job("2025-05-01", 100.0), &two_logs(), d("2025-05-05"));

        assert_eq!(stats.days_since_start, 5);
        assert_eq!(stats.days_logged, 2);
        assert_eq!(stats.absent_days, 3);
        assert_eq!(stats.current_absent_streak, 3);
    }

    #[test]
    fn test_no_target_means_zero_percent() {
        let stats = AttendanceAggregator::compute(&job("2025-05-01", 0.0), &two_logs(), d("2025-05-02"));
        assert_eq!(stats.percent_complete, 0.0);
        assert_eq!(stats.remaining_hours, 0.0);
        assert!(!stats.is_completed);

        let unset = JobRecord { start_date: Some(d("2025-05-01")), ..JobRecord::default() };
        let stats = AttendanceAggregator::compute(&unset, &two_logs(), d("2025-05-02"));
        assert_eq!(stats.percent_complete, 0.0);
        assert_eq!(stats.total_hours_logged, 16.0);
    }

    #[test]
    fn test_overshoot_clamps_to_100() {
        let logs: Vec<LogEntry> = (1..=15)
            .map(|day| LogEntry::new(NaiveDate::from_ymd_opt(2025, 5, day).unwrap(), 8.0))
            .collect();
        let stats = AttendanceAggregator::compute(&job("2025-05-01", 100.0), &logs, d("2025-05-15"));

        assert_eq!(stats.total_hours_logged, 120.0);
        assert_eq!(stats.percent_complete, 100.0);
        assert_eq!(stats.remaining_hours, 0.0);
        assert!(stats.is_completed);
        assert!(stats.is_near_completion);
    }

    #[test]
    fn test_same_date_counts_once() {
        let mut logs = two_logs();
        logs.push(LogEntry::new(d("2025-05-03"), 4.0));
        logs.push(LogEntry::absence(d("2025-05-03")));

        let stats = AttendanceAggregator::compute(&job("2025-05-01", 100.0), &logs, d("2025-05-03"));
        assert_eq!(stats.total_hours_logged, 20.0);
        assert_eq!(stats.days_logged, 3);
        assert_eq!(stats.absent_days, 0);
        assert_eq!(stats.absence_entries, 1);
    }

    #[test]
    fn test_uniform_hours_sum() {
        let logs: Vec<LogEntry> = (1..=7)
            .map(|day| LogEntry::new(NaiveDate::from_ymd_opt(2025, 6, day).unwrap(), 6.5))
            .collect();
        let stats = AttendanceAggregator::compute(&job("2025-06-01", 300.0), &logs, d("2025-06-30"));
        assert_eq!(stats.total_hours_logged, 6.5 * 7.0);
        assert_eq!(stats.days_logged + stats.absent_days, stats.days_since_start);
    }

    #[test]
    fn test_missing_start_date() {
        let job = JobRecord { total_hours: Some(100.0), ..JobRecord::default() };
        let stats = AttendanceAggregator::compute(&job, &two_logs(), d("2025-05-05"));

        assert_eq!(stats.days_since_start, 0);
        assert_eq!(stats.absent_days, 0);
        assert_eq!(stats.days_logged, 2);
        assert_eq!(stats.percent_complete, 16.0);
        assert!(!stats.has_started);
    }

    #[test]
    fn test_future_start_date() {
        let stats = AttendanceAggregator::compute(&job("2025-06-01", 100.0), &[], d("2025-05-05"));
        assert_eq!(stats.days_since_start, 0);
        assert_eq!(stats.absent_days, 0);
        assert_eq!(stats.current_absent_streak, 0);
        assert!(!stats.has_started);
    }

    #[test]
    fn test_logs_outside_range_do_not_reduce_absences() {
        let logs = vec![
            LogEntry::new(d("2025-04-28"), 8.0), // before start
            LogEntry::new(d("2025-05-02"), 8.0),
            LogEntry::new(d("2025-05-09"), 8.0), // after today
        ];
        let stats = AttendanceAggregator::compute(&job("2025-05-01", 100.0), &logs, d("2025-05-03"));

        assert_eq!(stats.days_logged, 3);
        assert_eq!(stats.days_since_start, 3);
        assert_eq!(stats.absent_days, 2);
        assert_eq!(stats.current_absent_streak, 1);
    }

    #[test]
    fn test_empty_logs() {
        let stats = AttendanceAggregator::compute(&job("2025-05-01", 100.0), &[], d("2025-05-04"));
        assert_eq!(stats.total_hours_logged, 0.0);
        assert_eq!(stats.remaining_hours, 100.0);
        assert_eq!(stats.absent_days, 4);
        assert_eq!(stats.current_absent_streak, 4);
    }
}
