use chrono::NaiveDate;
use dtr_core::{Alert, JobRecord, Stats, WeeklyHistory};

/// Everything the dashboard draws. Built from the service, then only the
/// week cursor moves.
pub struct DashboardApp {
    pub job: JobRecord,
    pub stats: Stats,
    pub alerts: Vec<Alert>,
    pub histories: Vec<WeeklyHistory>,
    pub current_week_index: usize,
    pub today: NaiveDate,
}

impl DashboardApp {
    pub fn new(job: JobRecord, stats: Stats, histories: Vec<WeeklyHistory>, today: NaiveDate) -> Self {
        Self {
            alerts: Alert::from_stats(&stats),
            job,
            stats,
            // Histories are newest first
            current_week_index: 0,
            histories,
            today,
        }
    }

    /// Steps toward older weeks.
    pub fn previous_week(&mut self) {
        if !self.histories.is_empty() && self.current_week_index < self.histories.len() - 1 {
            self.current_week_index += 1;
        }
    }

    pub fn next_week(&mut self) {
        if self.current_week_index > 0 {
            self.current_week_index -= 1;
        }
    }

    pub fn has_older(&self) -> bool {
        self.current_week_index + 1 < self.histories.len()
    }

    pub fn has_newer(&self) -> bool {
        self.current_week_index > 0
    }

    pub fn current_week(&self) -> Option<&WeeklyHistory> {
        self.histories.get(self.current_week_index)
    }
}
