use serde::{Deserialize, Serialize};

pub const NEAR_COMPLETION_PERCENT: f64 = 80.0;
pub const COMPLETED_PERCENT: f64 = 100.0;

/// Derived progress figures for one job. Always rebuilt, never edited.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Stats {
    pub target_hours: f64,
    pub total_hours_logged: f64,
    pub percent_complete: f64,
    pub remaining_hours: f64,
    pub days_logged: u32,
    pub days_since_start: u32,
    pub absent_days: u32,
    /// Zero-hour entries. Counted apart from `absent_days`.
    pub absence_entries: u32,
    /// Consecutive days without any entry, ending today.
    pub current_absent_streak: u32,
    pub is_near_completion: bool,
    pub is_completed: bool,
    pub has_started: bool,
}

impl Stats {
    pub fn ratio(&self) -> f64 {
        self.percent_complete / 100.0
    }
}
