use crate::model::stats::Stats;

pub const ABSENT_STREAK_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// Banners the dashboard shows above the stat cards.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    NoTarget,
    NotStarted,
    Completed,
    NearCompletion { percent: f64 },
    AbsentStreak { days: u32 },
}

impl Alert {
    pub fn from_stats(stats: &Stats) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if stats.target_hours <= 0.0 {
            alerts.push(Alert::NoTarget);
        }
        if !stats.has_started {
            alerts.push(Alert::NotStarted);
        }

        // Completed supersedes the near-completion banner.
        if stats.is_completed {
            alerts.push(Alert::Completed);
        } else if stats.is_near_completion {
            alerts.push(Alert::NearCompletion { percent: stats.percent_complete });
        }

        if stats.current_absent_streak >= ABSENT_STREAK_THRESHOLD {
            alerts.push(Alert::AbsentStreak { days: stats.current_absent_streak });
        }

        alerts
    }

    pub fn severity(&self) -> Severity {
        match self {
            Alert::NoTarget | Alert::NotStarted => Severity::Info,
            Alert::Completed => Severity::Success,
            Alert::NearCompletion { .. } => Severity::Info,
            Alert::AbsentStreak { .. } => Severity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Alert::NoTarget => "No required hours set. Run `dtr init` to set a target.".to_string(),
            Alert::NotStarted => "The job has no start date yet, or it starts in the future.".to_string(),
            Alert::Completed => "Required hours completed!".to_string(),
            Alert::NearCompletion { percent } => {
                format!("Almost there: {:.0}% of required hours logged.", percent)
            }
            Alert::AbsentStreak { days } => format!("No entries for the last {} days.", days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> Stats {
        Stats {
            target_hours: 100.0,
            has_started: true,
            ..Stats::default()
        }
    }

    #[test]
    fn test_no_alerts_for_ordinary_progress() {
        let mut s = stats();
        s.percent_complete = 40.0;
        assert!(Alert::from_stats(&s).is_empty());
    }

    #[test]
    fn test_completed_replaces_near_completion() {
        let mut s = stats();
        s.percent_complete = 100.0;
        s.is_near_completion = true;
        s.is_completed = true;

        let alerts = Alert::from_stats(&s);
        assert_eq!(alerts, vec![Alert::Completed]);
        assert_eq!(alerts[0].severity(), Severity::Success);
    }

    #[test]
    fn test_near_completion_and_streak() {
        let mut s = stats();
        s.percent_complete = 85.0;
        s.is_near_completion = true;
        s.current_absent_streak = 4;

        let alerts = Alert::from_stats(&s);
        assert_eq!(alerts, vec![
            Alert::NearCompletion { percent: 85.0 },
            Alert::AbsentStreak { days: 4 },
        ]);
        assert_eq!(alerts[1].severity(), Severity::Warning);
        assert_eq!(alerts[0].message(), "Almost there: 85% of required hours logged.");
    }

    #[test]
    fn test_unset_job() {
        let alerts = Alert::from_stats(&Stats::default());
        assert_eq!(alerts, vec![Alert::NoTarget, Alert::NotStarted]);
    }
}
