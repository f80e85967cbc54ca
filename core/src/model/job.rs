use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// The placement a DTR is kept against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct JobRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_hours: Option<f64>,
}

impl JobRecord {
    pub fn new(name: Option<String>, start_date: NaiveDate, total_hours: f64) -> Self {
        Self {
            name,
            start_date: Some(start_date),
            total_hours: Some(total_hours),
        }
    }

    /// Required hours, with anything unusable collapsed to 0.
    pub fn target_hours(&self) -> f64 {
        match self.total_hours {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_hours_defaults_to_zero() {
        let mut job = JobRecord::default();
        assert_eq!(job.target_hours(), 0.0);

        job.total_hours = Some(-10.0);
        assert_eq!(job.target_hours(), 0.0);

        job.total_hours = Some(f64::NAN);
        assert_eq!(job.target_hours(), 0.0);

        job.total_hours = Some(486.0);
        assert_eq!(job.target_hours(), 486.0);
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let job: JobRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(job, JobRecord::default());
    }
}
