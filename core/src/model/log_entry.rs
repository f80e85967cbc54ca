use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl LogEntry {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            hours,
            note: None,
        }
    }

    /// A zero-hour entry the user filed to say they were away that day.
    pub fn absence(date: NaiveDate) -> Self {
        Self::new(date, 0.0)
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn is_absence_marker(&self) -> bool {
        self.hours == 0.0
    }

    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}
