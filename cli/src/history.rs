use dtr_core::WeeklyHistory;
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify};
use tabled::settings::object::Rows;

use crate::report::truncate;

const NOTE_WIDTH: usize = 40;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Note")]
    note: String,
}

pub fn show_history(histories: &[WeeklyHistory]) {
    if histories.is_empty() {
        println!("No log entries yet.");
        return;
    }

    for week in histories {
        println!(
            "\n\x1b[1;36mWeek {}, {}\x1b[0m ({:.1}h over {} entries)",
            week.week, week.year, week.stats.total_hours, week.stats.entries
        );

        let mut rows = Vec::new();
        for day in &week.days {
            let day_header = format!("{} ({})\n{:.1}h", day.date, day.day_of_week, day.stats.total_hours);

            for (i, entry) in day.entries.iter().enumerate() {
                let hours = if entry.is_absence_marker() {
                    "absent".to_string()
                } else {
                    format!("{:.1}", entry.hours)
                };
                let note = entry.note.as_deref().unwrap_or("");

                rows.push(HistoryRow {
                    // Only the first row of a day carries the date
                    date: if i == 0 { day_header.clone() } else { String::new() },
                    id: entry.short_id(),
                    hours,
                    note: truncate(note, NOTE_WIDTH),
                });
            }
        }

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

        println!("{}", table);
    }
}
