use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use anyhow::{anyhow, Result};

/// Parses an hour amount: `8`, `7.5`, `8h`, `30m`, `1h30m`.
pub fn parse_hours(input: &str) -> Result<f64> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(anyhow!("Empty hours string"));
    }

    let hours = if let Ok(plain) = input.parse::<f64>() {
        plain
    } else {
        let mut total = 0.0;
        let mut num = String::new();
        for c in input.chars() {
            match c {
                '0'..='9' | '.' => num.push(c),
                'h' | 'm' => {
                    let value: f64 = num.parse().map_err(|_| anyhow!("Invalid hours: {}", input))?;
                    total += if c == 'h' { value } else { value / 60.0 };
                    num.clear();
                }
                _ => return Err(anyhow!("Unknown unit in hours: {}", input)),
            }
        }
        if !num.is_empty() {
            return Err(anyhow!("Missing unit after '{}' in {}", num, input));
        }
        total
    };

    if !hours.is_finite() || hours < 0.0 {
        return Err(anyhow!("Hours must be a non-negative number: {}", input));
    }
    Ok(hours)
}

/// Reads a calendar date from the loosely formatted strings a backend hands
/// out. Any time-of-day part is dropped.
pub fn parse_lenient_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Resolves a user-typed date relative to `today`.
pub fn parse_log_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let lowered = input.trim().to_lowercase();

    // 1. Reserved keywords
    match lowered.as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (-Nd, -Nw)
    if let Some(rest) = lowered.strip_prefix('-') {
        if rest.len() >= 2 {
            let (num_str, unit) = rest.split_at(rest.len() - 1);
            let count: i64 = num_str.parse().map_err(|_| anyhow!("Invalid relative date: {}", input))?;
            let delta = match unit {
                "d" => Duration::try_days(count),
                "w" => Duration::try_weeks(count),
                _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
            };
            return delta
                .and_then(|delta| today.checked_sub_signed(delta))
                .ok_or_else(|| anyhow!("Relative date out of range: {}", input));
        }
    }

    // 3. Weekday: the most recent one before today
    if let Ok(weekday) = parse_weekday_str(&lowered) {
        let mut days_back = today.weekday().num_days_from_sunday() as i64
            - weekday.num_days_from_sunday() as i64;
        if days_back <= 0 {
            days_back += 7;
        }
        return Ok(today - Duration::days(days_back));
    }

    // 4. Fallback to absolute formats
    parse_lenient_date(input).ok_or_else(|| anyhow!("Could not parse date: {}", input))
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("8").unwrap(), 8.0);
        assert_eq!(parse_hours("7.5").unwrap(), 7.5);
        assert_eq!(parse_hours("8h").unwrap(), 8.0);
        assert_eq!(parse_hours("30m").unwrap(), 0.5);
        assert_eq!(parse_hours("1h30m").unwrap(), 1.5);
        assert_eq!(parse_hours("0").unwrap(), 0.0);

        assert!(parse_hours("").is_err());
        assert!(parse_hours("-2").is_err());
        assert!(parse_hours("8x").is_err());
        assert!(parse_hours("1h30").is_err());
    }

    #[test]
    fn test_parse_lenient_date() {
        assert_eq!(parse_lenient_date("2025-05-01"), Some(d("2025-05-01")));
        assert_eq!(parse_lenient_date("2025-05-01T23:10:00+08:00"), Some(d("2025-05-01")));
        assert_eq!(parse_lenient_date("2025-05-01T08:00:00.123"), Some(d("2025-05-01")));
        assert_eq!(parse_lenient_date("2025-05-01 08:00:00"), Some(d("2025-05-01")));
        assert_eq!(parse_lenient_date("05/01/2025"), None);
        assert_eq!(parse_lenient_date(""), None);
    }

    #[test]
    fn test_parse_log_date() {
        // 2025-05-07 is a Wednesday
        let today = d("2025-05-07");
        assert_eq!(parse_log_date("today", today).unwrap(), today);
        assert_eq!(parse_log_date("yes", today).unwrap(), d("2025-05-06"));
        assert_eq!(parse_log_date("-3d", today).unwrap(), d("2025-05-04"));
        assert_eq!(parse_log_date("-1w", today).unwrap(), d("2025-04-30"));
        assert_eq!(parse_log_date("mon", today).unwrap(), d("2025-05-05"));
        assert_eq!(parse_log_date("wed", today).unwrap(), d("2025-04-30"));
        assert_eq!(parse_log_date("2025-01-02", today).unwrap(), d("2025-01-02"));

        assert!(parse_log_date("someday", today).is_err());
        assert!(parse_log_date("-3y", today).is_err());
    }

    #[test]
    fn test_parse_log_date_out_of_range() {
        let today = d("2025-05-07");
        assert!(parse_log_date("-100000000d", today).is_err());
        assert!(parse_log_date("-99999999999999999d", today).is_err());
        assert!(parse_log_date("-99999999999999w", today).is_err());
    }
}
