use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Weekday};
use std::collections::HashSet;

/// Parse a calendar date like '2025-06-02' or '2025/06/02'
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let input = date_str.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }

    Err(anyhow::anyhow!(
        "Invalid date format: '{}'\n\nSupported formats:\n  • ISO: '2025-06-02'\n  • Slashed: '2025/06/02'\n  • Dotted: '02.06.2025'",
        date_str
    ))
}

/// Parse time string like "9:00 AM", "14:30", "9pm", "noon", "midnight"
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    let input = time_str.trim().to_lowercase();

    // Handle special times first
    match input.as_str() {
        "noon" | "12pm" | "12:00pm" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        "midnight" | "12am" | "12:00am" => return Ok(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
        _ => {}
    }

    let formats = [
        "%H:%M:%S",    // 14:30:00
        "%H:%M",       // 14:30
        "%I:%M:%S %p", // 9:00:00 AM
        "%I:%M %p",    // 9:00 AM
        "%I%p",        // 9AM, 9PM
        "%I %p",       // 9 AM, 9 PM
        "%H",          // 14 (hour only)
    ];

    // Try original input first
    for format in &formats {
        if let Ok(time) = NaiveTime::parse_from_str(time_str.trim(), format) {
            return Ok(time);
        }
    }

    // Try with normalized input (lowercase)
    for format in &formats {
        if let Ok(time) = NaiveTime::parse_from_str(&input, format) {
            return Ok(time);
        }
    }

    Err(anyhow::anyhow!(
        "Invalid time format: '{}'\n\nSupported formats:\n  • 24-hour: '14:30', '09:00'\n  • 12-hour: '2:30 PM', '9:00 AM'\n  • Compact: '2pm', '9am'\n  • Special: 'noon', 'midnight'",
        time_str
    ))
}

/// Parse a weekday list like "mon,tue,wed", "monday,tuesday", or "weekdays"
pub fn parse_weekdays(days_str: &str) -> Result<HashSet<Weekday>> {
    let input = days_str.trim().to_lowercase();

    // Handle special day groups
    match input.as_str() {
        "weekdays" | "workdays" => {
            return Ok([
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]
            .into_iter()
            .collect());
        }
        "weekends" => {
            return Ok([Weekday::Sat, Weekday::Sun].into_iter().collect());
        }
        "daily" | "everyday" => {
            return Ok([
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ]
            .into_iter()
            .collect());
        }
        _ => {}
    }

    let mut weekdays = HashSet::new();
    let mut invalid_days = Vec::new();

    for day in input.split(',') {
        let day = day.trim();
        if day.is_empty() {
            continue;
        }

        let weekday = match day {
            "mon" | "monday" | "m" => Weekday::Mon,
            "tue" | "tuesday" | "tu" => Weekday::Tue,
            "wed" | "wednesday" | "w" => Weekday::Wed,
            "thu" | "thursday" | "th" => Weekday::Thu,
            "fri" | "friday" | "f" => Weekday::Fri,
            "sat" | "saturday" | "sa" => Weekday::Sat,
            "sun" | "sunday" | "su" => Weekday::Sun,
            _ => {
                invalid_days.push(day.to_string());
                continue;
            }
        };
        weekdays.insert(weekday);
    }

    if !invalid_days.is_empty() {
        return Err(anyhow::anyhow!(
            "Invalid day(s): {}\n\nSupported formats:\n  • Full names: 'monday,tuesday,wednesday'\n  • Short names: 'mon,tue,wed'\n  • Single letters: 'm,tu,w,th,f,sa,su'\n  • Groups: 'weekdays', 'weekends', 'daily'",
            invalid_days.join(", ")
        ));
    }

    if weekdays.is_empty() {
        return Err(anyhow::anyhow!(
            "No valid days specified in: '{}'\n\nExamples:\n  • mon,wed,fri\n  • weekdays\n  • monday,wednesday,friday",
            days_str
        ));
    }

    Ok(weekdays)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2025-06-02").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert!(parse_date("junk").is_err());
    }

    #[test]
    fn parses_friendly_times() {
        assert_eq!(
            parse_time("14:30").unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("9:00 AM").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("noon").unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert!(parse_time("soonish").is_err());
    }

    #[test]
    fn parses_weekday_groups() {
        let weekdays = parse_weekdays("weekdays").unwrap();
        assert_eq!(weekdays.len(), 5);
        assert!(!weekdays.contains(&Weekday::Sat));

        let listed = parse_weekdays("mon,wed,fri").unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.contains(&Weekday::Wed));

        assert!(parse_weekdays("mon,funday").is_err());
        assert!(parse_weekdays(",").is_err());
    }
}
