use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

/// A parsed calendar date, optionally time-bearing. Dates travel through the
/// tree as strings; this struct only exists between detection and
/// reformatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub has_time: bool,
}

impl DetectedDate {
    /// `YYYY-MM-DD` — date granularity.
    pub fn format_date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `YYYY-MM-DD HH:MM` — minute granularity, the stored form for
    /// time-bearing values.
    pub fn format_minute(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }

    /// `YYYY-MM-DDTHH:MM:SS` — the form written for "now with time" defaults.
    pub fn format_seconds(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Edit-buffer seed: `YYYY-MM-DD` or datetime-local `YYYY-MM-DDTHH:MM`.
    pub fn format_input(&self) -> String {
        if self.has_time {
            format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute
            )
        } else {
            self.format_date()
        }
    }
}

/// The fixed enumerated date-pattern set. Strings failing every pattern are
/// text, never dates; the list is intentionally not generalized.
fn date_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"^\d{4}-\d{2}-\d{2}$",
            r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}",
            r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z",
            r"^\d{2}/\d{2}/\d{4}$",
            r"^\d{2}-\d{2}-\d{4}$",
            r"^\d{4}/\d{2}/\d{2}$",
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$",
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("date pattern must compile"))
        .collect()
    })
}

fn time_fragment() -> &'static Regex {
    static FRAGMENT: OnceLock<Regex> = OnceLock::new();
    FRAGMENT.get_or_init(|| Regex::new(r"\d{1,2}:\d{2}").expect("time fragment must compile"))
}

fn buffer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").expect("buffer pattern must compile")
    })
}

/// Classification gate: only strings matching the enumerated patterns and
/// forming a real calendar date come back as dates.
pub fn detect_date(val: &str) -> Option<DetectedDate> {
    if !date_patterns().iter().any(|pattern| pattern.is_match(val)) {
        return None;
    }
    parse_fields(val)
}

/// Save-path reparse: the enumerated set plus the datetime-local buffer form
/// (`YYYY-MM-DDTHH:MM`) that the edit input produces.
pub fn parse_date_like(val: &str) -> Option<DetectedDate> {
    if buffer_pattern().is_match(val) {
        return parse_fields(val);
    }
    detect_date(val)
}

fn parse_fields(val: &str) -> Option<DetectedDate> {
    let has_time = val.contains('T') || time_fragment().is_match(val);

    if let Some((date_part, time_part)) = val.split_once('T') {
        let (year, month, day) = parse_ymd_dashed(date_part)?;
        let (hour, minute, second) = parse_time(time_part)?;
        return checked(year, month, day, hour, minute, second, has_time);
    }
    if let Some((date_part, time_part)) = val.split_once(' ') {
        let (year, month, day) = parse_ymd_dashed(date_part)?;
        let (hour, minute, second) = parse_time(time_part)?;
        return checked(year, month, day, hour, minute, second, has_time);
    }
    for sep in ['/', '-'] {
        if let Some(parts) = split_three(val, sep) {
            let (year, month, day) = if parts.0.len() == 4 {
                year_first(parts)?
            } else {
                day_first(parts)?
            };
            return checked(year, month, day, 0, 0, 0, has_time);
        }
    }
    None
}

fn split_three(val: &str, sep: char) -> Option<(&str, &str, &str)> {
    let mut parts = val.split(sep);
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, b, c))
}

fn day_first((d, m, y): (&str, &str, &str)) -> Option<(i32, u32, u32)> {
    Some((y.parse().ok()?, m.parse().ok()?, d.parse().ok()?))
}

fn year_first((y, m, d): (&str, &str, &str)) -> Option<(i32, u32, u32)> {
    Some((y.parse().ok()?, m.parse().ok()?, d.parse().ok()?))
}

fn parse_ymd_dashed(val: &str) -> Option<(i32, u32, u32)> {
    let parts = split_three(val, '-')?;
    if parts.0.len() != 4 {
        return None;
    }
    year_first(parts)
}

fn parse_time(val: &str) -> Option<(u32, u32, u32)> {
    let val = val.trim_end_matches('Z');
    let val = val.split('.').next()?;
    let mut parts = val.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = match parts.next() {
        Some(raw) => raw.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    (hour <= 23 && minute <= 59 && second <= 59).then_some((hour, minute, second))
}

fn checked(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    has_time: bool,
) -> Option<DetectedDate> {
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(DetectedDate {
        year,
        month,
        day,
        hour,
        minute,
        second,
        has_time,
    })
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Current UTC civil date, no time component.
pub fn today() -> DetectedDate {
    let mut date = now();
    date.hour = 0;
    date.minute = 0;
    date.second = 0;
    date.has_time = false;
    date
}

/// Current UTC civil date and time.
pub fn now() -> DetectedDate {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    let (year, month, day) = civil_from_days(secs.div_euclid(86_400));
    let sod = secs.rem_euclid(86_400) as u32;
    DetectedDate {
        year,
        month,
        day,
        hour: sod / 3600,
        minute: (sod / 60) % 60,
        second: sod % 60,
        has_time: true,
    }
}

pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as f64
}

// Days-since-epoch to proleptic Gregorian civil date.
fn civil_from_days(z: i64) -> (i32, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = if month <= 2 { year + 1 } else { year };
    (year as i32, month, day)
}
