/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds at 00:00 UTC of the day containing `millis`
pub fn start_of_day_millis(millis: i64) -> i64 {
    const DAY_MS: i64 = 86_400_000;
    millis - millis.rem_euclid(DAY_MS)
}

/// Milliseconds at 00:00 UTC on the first day of the month containing `millis`
pub fn start_of_month_millis(millis: i64) -> i64 {
    use chrono::{DateTime, Datelike, TimeZone, Utc};

    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(millis) else {
        return start_of_day_millis(millis);
    };
    Utc.with_ymd_and_hms(dt.year(), dt.month(), 1, 0, 0, 0)
        .single()
        .map(|d| d.timestamp_millis())
        .unwrap_or_else(|| start_of_day_millis(millis))
}

/// Milliseconds at 00:00 UTC of a `YYYY-MM-DD` date
pub fn parse_day_millis(date: &str) -> Option<i64> {
    let day = chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// `YYYY-MM-DD` of the UTC day containing `millis`
pub fn format_day(millis: i64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
