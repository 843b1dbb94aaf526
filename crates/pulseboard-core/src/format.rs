//! Display formatting for derived metric values.

/// Period-over-period change in percent.
///
/// Defined as zero when there is no previous value to compare against.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Render a duration in seconds as whole minutes plus rounded remainder
/// seconds, e.g. `125.7` → `"2m 6s"`.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let remainder = (seconds % 60.0).round() as i64;
    format!("{minutes}m {remainder}s")
}

/// Two-decimal percentage string, e.g. `12.345` → `"12.35%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Reformat the Data API's compact `YYYYMMDD` date as `YYYY-MM-DD`.
///
/// Anything that is not exactly eight ASCII characters passes through
/// unchanged rather than erroring.
pub fn format_compact_date(raw: &str) -> String {
    if raw.len() != 8 || !raw.is_ascii() {
        return raw.to_string();
    }
    format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8])
}
