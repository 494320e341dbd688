//! pt-BR presentation helpers shared by the dashboard, fleet and demo views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT_BR: &str = "%d/%m/%Y";

/// Rounds half-up, the way the browser's `Math.round` does (`-2.5` → `-2`).
pub fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date_like(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

pub fn format_date_br(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_BR).to_string()
}

/// `1250` → `1.250`, `1250.5` → `1.250,5`; at most three fraction digits.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".into()
        } else if value > 0.0 {
            "∞".into()
        } else {
            "-∞".into()
        };
    }

    let scaled = (value.abs() * 1000.0).round() as u64;
    let integer = scaled / 1000;
    let fraction = scaled % 1000;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let frac = format!("{fraction:03}");
        grouped.push(',');
        grouped.push_str(frac.trim_end_matches('0'));
    }

    if value < 0.0 && scaled > 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Share of `target` already received, as a whole percentage.
pub fn calculate_percentage(received: f64, target: f64) -> i64 {
    if target == 0.0 {
        return 0;
    }
    js_round(received / target * 100.0) as i64
}
