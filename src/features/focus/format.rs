//! Duration parsing and countdown formatting.

use chrono::Duration;

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour up.
#[must_use]
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return (minutes > 0).then(|| Duration::minutes(minutes));
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if c.is_whitespace() {
            continue;
        } else {
            if current_num.is_empty() {
                return None;
            }
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    (total_seconds > 0).then(|| Duration::seconds(total_seconds))
}

/// Duration expressed in (possibly fractional) minutes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn as_minutes(d: Duration) -> f64 {
    d.num_seconds() as f64 / 60.0
}
