//! Human-readable timestamps.

use chrono::{DateTime, Utc};

/// Formats `at` relative to `now`, e.g. `"5m ago"`.
///
/// Anything older than a week falls back to a calendar date.
#[must_use]
pub fn relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        format!("{}m ago", elapsed.num_minutes())
    } else if seconds < 86_400 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        at.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_recent() {
        assert_eq!(relative(now() - Duration::seconds(5), now()), "just now");
        assert_eq!(relative(now() - Duration::minutes(5), now()), "5m ago");
        assert_eq!(relative(now() - Duration::hours(3), now()), "3h ago");
        assert_eq!(relative(now() - Duration::days(2), now()), "2d ago");
    }

    #[test]
    fn test_future_is_just_now() {
        assert_eq!(relative(now() + Duration::minutes(5), now()), "just now");
    }

    #[test]
    fn test_old_uses_date() {
        assert_eq!(relative(now() - Duration::days(30), now()), "Feb 8, 2025");
    }
}
