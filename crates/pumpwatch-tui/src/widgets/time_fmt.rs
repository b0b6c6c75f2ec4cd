//! Human-readable timestamp formatting helpers.

use chrono::NaiveDateTime;
use std::time::Duration;

/// Format how long ago a timestamp was, relative to `now` (e.g., "4h ago",
/// "2days ago"). Timestamps in the future render as "now".
pub fn fmt_ago(at: NaiveDateTime, now: NaiveDateTime) -> String {
    let Ok(elapsed) = (now - at).to_std() else {
        return "now".to_owned();
    };
    // Truncate to whole minutes so humantime stays compact.
    let whole_minutes = Duration::from_secs(elapsed.as_secs() / 60 * 60);
    if whole_minutes.is_zero() {
        return "now".to_owned();
    }
    format!("{} ago", humantime::format_duration(whole_minutes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn relative_forms() {
        assert_eq!(fmt_ago(at(15, 14, 0), at(15, 14, 30)), "30m ago");
        assert_eq!(fmt_ago(at(15, 10, 0), at(15, 14, 30)), "4h 30m ago");
        assert_eq!(fmt_ago(at(15, 14, 30), at(15, 14, 30)), "now");
        assert_eq!(fmt_ago(at(16, 0, 0), at(15, 0, 0)), "now");
    }

}
