//! Rendering helpers for the countdown display.

/// Below this many seconds the countdown is shown as a warning.
pub const WARNING_THRESHOLD_SECS: i64 = 120;

/// Renders seconds as zero-padded `MM:SS`. Negative values render as `00:00`.
pub fn format_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn is_warning(seconds: i64) -> bool {
    seconds < WARNING_THRESHOLD_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(900), "15:00");
        assert_eq!(format_time(-3), "00:00");
    }

    #[test]
    fn test_warning_threshold() {
        assert!(is_warning(119));
        assert!(!is_warning(120));
        assert!(is_warning(0));
    }
}
