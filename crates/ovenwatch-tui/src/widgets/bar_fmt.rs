//! Percentage bar and elapsed-time formatting.

use std::time::Duration;

/// Split a percentage bar into filled and empty portions.
///
/// Returns `(filled, empty)` strings of `█` and `░` that together span
/// `width` cells. Values outside 0..=100 are clamped; the caller styles each
/// segment.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fmt_pct_bar(pct: f64, width: u16) -> (String, String) {
    let clamped = if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled_count = ((clamped / 100.0) * f64::from(width)).round() as u16;
    let empty_count = width.saturating_sub(filled_count);
    (
        "█".repeat(usize::from(filled_count)),
        "░".repeat(usize::from(empty_count)),
    )
}

/// "42%" for bar labels. Ratios above 100 are shown as-is.
pub fn fmt_pct(pct: f64) -> String {
    format!("{pct:.0}%")
}

/// Whole-second "3s ago" / "2m 5s ago" label.
pub fn fmt_ago(elapsed: Duration) -> String {
    let secs = Duration::from_secs(elapsed.as_secs());
    format!("{} ago", humantime::format_duration(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bar_spans_full_width() {
        let (filled, empty) = fmt_pct_bar(25.0, 20);
        assert_eq!(filled.chars().count(), 5);
        assert_eq!(empty.chars().count(), 15);
    }

    #[test]
    fn bar_clamps_out_of_range() {
        assert_eq!(fmt_pct_bar(180.0, 4), ("████".to_owned(), String::new()));
        assert_eq!(fmt_pct_bar(-5.0, 3), (String::new(), "░░░".to_owned()));
        assert_eq!(fmt_pct_bar(f64::NAN, 2), (String::new(), "░░".to_owned()));
    }

    #[test]
    fn pct_label() {
        assert_eq!(fmt_pct(0.0), "0%");
        assert_eq!(fmt_pct(33.333), "33%");
        assert_eq!(fmt_pct(120.0), "120%");
    }

    #[test]
    fn ago_label_drops_subseconds() {
        assert_eq!(fmt_ago(Duration::from_millis(3_400)), "3s ago");
        assert_eq!(fmt_ago(Duration::from_secs(125)), "2m 5s ago");
    }
}
