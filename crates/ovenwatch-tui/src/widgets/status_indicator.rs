//! Connection dot: ●/○/◐ with color mapping.

use ratatui::style::Style;
use ratatui::text::Span;

use ovenwatch_core::ConnectionState;

use crate::theme;

/// Styled dot plus label for the status bar.
pub fn connection_span(state: &ConnectionState) -> Span<'static> {
    let (symbol, label, color) = match state {
        ConnectionState::Connected => ("●", "connected".to_owned(), theme::CONNECTED),
        ConnectionState::Disconnected { reason } => {
            ("○", format!("disconnected: {reason}"), theme::DISCONNECTED)
        }
        ConnectionState::Connecting => ("◐", "connecting".to_owned(), theme::ELECTRIC_YELLOW),
    };
    Span::styled(format!("{symbol} {label}"), Style::default().fg(color))
}
