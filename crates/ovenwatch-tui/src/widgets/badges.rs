//! Station badges as styled spans.

use ratatui::text::Span;

use ovenwatch_core::Badge;

use crate::theme;

pub fn badge_span(badge: &Badge) -> Span<'static> {
    let style = match badge {
        Badge::Size(_) => theme::badge(),
        Badge::Restriction(_) => theme::badge_warning(),
        Badge::OutOfService => theme::badge_error(),
    };
    Span::styled(format!(" {badge} "), style)
}

/// Badges separated by single spaces.
pub fn badge_spans(badges: &[Badge]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(badges.len() * 2);
    for (i, badge) in badges.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(badge_span(badge));
    }
    spans
}
