//! Overview screen: order counters and ingredient consumption bars.
//!
//! Layout:
//! ┌─ Orders ──────────────────────────────────────────────┐
//! │   Accepted   128            Refused   7                │
//! └────────────────────────────────────────────────────────┘
//! ┌─ Ingredients ──────────────────────────────────────────┐
//! │ R Red      42  ██████████░░░░░░░░░░░░░░░  40%          │
//! │ J Yellow   21  █████░░░░░░░░░░░░░░░░░░░░  20%          │
//! │ ...                                                    │
//! └────────────────────────────────────────────────────────┘

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use ovenwatch_core::{DashboardState, IngredientBar};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::bar_fmt;

pub struct OverviewScreen {
    focused: bool,
    state: Arc<DashboardState>,
}

impl OverviewScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: Arc::default(),
        }
    }

    fn border_style(&self) -> Style {
        if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        }
    }

    fn render_counters(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Orders ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let counter = |value: Option<u64>| {
            value.map_or_else(|| "-".to_owned(), |v| v.to_string())
        };

        let [accepted_area, refused_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);

        let accepted = Line::from(vec![
            Span::styled("  Accepted  ", theme::key_hint()),
            Span::styled(
                counter(self.state.accepted),
                theme::counter_value().fg(theme::CONNECTED),
            ),
        ]);
        let refused = Line::from(vec![
            Span::styled("  Refused  ", theme::key_hint()),
            Span::styled(
                counter(self.state.refused),
                theme::counter_value().fg(theme::DISCONNECTED),
            ),
        ]);

        frame.render_widget(Paragraph::new(accepted), accepted_area);
        frame.render_widget(Paragraph::new(refused), refused_area);
    }

    fn render_ingredients(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Ingredients ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(bars) = self.state.ingredients.as_deref() else {
            let note = if self.state.accepted.is_some() {
                "  Not reported by this endpoint"
            } else {
                "  Waiting for data..."
            };
            frame.render_widget(Paragraph::new(Span::styled(note, theme::key_hint())), inner);
            return;
        };

        // "R Yellow  12345  " + bar + "  100%"
        let bar_width = inner.width.saturating_sub(24).max(1);
        let lines: Vec<Line> = bars
            .iter()
            .map(|bar| ingredient_line(bar, bar_width))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn ingredient_line(bar: &IngredientBar, width: u16) -> Line<'static> {
    let color = theme::ingredient_color(bar.ingredient);
    let (filled, empty) = bar_fmt::fmt_pct_bar(bar.pct, width);
    Line::from(vec![
        Span::styled(
            format!(" {} ", bar.ingredient.code()),
            Style::default().fg(color),
        ),
        Span::styled(format!("{:<7}", bar.ingredient.label()), theme::tab_inactive()),
        Span::styled(format!("{:>6}  ", bar.count), theme::counter_value()),
        Span::styled(filled, Style::default().fg(color)),
        Span::styled(empty, theme::bar_empty()),
        Span::styled(format!(" {:>5}", bar_fmt::fmt_pct(bar.pct)), theme::key_hint()),
    ])
}

impl Component for OverviewScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateUpdated(state) = action {
            self.state = Arc::clone(state);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [counters, ingredients] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(6)]).areas(area);
        self.render_counters(frame, counters);
        self.render_ingredients(frame, ingredients);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ovenwatch_core::{IngredientCounts, StatsSnapshot};

    use crate::screens::testing::render_to_text;

    fn screen_with(snapshot: &StatsSnapshot) -> OverviewScreen {
        let mut state = DashboardState::default();
        state.apply_snapshot(1, snapshot, Utc::now());
        let mut screen = OverviewScreen::new();
        screen
            .update(&Action::StateUpdated(Arc::new(state)))
            .unwrap();
        screen
    }

    #[test]
    fn shows_placeholders_before_first_poll() {
        let text = render_to_text(&OverviewScreen::new(), 60, 12);
        assert!(text.contains("Accepted  -"));
        assert!(text.contains("Waiting for data"));
    }

    #[test]
    fn renders_counters_and_bars() {
        let screen = screen_with(&StatsSnapshot {
            accepted: 128,
            refused: 7,
            ingredients: Some(IngredientCounts {
                red: 1,
                yellow: 1,
                green: 2,
                blue: 0,
            }),
            stations: None,
        });
        let text = render_to_text(&screen, 60, 12);

        assert!(text.contains("Accepted  128"));
        assert!(text.contains("Refused  7"));
        assert!(text.contains("25%"));
        assert!(text.contains("50%"));
        assert!(text.contains(" B Blue"));
        assert!(text.contains("0%"));
    }

    #[test]
    fn flat_payload_explains_missing_ingredients() {
        let screen = screen_with(&StatsSnapshot {
            accepted: 3,
            refused: 4,
            ingredients: None,
            stations: None,
        });
        let text = render_to_text(&screen, 60, 12);
        assert!(text.contains("Not reported by this endpoint"));
    }
}
