//! Stations screen: one row per production station, sorted by id.
//!
//! Layout per station:
//! │ Station #1   Size M   🚫 gluten                       │
//! │ ████████████████░░░░░░░░░░░░░░░░   24 / 50 pizzas  48%│
//!
//! Rows at or above capacity draw their bar in the "full" style; rows for
//! stations out of service are faded.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use ovenwatch_core::{DashboardState, StationRow};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, bar_fmt};

/// Terminal lines per station row, separator included.
const ROW_HEIGHT: u16 = 3;

pub struct StationsScreen {
    focused: bool,
    state: Arc<DashboardState>,
    /// Index of the first visible station.
    scroll: usize,
}

impl StationsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: Arc::default(),
            scroll: 0,
        }
    }

    fn station_count(&self) -> usize {
        self.state.stations.as_ref().map_or(0, Vec::len)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.station_count().saturating_sub(1));
    }
}

fn station_lines(row: &StationRow, width: u16) -> Vec<Line<'static>> {
    let load = format!("  {}  {:>4}", row.load_text(), bar_fmt::fmt_pct(row.ratio_pct));
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    let load_width = load.chars().count() as u16;
    let (filled, empty) =
        bar_fmt::fmt_pct_bar(row.ratio_pct, width.saturating_sub(load_width + 1).max(1));

    let fill_style = if row.is_full {
        theme::bar_full()
    } else {
        theme::bar_normal()
    };

    let mut header = vec![
        Span::styled(format!(" {}", row.title()), theme::title_style()),
        Span::raw("   "),
    ];
    header.extend(badges::badge_spans(&row.badges));

    let mut lines = vec![
        Line::from(header),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(filled, fill_style),
            Span::styled(empty, theme::bar_empty()),
            Span::styled(load, theme::tab_inactive()),
        ]),
        Line::from(""),
    ];

    if row.dimmed {
        for line in &mut lines {
            for span in &mut line.spans {
                span.style = theme::dimmed(span.style);
            }
        }
    }
    lines
}

impl Component for StationsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::ScrollTop,
            KeyCode::Char('G') | KeyCode::End => Action::ScrollBottom,
            _ => return Ok(None),
        };
        Ok(Some(action))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StateUpdated(state) => {
                self.state = Arc::clone(state);
                self.clamp_scroll();
            }
            Action::ScrollDown => {
                self.scroll += 1;
                self.clamp_scroll();
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollTop => self.scroll = 0,
            Action::ScrollBottom => {
                self.scroll = self.station_count().saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let title = match self.state.stations.as_deref() {
            Some(rows) => format!(" Stations ({}) ", rows.len()),
            None => " Stations ".to_owned(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = match self.state.stations.as_deref() {
            Some([]) => {
                let empty = Span::styled("  No stations reported", theme::key_hint());
                frame.render_widget(Paragraph::new(empty), inner);
                return;
            }
            Some(rows) => rows,
            None => {
                let note = if self.state.accepted.is_some() {
                    "  Not reported by this endpoint"
                } else {
                    "  Waiting for data..."
                };
                frame.render_widget(Paragraph::new(Span::styled(note, theme::key_hint())), inner);
                return;
            }
        };

        let lines: Vec<Line> = rows
            .iter()
            .skip(self.scroll)
            .take(usize::from(inner.height / ROW_HEIGHT) + 1)
            .flat_map(|row| station_lines(row, inner.width))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
