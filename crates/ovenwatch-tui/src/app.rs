//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use ovenwatch_core::{DashboardState, Poller};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::{bar_fmt, status_indicator};

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Latest view model, for the status bar.
    state: Arc<DashboardState>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller: Poller,
    /// Stops the data bridge and the poll schedule.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(poller: Poller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        let active_screen = ScreenId::default();
        if let Some(screen) = screens.get_mut(&active_screen) {
            screen.set_focused(true);
        }

        Self {
            active_screen,
            screens,
            running: true,
            help_visible: false,
            state: Arc::default(),
            action_tx,
            action_rx,
            poller,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let bridge = {
            let poller = self.poller.clone();
            let tx = self.action_tx.clone();
            let cancel = self.data_cancel.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(poller, tx, cancel).await;
            })
        };

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // Drain everything queued, including data bridge updates
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys are handled here; everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('q') => Ok(Some(Action::Quit)),
                KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                    Ok(Some(Action::Quit))
                }
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(screen) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Update app state, then propagate the action to the screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::SwitchScreen(target) if *target != self.active_screen => {
                debug!("switching screen: {} → {}", self.active_screen, target);
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    screen.set_focused(false);
                }
                self.active_screen = *target;
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    screen.set_focused(true);
                }
            }

            Action::StateUpdated(state) => {
                self.state = Arc::clone(state);
            }

            _ => {}
        }

        // Data updates reach every screen; input-driven actions only the active one
        let follow_ups = match action {
            Action::StateUpdated(_) | Action::Tick | Action::Resize(..) => {
                let mut follow_ups = Vec::new();
                for screen in self.screens.values_mut() {
                    if let Some(next) = screen.update(action)? {
                        follow_ups.push(next);
                    }
                }
                follow_ups
            }
            _ => match self.screens.get_mut(&self.active_screen) {
                Some(screen) => screen.update(action)?.into_iter().collect(),
                None => Vec::new(),
            },
        };

        for next in follow_ups {
            self.action_tx.send(next)?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // [screen content] [tab bar] [status bar]
        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Connection dot, data freshness, endpoint and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let freshness = match self.state.last_success {
            Some(at) => {
                let elapsed = (Utc::now() - at).to_std().unwrap_or_default();
                format!("updated {}", bar_fmt::fmt_ago(elapsed))
            }
            None => "no data yet".to_owned(),
        };

        let line = Line::from(vec![
            Span::raw(" "),
            status_indicator::connection_span(&self.state.connection),
            Span::styled(format!(" │ {freshness}"), theme::tab_inactive()),
            Span::styled(
                format!(" │ {}", self.poller.config().endpoint),
                theme::key_hint(),
            ),
            Span::styled(" │ ? help  Tab switch  q quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 48u16.min(area.width.saturating_sub(4));
    let help_height = 14u16.min(area.height.saturating_sub(4));
    let help_area = Rect::new(
        area.x + (area.width.saturating_sub(help_width)) / 2,
        area.y + (area.height.saturating_sub(help_height)) / 2,
        help_width,
        help_height,
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        help_area,
    );

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Navigation",
            Style::default().fg(theme::NEON_CYAN),
        )),
        entry("1-2", "Jump to screen"),
        entry("Tab", "Next screen"),
        entry("j/k ↑/↓", "Scroll stations"),
        entry("g/G", "First / last station"),
        Line::from(""),
        Line::from(Span::styled(
            "  General",
            Style::default().fg(theme::NEON_CYAN),
        )),
        entry("?", "Toggle this help"),
        entry("q Ctrl+C", "Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
