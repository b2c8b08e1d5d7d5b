//! Actions dispatched through the app loop.

use std::sync::Arc;

use ovenwatch_core::DashboardState;

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    SwitchScreen(ScreenId),
    ToggleHelp,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    /// The poller applied a new cycle outcome.
    StateUpdated(Arc<DashboardState>),
}
