//! Data bridge: connects the [`Poller`] view-model channel to TUI actions.
//!
//! Starts the poll schedule, then forwards every applied cycle outcome as
//! an [`Action::StateUpdated`] until cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use ovenwatch_core::Poller;

use crate::action::Action;

pub async fn spawn_data_bridge(
    poller: Poller,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut state = poller.subscribe();
    let schedule = poller.spawn(cancel.child_token());

    // Initial (connecting) view so the status bar has something to show
    let _ = action_tx.send(Action::StateUpdated(state.borrow_and_update().clone()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = state.borrow_and_update().clone();
                debug!(sequence = snapshot.last_sequence, "dispatching StateUpdated");
                if action_tx.send(Action::StateUpdated(snapshot)).is_err() {
                    break;
                }
            }
        }
    }

    let _ = schedule.await;
    debug!("data bridge shut down");
}
