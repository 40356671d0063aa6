//! Hardware back-button binding
//!
//! The embedder delivers back presses over a channel; the binding forwards
//! them to the shell and emits an exit prompt whenever a root screen
//! intercepts the press. Registered once at startup and released on
//! stop/drop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use unilink_core::BackAction;

use crate::shell::AppShell;

/// Scoped registration of the platform back-button handler.
pub struct BackBinding {
    task: JoinHandle<()>,
}

impl BackBinding {
    /// Start forwarding back presses from `presses` into the shell.
    ///
    /// When the shell answers [`BackAction::ConfirmExit`], a unit message is
    /// sent on `exit_prompts`; the embedder shows the confirmation dialog
    /// (accept terminates the app, cancel is a no-op).
    pub fn start(
        shell: Arc<AppShell>,
        mut presses: mpsc::UnboundedReceiver<()>,
        exit_prompts: mpsc::UnboundedSender<()>,
    ) -> Self {
        let task = tokio::spawn(async move {
            while presses.recv().await.is_some() {
                match shell.back_request() {
                    BackAction::Handled => {
                        debug!(screen = %shell.current_screen(), "back press handled");
                    }
                    BackAction::ConfirmExit => {
                        if exit_prompts.send(()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Self { task }
    }

    /// Release the registration.
    pub fn stop(self) {
        // Drop does the actual release.
    }
}

impl Drop for BackBinding {
    fn drop(&mut self) {
        self.task.abort();
    }
}
