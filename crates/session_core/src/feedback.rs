//! Timed "Copied!" feedback with a single cancelable reversion task.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::domain::CopyFeedbackState;
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::debug;

pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(3);

pub struct CopyFeedback {
    runtime: Handle,
    state: Arc<watch::Sender<CopyFeedbackState>>,
    activation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl CopyFeedback {
    pub fn new(runtime: Handle) -> Self {
        let (state, _) = watch::channel(CopyFeedbackState::Idle);
        Self {
            runtime,
            state: Arc::new(state),
            activation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn state(&self) -> CopyFeedbackState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CopyFeedbackState> {
        self.state.subscribe()
    }

    /// Switches to `JustCopied` and (re)arms the reversion timer.
    ///
    /// A pending reversion from an earlier activation is aborted, and the
    /// activation counter keeps a task that already woke up from reverting a
    /// newer activation.
    pub fn activate(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let activation = self.activation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(CopyFeedbackState::JustCopied);

        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.activation);
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(COPY_FEEDBACK_DURATION).await;
            let reverted = state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != activation
                    || *current == CopyFeedbackState::Idle
                {
                    return false;
                }
                *current = CopyFeedbackState::Idle;
                true
            });
            debug!(activation, reverted, "copy feedback timer fired");
        }));
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/feedback_tests.rs"]
mod tests;
