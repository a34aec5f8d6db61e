//! Per-window converter session: raw input, converted output, and copy feedback.

use converter::transform_with;
use shared::{
    domain::{CopyFeedbackState, MalformedDirective, MalformedPolicy},
    error::UserNotice,
};
use tokio::{runtime::Handle, sync::watch};
use tracing::{debug, warn};

pub mod clipboard;
pub mod feedback;

pub use clipboard::{detect_clipboard, ClipboardCapability, MissingClipboard, SystemClipboard};
pub use feedback::{CopyFeedback, COPY_FEEDBACK_DURATION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { chars: usize },
    Notice(UserNotice),
}

pub struct Session {
    input: String,
    output: Vec<String>,
    policy: MalformedPolicy,
    clipboard: Box<dyn ClipboardCapability>,
    feedback: CopyFeedback,
}

impl Session {
    /// `runtime` drives the feedback reversion timer; it must outlive the session.
    pub fn new(clipboard: Box<dyn ClipboardCapability>, runtime: Handle) -> Self {
        Self {
            input: String::new(),
            output: Vec::new(),
            policy: MalformedPolicy::default(),
            clipboard,
            feedback: CopyFeedback::new(runtime),
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Replaces the output with a fresh conversion of the current input.
    pub fn submit(&mut self) -> Vec<MalformedDirective> {
        let report = transform_with(&self.input, self.policy);
        debug!(
            input_bytes = self.input.len(),
            output_lines = report.lines.len(),
            "submitted converter input"
        );
        self.output = report.lines;
        report.malformed
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    pub fn copy_text(&self) -> String {
        self.output.join("\n")
    }

    pub fn clipboard_available(&self) -> bool {
        self.clipboard.is_available()
    }

    /// Copies the joined output. Failures come back as a notice, never as an error.
    pub fn request_copy(&mut self) -> CopyOutcome {
        if !self.clipboard.is_available() {
            warn!("copy requested but no clipboard is available");
            return CopyOutcome::Notice(UserNotice::clipboard_unavailable());
        }

        let text = self.copy_text();
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.feedback.activate();
                let chars = text.chars().count();
                debug!(chars, "copied converter output to clipboard");
                CopyOutcome::Copied { chars }
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                CopyOutcome::Notice(err.into())
            }
        }
    }

    pub fn feedback(&self) -> CopyFeedbackState {
        self.feedback.state()
    }

    pub fn subscribe_feedback(&self) -> watch::Receiver<CopyFeedbackState> {
        self.feedback.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
