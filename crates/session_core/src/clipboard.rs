//! Clipboard capability injected into a [`Session`](crate::Session).

use shared::error::ClipboardError;
use tracing::{info, warn};

pub trait ClipboardCapability {
    fn is_available(&self) -> bool;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Stand-in used when the host has no clipboard at all.
pub struct MissingClipboard;

impl ClipboardCapability for MissingClipboard {
    fn is_available(&self) -> bool {
        false
    }

    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no clipboard capability in this environment".to_string(),
        ))
    }
}

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }
}

impl ClipboardCapability for SystemClipboard {
    fn is_available(&self) -> bool {
        true
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|err| ClipboardError::WriteRejected(err.to_string()))
    }
}

/// Probes the system clipboard once and falls back to [`MissingClipboard`].
pub fn detect_clipboard() -> Box<dyn ClipboardCapability> {
    match SystemClipboard::new() {
        Ok(clipboard) => {
            info!("system clipboard detected");
            Box::new(clipboard)
        }
        Err(err) => {
            warn!(error = %err, "system clipboard unavailable; copy requests will show a notice");
            Box::new(MissingClipboard)
        }
    }
}
