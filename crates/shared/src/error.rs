use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CLIPBOARD_UNAVAILABLE_MESSAGE: &str =
    "Sorry, this environment does not support clipboard copy.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeCode {
    ClipboardUnavailable,
    ClipboardWriteFailed,
}

/// Message meant for the person using the tool, never a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotice {
    pub code: NoticeCode,
    pub message: String,
}

impl UserNotice {
    pub fn new(code: NoticeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn clipboard_unavailable() -> Self {
        Self::new(
            NoticeCode::ClipboardUnavailable,
            CLIPBOARD_UNAVAILABLE_MESSAGE,
        )
    }

    pub fn clipboard_write_failed(reason: impl fmt::Display) -> Self {
        Self::new(
            NoticeCode::ClipboardWriteFailed,
            format!("Copy to clipboard failed: {reason}"),
        )
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard rejected the write: {0}")]
    WriteRejected(String),
}

impl From<ClipboardError> for UserNotice {
    fn from(value: ClipboardError) -> Self {
        match value {
            ClipboardError::Unavailable(_) => UserNotice::clipboard_unavailable(),
            ClipboardError::WriteRejected(reason) => UserNotice::clipboard_write_failed(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown malformed-directive policy '{0}'; expected 'passthrough' or 'skip'")]
pub struct ParsePolicyError(pub String);
