use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParsePolicyError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyFeedbackState {
    #[default]
    Idle,
    JustCopied,
}

/// What the transform does with a line that starts like an image tag but
/// cannot be split into alt text and url.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Emit the line unchanged, the same way a plain text line is emitted.
    #[default]
    Passthrough,
    /// Leave the line out of the output.
    Skip,
}

impl MalformedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MalformedPolicy::Passthrough => "passthrough",
            MalformedPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MalformedPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        if normalized.eq_ignore_ascii_case("passthrough") {
            Ok(MalformedPolicy::Passthrough)
        } else if normalized.eq_ignore_ascii_case("skip") {
            Ok(MalformedPolicy::Skip)
        } else {
            Err(ParsePolicyError(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// No `](` between the alt text and the url.
    MissingAltUrlSeparator,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingAltUrlSeparator => f.write_str("missing `](` after alt text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedDirective {
    /// 1-based line number in the raw input, blank lines included.
    pub line_number: usize,
    pub line: String,
    pub reason: MalformedReason,
}
