//! Line-oriented conversion of Markdown image tags into fixed-width HTML `<img>` tags.
//!
//! Only lines that start with `![` are touched. Everything else passes through
//! verbatim, and empty lines are dropped.

use serde::Serialize;
use shared::domain::{MalformedDirective, MalformedPolicy, MalformedReason};
use tracing::debug;

/// Rendered width of every converted image, in pixels.
pub const DISPLAY_WIDTH: u32 = 300;

const DIRECTIVE_PREFIX: &str = "![";
const ALT_URL_SEPARATOR: &str = "](";
const URL_TERMINATOR: char = ')';

/// Fields of a well-formed `![alt](url)` line, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDirective<'a> {
    pub alt: &'a str,
    pub url: &'a str,
}

impl ImageDirective<'_> {
    /// Alt text and url are emitted as-is; no HTML escaping happens here.
    pub fn to_html(&self) -> String {
        format!(
            "<img src=\"{}\" alt=\"{}\" width=\"{DISPLAY_WIDTH}\"><br/>\n",
            self.url, self.alt
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Passthrough,
    Image(ImageDirective<'a>),
    Malformed(MalformedReason),
}

/// Classifies a single line. Detection is a plain prefix check, not a Markdown grammar.
pub fn classify(line: &str) -> LineKind<'_> {
    let Some(remainder) = line.strip_prefix(DIRECTIVE_PREFIX) else {
        return LineKind::Passthrough;
    };

    let Some((alt, rest)) = remainder.split_once(ALT_URL_SEPARATOR) else {
        return LineKind::Malformed(MalformedReason::MissingAltUrlSeparator);
    };

    // Anything after the first `)` (a title, trailing text) is dropped.
    // Without a `)` the url runs to the end of the line.
    let url = rest
        .split_once(URL_TERMINATOR)
        .map_or(rest, |(url, _discarded)| url);

    LineKind::Image(ImageDirective { alt, url })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    pub lines: Vec<String>,
    pub malformed: Vec<MalformedDirective>,
}

/// Converts `input` with the default policy for malformed directives.
pub fn transform(input: &str) -> Vec<String> {
    transform_with(input, MalformedPolicy::default()).lines
}

pub fn transform_with(input: &str, policy: MalformedPolicy) -> TransformReport {
    let mut report = TransformReport::default();

    for (index, line) in input.split('\n').enumerate() {
        // Whitespace-only lines are kept; only truly empty ones go.
        if line.is_empty() {
            continue;
        }

        match classify(line) {
            LineKind::Passthrough => report.lines.push(line.to_string()),
            LineKind::Image(directive) => report.lines.push(directive.to_html()),
            LineKind::Malformed(reason) => {
                let line_number = index + 1;
                debug!(line_number, %reason, %policy, "malformed image directive");
                if policy == MalformedPolicy::Passthrough {
                    report.lines.push(line.to_string());
                }
                report.malformed.push(MalformedDirective {
                    line_number,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    debug!(
        output_lines = report.lines.len(),
        malformed = report.malformed.len(),
        "transformed markdown input"
    );
    report
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
