//! Script-to-frame parser.
//!
//! Scripts label their frames inconsistently, so parsing runs a fixed
//! cascade of label strategies (colon, dash, numbered line, bracketed) and
//! commits to the first one that yields at least one frame with a body.
//! Matches are never merged across strategies.
//!
//! Within a strategy, a frame's content runs from the end of its label to the
//! start of the next label of the same strategy (or end of text) and is then
//! trimmed. A label that appears inside another frame's body therefore ends
//! that body early; this truncation is long-standing behaviour and is kept.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::frame::{Frame, FrameInput};
use crate::types::FrameId;

// ---------------------------------------------------------------------------
// Label patterns
// ---------------------------------------------------------------------------

/// `Frame 3:` anywhere in the text.
pub const LABELED_COLON_PATTERN: &str = r"(?i)Frame\s+([0-9]+)\s*:";

/// `Frame 3 -` anywhere in the text.
pub const LABELED_DASH_PATTERN: &str = r"(?i)Frame\s+([0-9]+)\s*-";

/// `3.` at the start of a line, optionally indented.
pub const NUMBERED_LINE_PATTERN: &str = r"(?im)^[ \t]*([0-9]+)\.";

/// `[Frame 3]` anywhere in the text.
pub const BRACKETED_PATTERN: &str = r"(?i)\[\s*Frame\s+([0-9]+)\s*\]";

static LABELED_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LABELED_COLON_PATTERN).expect("valid regex"));
static LABELED_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LABELED_DASH_PATTERN).expect("valid regex"));
static NUMBERED_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBERED_LINE_PATTERN).expect("valid regex"));
static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRACKETED_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// One way of recognising frame labels in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStrategy {
    LabeledColon,
    LabeledDash,
    NumberedLine,
    Bracketed,
}

/// Strategies in the order they are tried.
pub const CASCADE: [LabelStrategy; 4] = [
    LabelStrategy::LabeledColon,
    LabelStrategy::LabeledDash,
    LabelStrategy::NumberedLine,
    LabelStrategy::Bracketed,
];

impl LabelStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::LabeledColon => "labeled_colon",
            Self::LabeledDash => "labeled_dash",
            Self::NumberedLine => "numbered_line",
            Self::Bracketed => "bracketed",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::LabeledColon => &*LABELED_COLON_RE,
            Self::LabeledDash => &*LABELED_DASH_RE,
            Self::NumberedLine => &*NUMBERED_LINE_RE,
            Self::Bracketed => &*BRACKETED_RE,
        }
    }

    /// Split `text` on this strategy's labels.
    ///
    /// Segments whose trimmed content is empty are dropped.
    pub fn extract(self, text: &str) -> Vec<LabeledSegment> {
        let labels: Vec<(String, usize, usize)> = self
            .pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let number = caps.get(1)?;
                Some((number.as_str().to_string(), whole.start(), whole.end()))
            })
            .collect();

        labels
            .iter()
            .enumerate()
            .filter_map(|(i, (label, _, body_start))| {
                let body_end = labels.get(i + 1).map_or(text.len(), |next| next.1);
                let content = text[*body_start..body_end].trim();
                if content.is_empty() {
                    None
                } else {
                    Some(LabeledSegment {
                        label: label.clone(),
                        content: content.to_string(),
                    })
                }
            })
            .collect()
    }
}

impl fmt::Display for LabelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A label and the trimmed body that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledSegment {
    /// Digits exactly as written, leading zeros included.
    pub label: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Result of running the cascade over a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// The strategy that produced `frames`, or `None` when nothing matched.
    pub strategy: Option<LabelStrategy>,
    pub frames: Vec<Frame>,
}

/// Run the cascade and return the winning strategy's segments.
pub fn extract_segments(text: &str) -> Option<(LabelStrategy, Vec<LabeledSegment>)> {
    CASCADE.into_iter().find_map(|strategy| {
        let segments = strategy.extract(text);
        if segments.is_empty() {
            None
        } else {
            Some((strategy, segments))
        }
    })
}

/// Parse a script into frames, reporting which strategy matched.
///
/// Every frame gets a fresh id and default values for all fields other than
/// `frame_number` and `content`.
pub fn parse_script_with_outcome(text: &str) -> ParseOutcome {
    match extract_segments(text) {
        Some((strategy, segments)) => {
            let frames: Vec<Frame> = segments
                .into_iter()
                .map(|segment| {
                    Frame::from_input(
                        FrameId::generate(),
                        FrameInput::new(segment.label, segment.content),
                    )
                })
                .collect();
            tracing::debug!(strategy = %strategy, frame_count = frames.len(), "Script parsed");
            ParseOutcome {
                strategy: Some(strategy),
                frames,
            }
        }
        None => {
            tracing::debug!(text_len = text.len(), "No frame labels matched");
            ParseOutcome {
                strategy: None,
                frames: Vec::new(),
            }
        }
    }
}

/// Parse a script into frames. Returns an empty vec when no label matches.
pub fn parse_script(text: &str) -> Vec<Frame> {
    parse_script_with_outcome(text).frames
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
