//! Marker-delimited rewrite reply parsing.
//!
//! The service is asked to answer with three headed segments:
//!
//! ```text
//! IMPROVED PROMPT:
//! <prompt>
//!
//! KEY IMPROVEMENTS MADE:
//! 1. <improvement>
//!
//! EXPECTED IMPACT:
//! <narrative>
//! ```

use crate::domain::models::RewriteResponse;
use crate::domain::ports::{ResponseParseError, RewriteResponseParser};

pub const IMPROVED_PROMPT_MARKER: &str = "IMPROVED PROMPT:";
pub const KEY_IMPROVEMENTS_MARKER: &str = "KEY IMPROVEMENTS MADE:";
pub const EXPECTED_IMPACT_MARKER: &str = "EXPECTED IMPACT:";

/// Parses replies by locating the three fixed headers in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerResponseParser;

impl MarkerResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Split an improvements segment into statements.
    ///
    /// A line opening with an enumeration (`1.`, `2)`, `-`, `*`, `•`) followed
    /// by whitespace or the end of the line starts a new statement; any other
    /// non-empty line continues the previous one, so `2.5x` stays intact.
    pub fn split_improvements(segment: &str) -> Vec<String> {
        let mut statements: Vec<String> = Vec::new();

        for line in segment.lines().map(str::trim).filter(|line| !line.is_empty()) {
            match strip_enumeration(line) {
                Some(item) => statements.push(item.to_string()),
                None => match statements.last_mut() {
                    Some(last) => {
                        if !last.is_empty() {
                            last.push(' ');
                        }
                        last.push_str(line);
                    }
                    None => statements.push(line.to_string()),
                },
            }
        }

        statements.retain(|statement| !statement.is_empty());
        statements
    }
}

/// The line without its list marker, or `None` if it has none.
fn strip_enumeration(line: &str) -> Option<&str> {
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return Some(rest.trim_start());
        }
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let item = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    // `2.5x` is a number, not a list marker
    if !item.is_empty() && !item.starts_with(char::is_whitespace) {
        return None;
    }
    Some(item.trim_start())
}

/// Find `marker` at or after `from`, returning the offset just past it.
fn find_after(text: &str, from: usize, marker: &'static str) -> Result<(usize, usize), ResponseParseError> {
    text[from..]
        .find(marker)
        .map(|offset| (from + offset, from + offset + marker.len()))
        .ok_or(ResponseParseError::MissingMarker { marker })
}

fn non_empty(segment: &str, marker: &'static str) -> Result<String, ResponseParseError> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(ResponseParseError::EmptySegment { marker });
    }
    Ok(trimmed.to_string())
}

impl RewriteResponseParser for MarkerResponseParser {
    fn format_instructions(&self) -> String {
        format!(
            "Return your response in this exact format:\n\
             \n\
             {IMPROVED_PROMPT_MARKER}\n\
             [The complete improved prompt here]\n\
             \n\
             {KEY_IMPROVEMENTS_MARKER}\n\
             1. [First improvement and why]\n\
             2. [Second improvement and why]\n\
             3. [Third improvement and why]\n\
             [etc.]\n\
             \n\
             {EXPECTED_IMPACT_MARKER}\n\
             [Brief explanation of how these changes should improve memo quality]"
        )
    }

    fn parse(&self, text: &str) -> Result<RewriteResponse, ResponseParseError> {
        let (_, prompt_start) = find_after(text, 0, IMPROVED_PROMPT_MARKER)?;
        let (improvements_marker, improvements_start) =
            find_after(text, prompt_start, KEY_IMPROVEMENTS_MARKER)?;
        let (impact_marker, impact_start) =
            find_after(text, improvements_start, EXPECTED_IMPACT_MARKER)?;

        let improved_prompt = non_empty(&text[prompt_start..improvements_marker], IMPROVED_PROMPT_MARKER)?;
        let improvements_segment =
            non_empty(&text[improvements_start..impact_marker], KEY_IMPROVEMENTS_MARKER)?;
        let expected_impact = non_empty(&text[impact_start..], EXPECTED_IMPACT_MARKER)?;

        Ok(RewriteResponse {
            improved_prompt,
            improvements: Self::split_improvements(&improvements_segment),
            expected_impact,
        })
    }
}
