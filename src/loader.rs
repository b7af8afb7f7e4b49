use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AsmError;

pub const COMMENT: &str = "//";

/// One non-blank logical line with its 1-based physical line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    pub line: usize,
    pub text: String,
}

/// Drop every whitespace character, then cut at the first comment marker.
///
/// Whitespace is stripped anywhere in the line, not only at the ends, so
/// `D = D + A` and `D=D+A` are the same instruction.
pub fn clean_line(raw: &str) -> String {
    let mut s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(p) = s.find(COMMENT) {
        s.truncate(p);
    }
    s
}

pub fn load_str(src: &str) -> Vec<SourceLine> {
    let lines: Vec<SourceLine> = src
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = clean_line(raw);
            (!text.is_empty()).then(|| SourceLine { line: i + 1, text })
        })
        .collect();
    debug!(lines = lines.len(), "source loaded");
    lines
}

pub fn load_file(path: &Path) -> Result<Vec<SourceLine>, AsmError> {
    let src = std::fs::read_to_string(path).map_err(|e| AsmError::io(path, e))?;
    Ok(load_str(&src))
}
