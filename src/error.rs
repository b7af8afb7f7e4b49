use std::path::PathBuf;

/// A name was bound twice with two different values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("symbol `{name}` already bound to {existing}, cannot rebind to {requested}")]
pub struct SymbolConflict {
    pub name: String,
    pub existing: u32,
    pub requested: u32,
}

/// Every way a translation run can fail. All of them are terminal.
///
/// `line` is always the 1-based physical line in the source file.
#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    SymbolConflict {
        line: usize,
        #[source]
        source: SymbolConflict,
    },
    #[error("line {line}: invalid computation `{comp}`")]
    InvalidComputation { line: usize, comp: String },
    #[error("line {line}: invalid destination `{dest}`")]
    InvalidDestination { line: usize, dest: String },
    #[error("line {line}: invalid jump `{jump}`")]
    InvalidJump { line: usize, jump: String },
    #[error("line {line}: operand `{operand}` exceeds the addressable range (max 32767)")]
    Range { line: usize, operand: String },
    #[error("line {line}: missing operand after `@`")]
    InvalidOperand { line: usize },
    #[error("line {line}: empty label definition")]
    InvalidLabel { line: usize },
}

impl AsmError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AsmError::Io { path: path.into(), source }
    }

    /// Source line the error points at, if it came from a specific line.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::Io { .. } => None,
            AsmError::SymbolConflict { line, .. }
            | AsmError::InvalidComputation { line, .. }
            | AsmError::InvalidDestination { line, .. }
            | AsmError::InvalidJump { line, .. }
            | AsmError::Range { line, .. }
            | AsmError::InvalidOperand { line }
            | AsmError::InvalidLabel { line } => Some(*line),
        }
    }
}
