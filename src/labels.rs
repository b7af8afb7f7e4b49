use tracing::debug;

use crate::error::AsmError;
use crate::loader::SourceLine;
use crate::symbols::SymbolTable;

/// `(NAME)` -> `Some("NAME")`
pub fn label_name(text: &str) -> Option<&str> {
    text.strip_prefix('(')?.strip_suffix(')')
}

/// Non-empty, no nested parentheses, and not starting with a digit (an
/// all-digit `@` operand is a literal, so such a label could never be used).
fn is_label_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && !name.contains(|c: char| c == '(' || c == ')')
}

/// First pass: bind every label to the ROM address of the instruction that
/// follows it and drop the label lines. The returned lines are exactly the
/// instructions, so their index is their ROM address.
pub fn resolve_labels(
    lines: Vec<SourceLine>,
    symbols: &mut SymbolTable,
) -> Result<Vec<SourceLine>, AsmError> {
    let mut program = Vec::with_capacity(lines.len());
    let mut rom: u32 = 0;
    for src in lines {
        match label_name(&src.text) {
            Some(name) if !is_label_name(name) => {
                return Err(AsmError::InvalidLabel { line: src.line })
            }
            Some(name) => {
                symbols
                    .define(name, rom)
                    .map_err(|source| AsmError::SymbolConflict { line: src.line, source })?;
                debug!(label = name, rom, line = src.line, "label");
            }
            None => {
                program.push(src);
                rom += 1;
            }
        }
    }
    debug!(instructions = program.len(), "pass 1 done");
    Ok(program)
}
