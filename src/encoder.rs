use tracing::{debug, trace};

use crate::codeword::Codeword;
use crate::error::AsmError;
use crate::instructions::{Instruction, Operand};
use crate::isa::hack::{encode_a, encode_c};
use crate::loader::SourceLine;
use crate::symbols::SymbolTable;

/// Encode one instruction line. Unknown symbols become variables.
pub fn encode_line(src: &SourceLine, symbols: &mut SymbolTable) -> Result<Codeword, AsmError> {
    match Instruction::parse(&src.text, src.line)? {
        Instruction::A(operand) => {
            let value = match &operand {
                Operand::Literal(v) => *v,
                Operand::Symbol(name) => symbols.resolve_or_allocate(name),
            };
            encode_a(value).ok_or_else(|| AsmError::Range {
                line: src.line,
                operand: match operand {
                    Operand::Literal(v) => v.to_string(),
                    Operand::Symbol(name) => format!("{name} = {value}"),
                },
            })
        }
        Instruction::C { dest, comp, jump } => Ok(encode_c(dest, comp, jump)),
    }
}

/// Second pass. Must run after every label is in `symbols`, otherwise a
/// forward reference would be taken for a variable.
pub fn encode_program(
    program: &[SourceLine],
    symbols: &mut SymbolTable,
) -> Result<Vec<Codeword>, AsmError> {
    let mut out = Vec::with_capacity(program.len());
    for (rom, src) in program.iter().enumerate() {
        let word = encode_line(src, symbols)?;
        trace!(rom, line = src.line, text = %src.text, %word);
        out.push(word);
    }
    debug!(codewords = out.len(), next_var = symbols.next_variable(), "pass 2 done");
    Ok(out)
}
