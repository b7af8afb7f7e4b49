use crate::codeword::Codeword;
use crate::decoder::Decoder;
use crate::instructions::{Instruction, Jump, Operand};

pub fn fmt_instruction(i: &Instruction) -> String {
    match i {
        Instruction::A(Operand::Literal(v)) => format!("@{v}"),
        Instruction::A(Operand::Symbol(s)) => format!("@{s}"),
        Instruction::C { dest, comp, jump } => {
            let mut s = String::new();
            if !dest.is_empty() {
                s.push_str(dest.mnemonic());
                s.push('=');
            }
            s.push_str(comp.mnemonic());
            if *jump != Jump::Null {
                s.push(';');
                s.push_str(jump.mnemonic());
            }
            s
        }
    }
}

/// Decode and render one word; undecodable words fall back to `.word`.
pub fn fmt_word<D: Decoder>(dec: &D, word: Codeword) -> String {
    match dec.decode(word) {
        Some(i) => fmt_instruction(&i),
        None => format!(".word 0b{word}"),
    }
}
