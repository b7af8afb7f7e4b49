use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::AsmError;

pub const ADDR_MARKER: char = '@';

/// Largest value an A-instruction can carry (15 bits).
pub const MAX_ADDRESS: u32 = 0x7FFF;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Literal(u32),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// `@value` or `@symbol`
    A(Operand),
    /// `dest=comp;jump`, with dest and jump optional
    C { dest: Dest, comp: Comp, jump: Jump },
}

bitflags! {
    /// Registers written by a C-instruction. The flag bits are the dest field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Dest: u16 {
        const M = 0b001;
        const D = 0b010;
        const A = 0b100;
    }
}

const DEST_MNEMONICS: [&str; 8] = ["", "M", "D", "MD", "A", "AM", "AD", "AMD"];

impl Dest {
    pub fn from_mnemonic(s: &str) -> Option<Dest> {
        let bits = DEST_MNEMONICS.iter().position(|m| *m == s)?;
        Some(Dest::from_bits_truncate(bits as u16))
    }

    pub fn mnemonic(self) -> &'static str {
        DEST_MNEMONICS[self.bits() as usize]
    }
}

/// Jump condition; the discriminant is the jump field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jump {
    Null = 0b000,
    Jgt = 0b001,
    Jeq = 0b010,
    Jge = 0b011,
    Jlt = 0b100,
    Jne = 0b101,
    Jle = 0b110,
    Jmp = 0b111,
}

pub const JUMPS: [Jump; 8] = [
    Jump::Null,
    Jump::Jgt,
    Jump::Jeq,
    Jump::Jge,
    Jump::Jlt,
    Jump::Jne,
    Jump::Jle,
    Jump::Jmp,
];

const JUMP_MNEMONICS: [&str; 8] = ["", "JGT", "JEQ", "JGE", "JLT", "JNE", "JLE", "JMP"];

impl Jump {
    pub fn from_mnemonic(s: &str) -> Option<Jump> {
        let bits = JUMP_MNEMONICS.iter().position(|m| *m == s)?;
        Some(JUMPS[bits])
    }

    pub fn from_bits(bits: u16) -> Jump {
        JUMPS[(bits & 0b111) as usize]
    }

    pub fn bits(self) -> u16 {
        self as u16
    }

    pub fn mnemonic(self) -> &'static str {
        JUMP_MNEMONICS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comp {
    Zero,
    One,
    NegOne,
    D,
    A,
    NotD,
    NotA,
    NegD,
    NegA,
    DPlusOne,
    APlusOne,
    DMinusOne,
    AMinusOne,
    DPlusA,
    DMinusA,
    AMinusD,
    DAndA,
    DOrA,
    M,
    NotM,
    NegM,
    MPlusOne,
    MMinusOne,
    DPlusM,
    DMinusM,
    MMinusD,
    DAndM,
    DOrM,
}

#[derive(Debug, Clone, Copy)]
pub struct CompDesc {
    pub comp: Comp,
    pub mnemonic: &'static str,
    /// `a c1 c2 c3 c4 c5 c6`; `a` selects M instead of A as the ALU's y input
    pub code: u16,
}

const fn desc(comp: Comp, mnemonic: &'static str, code: u16) -> CompDesc {
    CompDesc { comp, mnemonic, code }
}

pub const COMP_TABLE: &[CompDesc] = &[
    desc(Comp::Zero, "0", 0b0101010),
    desc(Comp::One, "1", 0b0111111),
    desc(Comp::NegOne, "-1", 0b0111010),
    desc(Comp::D, "D", 0b0001100),
    desc(Comp::A, "A", 0b0110000),
    desc(Comp::NotD, "!D", 0b0001101),
    desc(Comp::NotA, "!A", 0b0110001),
    desc(Comp::NegD, "-D", 0b0001111),
    desc(Comp::NegA, "-A", 0b0110011),
    desc(Comp::DPlusOne, "D+1", 0b0011111),
    desc(Comp::APlusOne, "A+1", 0b0110111),
    desc(Comp::DMinusOne, "D-1", 0b0001110),
    desc(Comp::AMinusOne, "A-1", 0b0110010),
    desc(Comp::DPlusA, "D+A", 0b0000010),
    desc(Comp::DMinusA, "D-A", 0b0010011),
    desc(Comp::AMinusD, "A-D", 0b0000111),
    desc(Comp::DAndA, "D&A", 0b0000000),
    desc(Comp::DOrA, "D|A", 0b0010101),
    desc(Comp::M, "M", 0b1110000),
    desc(Comp::NotM, "!M", 0b1110001),
    desc(Comp::NegM, "-M", 0b1110011),
    desc(Comp::MPlusOne, "M+1", 0b1110111),
    desc(Comp::MMinusOne, "M-1", 0b1110010),
    desc(Comp::DPlusM, "D+M", 0b1000010),
    desc(Comp::DMinusM, "D-M", 0b1010011),
    desc(Comp::MMinusD, "M-D", 0b1000111),
    desc(Comp::DAndM, "D&M", 0b1000000),
    desc(Comp::DOrM, "D|M", 0b1010101),
];

impl Comp {
    fn desc(self) -> &'static CompDesc {
        // the table is laid out in declaration order
        &COMP_TABLE[self as usize]
    }

    pub fn from_mnemonic(s: &str) -> Option<Comp> {
        COMP_TABLE.iter().find(|d| d.mnemonic == s).map(|d| d.comp)
    }

    pub fn from_code(code: u16) -> Option<Comp> {
        COMP_TABLE.iter().find(|d| d.code == code).map(|d| d.comp)
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn code(self) -> u16 {
        self.desc().code
    }

    /// True for the comps that read memory (`M`) rather than `A`.
    pub fn reads_memory(self) -> bool {
        self.code() & 0b1000000 != 0
    }
}

impl Instruction {
    /// Parse one cleaned line (no whitespace, no comment, not a label).
    ///
    /// C-instruction fields are checked comp first, then dest, then jump.
    pub fn parse(text: &str, line: usize) -> Result<Instruction, AsmError> {
        if let Some(operand) = text.strip_prefix(ADDR_MARKER) {
            return parse_operand(operand, line).map(Instruction::A);
        }

        let (dest_s, rest) = match text.split_once('=') {
            Some((d, r)) => (d, r),
            None => ("", text),
        };
        let (comp_s, jump_s) = match rest.split_once(';') {
            Some((c, j)) => (c, j),
            None => (rest, ""),
        };

        let comp = Comp::from_mnemonic(comp_s).ok_or_else(|| AsmError::InvalidComputation {
            line,
            comp: comp_s.to_string(),
        })?;
        let dest = Dest::from_mnemonic(dest_s).ok_or_else(|| AsmError::InvalidDestination {
            line,
            dest: dest_s.to_string(),
        })?;
        let jump = Jump::from_mnemonic(jump_s).ok_or_else(|| AsmError::InvalidJump {
            line,
            jump: jump_s.to_string(),
        })?;
        Ok(Instruction::C { dest, comp, jump })
    }
}

fn parse_operand(operand: &str, line: usize) -> Result<Operand, AsmError> {
    if operand.is_empty() {
        return Err(AsmError::InvalidOperand { line });
    }
    if operand.bytes().all(|b| b.is_ascii_digit()) {
        // only overflow can fail here, and that is out of range anyway
        let value = operand.parse::<u32>().map_err(|_| AsmError::Range {
            line,
            operand: operand.to_string(),
        })?;
        return Ok(Operand::Literal(value));
    }
    Ok(Operand::Symbol(operand.to_string()))
}
