use crate::codeword::Codeword;
use crate::decoder::Decoder;
use crate::instructions::{Comp, Dest, Instruction, Jump, Operand, MAX_ADDRESS};

/// Layout, MSB first:
///   A: 0 vvvvvvvvvvvvvvv
///   C: 1 1 1 a c1..c6 d1 d2 d3 j1 j2 j3
const C_PREFIX: u16 = 0b111 << 13;
const COMP_SHIFT: u16 = 6;
const DEST_SHIFT: u16 = 3;

/// Pack an address/constant load; `None` if `value` needs more than 15 bits.
pub fn encode_a(value: u32) -> Option<Codeword> {
    (value <= MAX_ADDRESS).then(|| Codeword(value as u16))
}

pub fn encode_c(dest: Dest, comp: Comp, jump: Jump) -> Codeword {
    Codeword(C_PREFIX | (comp.code() << COMP_SHIFT) | (dest.bits() << DEST_SHIFT) | jump.bits())
}

/// Hack decoder: the inverse of the encoder tables.
pub struct HackDecoder;

impl HackDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for HackDecoder {
    fn decode(&self, word: Codeword) -> Option<Instruction> {
        let raw = word.bits();
        if !word.is_compute() {
            return Some(Instruction::A(Operand::Literal(u32::from(raw))));
        }
        // bits 14..13 are unused by the hardware but always set by the assembler
        if raw & C_PREFIX != C_PREFIX {
            return None;
        }
        let comp = Comp::from_code((raw >> COMP_SHIFT) & 0x7F)?;
        let dest = Dest::from_bits_truncate((raw >> DEST_SHIFT) & 0b111);
        let jump = Jump::from_bits(raw);
        Some(Instruction::C { dest, comp, jump })
    }
}
