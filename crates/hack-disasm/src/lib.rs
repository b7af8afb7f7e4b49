pub mod model;

use hack_asm::decoder::Decoder;
use hack_asm::disasm::fmt_word;
use hack_asm::isa::hack::HackDecoder;
use serde::Serialize;

pub use model::{load_rom, parse_rom, Rom, RomError, ROM_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOut {
    pub addr: usize,
    pub word: String,
    pub text: String,
    pub valid: bool,
}

/// Disassemble every word of `rom` in address order.
pub fn disassemble(rom: &Rom) -> Vec<LineOut> {
    let dec = HackDecoder::new();
    rom.words
        .iter()
        .enumerate()
        .map(|(addr, &w)| LineOut {
            addr,
            word: w.to_string(),
            text: fmt_word(&dec, w),
            valid: dec.decode(w).is_some(),
        })
        .collect()
}
