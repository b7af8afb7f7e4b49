pub mod assembler;
pub mod codeword;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod labels;
pub mod loader;
pub mod symbols;
pub mod writer;

pub mod isa {
    pub mod hack; // Hack platform field tables
}

pub use assembler::{assemble, assemble_file, AsmConfig, Assembly};
pub use codeword::Codeword;
pub use error::{AsmError, SymbolConflict};
pub use symbols::SymbolTable;
