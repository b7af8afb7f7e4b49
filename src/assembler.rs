use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codeword::Codeword;
use crate::encoder::encode_program;
use crate::error::AsmError;
use crate::labels::resolve_labels;
use crate::loader::{load_file, load_str, SourceLine};
use crate::symbols::SymbolTable;
use crate::writer::{commit_all, render, stage_hack_file, Staged};

pub const DEFAULT_OUTPUT: &str = "out.hack";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsmConfig {
    pub output: PathBuf,
    /// Also dump the final symbol table as JSON here.
    pub symbols: Option<PathBuf>,
    /// Print `rom: word  source` for every instruction.
    pub listing: bool,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            symbols: None,
            listing: false,
        }
    }
}

/// Result of a successful run: the codewords plus what produced them.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Instruction lines; `program[i]` produced `words[i]`.
    pub program: Vec<SourceLine>,
    pub words: Vec<Codeword>,
    pub symbols: SymbolTable,
}

impl Assembly {
    pub fn to_text(&self) -> String {
        render(&self.words)
    }

    pub fn listing(&self) -> String {
        let mut s = String::new();
        for (rom, (src, word)) in self.program.iter().zip(&self.words).enumerate() {
            s.push_str(&format!("{rom:5}: {word}  {}\n", src.text));
        }
        s
    }
}

fn run_passes(lines: Vec<SourceLine>) -> Result<Assembly, AsmError> {
    let mut symbols = SymbolTable::new();
    let program = resolve_labels(lines, &mut symbols)?;
    let words = encode_program(&program, &mut symbols)?;
    Ok(Assembly { program, words, symbols })
}

pub fn assemble(src: &str) -> Result<Assembly, AsmError> {
    run_passes(load_str(src))
}

pub fn assemble_file(path: &Path) -> Result<Assembly, AsmError> {
    run_passes(load_file(path)?)
}

/// Assemble `input` and write everything `cfg` asks for. Either every
/// requested file is written or none is.
pub fn run(input: &Path, cfg: &AsmConfig) -> Result<Assembly, AsmError> {
    let asm = assemble_file(input)?;
    let json = match &cfg.symbols {
        Some(path) => Some((
            path,
            asm.symbols.to_json().map_err(|e| AsmError::io(path, e.into()))?,
        )),
        None => None,
    };

    let mut staged = vec![stage_hack_file(&cfg.output, &asm.words)?];
    if let Some((path, json)) = json {
        staged.push(Staged::new(path, |w| w.write_all(json.as_bytes()))?);
    }
    commit_all(staged)?;

    info!(
        input = %input.display(),
        output = %cfg.output.display(),
        words = asm.words.len(),
        symbols = asm.symbols.len(),
        "assembled"
    );
    Ok(asm)
}
