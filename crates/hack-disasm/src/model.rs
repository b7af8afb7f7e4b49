use std::path::{Path, PathBuf};

use hack_asm::Codeword;
use serde::Serialize;

/// Instruction memory holds 32K words.
pub const ROM_SIZE: usize = 32768;

#[derive(thiserror::Error, Debug)]
pub enum RomError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    BadWord {
        line: usize,
        #[source]
        source: hack_asm::codeword::ParseCodewordError,
    },
    #[error("image has {0} words, ROM holds 32768")]
    RomTooLarge(usize),
}

/// A loaded `.hack` image, word `i` at ROM address `i`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rom {
    pub words: Vec<Codeword>,
}

pub fn parse_rom(text: &str) -> Result<Rom, RomError> {
    let mut words = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let word = raw
            .parse::<Codeword>()
            .map_err(|source| RomError::BadWord { line: i + 1, source })?;
        words.push(word);
    }
    if words.len() > ROM_SIZE {
        return Err(RomError::RomTooLarge(words.len()));
    }
    Ok(Rom { words })
}

pub fn load_rom(path: &Path) -> Result<Rom, RomError> {
    let text = std::fs::read_to_string(path).map_err(|source| RomError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rom(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_reads_words_in_order() {
        let path = std::env::temp_dir().join(format!("hack_disasm_model_{}.hack", std::process::id()));
        std::fs::write(&path, "0000000000000010\n1110110000010000\n\n").unwrap();
        let rom = load_rom(&path).unwrap();
        assert_eq!(rom.words, vec![Codeword(2), Codeword(0xEC10)]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_keeps_path() {
        let path = Path::new("/definitely/not/here.hack");
        let err = load_rom(path).unwrap_err();
        assert!(matches!(err, RomError::Io { path: ref p, .. } if p == path));
        assert!(err.to_string().starts_with("cannot read /definitely/not/here.hack: "));
    }

    #[test]
    fn bad_word_reports_line() {
        let err = parse_rom("0000000000000010\n11101\n").unwrap_err();
        assert!(matches!(err, RomError::BadWord { line: 2, .. }));
    }

    #[test]
    fn oversized_image_rejected() {
        let text = "0000000000000000\n".repeat(ROM_SIZE + 1);
        assert!(matches!(parse_rom(&text), Err(RomError::RomTooLarge(n)) if n == ROM_SIZE + 1));
    }
}
