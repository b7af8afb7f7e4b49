use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codeword::Codeword;
use crate::error::AsmError;

/// One word per line, newline-terminated, ROM order.
pub fn write_codewords<W: Write>(mut w: W, words: &[Codeword]) -> io::Result<()> {
    for word in words {
        writeln!(w, "{word}")?;
    }
    w.flush()
}

pub fn render(words: &[Codeword]) -> String {
    let mut s = String::with_capacity(words.len() * 17);
    for word in words {
        s.push_str(&word.to_string());
        s.push('\n');
    }
    s
}

fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    dest.with_file_name(name)
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not remove file");
        }
    }
}

/// A fully written sibling of `dest` waiting to be renamed into place.
///
/// Dropping it without `commit` removes the staging file, so `dest` is
/// never touched by a run that fails before committing.
#[derive(Debug)]
pub struct Staged {
    dest: PathBuf,
    staging: PathBuf,
    committed: bool,
}

impl Staged {
    pub fn new<F>(dest: &Path, fill: F) -> Result<Staged, AsmError>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let staging = staging_path(dest);
        // armed before the file exists so a failed create or write cleans up
        let staged = Staged { dest: dest.to_path_buf(), staging, committed: false };
        File::create(&staged.staging)
            .and_then(|f| {
                let mut w = BufWriter::new(f);
                fill(&mut w)?;
                w.flush()
            })
            .map_err(|e| AsmError::io(dest, e))?;
        Ok(staged)
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn commit(mut self) -> Result<(), AsmError> {
        fs::rename(&self.staging, &self.dest).map_err(|e| AsmError::io(&self.dest, e))?;
        self.committed = true;
        debug!(path = %self.dest.display(), "output committed");
        Ok(())
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        if !self.committed {
            remove_quietly(&self.staging);
        }
    }
}

pub fn stage_hack_file(dest: &Path, words: &[Codeword]) -> Result<Staged, AsmError> {
    Staged::new(dest, |w| write_codewords(w, words))
}

/// Commit every staged file, or none: if one rename fails, the files already
/// renamed are removed again and the rest are discarded.
pub fn commit_all(staged: Vec<Staged>) -> Result<(), AsmError> {
    let mut done: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for s in staged {
        let dest = s.dest().to_path_buf();
        if let Err(e) = s.commit() {
            for path in &done {
                remove_quietly(path);
            }
            return Err(e);
        }
        done.push(dest);
    }
    Ok(())
}

/// Write `words` to `dest` through a staging file; on any failure `dest` is
/// left untouched.
pub fn write_hack_file(dest: &Path, words: &[Codeword]) -> Result<(), AsmError> {
    stage_hack_file(dest, words)?.commit()?;
    debug!(path = %dest.display(), words = words.len(), "output written");
    Ok(())
}
