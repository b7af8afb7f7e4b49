use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const WORD_BITS: usize = 16;

/// One 16-bit machine word. Renders as 16 `0`/`1` characters, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Codeword(pub u16);

impl Codeword {
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Bit 15 set: compute instruction; clear: address load.
    pub fn is_compute(self) -> bool {
        self.0 & 0x8000 != 0
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("expected 16 binary digits, got `{0}`")]
pub struct ParseCodewordError(pub String);

impl FromStr for Codeword {
    type Err = ParseCodewordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != WORD_BITS || !s.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ParseCodewordError(s.to_string()));
        }
        u16::from_str_radix(s, 2)
            .map(Codeword)
            .map_err(|_| ParseCodewordError(s.to_string()))
    }
}
