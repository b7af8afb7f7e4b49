use crate::codeword::Codeword;
use crate::instructions::Instruction;

pub trait Decoder {
    /// `None` when the word is not a valid instruction encoding.
    fn decode(&self, word: Codeword) -> Option<Instruction>;
}
