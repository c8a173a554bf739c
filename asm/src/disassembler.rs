use std::fmt;

use chip8_core::{Chip8Error, Instruction};

/// Renders a single word as assembly text.
pub fn disassemble(word: u16) -> Result<String, Chip8Error> {
    Instruction::from_word(word).map(|instruction| instruction.to_string())
}

/// One row of a program listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub address: u16,
    pub word: u16,
    pub text: String,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}: {:04X}  {}", self.address, self.word, self.text)
    }
}

/// Disassembles a program loaded at `base`.
///
/// Words outside the instruction set (sprite data, mostly) come out as `DW`
/// so that the listing always assembles back to the same bytes. A trailing
/// odd byte is padded with zero.
pub fn listing(bytes: &[u8], base: u16) -> Vec<Line> {
    bytes
        .chunks(2)
        .enumerate()
        .map(|(n, chunk)| {
            let word = u16::from_be_bytes([chunk[0], chunk.get(1).copied().unwrap_or(0)]);
            let text = disassemble(word).unwrap_or_else(|_| format!("DW #{:04X}", word));
            Line {
                address: base.wrapping_add((2 * n) as u16),
                word,
                text,
            }
        })
        .collect()
}
