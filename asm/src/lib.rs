//! A two-way translator between CHIP-8 words and their assembly text.
//!
//! ```
//! let bytes = chip8_asm::assemble("loop: ADD V0, #01\nJP loop").unwrap();
//! assert_eq!(bytes, [0x70, 0x01, 0x12, 0x00]);
//! assert_eq!(chip8_asm::disassemble(0x1200).unwrap(), "JP #200");
//! ```

mod assembler;
mod disassembler;
mod error;
mod operand;

pub use crate::assembler::{assemble, assemble_line};
pub use crate::disassembler::{disassemble, listing, Line};
pub use crate::error::{AsmError, AsmErrorKind};
pub use crate::operand::Operand;
