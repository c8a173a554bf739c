pub use crate::chip8::{Chip8, Step};
pub use crate::clock::{Progress, Scheduler, Ticker};
pub use crate::constants::CLOCK_SPEED;
pub use crate::error::{Chip8Error, LoadError, RangeError};
pub use crate::frame_buffer::FrameBuffer;
pub use crate::input::{InputLatch, KeyPoll};
pub use crate::instruction::Instruction;
pub use crate::opcode::Opcode;
pub use crate::registers::Register;
pub use crate::state::RegisterDump;

mod chip8;
mod clock;
pub mod constants;
mod error;
mod frame_buffer;
pub mod frontend;
mod input;
mod instruction;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod state;
pub mod timers;
