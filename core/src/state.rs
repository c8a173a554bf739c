use serde::Serialize;

use crate::frame_buffer::FrameBuffer;
use crate::input::InputLatch;
use crate::memory::AddressSpace;
use crate::registers::RegisterFile;
use crate::timers::Timers;

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// - (registers) V0..VF, I, the program counter and the call stack
/// - (timers) the delay and sound timers
///
/// ## Memory
/// - 4096 bytes of addressable memory with the font at the bottom
/// - a 64x32 bit frame buffer holding the next frame to be drawn
///
/// ## Input
/// - held keys, and presses not yet consumed by a key wait
///
/// The stack and frame buffer are kept apart from addressable memory so that
/// programs can't corrupt them by writing past the end of their data.
#[derive(Copy, Clone)]
pub struct State {
    pub registers: RegisterFile,
    pub memory: AddressSpace,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub keys: InputLatch,
}

impl State {
    pub fn new() -> Self {
        State {
            registers: RegisterFile::new(),
            memory: AddressSpace::new(),
            frame_buffer: FrameBuffer::new(),
            timers: Timers::default(),
            keys: InputLatch::new(),
        }
    }

    pub fn dump(&self) -> RegisterDump {
        let registers = &self.registers;
        RegisterDump {
            i: registers.i,
            pc: registers.pc,
            sp: registers.stack.depth(),
            v: registers.v,
            dt: self.timers.delay.get(),
            st: self.timers.sound.get(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Register contents in a form that can be printed or serialized for debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct RegisterDump {
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub v: [u8; 16],
    pub dt: u8,
    pub st: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_of_fresh_state() {
        let dump = State::new().dump();
        assert_eq!(dump.pc, 0x200);
        assert_eq!(dump.sp, 0);
        assert_eq!(dump.v, [0; 16]);
    }

    #[test]
    fn test_dump_serializes() {
        let mut state = State::new();
        state.registers.v[0xF] = 1;
        let json = serde_json::to_value(state.dump()).unwrap();
        assert_eq!(json["PC"], 0x200);
        assert_eq!(json["V"][15], 1);
    }
}
