use std::fmt;
use std::ops::{Index, IndexMut};

use crate::constants::{LOAD_BASE, REGISTER_COUNT, STACK_DEPTH};
use crate::error::RangeError;

/// Index of one of the 16 general registers V0..VF.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    pub const V0: Register = Register(0x0);
    pub const VF: Register = Register(0xF);

    pub fn new(index: usize) -> Result<Self, RangeError> {
        if index < REGISTER_COUNT {
            Ok(Register(index as u8))
        } else {
            Err(RangeError::Register { index })
        }
    }

    /// Registers encoded in an instruction are always a single nibble.
    pub fn from_nibble(nibble: u8) -> Self {
        Register(nibble & 0xF)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn nibble(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

/// # Call Stack
/// Return addresses of the subroutines currently being executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Stack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            frames: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), RangeError> {
        let slot = self
            .frames
            .get_mut(self.sp)
            .ok_or(RangeError::StackOverflow { depth: self.sp })?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, RangeError> {
        self.sp = self.sp.checked_sub(1).ok_or(RangeError::StackUnderflow)?;
        Ok(self.frames[self.sp])
    }

    /// Number of return addresses currently on the stack.
    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register
/// - (i) the memory address register, 12 bits wide in practice
/// - (pc) the program counter, starting at the load base
/// - (stack) return addresses for subroutine calls
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: LOAD_BASE,
            stack: Stack::new(),
        }
    }

    /// Set VF to 1 or 0.
    pub fn set_flag(&mut self, flag: bool) {
        self[Register::VF] = u8::from(flag);
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Register> for RegisterFile {
    type Output = u8;

    fn index(&self, register: Register) -> &u8 {
        &self.v[register.index()]
    }
}

impl IndexMut<Register> for RegisterFile {
    fn index_mut(&mut self, register: Register) -> &mut u8 {
        &mut self.v[register.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_bounds() {
        assert_eq!(Register::new(0xF), Ok(Register::VF));
        assert_eq!(Register::new(0x10), Err(RangeError::Register { index: 0x10 }));
    }

    #[test]
    fn test_register_display() {
        assert_eq!(Register::from_nibble(0xA).to_string(), "VA");
    }

    #[test]
    fn test_pc_starts_at_load_base() {
        assert_eq!(RegisterFile::new().pc, 0x200);
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x302).unwrap();
        assert_eq!(stack.pop(), Ok(0x302));
        assert_eq!(stack.pop(), Ok(0x202));
    }

    #[test]
    fn test_stack_overflow() {
        let mut stack = Stack::new();
        for depth in 0..STACK_DEPTH {
            stack.push(depth as u16).unwrap();
        }
        assert_eq!(
            stack.push(0xABC),
            Err(RangeError::StackOverflow { depth: STACK_DEPTH })
        );
        assert_eq!(stack.depth(), STACK_DEPTH);
    }

    #[test]
    fn test_stack_underflow() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(RangeError::StackUnderflow));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_indexes_by_register() {
        let mut registers = RegisterFile::new();
        registers[Register::from_nibble(0x3)] = 0x42;
        assert_eq!(registers.v[0x3], 0x42);
        registers.set_flag(true);
        assert_eq!(registers[Register::VF], 1);
    }
}
