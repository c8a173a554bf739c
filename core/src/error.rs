use thiserror::Error;

/// Faults raised while loading or running a program. All of them are fatal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("unrecognized instruction {word:#06X}")]
    Decode { word: u16 },

    #[error("operand out of range: {0}")]
    OperandRange(#[from] RangeError),

    #[error("unable to load program: {0}")]
    Load(#[from] LoadError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("stack overflow, already {depth} calls deep")]
    StackOverflow { depth: usize },

    #[error("stack underflow, returned with an empty call stack")]
    StackUnderflow,

    #[error("memory access of {len} byte(s) at {address:#06X} is out of bounds")]
    Memory { address: usize, len: usize },

    #[error("write to read-only font memory at {address:#06X}")]
    ReadOnly { address: usize },

    #[error("there is no register V{index:X}")]
    Register { index: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("program is {size} bytes but at most {max} bytes fit in memory")]
    TooLarge { size: usize, max: usize },

    #[error("a program has already been loaded")]
    AlreadyLoaded,
}
