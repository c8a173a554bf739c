use chip8_core::RangeError;
use thiserror::Error;

/// An error on a particular line of assembly source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    /// 1-indexed source line
    pub line: usize,
    pub kind: AsmErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    #[error("'{mnemonic}' does not take operands '{operands}'")]
    InvalidOperands { mnemonic: String, operands: String },

    #[error("'{0}' is not a number, register or label")]
    BadOperand(String),

    #[error("{value:#X} does not fit, the largest allowed value is {max:#X}")]
    OutOfRange { value: u32, max: u32 },

    #[error("sprites are 1 to 15 rows tall, not {0}")]
    SpriteHeight(u32),

    #[error(transparent)]
    Register(#[from] RangeError),

    #[error("label '{0}' is never defined")]
    UndefinedLabel(String),

    #[error("label '{0}' is defined more than once")]
    DuplicateLabel(String),

    #[error("'{0}' is not a valid label name")]
    InvalidLabel(String),

    #[error("program is {size} bytes but at most {max} bytes fit in memory")]
    TooLarge { size: usize, max: usize },
}

impl AsmErrorKind {
    pub(crate) fn at(self, line: usize) -> AsmError {
        AsmError { line, kind: self }
    }
}
