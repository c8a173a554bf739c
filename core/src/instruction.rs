use std::fmt;

use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::registers::Register;

/// A decoded instruction with its operands pulled out of the opcode.
///
/// Decoding, encoding and the textual form all live here so that the
/// interpreter, the assembler and the disassembler agree on every bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` CLS
    Clear,
    /// `00EE` RET
    Return,
    /// `1nnn` JP addr
    Jump { addr: u16 },
    /// `2nnn` CALL addr
    Call { addr: u16 },
    /// `3xkk` SE Vx, byte
    SkipEqByte { x: Register, kk: u8 },
    /// `4xkk` SNE Vx, byte
    SkipNeByte { x: Register, kk: u8 },
    /// `5xy0` SE Vx, Vy
    SkipEqReg { x: Register, y: Register },
    /// `6xkk` LD Vx, byte
    LoadByte { x: Register, kk: u8 },
    /// `7xkk` ADD Vx, byte
    AddByte { x: Register, kk: u8 },
    /// `8xy0` LD Vx, Vy
    Move { x: Register, y: Register },
    /// `8xy1` OR Vx, Vy
    Or { x: Register, y: Register },
    /// `8xy2` AND Vx, Vy
    And { x: Register, y: Register },
    /// `8xy3` XOR Vx, Vy
    Xor { x: Register, y: Register },
    /// `8xy4` ADD Vx, Vy
    AddReg { x: Register, y: Register },
    /// `8xy5` SUB Vx, Vy
    Sub { x: Register, y: Register },
    /// `8xy6` SHR Vx {, Vy}; Vy is ignored but kept so the word round-trips
    ShiftRight { x: Register, y: Register },
    /// `8xy7` SUBN Vx, Vy
    SubN { x: Register, y: Register },
    /// `8xyE` SHL Vx {, Vy}
    ShiftLeft { x: Register, y: Register },
    /// `9xy0` SNE Vx, Vy
    SkipNeReg { x: Register, y: Register },
    /// `Annn` LD I, addr
    LoadI { addr: u16 },
    /// `Bnnn` JP V0, addr
    JumpV0 { addr: u16 },
    /// `Cxkk` RND Vx, byte
    Random { x: Register, kk: u8 },
    /// `Dxyn` DRW Vx, Vy, nibble
    Draw { x: Register, y: Register, n: u8 },
    /// `Ex9E` SKP Vx
    SkipPressed { x: Register },
    /// `ExA1` SKNP Vx
    SkipNotPressed { x: Register },
    /// `Fx07` LD Vx, DT
    ReadDelay { x: Register },
    /// `Fx0A` LD Vx, K
    WaitKey { x: Register },
    /// `Fx15` LD DT, Vx
    SetDelay { x: Register },
    /// `Fx18` LD ST, Vx
    SetSound { x: Register },
    /// `Fx1E` ADD I, Vx
    AddI { x: Register },
    /// `Fx29` LD F, Vx
    LoadFont { x: Register },
    /// `Fx33` LD B, Vx
    Bcd { x: Register },
    /// `Fx55` LD [I], Vx
    Store { x: Register },
    /// `Fx65` LD Vx, [I]
    Read { x: Register },
}

impl Instruction {
    /// Selects the Instruction for an opcode.
    ///
    /// Words outside the instruction set are an error rather than a no-op.
    pub fn decode(op: &dyn Opcode) -> Result<Self, Chip8Error> {
        use Instruction::*;

        let x = Register::from_nibble(op.x());
        let y = Register::from_nibble(op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { addr: op.addr() },
            (0x2, ..) => Call { addr: op.addr() },
            (0x3, ..) => SkipEqByte { x, kk: op.kk() },
            (0x4, ..) => SkipNeByte { x, kk: op.kk() },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadByte { x, kk: op.kk() },
            (0x7, ..) => AddByte { x, kk: op.kk() },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadI { addr: op.addr() },
            (0xB, ..) => JumpV0 { addr: op.addr() },
            (0xC, ..) => Random { x, kk: op.kk() },
            (0xD, _, _, n) if n > 0 => Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => SkipPressed { x },
            (0xE, .., 0xA, 0x1) => SkipNotPressed { x },
            (0xF, .., 0x0, 0x7) => ReadDelay { x },
            (0xF, .., 0x0, 0xA) => WaitKey { x },
            (0xF, .., 0x1, 0x5) => SetDelay { x },
            (0xF, .., 0x1, 0x8) => SetSound { x },
            (0xF, .., 0x1, 0xE) => AddI { x },
            (0xF, .., 0x2, 0x9) => LoadFont { x },
            (0xF, .., 0x3, 0x3) => Bcd { x },
            (0xF, .., 0x5, 0x5) => Store { x },
            (0xF, .., 0x6, 0x5) => Read { x },
            _ => return Err(Chip8Error::Decode { word: op.word() }),
        };
        Ok(instruction)
    }

    /// Decode a big-endian instruction word.
    pub fn from_word(word: u16) -> Result<Self, Chip8Error> {
        Self::decode(&word.to_be_bytes())
    }

    /// The opcode for this instruction. The inverse of `decode`.
    pub fn encode(&self) -> u16 {
        use Instruction::*;

        let xy = |family: u16, x: &Register, y: &Register, n: u16| {
            family << 12 | u16::from(x.nibble()) << 8 | u16::from(y.nibble()) << 4 | n
        };
        let xkk = |family: u16, x: &Register, kk: &u8| {
            family << 12 | u16::from(x.nibble()) << 8 | u16::from(*kk)
        };
        let fx = |x: &Register, kk: u16| 0xF000 | u16::from(x.nibble()) << 8 | kk;

        match self {
            Clear => 0x00E0,
            Return => 0x00EE,
            Jump { addr } => 0x1000 | addr & 0x0FFF,
            Call { addr } => 0x2000 | addr & 0x0FFF,
            SkipEqByte { x, kk } => xkk(0x3, x, kk),
            SkipNeByte { x, kk } => xkk(0x4, x, kk),
            SkipEqReg { x, y } => xy(0x5, x, y, 0x0),
            LoadByte { x, kk } => xkk(0x6, x, kk),
            AddByte { x, kk } => xkk(0x7, x, kk),
            Move { x, y } => xy(0x8, x, y, 0x0),
            Or { x, y } => xy(0x8, x, y, 0x1),
            And { x, y } => xy(0x8, x, y, 0x2),
            Xor { x, y } => xy(0x8, x, y, 0x3),
            AddReg { x, y } => xy(0x8, x, y, 0x4),
            Sub { x, y } => xy(0x8, x, y, 0x5),
            ShiftRight { x, y } => xy(0x8, x, y, 0x6),
            SubN { x, y } => xy(0x8, x, y, 0x7),
            ShiftLeft { x, y } => xy(0x8, x, y, 0xE),
            SkipNeReg { x, y } => xy(0x9, x, y, 0x0),
            LoadI { addr } => 0xA000 | addr & 0x0FFF,
            JumpV0 { addr } => 0xB000 | addr & 0x0FFF,
            Random { x, kk } => xkk(0xC, x, kk),
            Draw { x, y, n } => xy(0xD, x, y, u16::from(n & 0xF)),
            SkipPressed { x } => 0xE09E | u16::from(x.nibble()) << 8,
            SkipNotPressed { x } => 0xE0A1 | u16::from(x.nibble()) << 8,
            ReadDelay { x } => fx(x, 0x07),
            WaitKey { x } => fx(x, 0x0A),
            SetDelay { x } => fx(x, 0x15),
            SetSound { x } => fx(x, 0x18),
            AddI { x } => fx(x, 0x1E),
            LoadFont { x } => fx(x, 0x29),
            Bcd { x } => fx(x, 0x33),
            Store { x } => fx(x, 0x55),
            Read { x } => fx(x, 0x65),
        }
    }

    /// The mnemonic, without operands.
    pub fn mnemonic(&self) -> &'static str {
        use Instruction::*;

        match self {
            Clear => "CLS",
            Return => "RET",
            Jump { .. } | JumpV0 { .. } => "JP",
            Call { .. } => "CALL",
            SkipEqByte { .. } | SkipEqReg { .. } => "SE",
            SkipNeByte { .. } | SkipNeReg { .. } => "SNE",
            AddByte { .. } | AddReg { .. } | AddI { .. } => "ADD",
            Or { .. } => "OR",
            And { .. } => "AND",
            Xor { .. } => "XOR",
            Sub { .. } => "SUB",
            ShiftRight { .. } => "SHR",
            SubN { .. } => "SUBN",
            ShiftLeft { .. } => "SHL",
            Random { .. } => "RND",
            Draw { .. } => "DRW",
            SkipPressed { .. } => "SKP",
            SkipNotPressed { .. } => "SKNP",
            LoadByte { .. } | Move { .. } | LoadI { .. } | ReadDelay { .. } | WaitKey { .. }
            | SetDelay { .. } | SetSound { .. } | LoadFont { .. } | Bcd { .. } | Store { .. }
            | Read { .. } => "LD",
        }
    }
}

/// The normalised assembly text, e.g. `LD V1, #2A`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        let m = self.mnemonic();
        match self {
            Clear | Return => write!(f, "{}", m),
            Jump { addr } | Call { addr } => write!(f, "{} #{:03X}", m, addr),
            LoadI { addr } => write!(f, "{} I, #{:03X}", m, addr),
            JumpV0 { addr } => write!(f, "{} V0, #{:03X}", m, addr),
            SkipEqByte { x, kk } | SkipNeByte { x, kk } | LoadByte { x, kk }
            | AddByte { x, kk } | Random { x, kk } => write!(f, "{} {}, #{:02X}", m, x, kk),
            ShiftRight { x, y } | ShiftLeft { x, y } if *y == Register::V0 => {
                write!(f, "{} {}", m, x)
            }
            SkipEqReg { x, y } | SkipNeReg { x, y } | Move { x, y } | Or { x, y }
            | And { x, y } | Xor { x, y } | AddReg { x, y } | Sub { x, y }
            | ShiftRight { x, y } | SubN { x, y } | ShiftLeft { x, y } => {
                write!(f, "{} {}, {}", m, x, y)
            }
            Draw { x, y, n } => write!(f, "{} {}, {}, #{:X}", m, x, y, n),
            SkipPressed { x } | SkipNotPressed { x } => write!(f, "{} {}", m, x),
            ReadDelay { x } => write!(f, "{} {}, DT", m, x),
            WaitKey { x } => write!(f, "{} {}, K", m, x),
            SetDelay { x } => write!(f, "{} DT, {}", m, x),
            SetSound { x } => write!(f, "{} ST, {}", m, x),
            AddI { x } => write!(f, "{} I, {}", m, x),
            LoadFont { x } => write!(f, "{} F, {}", m, x),
            Bcd { x } => write!(f, "{} B, {}", m, x),
            Store { x } => write!(f, "{} [I], {}", m, x),
            Read { x } => write!(f, "{} {}, [I]", m, x),
        }
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;

    fn text(word: u16) -> String {
        Instruction::from_word(word).unwrap().to_string()
    }

    #[test]
    fn test_decodes_by_family() {
        let x = Register::from_nibble(0x1);
        let y = Register::from_nibble(0x2);
        assert_eq!(Instruction::from_word(0x00E0), Ok(Instruction::Clear));
        assert_eq!(Instruction::from_word(0x1228), Ok(Instruction::Jump { addr: 0x228 }));
        assert_eq!(Instruction::from_word(0x8124), Ok(Instruction::AddReg { x, y }));
        assert_eq!(
            Instruction::from_word(0xD125),
            Ok(Instruction::Draw { x, y, n: 5 })
        );
        assert_eq!(Instruction::from_word(0xF10A), Ok(Instruction::WaitKey { x }));
    }

    #[test]
    fn test_rejects_words_outside_the_instruction_set() {
        for word in [0x0000, 0x0123, 0x00FD, 0x5121, 0x8128, 0x9121, 0xD120, 0xE1FF, 0xF1FF] {
            assert_eq!(
                Instruction::from_word(word),
                Err(Chip8Error::Decode { word }),
                "{:04X} should not decode",
                word
            );
        }
    }

    #[test]
    fn test_encode_inverts_decode() {
        for word in 0..=u16::MAX {
            if let Ok(instruction) = Instruction::from_word(word) {
                assert_eq!(instruction.encode(), word, "{}", instruction);
            }
        }
    }

    #[test]
    fn test_every_family_decodes_something() {
        let count = (0..=u16::MAX)
            .filter_map(|word| Instruction::from_word(word).ok())
            .map(|instruction| std::mem::discriminant(&instruction))
            .collect::<std::collections::HashSet<_>>()
            .len();
        assert_eq!(count, 34);
    }

    #[test]
    fn test_formats() {
        assert_eq!(text(0x00E0), "CLS");
        assert_eq!(text(0x00EE), "RET");
        assert_eq!(text(0x1228), "JP #228");
        assert_eq!(text(0x2300), "CALL #300");
        assert_eq!(text(0x3A2B), "SE VA, #2B");
        assert_eq!(text(0x5120), "SE V1, V2");
        assert_eq!(text(0x8106), "SHR V1");
        assert_eq!(text(0x8126), "SHR V1, V2");
        assert_eq!(text(0xA123), "LD I, #123");
        assert_eq!(text(0xB123), "JP V0, #123");
        assert_eq!(text(0xD01F), "DRW V0, V1, #F");
        assert_eq!(text(0xE19E), "SKP V1");
        assert_eq!(text(0xF107), "LD V1, DT");
        assert_eq!(text(0xF10A), "LD V1, K");
        assert_eq!(text(0xF115), "LD DT, V1");
        assert_eq!(text(0xF118), "LD ST, V1");
        assert_eq!(text(0xF11E), "ADD I, V1");
        assert_eq!(text(0xF129), "LD F, V1");
        assert_eq!(text(0xF133), "LD B, V1");
        assert_eq!(text(0xF155), "LD [I], V1");
        assert_eq!(text(0xF165), "LD V1, [I]");
    }
}
