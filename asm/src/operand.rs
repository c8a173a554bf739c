use chip8_core::Register;

use crate::error::AsmErrorKind;

/// A single operand as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Literal(u32),
    Label(String),
    /// `I`
    Index,
    /// `[I]`
    Indirect,
    /// `DT`
    Delay,
    /// `ST`
    Sound,
    /// `K`
    Key,
    /// `F`
    Font,
    /// `B`
    Bcd,
}

impl Operand {
    /// Accepts registers as `V0`..`VF` (or decimal `V10`..`V15`), numbers as
    /// `#2A`, `$2A`, `0x2A` or `42`, and anything else shaped like an
    /// identifier as a label.
    pub fn parse(token: &str) -> Result<Self, AsmErrorKind> {
        let upper = token.to_ascii_uppercase();
        let operand = match upper.as_str() {
            "I" => Operand::Index,
            "[I]" => Operand::Indirect,
            "DT" => Operand::Delay,
            "ST" => Operand::Sound,
            "K" => Operand::Key,
            "F" => Operand::Font,
            "B" => Operand::Bcd,
            _ => {
                if let Some(register) = parse_register(&upper)? {
                    Operand::Register(register)
                } else if let Some(value) = parse_literal(&upper)? {
                    Operand::Literal(value)
                } else if is_identifier(token) {
                    Operand::Label(token.to_string())
                } else {
                    return Err(AsmErrorKind::BadOperand(token.to_string()));
                }
            }
        };
        Ok(operand)
    }
}

fn parse_register(token: &str) -> Result<Option<Register>, AsmErrorKind> {
    let digits = match token.strip_prefix('V') {
        Some(digits) if !digits.is_empty() => digits,
        _ => return Ok(None),
    };
    let index = if digits.len() == 1 {
        usize::from_str_radix(digits, 16).ok()
    } else if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    };
    match index {
        Some(index) => Ok(Some(Register::new(index)?)),
        None => Ok(None),
    }
}

fn parse_literal(token: &str) -> Result<Option<u32>, AsmErrorKind> {
    let (digits, radix) = if let Some(hex) = token
        .strip_prefix('#')
        .or_else(|| token.strip_prefix('$'))
        .or_else(|| token.strip_prefix("0X"))
    {
        (hex, 16)
    } else if token.bytes().next().map_or(false, |b| b.is_ascii_digit()) {
        (token, 10)
    } else {
        return Ok(None);
    };
    u32::from_str_radix(digits, radix)
        .map(Some)
        .map_err(|_| AsmErrorKind::BadOperand(token.to_string()))
}

pub(crate) fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
