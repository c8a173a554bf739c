use std::collections::HashMap;

use chip8_core::constants::{LOAD_BASE, MAX_PROGRAM_SIZE};
use chip8_core::{Instruction, Register};
use log::debug;

use crate::error::{AsmError, AsmErrorKind};
use crate::operand::{is_identifier, Operand};

/// What a single source statement assembles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Instruction(Instruction),
    /// `DW #XXXX`, a raw word
    Word(u16),
}

impl Item {
    fn word(self) -> u16 {
        match self {
            Item::Instruction(instruction) => instruction.encode(),
            Item::Word(word) => word,
        }
    }
}

/// A statement with its label (if any) split off and its comment dropped.
struct Statement<'a> {
    line: usize,
    label: Option<&'a str>,
    body: &'a str,
}

fn split(line: usize, text: &str) -> Statement<'_> {
    let text = match text.find(';') {
        Some(comment) => &text[..comment],
        None => text,
    };
    let text = text.trim();
    match text.find(':') {
        Some(colon) => Statement {
            line,
            label: Some(text[..colon].trim()),
            body: text[colon + 1..].trim(),
        },
        None => Statement {
            line,
            label: None,
            body: text,
        },
    }
}

type Labels<'a> = HashMap<&'a str, u16>;

/// Assembles a whole program, one statement per line.
///
/// Labels (`name:`) may appear on their own line or before a statement and
/// refer to the address of the next emitted word, counting from the load
/// base. They can be used anywhere an address is expected.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmError> {
    let statements: Vec<Statement> = source
        .lines()
        .enumerate()
        .map(|(row, text)| split(row + 1, text))
        .collect();

    // First pass: every label gets the address of the next statement.
    let mut labels = Labels::new();
    let mut address = LOAD_BASE;
    for statement in &statements {
        if let Some(label) = statement.label {
            if !is_identifier(label) {
                return Err(AsmErrorKind::InvalidLabel(label.to_string()).at(statement.line));
            }
            if labels.insert(label, address).is_some() {
                return Err(AsmErrorKind::DuplicateLabel(label.to_string()).at(statement.line));
            }
        }
        if !statement.body.is_empty() {
            address = address.wrapping_add(2);
        }
    }
    debug!("resolved {} label(s)", labels.len());

    let mut bytes = Vec::new();
    for statement in statements.iter().filter(|s| !s.body.is_empty()) {
        let word = parse(statement.body, &labels)
            .map_err(|kind| kind.at(statement.line))?
            .word();
        bytes.extend_from_slice(&word.to_be_bytes());
        if bytes.len() > MAX_PROGRAM_SIZE {
            let kind = AsmErrorKind::TooLarge {
                size: bytes.len(),
                max: MAX_PROGRAM_SIZE,
            };
            return Err(kind.at(statement.line));
        }
    }
    Ok(bytes)
}

/// Assembles a single statement with no labels in scope.
pub fn assemble_line(text: &str) -> Result<u16, AsmError> {
    let statement = split(1, text);
    parse(statement.body, &Labels::new())
        .map(Item::word)
        .map_err(|kind| kind.at(1))
}

fn parse(body: &str, labels: &Labels) -> Result<Item, AsmErrorKind> {
    let (mnemonic, rest) = match body.find(char::is_whitespace) {
        Some(split) => (&body[..split], body[split..].trim()),
        None => (body, ""),
    };
    let mnemonic = mnemonic.to_ascii_uppercase();
    let operands = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',')
            .map(|token| Operand::parse(token.trim()))
            .collect::<Result<Vec<_>, _>>()?
    };

    let address = |operand: &Operand| resolve(operand, labels);

    use Instruction::*;
    use Operand::{Bcd as B, Delay, Font, Index, Indirect, Key, Literal, Sound};
    use Operand::Register as Reg;
    let instruction = match (mnemonic.as_str(), operands.as_slice()) {
        ("DW", [Literal(value)]) => return Ok(Item::Word(fit(*value, 0xFFFF)? as u16)),
        ("CLS", []) => Clear,
        ("RET", []) => Return,
        ("JP", [Reg(v0), target]) if *v0 == Register::V0 => JumpV0 {
            addr: address(target)?,
        },
        ("JP", [target]) => Jump {
            addr: address(target)?,
        },
        ("CALL", [target]) => Call {
            addr: address(target)?,
        },
        ("SE", [Reg(x), Reg(y)]) => SkipEqReg { x: *x, y: *y },
        ("SE", [Reg(x), Literal(kk)]) => SkipEqByte { x: *x, kk: byte(*kk)? },
        ("SNE", [Reg(x), Reg(y)]) => SkipNeReg { x: *x, y: *y },
        ("SNE", [Reg(x), Literal(kk)]) => SkipNeByte { x: *x, kk: byte(*kk)? },
        ("LD", [Reg(x), Reg(y)]) => Move { x: *x, y: *y },
        ("LD", [Reg(x), Literal(kk)]) => LoadByte { x: *x, kk: byte(*kk)? },
        ("LD", [Reg(x), Delay]) => ReadDelay { x: *x },
        ("LD", [Reg(x), Key]) => WaitKey { x: *x },
        ("LD", [Reg(x), Indirect]) => Read { x: *x },
        ("LD", [Index, target]) => LoadI {
            addr: address(target)?,
        },
        ("LD", [Delay, Reg(x)]) => SetDelay { x: *x },
        ("LD", [Sound, Reg(x)]) => SetSound { x: *x },
        ("LD", [Font, Reg(x)]) => LoadFont { x: *x },
        ("LD", [B, Reg(x)]) => Bcd { x: *x },
        ("LD", [Indirect, Reg(x)]) => Store { x: *x },
        ("ADD", [Reg(x), Reg(y)]) => AddReg { x: *x, y: *y },
        ("ADD", [Reg(x), Literal(kk)]) => AddByte { x: *x, kk: byte(*kk)? },
        ("ADD", [Index, Reg(x)]) => AddI { x: *x },
        ("OR", [Reg(x), Reg(y)]) => Or { x: *x, y: *y },
        ("AND", [Reg(x), Reg(y)]) => And { x: *x, y: *y },
        ("XOR", [Reg(x), Reg(y)]) => Xor { x: *x, y: *y },
        ("SUB", [Reg(x), Reg(y)]) => Sub { x: *x, y: *y },
        ("SUBN", [Reg(x), Reg(y)]) => SubN { x: *x, y: *y },
        ("SHR", [Reg(x)]) => ShiftRight { x: *x, y: Register::V0 },
        ("SHR", [Reg(x), Reg(y)]) => ShiftRight { x: *x, y: *y },
        ("SHL", [Reg(x)]) => ShiftLeft { x: *x, y: Register::V0 },
        ("SHL", [Reg(x), Reg(y)]) => ShiftLeft { x: *x, y: *y },
        ("RND", [Reg(x), Literal(kk)]) => Random { x: *x, kk: byte(*kk)? },
        ("DRW", [Reg(x), Reg(y), Literal(n)]) => match *n {
            1..=0xF => Draw {
                x: *x,
                y: *y,
                n: *n as u8,
            },
            n => return Err(AsmErrorKind::SpriteHeight(n)),
        },
        ("SKP", [Reg(x)]) => SkipPressed { x: *x },
        ("SKNP", [Reg(x)]) => SkipNotPressed { x: *x },
        (
            "DW" | "CLS" | "RET" | "JP" | "CALL" | "SE" | "SNE" | "LD" | "ADD" | "OR" | "AND"
            | "XOR" | "SUB" | "SUBN" | "SHR" | "SHL" | "RND" | "DRW" | "SKP" | "SKNP",
            _,
        ) => {
            return Err(AsmErrorKind::InvalidOperands {
                mnemonic: mnemonic.clone(),
                operands: rest.to_string(),
            })
        }
        _ => return Err(AsmErrorKind::UnknownMnemonic(mnemonic.clone())),
    };
    Ok(Item::Instruction(instruction))
}

fn resolve(operand: &Operand, labels: &Labels) -> Result<u16, AsmErrorKind> {
    match operand {
        Operand::Literal(value) => Ok(fit(*value, 0xFFF)? as u16),
        Operand::Label(name) => {
            let address = labels
                .get(name.as_str())
                .copied()
                .ok_or_else(|| AsmErrorKind::UndefinedLabel(name.clone()))?;
            Ok(fit(u32::from(address), 0xFFF)? as u16)
        }
        other => Err(AsmErrorKind::BadOperand(format!("{:?}", other))),
    }
}

fn byte(value: u32) -> Result<u8, AsmErrorKind> {
    fit(value, 0xFF).map(|value| value as u8)
}

fn fit(value: u32, max: u32) -> Result<u32, AsmErrorKind> {
    if value > max {
        Err(AsmErrorKind::OutOfRange { value, max })
    } else {
        Ok(value)
    }
}
