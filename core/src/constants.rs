use std::time::Duration;

/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded here and the program counter starts here.
pub const LOAD_BASE: u16 = 0x200;

/// Largest program image that fits between the load base and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - LOAD_BASE as usize;

/// The font occupies `FONT_ADDR..FONT_ADDR + FONT.len()` and is read-only.
pub const FONT_ADDR: u16 = 0x000;

/// Each glyph is 5 rows tall.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Hexadecimal digits 0..F, one byte per 8 pixel row with only the high nibble lit.
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// The frame buffer packs 8 horizontal pixels into each byte.
pub const FRAME_BUFFER_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry/borrow/collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// Maximum number of nested subroutine calls.
pub const STACK_DEPTH: usize = 16;

/// Size of the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Instructions per second unless configured otherwise.
pub const CLOCK_SPEED: u32 = 500;

/// The delay and sound timers always decay at this rate.
pub const TIMER_SPEED: u32 = 60;

/// Frames rendered per second.
pub const FRAME_RATE: u32 = 60;

/// How many previous states are kept for rewinding by default.
pub const MAX_SAVED_STATES: usize = 600;

/// The fastest instruction clock a driver should ask for.
pub const MAX_CLOCK_SPEED: u32 = 1_000_000;

/// Convert a rate in Hz to the length of a single period.
///
/// Rates are clamped to 1Hz..=1GHz so a period is never zero.
pub fn period(hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(hz.clamp(1, 1_000_000_000)))
}
