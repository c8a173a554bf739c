//! SDL2 frontends for the interpreter.

mod audio;
mod display;

pub use crate::audio::Beeper;
pub use crate::display::Display;
