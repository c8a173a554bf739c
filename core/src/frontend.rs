//! The seams between the interpreter and the outside world.
//!
//! The interpreter never calls these itself; a driver does, once per frame.

use crate::frame_buffer::FrameBuffer;
use crate::input::KeyPoll;

/// Something that can show a frame.
pub trait Display {
    fn render(&mut self, frame: &FrameBuffer);
}

/// Something that reports the state of the keypad.
pub trait Input {
    /// Keys held right now and keys pressed since the last poll.
    fn poll(&mut self) -> KeyPoll;
}

/// Something that can beep.
pub trait Sound {
    fn start(&mut self);
    fn stop(&mut self);
}

/// A beeper that never makes a sound.
pub struct Mute;

impl Sound for Mute {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}
