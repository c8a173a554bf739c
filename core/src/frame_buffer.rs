use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_BUFFER_SIZE};

/// # Frame Buffer
/// The 64x32 monochrome display, one bit per pixel.
///
/// Rows are stored top to bottom, each row is 8 bytes and the most significant
/// bit of a byte is its leftmost pixel.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; FRAME_BUFFER_SIZE],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            bytes: [0; FRAME_BUFFER_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.bytes = [0; FRAME_BUFFER_SIZE];
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the pixel at `x`, `y` is lit. Coordinates wrap.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let (byte, mask) = Self::locate(x, y);
        self.bytes[byte] & mask != 0
    }

    /// All pixels row by row, left to right.
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        (0..DISPLAY_HEIGHT)
            .flat_map(move |y| (0..DISPLAY_WIDTH).map(move |x| self.pixel(x, y)))
    }

    /// XOR a sprite onto the buffer with its top left corner at `x`, `y`.
    ///
    /// Each byte of `sprite` is one row of 8 pixels. Pixels that fall off the
    /// right or bottom edge reappear on the opposite edge.
    ///
    /// Returns whether any lit pixel was turned off.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            for column in 0..8 {
                if bits & (0x80 >> column) == 0 {
                    continue;
                }
                let (byte, mask) = Self::locate(x + column, y + row);
                let before = self.bytes[byte] & mask;
                self.bytes[byte] ^= mask;
                collision |= before != 0 && self.bytes[byte] & mask == 0;
            }
        }
        collision
    }

    /// Byte index and bit mask of a pixel after wrapping both axes.
    fn locate(x: usize, y: usize) -> (usize, u8) {
        let x = x % DISPLAY_WIDTH;
        let y = y % DISPLAY_HEIGHT;
        (y * DISPLAY_WIDTH / 8 + x / 8, 0x80 >> (x % 8))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_msb_first() {
        let mut frame = FrameBuffer::new();
        frame.draw(0, 0, &[0b1100_0000]);
        assert_eq!(frame.as_bytes()[0], 0b1100_0000);
        assert!(frame.pixel(0, 0));
        assert!(frame.pixel(1, 0));
        assert!(!frame.pixel(2, 0));
    }

    #[test]
    fn test_draws_across_byte_boundary() {
        let mut frame = FrameBuffer::new();
        frame.draw(4, 1, &[0xFF]);
        assert_eq!(frame.as_bytes()[8..10], [0x0F, 0xF0]);
    }

    #[test]
    fn test_wraps_right_edge() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw(60, 0, &[0xFF]);
        assert!(!collision);
        for x in [60, 61, 62, 63, 0, 1, 2, 3] {
            assert!(frame.pixel(x, 0), "pixel {} should be set", x);
        }
        assert_eq!(frame.pixels().filter(|&p| p).count(), 8);
    }

    #[test]
    fn test_wraps_bottom_edge() {
        let mut frame = FrameBuffer::new();
        frame.draw(0, 31, &[0x80, 0x80]);
        assert!(frame.pixel(0, 31));
        assert!(frame.pixel(0, 0));
    }

    #[test]
    fn test_redraw_erases_and_collides() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.draw(60, 0, &[0xFF]));
        assert!(frame.draw(60, 0, &[0xFF]));
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_no_collision_when_only_setting() {
        let mut frame = FrameBuffer::new();
        frame.draw(0, 0, &[0xF0]);
        assert!(!frame.draw(0, 0, &[0x0F]));
        assert_eq!(frame.as_bytes()[0], 0xFF);
    }

    #[test]
    fn test_collision_within_partially_cleared_byte() {
        // the byte stays non-zero after the draw but one pixel was still erased
        let mut frame = FrameBuffer::new();
        frame.draw(0, 0, &[0b1000_0001]);
        assert!(frame.draw(0, 0, &[0b1000_0000]));
        assert_eq!(frame.as_bytes()[0], 0b0000_0001);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw(10, 10, &[0xFF, 0xFF]);
        frame.clear();
        assert_eq!(frame.as_bytes(), &[0; FRAME_BUFFER_SIZE][..]);
    }
}
