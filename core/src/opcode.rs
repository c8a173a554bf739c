/// # Opcodes
///
/// Instructions are two bytes, stored big-endian. Their behavior is cased on some combination of:
/// - `[n___]` broad categorization; applies to all opcodes
/// - `[___n]` specific behavior within a category
/// - `[__nn]` more specific behavior within a category
///
/// The remaining nibbles carry operands.
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` a byte assigned to and/or compared with Vx
/// - `[_x__]` the register Vx or the range of registers V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit literal such as a sprite height
pub trait Opcode {
    /// The opcode as a single big-endian word.
    fn word(&self) -> u16;

    /// The first nibble, which selects the opcode family.
    /// `[f___]`
    fn family(&self) -> u8;

    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    /// Low nibble of the first byte.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// High nibble of the second byte.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// Low nibble of the second byte.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The second byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The opcode without its family nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for [u8; 2] {
    fn word(&self) -> u16 {
        u16::from_be_bytes(*self)
    }

    fn family(&self) -> u8 {
        self[0] >> 4
    }

    fn x(&self) -> u8 {
        self[0] & 0x0F
    }

    fn y(&self) -> u8 {
        self[1] >> 4
    }

    fn n(&self) -> u8 {
        self[1] & 0x0F
    }

    fn kk(&self) -> u8 {
        self[1]
    }

    fn addr(&self) -> u16 {
        u16::from(self.x()) << 8 | u16::from(self.kk())
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    const OP: [u8; 2] = [0xAB, 0xCD];

    #[test]
    fn test_word() {
        assert_eq!(OP.word(), 0xABCD);
    }

    #[test]
    fn test_nibbles() {
        assert_eq!(OP.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_kk() {
        assert_eq!(OP.kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        assert_eq!(OP.addr(), 0x0BCD);
    }
}
