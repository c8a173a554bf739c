use crate::constants::{FONT, FONT_ADDR, LOAD_BASE, MAX_PROGRAM_SIZE, MEMORY_SIZE};
use crate::error::{LoadError, RangeError};

/// # Address Space
/// 4096 bytes of program and data memory.
///
/// ```text
/// 0x000..0x050  font (read-only)
/// 0x050..0x200  scratch
/// 0x200..0x1000 program, free to modify itself
/// ```
///
/// Every access is checked against the size of memory; nothing wraps or clamps.
#[derive(Copy, Clone)]
pub struct AddressSpace {
    bytes: [u8; MEMORY_SIZE],
}

impl AddressSpace {
    /// Zeroed memory with the font preloaded.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_ADDR as usize;
        bytes[font..font + FONT.len()].copy_from_slice(&FONT);
        AddressSpace { bytes }
    }

    /// Copy a program image to the load base.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let base = LOAD_BASE as usize;
        self.bytes[base..base + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, RangeError> {
        Ok(self.slice(address, 1)?[0])
    }

    /// Big-endian two byte read, as instructions are stored.
    pub fn word(&self, address: usize) -> Result<[u8; 2], RangeError> {
        let bytes = self.slice(address, 2)?;
        Ok([bytes[0], bytes[1]])
    }

    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], RangeError> {
        Self::bounds(address, len).map(|range| &self.bytes[range])
    }

    /// Copy `data` into memory starting at `address`.
    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<(), RangeError> {
        let range = Self::bounds(address, data.len())?;
        let font_end = FONT_ADDR as usize + FONT.len();
        if !data.is_empty() && range.start < font_end && range.end > FONT_ADDR as usize {
            return Err(RangeError::ReadOnly {
                address: range.start.max(FONT_ADDR as usize),
            });
        }
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    fn bounds(address: usize, len: usize) -> Result<std::ops::Range<usize>, RangeError> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(address..end),
            _ => Err(RangeError::Memory { address, len }),
        }
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_preloaded_and_rest_zeroed() {
        let memory = AddressSpace::new();
        assert_eq!(memory.slice(0x000, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert!(memory.bytes[FONT.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loads_program_at_base() {
        let mut memory = AddressSpace::new();
        memory.load(&[0x00, 0xE0]).unwrap();
        assert_eq!(memory.word(0x200).unwrap(), [0x00, 0xE0]);
    }

    #[test]
    fn test_loads_program_filling_memory() {
        let mut memory = AddressSpace::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        memory.load(&program).unwrap();
        assert_eq!(memory.read(MEMORY_SIZE - 1).unwrap(), 0xAB);
    }

    #[test]
    fn test_rejects_oversized_program() {
        let mut memory = AddressSpace::new();
        let program = vec![0; MAX_PROGRAM_SIZE + 1];
        assert_eq!(
            memory.load(&program),
            Err(LoadError::TooLarge {
                size: MAX_PROGRAM_SIZE + 1,
                max: MAX_PROGRAM_SIZE
            })
        );
    }

    #[test]
    fn test_read_out_of_bounds() {
        let memory = AddressSpace::new();
        assert_eq!(
            memory.read(MEMORY_SIZE),
            Err(RangeError::Memory { address: MEMORY_SIZE, len: 1 })
        );
    }

    #[test]
    fn test_word_straddling_end() {
        let memory = AddressSpace::new();
        assert!(memory.word(MEMORY_SIZE - 1).is_err());
    }

    #[test]
    fn test_write_out_of_bounds_leaves_memory_untouched() {
        let mut memory = AddressSpace::new();
        assert!(memory.write(MEMORY_SIZE - 2, &[1, 2, 3]).is_err());
        assert_eq!(memory.slice(MEMORY_SIZE - 2, 2).unwrap(), &[0, 0]);
    }

    #[test]
    fn test_font_is_read_only() {
        let mut memory = AddressSpace::new();
        assert_eq!(
            memory.write(0x4E, &[0, 0, 0, 0]),
            Err(RangeError::ReadOnly { address: 0x4E })
        );
        assert!(memory.write(0x50, &[1]).is_ok());
    }
}
