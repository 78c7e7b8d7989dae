//! Memory image, font glyphs and program loader.

/// Built-in hexadecimal digit glyphs.
pub mod font;
/// Fixed address map and region decoder.
pub mod map;

pub use font::{glyph_offset, FONT, GLYPH_BYTES, GLYPH_COUNT};
pub use map::{
    decode_memory_region, MemoryRegion, FONT_END, FONT_START, INTERPRETER_END, INTERPRETER_START,
    PROGRAM_END, PROGRAM_START, RESERVED_END, RESERVED_START,
};

use crate::LoadError;

/// Size in bytes of the flat address space (4 KiB).
pub const MEMORY_BYTES: usize = 4096;

/// Largest program image accepted by [`MemoryImage::load_program`].
pub const MAX_PROGRAM_BYTES: usize = MEMORY_BYTES - PROGRAM_START as usize;

const ADDRESS_MASK: u16 = PROGRAM_END;

/// Flat 4 KiB byte array with the font preloaded at [`FONT_START`].
///
/// Every address is reduced onto the 12-bit address bus before use, so reads
/// and writes never leave the backing array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    bytes: Box<[u8; MEMORY_BYTES]>,
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryImage {
    /// Allocates a zeroed image and copies the font glyphs into place.
    #[must_use]
    pub fn new() -> Self {
        let mut bytes = Box::new([0; MEMORY_BYTES]);
        let font_start = usize::from(FONT_START);
        bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Self { bytes }
    }

    /// Copies `program` verbatim to [`PROGRAM_START`].
    ///
    /// The previous program region is cleared first. Bytes outside the program
    /// region are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ProgramTooLarge`] when `program` is longer than
    /// [`MAX_PROGRAM_BYTES`]; the image is left unmodified.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_BYTES {
            return Err(LoadError::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_BYTES,
            });
        }

        let start = usize::from(PROGRAM_START);
        self.bytes[start..].fill(0);
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Reads one byte.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr & ADDRESS_MASK)]
    }

    /// Reads a big-endian instruction word from `addr` and `addr + 1`.
    #[must_use]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Stores one byte on behalf of an instruction.
    ///
    /// Returns `false` when the write targets the font region and was discarded.
    pub fn store(&mut self, addr: u16, value: u8) -> bool {
        if !decode_memory_region(addr).is_writable() {
            return false;
        }
        self.bytes[usize::from(addr & ADDRESS_MASK)] = value;
        true
    }

    /// Borrows the full image.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}
