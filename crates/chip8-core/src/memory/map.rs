//! Fixed address map of the 4 KiB memory image.

/// Inclusive start address of the low reserved region.
pub const RESERVED_START: u16 = 0x000;
/// Inclusive end address of the low reserved region.
pub const RESERVED_END: u16 = 0x04F;
/// Inclusive start address of the font region.
pub const FONT_START: u16 = 0x050;
/// Inclusive end address of the font region.
pub const FONT_END: u16 = 0x09F;
/// Inclusive start address of the interpreter area above the font.
pub const INTERPRETER_START: u16 = 0x0A0;
/// Inclusive end address of the interpreter area above the font.
pub const INTERPRETER_END: u16 = 0x1FF;
/// Inclusive start address of the program region; also the boot `PC`.
pub const PROGRAM_START: u16 = 0x200;
/// Inclusive end address of the program region.
pub const PROGRAM_END: u16 = 0xFFF;

/// Region classification for memory-image addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    /// Unused bytes below the font (`0x000..=0x04F`).
    Reserved,
    /// Built-in glyphs (`0x050..=0x09F`), read-only after construction.
    Font,
    /// Unused interpreter bytes (`0x0A0..=0x1FF`).
    Interpreter,
    /// Loaded program and its working data (`0x200..=0xFFF`).
    Program,
}

impl MemoryRegion {
    /// Returns the inclusive bounds for this region.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::Reserved => (RESERVED_START, RESERVED_END),
            Self::Font => (FONT_START, FONT_END),
            Self::Interpreter => (INTERPRETER_START, INTERPRETER_END),
            Self::Program => (PROGRAM_START, PROGRAM_END),
        }
    }

    /// Returns `true` when instruction stores into this region are honoured.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::Font)
    }
}

/// Classifies an address after reducing it onto the 12-bit address bus.
#[must_use]
pub const fn decode_memory_region(addr: u16) -> MemoryRegion {
    match addr & PROGRAM_END {
        RESERVED_START..=RESERVED_END => MemoryRegion::Reserved,
        FONT_START..=FONT_END => MemoryRegion::Font,
        INTERPRETER_START..=INTERPRETER_END => MemoryRegion::Interpreter,
        _ => MemoryRegion::Program,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_memory_region, MemoryRegion};

    #[test]
    fn region_boundaries_decode_exactly() {
        assert_eq!(decode_memory_region(0x000), MemoryRegion::Reserved);
        assert_eq!(decode_memory_region(0x04F), MemoryRegion::Reserved);
        assert_eq!(decode_memory_region(0x050), MemoryRegion::Font);
        assert_eq!(decode_memory_region(0x09F), MemoryRegion::Font);
        assert_eq!(decode_memory_region(0x0A0), MemoryRegion::Interpreter);
        assert_eq!(decode_memory_region(0x1FF), MemoryRegion::Interpreter);
        assert_eq!(decode_memory_region(0x200), MemoryRegion::Program);
        assert_eq!(decode_memory_region(0xFFF), MemoryRegion::Program);
    }

    #[test]
    fn addresses_above_twelve_bits_alias_low_memory() {
        assert_eq!(decode_memory_region(0x1050), MemoryRegion::Font);
        assert_eq!(decode_memory_region(0xF200), MemoryRegion::Program);
    }

    #[test]
    fn only_font_region_is_write_protected() {
        for region in [
            MemoryRegion::Reserved,
            MemoryRegion::Interpreter,
            MemoryRegion::Program,
        ] {
            assert!(region.is_writable());
        }
        assert!(!MemoryRegion::Font.is_writable());
        assert_eq!(MemoryRegion::Font.bounds(), (0x050, 0x09F));
    }
}
