//! Built-in hexadecimal digit glyphs.

/// Height in bytes (rows) of one font glyph.
pub const GLYPH_BYTES: usize = 5;

/// Number of glyphs in the built-in font (`0`..=`F`).
pub const GLYPH_COUNT: usize = 16;

/// Glyphs for `0`..=`F`, five rows each, MSB-first, 4 pixels wide.
pub const FONT: [u8; GLYPH_BYTES * GLYPH_COUNT] = [
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

/// Offset of the glyph for `digit` (low nibble only) relative to the font base.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn glyph_offset(digit: u8) -> u16 {
    (digit & 0x0F) as u16 * GLYPH_BYTES as u16
}
