//! Helper functions for instruction execution.

use crate::memory::MemoryImage;

/// Tallest sprite a `Dxyn` can request.
pub const MAX_SPRITE_ROWS: usize = 15;

/// Splits `value` into its hundreds, tens and units digits.
#[must_use]
pub const fn bcd_digits(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}

/// Copies up to [`MAX_SPRITE_ROWS`] sprite rows starting at `addr`.
///
/// Returns the row buffer and the number of rows that are valid.
#[must_use]
pub fn read_sprite(memory: &MemoryImage, addr: u16, height: u8) -> ([u8; MAX_SPRITE_ROWS], usize) {
    let rows = usize::from(height).min(MAX_SPRITE_ROWS);
    let mut buf = [0; MAX_SPRITE_ROWS];
    for (offset, row) in (0_u16..).zip(buf.iter_mut().take(rows)) {
        *row = memory.read(addr.wrapping_add(offset));
    }
    (buf, rows)
}
