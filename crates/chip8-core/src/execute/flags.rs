//! `VF` flag conventions for arithmetic and shift instructions.
//!
//! Each helper returns `(result, flag)` computed from the operands as they
//! were before the instruction wrote anything.

/// `Vx + Vy`; flag is the carry out of bit 7.
#[must_use]
pub const fn add_with_carry(vx: u8, vy: u8) -> (u8, bool) {
    vx.overflowing_add(vy)
}

/// `minuend - subtrahend`; flag is set when no borrow occurs (strictly greater).
#[must_use]
pub const fn subtract(minuend: u8, subtrahend: u8) -> (u8, bool) {
    (minuend.wrapping_sub(subtrahend), minuend > subtrahend)
}

/// `Vx >> 1`; flag is the bit shifted out (bit 0).
#[must_use]
pub const fn shift_right(vx: u8) -> (u8, bool) {
    (vx >> 1, vx & 0x01 != 0)
}

/// `Vx << 1`; flag is the bit shifted out (bit 7).
#[must_use]
pub const fn shift_left(vx: u8) -> (u8, bool) {
    (vx << 1, vx & 0x80 != 0)
}
