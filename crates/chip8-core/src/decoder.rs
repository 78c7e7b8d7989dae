//! Instruction decoder for the CHIP-8 instruction set.
//!
//! Decoding only splits a 16-bit word into its fixed bit fields. Whether the
//! word names a defined operation is decided later by
//! [`classify`](crate::encoding::classify).

use crate::state::GeneralRegister;

/// Field view of one 16-bit instruction word.
///
/// ```text
///  15  12 11   8 7    4 3    0
/// +------+------+------+------+
/// | grp  |  x   |  y   |  n   |
/// +------+------+------+------+
///               |     kk      |
///        |        nnn         |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Raw instruction word.
    pub opcode: u16,
    /// 12-bit address field, bits 11–0.
    pub nnn: u16,
    /// 8-bit immediate, bits 7–0.
    pub kk: u8,
    /// 4-bit immediate, bits 3–0.
    pub n: u8,
    /// First register selector, bits 11–8.
    pub x: u8,
    /// Second register selector, bits 7–4.
    pub y: u8,
}

impl Instruction {
    /// Operation family, bits 15–12.
    #[must_use]
    pub const fn group(self) -> u8 {
        (self.opcode >> 12) as u8
    }

    /// Register selected by `x`.
    #[must_use]
    pub const fn vx(self) -> GeneralRegister {
        GeneralRegister::from_nibble(self.x)
    }

    /// Register selected by `y`.
    #[must_use]
    pub const fn vy(self) -> GeneralRegister {
        GeneralRegister::from_nibble(self.y)
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Decoder::decode(word)
    }
}

/// Stateless instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Splits `word` into its instruction fields. Pure and total.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn decode(word: u16) -> Instruction {
        Instruction {
            opcode: word,
            nnn: word & 0x0FFF,
            kk: (word & 0x00FF) as u8,
            n: (word & 0x000F) as u8,
            x: ((word >> 8) & 0x000F) as u8,
            y: ((word >> 4) & 0x000F) as u8,
        }
    }
}
