use crate::memory::PROGRAM_START;

/// Number of general-purpose registers (`V0..VF`).
pub const GENERAL_REGISTER_COUNT: usize = 16;

/// General-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    V0 = 0x0,
    V1 = 0x1,
    V2 = 0x2,
    V3 = 0x3,
    V4 = 0x4,
    V5 = 0x5,
    V6 = 0x6,
    V7 = 0x7,
    V8 = 0x8,
    V9 = 0x9,
    VA = 0xA,
    VB = 0xB,
    VC = 0xC,
    VD = 0xD,
    VE = 0xE,
    /// Also written as the carry, borrow, shift-out and collision flag.
    VF = 0xF,
}

impl GeneralRegister {
    /// Ordered list of all general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::V0,
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
        Self::VA,
        Self::VB,
        Self::VC,
        Self::VD,
        Self::VE,
        Self::VF,
    ];

    /// Returns the array index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Selects a register from the low nibble of `bits`.
    #[must_use]
    pub const fn from_nibble(bits: u8) -> Self {
        Self::ALL[(bits & 0x0F) as usize]
    }
}

/// Register file: `V0..VF`, the index register `I` and the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Registers {
    v: [u8; GENERAL_REGISTER_COUNT],
    i: u16,
    pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            v: [0; GENERAL_REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
        }
    }
}

impl Registers {
    /// Reads a general-purpose register.
    #[must_use]
    pub const fn v(&self, reg: GeneralRegister) -> u8 {
        self.v[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_v(&mut self, reg: GeneralRegister, value: u8) {
        self.v[reg.index()] = value;
    }

    /// Writes `VF`.
    pub const fn set_flag(&mut self, value: bool) {
        self.v[GeneralRegister::VF.index()] = value as u8;
    }

    /// Borrows all general-purpose registers in index order.
    #[must_use]
    pub const fn general(&self) -> &[u8; GENERAL_REGISTER_COUNT] {
        &self.v
    }

    /// Reads the index register `I`.
    #[must_use]
    pub const fn i(&self) -> u16 {
        self.i
    }

    /// Writes the index register `I`.
    pub const fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Moves the program counter forward by one instruction word.
    pub const fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves the program counter back by one instruction word.
    pub const fn rewind_pc(&mut self) {
        self.pc = self.pc.wrapping_sub(2);
    }
}
