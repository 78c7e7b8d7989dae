//! Opcode groups and the canonical operation table.

use crate::decoder::Instruction;
use crate::state::GeneralRegister;

/// Operation families selected by the top nibble of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum OpcodeGroup {
    System = 0x0,
    Jump = 0x1,
    Call = 0x2,
    SkipEqualImmediate = 0x3,
    SkipNotEqualImmediate = 0x4,
    SkipEqualRegister = 0x5,
    LoadImmediate = 0x6,
    AddImmediate = 0x7,
    Alu = 0x8,
    SkipNotEqualRegister = 0x9,
    LoadIndex = 0xA,
    JumpOffset = 0xB,
    Random = 0xC,
    Draw = 0xD,
    Key = 0xE,
    Misc = 0xF,
}

impl OpcodeGroup {
    /// Maps the low nibble of `bits` to its group. Every nibble names a group.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Self {
        match bits & 0x0F {
            0x0 => Self::System,
            0x1 => Self::Jump,
            0x2 => Self::Call,
            0x3 => Self::SkipEqualImmediate,
            0x4 => Self::SkipNotEqualImmediate,
            0x5 => Self::SkipEqualRegister,
            0x6 => Self::LoadImmediate,
            0x7 => Self::AddImmediate,
            0x8 => Self::Alu,
            0x9 => Self::SkipNotEqualRegister,
            0xA => Self::LoadIndex,
            0xB => Self::JumpOffset,
            0xC => Self::Random,
            0xD => Self::Draw,
            0xE => Self::Key,
            _ => Self::Misc,
        }
    }
}

/// One of the 34 canonical CHIP-8 operations with its operands resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Operation {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `1nnn`
    Jump { addr: u16 },
    /// `2nnn`
    Call { addr: u16 },
    /// `3xkk`
    SkipIfEqualImmediate { x: GeneralRegister, kk: u8 },
    /// `4xkk`
    SkipIfNotEqualImmediate { x: GeneralRegister, kk: u8 },
    /// `5xy0`
    SkipIfEqualRegister { x: GeneralRegister, y: GeneralRegister },
    /// `6xkk`
    LoadImmediate { x: GeneralRegister, kk: u8 },
    /// `7xkk`
    AddImmediate { x: GeneralRegister, kk: u8 },
    /// `8xy0`
    Move { x: GeneralRegister, y: GeneralRegister },
    /// `8xy1`
    Or { x: GeneralRegister, y: GeneralRegister },
    /// `8xy2`
    And { x: GeneralRegister, y: GeneralRegister },
    /// `8xy3`
    Xor { x: GeneralRegister, y: GeneralRegister },
    /// `8xy4`
    AddWithCarry { x: GeneralRegister, y: GeneralRegister },
    /// `8xy5`
    Subtract { x: GeneralRegister, y: GeneralRegister },
    /// `8xy6`
    ShiftRight { x: GeneralRegister },
    /// `8xy7`
    SubtractReversed { x: GeneralRegister, y: GeneralRegister },
    /// `8xyE`
    ShiftLeft { x: GeneralRegister },
    /// `9xy0`
    SkipIfNotEqualRegister { x: GeneralRegister, y: GeneralRegister },
    /// `Annn`
    LoadIndex { addr: u16 },
    /// `Bnnn`
    JumpOffset { addr: u16 },
    /// `Cxkk`
    Random { x: GeneralRegister, kk: u8 },
    /// `Dxyn`
    Draw { x: GeneralRegister, y: GeneralRegister, height: u8 },
    /// `Ex9E`
    SkipIfKeyDown { x: GeneralRegister },
    /// `ExA1`
    SkipIfKeyUp { x: GeneralRegister },
    /// `Fx07`
    ReadDelay { x: GeneralRegister },
    /// `Fx0A`
    WaitKey { x: GeneralRegister },
    /// `Fx15`
    SetDelay { x: GeneralRegister },
    /// `Fx18`
    SetSound { x: GeneralRegister },
    /// `Fx1E`
    AddIndex { x: GeneralRegister },
    /// `Fx29`
    FontGlyph { x: GeneralRegister },
    /// `Fx33`
    StoreBcd { x: GeneralRegister },
    /// `Fx55`
    StoreRegisters { last: GeneralRegister },
    /// `Fx65`
    LoadRegisters { last: GeneralRegister },
}

impl Operation {
    /// Assembly mnemonic used in log lines.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ClearScreen => "CLS",
            Self::Return => "RET",
            Self::Jump { .. } | Self::JumpOffset { .. } => "JP",
            Self::Call { .. } => "CALL",
            Self::SkipIfEqualImmediate { .. } | Self::SkipIfEqualRegister { .. } => "SE",
            Self::SkipIfNotEqualImmediate { .. } | Self::SkipIfNotEqualRegister { .. } => "SNE",
            Self::LoadImmediate { .. }
            | Self::Move { .. }
            | Self::LoadIndex { .. }
            | Self::ReadDelay { .. }
            | Self::WaitKey { .. }
            | Self::SetDelay { .. }
            | Self::SetSound { .. }
            | Self::FontGlyph { .. }
            | Self::StoreBcd { .. }
            | Self::StoreRegisters { .. }
            | Self::LoadRegisters { .. } => "LD",
            Self::AddImmediate { .. } | Self::AddWithCarry { .. } | Self::AddIndex { .. } => "ADD",
            Self::Or { .. } => "OR",
            Self::And { .. } => "AND",
            Self::Xor { .. } => "XOR",
            Self::Subtract { .. } => "SUB",
            Self::ShiftRight { .. } => "SHR",
            Self::SubtractReversed { .. } => "SUBN",
            Self::ShiftLeft { .. } => "SHL",
            Self::Random { .. } => "RND",
            Self::Draw { .. } => "DRW",
            Self::SkipIfKeyDown { .. } => "SKP",
            Self::SkipIfKeyUp { .. } => "SKNP",
        }
    }
}

/// Resolves a decoded instruction to a canonical operation.
///
/// Returns `None` for every word outside the canonical set, including `0nnn`
/// machine-code calls and `5xyN`/`9xyN` with a nonzero `N`.
#[must_use]
pub const fn classify(instr: Instruction) -> Option<Operation> {
    let x = instr.vx();
    let y = instr.vy();

    let op = match OpcodeGroup::from_u4(instr.group()) {
        OpcodeGroup::System => match instr.opcode {
            0x00E0 => Operation::ClearScreen,
            0x00EE => Operation::Return,
            _ => return None,
        },
        OpcodeGroup::Jump => Operation::Jump { addr: instr.nnn },
        OpcodeGroup::Call => Operation::Call { addr: instr.nnn },
        OpcodeGroup::SkipEqualImmediate => Operation::SkipIfEqualImmediate { x, kk: instr.kk },
        OpcodeGroup::SkipNotEqualImmediate => {
            Operation::SkipIfNotEqualImmediate { x, kk: instr.kk }
        }
        OpcodeGroup::SkipEqualRegister if instr.n == 0 => {
            Operation::SkipIfEqualRegister { x, y }
        }
        OpcodeGroup::LoadImmediate => Operation::LoadImmediate { x, kk: instr.kk },
        OpcodeGroup::AddImmediate => Operation::AddImmediate { x, kk: instr.kk },
        OpcodeGroup::Alu => match instr.n {
            0x0 => Operation::Move { x, y },
            0x1 => Operation::Or { x, y },
            0x2 => Operation::And { x, y },
            0x3 => Operation::Xor { x, y },
            0x4 => Operation::AddWithCarry { x, y },
            0x5 => Operation::Subtract { x, y },
            0x6 => Operation::ShiftRight { x },
            0x7 => Operation::SubtractReversed { x, y },
            0xE => Operation::ShiftLeft { x },
            _ => return None,
        },
        OpcodeGroup::SkipNotEqualRegister if instr.n == 0 => {
            Operation::SkipIfNotEqualRegister { x, y }
        }
        OpcodeGroup::LoadIndex => Operation::LoadIndex { addr: instr.nnn },
        OpcodeGroup::JumpOffset => Operation::JumpOffset { addr: instr.nnn },
        OpcodeGroup::Random => Operation::Random { x, kk: instr.kk },
        OpcodeGroup::Draw => Operation::Draw {
            x,
            y,
            height: instr.n,
        },
        OpcodeGroup::Key => match instr.kk {
            0x9E => Operation::SkipIfKeyDown { x },
            0xA1 => Operation::SkipIfKeyUp { x },
            _ => return None,
        },
        OpcodeGroup::Misc => match instr.kk {
            0x07 => Operation::ReadDelay { x },
            0x0A => Operation::WaitKey { x },
            0x15 => Operation::SetDelay { x },
            0x18 => Operation::SetSound { x },
            0x1E => Operation::AddIndex { x },
            0x29 => Operation::FontGlyph { x },
            0x33 => Operation::StoreBcd { x },
            0x55 => Operation::StoreRegisters { last: x },
            0x65 => Operation::LoadRegisters { last: x },
            _ => return None,
        },
        OpcodeGroup::SkipEqualRegister | OpcodeGroup::SkipNotEqualRegister => return None,
    };

    Some(op)
}
