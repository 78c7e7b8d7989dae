//! Instruction execution for the canonical CHIP-8 operation set.
//!
//! The program counter already points past the executing instruction when an
//! operation runs. Skips add a further 2, jumps/calls/returns overwrite it,
//! and a key-wait with no key down rewinds it so the same word is fetched
//! again on the next cycle.

mod flags;
mod helpers;

pub use flags::{add_with_carry, shift_left, shift_right, subtract};
pub use helpers::{bcd_digits, read_sprite, MAX_SPRITE_ROWS};

use rand::{Rng, RngCore};

use crate::encoding::Operation;
use crate::memory::{glyph_offset, FONT_START};
use crate::state::GeneralRegister;
use crate::{ExecutionFault, MachineState, Quirks};

/// Outcome of executing a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecuteOutcome {
    /// Operation completed.
    Retired,
    /// Operation completed but at least one store into the font region was
    /// discarded; `addr` is the first discarded target.
    DeniedWrite {
        /// Target of the first discarded store.
        addr: u16,
    },
    /// `Fx0A` found no key down and rewound `PC` onto itself.
    WaitingForKey,
    /// Subroutine discipline violated; the caller must halt the machine.
    Fault {
        /// Raised fault.
        cause: ExecutionFault,
    },
}

/// Applies `op` to `state`.
///
/// `Cxkk` draws from `rng`; `quirks` selects the index behaviour of
/// `Fx55`/`Fx65`.
#[allow(clippy::too_many_lines)]
pub fn execute_operation(
    op: Operation,
    state: &mut MachineState,
    quirks: Quirks,
    rng: &mut dyn RngCore,
) -> ExecuteOutcome {
    let regs = &mut state.registers;

    match op {
        Operation::ClearScreen => state.framebuffer.clear(),
        Operation::Return => match state.stack.pop() {
            Ok(addr) => regs.set_pc(addr),
            Err(cause) => return ExecuteOutcome::Fault { cause },
        },
        Operation::Jump { addr } => regs.set_pc(addr),
        Operation::Call { addr } => {
            if let Err(cause) = state.stack.push(regs.pc()) {
                return ExecuteOutcome::Fault { cause };
            }
            regs.set_pc(addr);
        }
        Operation::SkipIfEqualImmediate { x, kk } => skip_if(regs, regs.v(x) == kk),
        Operation::SkipIfNotEqualImmediate { x, kk } => skip_if(regs, regs.v(x) != kk),
        Operation::SkipIfEqualRegister { x, y } => skip_if(regs, regs.v(x) == regs.v(y)),
        Operation::SkipIfNotEqualRegister { x, y } => skip_if(regs, regs.v(x) != regs.v(y)),
        Operation::LoadImmediate { x, kk } => regs.set_v(x, kk),
        Operation::AddImmediate { x, kk } => regs.set_v(x, regs.v(x).wrapping_add(kk)),
        Operation::Move { x, y } => regs.set_v(x, regs.v(y)),
        Operation::Or { x, y } => regs.set_v(x, regs.v(x) | regs.v(y)),
        Operation::And { x, y } => regs.set_v(x, regs.v(x) & regs.v(y)),
        Operation::Xor { x, y } => regs.set_v(x, regs.v(x) ^ regs.v(y)),
        Operation::AddWithCarry { x, y } => {
            write_with_flag(regs, x, add_with_carry(regs.v(x), regs.v(y)));
        }
        Operation::Subtract { x, y } => {
            write_with_flag(regs, x, subtract(regs.v(x), regs.v(y)));
        }
        Operation::SubtractReversed { x, y } => {
            write_with_flag(regs, x, subtract(regs.v(y), regs.v(x)));
        }
        Operation::ShiftRight { x } => write_with_flag(regs, x, shift_right(regs.v(x))),
        Operation::ShiftLeft { x } => write_with_flag(regs, x, shift_left(regs.v(x))),
        Operation::LoadIndex { addr } => regs.set_i(addr),
        Operation::JumpOffset { addr } => {
            regs.set_pc(addr.wrapping_add(u16::from(regs.v(GeneralRegister::V0))));
        }
        Operation::Random { x, kk } => regs.set_v(x, rng.gen::<u8>() & kk),
        Operation::Draw { x, y, height } => {
            let (rows, len) = read_sprite(&state.memory, regs.i(), height);
            let collision = state
                .framebuffer
                .draw_sprite(regs.v(x), regs.v(y), &rows[..len]);
            regs.set_flag(collision);
        }
        Operation::SkipIfKeyDown { x } => skip_if(regs, state.keypad.is_down(regs.v(x))),
        Operation::SkipIfKeyUp { x } => skip_if(regs, !state.keypad.is_down(regs.v(x))),
        Operation::ReadDelay { x } => regs.set_v(x, state.timers.delay),
        Operation::WaitKey { x } => {
            if let Some(key) = state.keypad.first_down() {
                regs.set_v(x, key);
            } else {
                regs.rewind_pc();
                return ExecuteOutcome::WaitingForKey;
            }
        }
        Operation::SetDelay { x } => state.timers.delay = regs.v(x),
        Operation::SetSound { x } => state.timers.sound = regs.v(x),
        Operation::AddIndex { x } => regs.set_i(regs.i().wrapping_add(u16::from(regs.v(x)))),
        Operation::FontGlyph { x } => regs.set_i(FONT_START + glyph_offset(regs.v(x))),
        Operation::StoreBcd { x } => {
            let base = regs.i();
            let mut denied = None;
            for (offset, digit) in (0_u16..).zip(bcd_digits(regs.v(x))) {
                let addr = base.wrapping_add(offset);
                if !state.memory.store(addr, digit) {
                    denied = denied.or(Some(addr));
                }
            }
            if let Some(addr) = denied {
                return ExecuteOutcome::DeniedWrite { addr };
            }
        }
        Operation::StoreRegisters { last } => {
            let base = regs.i();
            let mut denied = None;
            for (offset, reg) in (0_u16..).zip(register_block(last)) {
                let addr = base.wrapping_add(offset);
                if !state.memory.store(addr, regs.v(reg)) {
                    denied = denied.or(Some(addr));
                }
            }
            advance_index_after_block(regs, last, quirks);
            if let Some(addr) = denied {
                return ExecuteOutcome::DeniedWrite { addr };
            }
        }
        Operation::LoadRegisters { last } => {
            let base = regs.i();
            for (offset, reg) in (0_u16..).zip(register_block(last)) {
                regs.set_v(reg, state.memory.read(base.wrapping_add(offset)));
            }
            advance_index_after_block(regs, last, quirks);
        }
    }

    ExecuteOutcome::Retired
}

const fn skip_if(regs: &mut crate::Registers, condition: bool) {
    if condition {
        regs.advance_pc();
    }
}

/// Result first, flag second: with `x = F` the flag is what remains in `VF`.
const fn write_with_flag(
    regs: &mut crate::Registers,
    x: GeneralRegister,
    (value, flag): (u8, bool),
) {
    regs.set_v(x, value);
    regs.set_flag(flag);
}

fn register_block(last: GeneralRegister) -> impl Iterator<Item = GeneralRegister> {
    GeneralRegister::ALL.into_iter().take(last.index() + 1)
}

#[allow(clippy::cast_possible_truncation)]
const fn advance_index_after_block(
    regs: &mut crate::Registers,
    last: GeneralRegister,
    quirks: Quirks,
) {
    if quirks.load_store_increments_index {
        regs.set_i(regs.i().wrapping_add(last.index() as u16 + 1));
    }
}
