//! Mutable machine state: registers, call stack, keypad and run mode.

/// Hexadecimal keypad state and host layout table.
pub mod keypad;
/// Register file types.
pub mod registers;
/// Host-visible execution mode.
pub mod run_state;
/// Bounded subroutine stack.
pub mod stack;

pub use keypad::{key_for_layout_char, Keypad, KEY_COUNT, LAYOUT};
pub use registers::{GeneralRegister, Registers, GENERAL_REGISTER_COUNT};
pub use run_state::MachineMode;
pub use stack::{CallStack, STACK_CAPACITY};
