//! Fetch-decode-execute core for the CHIP-8 virtual machine.
//!
//! The crate owns memory, registers and the framebuffer and exposes a
//! [`Machine`] the host drives with [`Machine::step`] and
//! [`Machine::tick_timers`]. Windowing, audio and input polling belong to the
//! host.

/// Memory image, font and fixed region map.
pub mod memory;
pub use memory::{
    decode_memory_region, glyph_offset, MemoryImage, MemoryRegion, FONT, FONT_END, FONT_START,
    GLYPH_BYTES, GLYPH_COUNT, MAX_PROGRAM_BYTES, MEMORY_BYTES, PROGRAM_END, PROGRAM_START,
};

/// Registers, call stack, keypad and run mode.
pub mod state;
pub use state::{
    key_for_layout_char, CallStack, GeneralRegister, Keypad, MachineMode, Registers,
    GENERAL_REGISTER_COUNT, KEY_COUNT, STACK_CAPACITY,
};

/// Monochrome framebuffer and presentation hints.
pub mod display;
pub use display::{DisplayConfig, Framebuffer, Rgba, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Delay/sound timers and step scheduling helpers.
pub mod timing;
pub use timing::{steps_per_timer_tick, Timers, DEFAULT_INSTRUCTIONS_PER_SECOND, TIMER_HZ};

/// Instruction word field extraction.
pub mod decoder;
pub use decoder::{Decoder, Instruction};

/// Classification of decoded words into canonical operations.
pub mod encoding;
pub use encoding::{classify, OpcodeGroup, Operation};

/// Operation semantics.
pub mod execute;
pub use execute::{execute_operation, ExecuteOutcome};

/// Load, execution and input errors.
pub mod fault;
pub use fault::{ExecutionFault, KeyError, LoadError};

/// Diagnostic counters and event sink.
pub mod diag;
pub use diag::{DiagnosticEvent, DiagnosticSink, Diagnostics};

/// Host-facing machine API.
pub mod api;
pub use api::{CycleOutcome, Machine, MachineConfig, MachineState, Quirks, RunOutcome};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
