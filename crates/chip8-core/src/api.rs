//! Host-facing machine API: configuration, owned state and the cycle driver.

use std::fmt;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::encoding::classify;
use crate::execute::{execute_operation, ExecuteOutcome};
use crate::timing::{steps_per_timer_tick, Timers, DEFAULT_INSTRUCTIONS_PER_SECOND};
use crate::{
    CallStack, Decoder, DiagnosticEvent, DiagnosticSink, Diagnostics, DisplayConfig,
    ExecutionFault, Framebuffer, KeyError, Keypad, LoadError, MachineMode, MemoryImage,
    Registers,
};

/// Behaviour switches for instructions whose semantics differ between
/// historical interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Quirks {
    /// `Fx55`/`Fx65` leave `I = I + x + 1` afterwards, as on the COSMAC VIP.
    pub load_store_increments_index: bool,
}

/// Construction-time configuration for a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// Instruction behaviour switches.
    pub quirks: Quirks,
    /// Presentation hints returned verbatim to the host.
    pub display: DisplayConfig,
    /// Target step rate used by [`Machine::run_frame`].
    pub instructions_per_second: u32,
    /// Fixed seed for `Cxkk`; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            quirks: Quirks::default(),
            display: DisplayConfig::default(),
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            rng_seed: None,
        }
    }
}

/// Everything an instruction can observe or mutate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MachineState {
    /// `V0..VF`, `I` and `PC`.
    pub registers: Registers,
    /// Return-address stack.
    pub stack: CallStack,
    /// Delay and sound timers.
    pub timers: Timers,
    /// Host-written key state.
    pub keypad: Keypad,
    /// 4 KiB address space with the font preloaded.
    pub memory: MemoryImage,
    /// Monochrome display buffer.
    pub framebuffer: Framebuffer,
    /// Lifecycle mode.
    pub mode: MachineMode,
}

impl MachineState {
    /// Restores power-on CPU state. Memory and keypad are left alone.
    pub fn reset_cpu(&mut self) {
        self.registers = Registers::default();
        self.stack = CallStack::default();
        self.timers = Timers::default();
        self.framebuffer.clear();
        self.mode = MachineMode::Running;
    }
}

/// Result of one [`Machine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
    /// A canonical operation executed.
    Executed {
        /// Address the instruction was fetched from.
        pc: u16,
        /// Raw instruction word.
        opcode: u16,
    },
    /// `Fx0A` is blocking until a key goes down.
    WaitingForKey {
        /// Address of the waiting instruction.
        pc: u16,
    },
    /// The word matched no canonical operation and was skipped.
    UnknownOpcode {
        /// Address the word was fetched from.
        pc: u16,
        /// Raw instruction word.
        opcode: u16,
    },
    /// Execution fault; the machine is now halted.
    Fault {
        /// Raised fault.
        cause: ExecutionFault,
        /// Address of the faulting instruction.
        pc: u16,
    },
    /// Nothing ran because the machine is paused or halted.
    Idle {
        /// Mode that prevented execution.
        mode: MachineMode,
    },
}

impl CycleOutcome {
    /// Returns `true` when further steps in the same frame would make no
    /// progress.
    #[must_use]
    pub const fn ends_frame(self) -> bool {
        matches!(
            self,
            Self::WaitingForKey { .. } | Self::Fault { .. } | Self::Idle { .. }
        )
    }
}

/// Result of one [`Machine::run_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Steps attempted in the frame.
    pub steps: u32,
    /// Outcome of the final step, `None` when no step was attempted.
    pub last: Option<CycleOutcome>,
}

type BoxedSink = Box<dyn DiagnosticSink + Send>;

/// A CHIP-8 virtual machine.
///
/// Owns memory, registers and framebuffer exclusively. The host drives it by
/// calling [`step`](Self::step) at the instruction rate and
/// [`tick_timers`](Self::tick_timers) at 60 Hz, writing keys in between.
pub struct Machine {
    state: MachineState,
    config: MachineConfig,
    rng: StdRng,
    diagnostics: Diagnostics,
    sink: Option<BoxedSink>,
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("diagnostics", &self.diagnostics)
            .field("sink_installed", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a machine with [`MachineConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Creates a machine with an explicit configuration.
    #[must_use]
    pub fn with_config(config: MachineConfig) -> Self {
        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            state: MachineState::default(),
            config,
            rng,
            diagnostics: Diagnostics::default(),
            sink: None,
        }
    }

    /// Loads a program at `0x200` and resets the CPU to power-on state.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ProgramTooLarge`] when `program` does not fit in
    /// program memory; the machine is left untouched in that case.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_program(program)?;
        self.state.reset_cpu();
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Runs one fetch-decode-execute cycle.
    pub fn step(&mut self) -> CycleOutcome {
        let mode = self.state.mode;
        if !mode.is_running() {
            return CycleOutcome::Idle { mode };
        }

        let pc = self.state.registers.pc();
        let opcode = self.state.memory.read_word(pc);
        self.state.registers.advance_pc();
        self.diagnostics.record_instruction();

        let Some(op) = classify(Decoder::decode(opcode)) else {
            warn!("unknown opcode {opcode:#06X} at {pc:#05X}");
            self.emit(DiagnosticEvent::UnknownOpcode { pc, opcode });
            return CycleOutcome::UnknownOpcode { pc, opcode };
        };

        trace!("{pc:#05X}: {opcode:04X} {}", op.mnemonic());
        match execute_operation(op, &mut self.state, self.config.quirks, &mut self.rng) {
            ExecuteOutcome::Retired => CycleOutcome::Executed { pc, opcode },
            ExecuteOutcome::WaitingForKey => CycleOutcome::WaitingForKey { pc },
            ExecuteOutcome::DeniedWrite { addr } => {
                debug!("discarded store to font byte {addr:#05X} from {pc:#05X}");
                self.emit(DiagnosticEvent::DeniedFontWrite { addr, pc });
                CycleOutcome::Executed { pc, opcode }
            }
            ExecuteOutcome::Fault { cause } => {
                warn!("{cause} at {pc:#05X}, halting");
                self.state.registers.set_pc(pc);
                self.state.mode = MachineMode::Halted;
                self.emit(DiagnosticEvent::Fault { cause, pc });
                CycleOutcome::Fault { cause, pc }
            }
        }
    }

    /// Decrements both timers once. Call at 60 Hz.
    ///
    /// Paused machines keep their timers frozen. Halted machines keep counting
    /// down so the sound flag clears after a fault.
    pub const fn tick_timers(&mut self) {
        if !matches!(self.state.mode, MachineMode::Paused) {
            self.state.timers.tick();
        }
    }

    /// Runs one 60 Hz frame: up to `steps_per_timer_tick` steps followed by a
    /// timer tick. Stops stepping early once a step cannot make progress.
    pub fn run_frame(&mut self) -> RunOutcome {
        let budget = steps_per_timer_tick(self.config.instructions_per_second);
        let mut outcome = RunOutcome {
            steps: 0,
            last: None,
        };
        while outcome.steps < budget {
            let cycle = self.step();
            outcome.steps += 1;
            outcome.last = Some(cycle);
            if cycle.ends_frame() {
                break;
            }
        }
        self.tick_timers();
        outcome
    }

    /// Sets or clears one key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::KeyIndexOutOfRange`] for `key >= 16`.
    pub fn set_key(&mut self, key: u8, down: bool) -> Result<(), KeyError> {
        self.state.keypad.set(key, down)
    }

    /// Replaces the whole keypad; bit `k` is key `k`.
    pub const fn set_keypad_mask(&mut self, mask: u16) {
        self.state.keypad = Keypad::from_mask(mask);
    }

    /// Current keypad state.
    #[must_use]
    pub const fn keypad(&self) -> Keypad {
        self.state.keypad
    }

    /// Read-only view of the display buffer.
    #[must_use]
    pub const fn framebuffer(&self) -> &Framebuffer {
        &self.state.framebuffer
    }

    /// Presentation hints supplied at construction.
    #[must_use]
    pub const fn display_config(&self) -> DisplayConfig {
        self.config.display
    }

    /// Configuration supplied at construction.
    #[must_use]
    pub const fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Current lifecycle mode.
    #[must_use]
    pub const fn mode(&self) -> MachineMode {
        self.state.mode
    }

    /// Suspends execution. Ignored when halted.
    pub fn pause(&mut self) {
        if self.state.mode.is_running() {
            self.set_mode(MachineMode::Paused);
        }
    }

    /// Resumes a paused machine. Ignored when halted.
    pub fn resume(&mut self) {
        if self.state.mode == MachineMode::Paused {
            self.set_mode(MachineMode::Running);
        }
    }

    /// Switches between running and paused.
    pub fn toggle_pause(&mut self) {
        self.set_mode(self.state.mode.toggled());
    }

    /// Stops the machine for good. Only a successful [`load`](Self::load)
    /// brings it back.
    pub fn halt(&mut self) {
        self.set_mode(MachineMode::Halted);
    }

    /// `true` while the sound timer is nonzero.
    #[must_use]
    pub const fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    /// Register file.
    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.state.registers
    }

    /// Return-address stack.
    #[must_use]
    pub const fn stack(&self) -> &CallStack {
        &self.state.stack
    }

    /// Delay and sound timers.
    #[must_use]
    pub const fn timers(&self) -> Timers {
        self.state.timers
    }

    /// Address space.
    #[must_use]
    pub const fn memory(&self) -> &MemoryImage {
        &self.state.memory
    }

    /// Entire machine state.
    #[must_use]
    pub const fn state(&self) -> &MachineState {
        &self.state
    }

    /// Counters accumulated since construction.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Installs a receiver for diagnostic events, replacing any previous one.
    pub fn set_diagnostic_sink<S>(&mut self, sink: S)
    where
        S: DiagnosticSink + Send + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Removes and returns the installed receiver.
    pub fn take_diagnostic_sink(&mut self) -> Option<Box<dyn DiagnosticSink + Send>> {
        self.sink.take()
    }

    fn set_mode(&mut self, mode: MachineMode) {
        if self.state.mode != mode {
            debug!("mode {:?} -> {mode:?}", self.state.mode);
            self.state.mode = mode;
        }
    }

    fn emit(&mut self, event: DiagnosticEvent) {
        self.diagnostics.record(event);
        if let Some(sink) = self.sink.as_mut() {
            sink.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::{CycleOutcome, Machine, MachineConfig, Quirks};
    use crate::{DiagnosticEvent, ExecutionFault, GeneralRegister, LoadError, MachineMode};

    fn seeded() -> Machine {
        Machine::with_config(MachineConfig {
            rng_seed: Some(1),
            ..MachineConfig::default()
        })
    }

    #[test]
    fn step_executes_and_advances() {
        let mut machine = seeded();
        machine.load(&[0x60, 0x2A]).expect("fits");

        assert_eq!(
            machine.step(),
            CycleOutcome::Executed {
                pc: 0x200,
                opcode: 0x602A
            }
        );
        assert_eq!(machine.registers().v(GeneralRegister::V0), 0x2A);
        assert_eq!(machine.registers().pc(), 0x202);
        assert_eq!(machine.diagnostics().instruction_count, 1);
    }

    #[test]
    fn unknown_opcode_is_skipped_and_reported() {
        let mut machine = seeded();
        let (tx, rx) = mpsc::channel();
        machine.set_diagnostic_sink(tx);
        machine.load(&[0x01, 0x23]).expect("fits");

        assert_eq!(
            machine.step(),
            CycleOutcome::UnknownOpcode {
                pc: 0x200,
                opcode: 0x0123
            }
        );
        assert_eq!(machine.registers().pc(), 0x202);
        assert_eq!(machine.mode(), MachineMode::Running);
        assert_eq!(
            rx.try_recv().expect("event sent"),
            DiagnosticEvent::UnknownOpcode {
                pc: 0x200,
                opcode: 0x0123
            }
        );
    }

    #[test]
    fn fault_halts_and_pins_pc() {
        let mut machine = seeded();
        machine.load(&[0x00, 0xEE]).expect("fits");

        assert_eq!(
            machine.step(),
            CycleOutcome::Fault {
                cause: ExecutionFault::StackUnderflow,
                pc: 0x200
            }
        );
        assert_eq!(machine.mode(), MachineMode::Halted);
        assert_eq!(machine.registers().pc(), 0x200);
        assert_eq!(
            machine.step(),
            CycleOutcome::Idle {
                mode: MachineMode::Halted
            }
        );
        assert_eq!(machine.diagnostics().fault_count, 1);
    }

    #[test]
    fn paused_machine_freezes_time() {
        let mut machine = seeded();
        machine.load(&[0x60, 0x05, 0xF0, 0x15]).expect("fits");
        machine.step();
        machine.step();
        machine.pause();

        machine.tick_timers();
        assert_eq!(machine.timers().delay, 5);
        assert!(matches!(machine.step(), CycleOutcome::Idle { .. }));

        machine.toggle_pause();
        machine.tick_timers();
        assert_eq!(machine.timers().delay, 4);
    }

    #[test]
    fn sound_stops_after_a_fault_halt() {
        let mut machine = seeded();
        machine.load(&[0x60, 0x3C, 0xF0, 0x18, 0x00, 0xEE]).expect("fits");
        machine.step();
        machine.step();
        assert!(machine.sound_active());
        assert!(matches!(machine.step(), CycleOutcome::Fault { .. }));
        assert_eq!(machine.mode(), MachineMode::Halted);

        for _ in 0..60 {
            machine.tick_timers();
        }

        assert_eq!(machine.timers().sound, 0);
        assert!(!machine.sound_active());
    }

    #[test]
    fn halt_is_not_undone_by_resume() {
        let mut machine = seeded();
        machine.halt();
        machine.resume();
        machine.toggle_pause();
        assert_eq!(machine.mode(), MachineMode::Halted);

        machine.load(&[0x00, 0xE0]).expect("fits");
        assert_eq!(machine.mode(), MachineMode::Running);
    }

    #[test]
    fn rejected_load_changes_nothing() {
        let mut machine = seeded();
        machine.load(&[0x60, 0x07]).expect("fits");
        machine.step();
        let before = machine.state().clone();

        let err = machine.load(&[0; 3585]).expect_err("too large");
        assert_eq!(
            err,
            LoadError::ProgramTooLarge {
                size: 3585,
                max: 3584
            }
        );
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn run_frame_stops_while_waiting_for_key() {
        let mut machine = seeded();
        machine.load(&[0xF0, 0x0A]).expect("fits");

        let frame = machine.run_frame();
        assert_eq!(frame.steps, 1);
        assert_eq!(frame.last, Some(CycleOutcome::WaitingForKey { pc: 0x200 }));

        machine.set_key(0x7, true).expect("valid key");
        let frame = machine.run_frame();
        assert!(frame.steps >= 1);
        assert_eq!(machine.registers().v(GeneralRegister::V0), 0x7);
    }

    #[test]
    fn quirk_config_reaches_executor() {
        let mut machine = Machine::with_config(MachineConfig {
            quirks: Quirks {
                load_store_increments_index: true,
            },
            rng_seed: Some(1),
            ..MachineConfig::default()
        });
        machine.load(&[0xA3, 0x00, 0xF2, 0x55]).expect("fits");
        machine.step();
        machine.step();
        assert_eq!(machine.registers().i(), 0x303);
    }

    #[test]
    fn seeded_machines_draw_the_same_random_bytes() {
        let program = [0xC0, 0xFF, 0xC1, 0xFF];
        let mut a = seeded();
        let mut b = seeded();
        a.load(&program).expect("fits");
        b.load(&program).expect("fits");
        for _ in 0..2 {
            a.step();
            b.step();
        }
        assert_eq!(a.registers(), b.registers());
    }
}
