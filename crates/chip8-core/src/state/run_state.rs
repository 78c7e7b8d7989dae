/// Execution mode of the machine as seen by the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MachineMode {
    /// `step()` executes instructions and `tick_timers()` counts down.
    #[default]
    Running,
    /// Execution and timers are suspended until the host resumes.
    Paused,
    /// Terminal: no further instruction executes until a new program is loaded.
    /// Timers keep counting down to zero.
    Halted,
}

impl MachineMode {
    /// Returns `true` when `step()` would execute an instruction.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns `true` for the terminal mode.
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Halted)
    }

    /// Mode after a pause/resume toggle. `Halted` stays halted.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
            Self::Halted => Self::Halted,
        }
    }
}
