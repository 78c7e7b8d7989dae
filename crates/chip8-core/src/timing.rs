//! Delay/sound timers and the clock-domain helpers hosts schedule against.

/// Rate at which hosts are expected to call `tick_timers()`.
pub const TIMER_HZ: u32 = 60;

/// Default instruction rate suggested to hosts.
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;

/// The two 8-bit countdown timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Timers {
    /// Delay timer, readable by `Fx07`.
    pub delay: u8,
    /// Sound timer; the host sounds a tone while it is nonzero.
    pub sound: u8,
}

impl Timers {
    /// Decrements each nonzero timer by one.
    pub const fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Returns `true` while the sound timer is running.
    #[must_use]
    pub const fn sound_active(self) -> bool {
        self.sound > 0
    }
}

/// Number of `step()` calls that fit in one 60 Hz timer period.
///
/// Never returns zero, so a host loop always makes progress.
#[must_use]
pub const fn steps_per_timer_tick(instructions_per_second: u32) -> u32 {
    let steps = instructions_per_second.div_ceil(TIMER_HZ);
    if steps == 0 {
        1
    } else {
        steps
    }
}
