/// An 8-bit countdown that never goes below zero.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    pub fn get(self) -> u8 {
        self.value
    }

    pub fn set(&mut self, value: u8) {
        self.value = value;
    }

    pub fn decay(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// # Timers
/// - `delay` is readable and writable by programs
/// - `sound` is write-only and beeps while non-zero
///
/// Both decay once per call to `decay`, which the scheduler makes at 60Hz of
/// wall-clock time regardless of how fast instructions are executed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: Timer,
    pub sound: Timer,
}

impl Timers {
    pub fn decay(&mut self) {
        self.delay.decay();
        self.sound.decay();
    }
}
