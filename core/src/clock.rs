use std::time::Duration;

use log::debug;
use rand::RngCore;

use crate::chip8::{Chip8, Step};
use crate::constants::{period, CLOCK_SPEED, FRAME_RATE, TIMER_SPEED};
use crate::error::Chip8Error;
use crate::frontend::{Display, Input, Sound};

/// Counts whole periods of a fixed rate out of elapsed wall-clock time.
///
/// Leftover time is carried over to the next call so no time is lost however
/// the elapsed time is sliced up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    period: Duration,
    owed: Duration,
}

impl Ticker {
    pub fn from_hz(hz: u32) -> Self {
        Ticker {
            period: period(hz),
            owed: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many periods are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.owed += elapsed;
        let ticks = (self.owed.as_nanos() / self.period.as_nanos()).min(u128::from(u32::MAX));
        let ticks = ticks as u32;
        self.owed -= self.period * ticks;
        ticks
    }

    /// Forget any time that has been owed but not yet ticked.
    pub fn reset(&mut self) {
        self.owed = Duration::ZERO;
    }
}

/// What happened during a call to `Scheduler::advance`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub steps: u32,
    pub timer_ticks: u32,
    pub frames: u32,
    pub awaiting_key: bool,
}

/// # Scheduler
/// Runs instructions, timers and frames off three independent clocks.
///
/// The only thing they share is wall-clock time: timers decay at 60Hz no matter
/// how many instructions run in between.
#[derive(Debug, Clone)]
pub struct Scheduler {
    cpu: Ticker,
    timers: Ticker,
    frames: Ticker,
}

impl Scheduler {
    /// # Arguments
    /// * `clock_speed` instructions per second
    pub fn new(clock_speed: u32) -> Self {
        Scheduler {
            cpu: Ticker::from_hz(clock_speed),
            timers: Ticker::from_hz(TIMER_SPEED),
            frames: Ticker::from_hz(FRAME_RATE),
        }
    }

    /// Run whatever has come due in `elapsed`.
    ///
    /// Stepping stops early while the program waits for a key; the time that
    /// was owed to those steps is dropped rather than replayed in a burst later.
    pub fn advance<R: RngCore>(
        &mut self,
        chip8: &mut Chip8<R>,
        elapsed: Duration,
    ) -> Result<Progress, Chip8Error> {
        let mut progress = Progress::default();

        for _ in 0..self.cpu.advance(elapsed) {
            match chip8.step()? {
                Step::Executed(_) => progress.steps += 1,
                Step::AwaitingKey => {
                    progress.awaiting_key = true;
                    self.cpu.reset();
                    break;
                }
            }
        }

        progress.timer_ticks = self.timers.advance(elapsed);
        for _ in 0..progress.timer_ticks {
            chip8.decay_timers();
        }

        progress.frames = self.frames.advance(elapsed);
        Ok(progress)
    }

    /// One iteration of a driver loop: read input, catch up on `elapsed`,
    /// render if a frame is due and keep the beeper in step with the sound timer.
    pub fn run_frame<R: RngCore>(
        &mut self,
        chip8: &mut Chip8<R>,
        display: &mut dyn Display,
        input: &mut dyn Input,
        sound: &mut dyn Sound,
        elapsed: Duration,
    ) -> Result<Progress, Chip8Error> {
        chip8.update_keys(&input.poll());
        let progress = self.advance(chip8, elapsed)?;
        if progress.frames > 0 {
            display.render(chip8.frame());
        }
        if chip8.sound_active() {
            sound.start();
        } else {
            sound.stop();
        }
        if progress.awaiting_key {
            debug!("stalled on a key wait after {} steps", progress.steps);
        }
        Ok(progress)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(CLOCK_SPEED)
    }
}
