use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use chip8_core::frontend::Sound;

const PITCH: f32 = 440.0;
const VOLUME: f32 = 0.1;

pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a constant tone for as long as the sound timer is running.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    is_beeping: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: PITCH / spec.freq as f32,
            phase: 0.0,
        })?;
        Ok(Beeper {
            device,
            is_beeping: false,
        })
    }
}

impl Sound for Beeper {
    fn start(&mut self) {
        if !self.is_beeping {
            self.device.resume();
            self.is_beeping = true;
        }
    }

    fn stop(&mut self) {
        if self.is_beeping {
            self.device.pause();
            self.is_beeping = false;
        }
    }
}
