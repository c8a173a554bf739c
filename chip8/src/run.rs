use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use sdl2::event::Event;
use sdl2::EventPump;

use chip8_core::constants::{period, FRAME_RATE, KEY_COUNT};
use chip8_core::frontend::{Display as _, Input, Mute, Sound};
use chip8_core::{Chip8, Chip8Error, KeyPoll, Scheduler, Step};
use rand::RngCore;
use chip8_display::{Beeper, Display};

use crate::keymap::{control, keymap, Control};
use crate::Args;

/// How much faster than the clock speed to run while fast-forwarding
const FAST_FORWARD: u32 = 4;
/// How many instructions to undo per frame while rewinding
const REWIND_STEPS: usize = 8;

/// # Keypad
/// Tracks keypad state from SDL events between polls.
#[derive(Debug, Default)]
struct Keypad {
    held: [bool; KEY_COUNT],
    pressed: Vec<u8>,
}

impl Keypad {
    fn press(&mut self, key: u8) {
        if !self.held[usize::from(key)] {
            self.pressed.push(key);
        }
        self.held[usize::from(key)] = true;
    }

    fn release(&mut self, key: u8) {
        self.held[usize::from(key)] = false;
    }
}

impl Input for Keypad {
    fn poll(&mut self) -> KeyPoll {
        KeyPoll {
            held: self.held,
            pressed: std::mem::take(&mut self.pressed),
        }
    }
}

/// What the person at the keyboard wants the interpreter to do.
#[derive(Debug, Default)]
struct Controls {
    fast_forward: bool,
    rewind: bool,
    paused: bool,
    step: bool,
    quit: bool,
}

impl Controls {
    fn handle(&mut self, control: Control, down: bool) {
        match (control, down) {
            (Control::FastForward, _) => self.fast_forward = down,
            (Control::Rewind, _) => self.rewind = down,
            (Control::Pause, true) => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "paused" } else { "resumed" });
            }
            (Control::Step, true) => self.step = true,
            (Control::Quit, true) => self.quit = true,
            _ => {}
        }
    }
}

fn handle_events(events: &mut EventPump, keypad: &mut Keypad, controls: &mut Controls) {
    for event in events.poll_iter() {
        match event {
            Event::Quit { .. } => controls.quit = true,
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => match (keymap(key), control(key)) {
                (Some(kc), _) => keypad.press(kc),
                (_, Some(c)) => controls.handle(c, true),
                _ => continue,
            },
            Event::KeyUp {
                keycode: Some(key), ..
            } => match (keymap(key), control(key)) {
                (Some(kc), _) => keypad.release(kc),
                (_, Some(c)) => controls.handle(c, false),
                _ => continue,
            },
            _ => continue,
        };
    }
}

/// Step mode: one instruction, then one timer tick, so a program waiting on
/// its delay timer can still be stepped through.
fn single_step<R: RngCore>(chip8: &mut Chip8<R>) -> Result<(), Chip8Error> {
    if let Step::Executed(instruction) = chip8.step()? {
        info!("{}", instruction);
    }
    chip8.decay_timers();
    Ok(())
}

/// Runs `chip8` in an SDL2 window until it faults or the window is closed.
pub fn run(chip8: &mut Chip8, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump()?;
    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute)
    } else {
        match Beeper::new(&sdl) {
            Ok(beeper) => Box::new(beeper),
            Err(e) => {
                warn!("no audio, continuing muted: {}", e);
                Box::new(Mute)
            }
        }
    };

    let mut scheduler = Scheduler::new(args.clock);
    let mut keypad = Keypad::default();
    let mut controls = Controls {
        paused: args.paused,
        ..Controls::default()
    };

    let frame_time: Duration = period(FRAME_RATE);
    let mut last_frame: Instant = Instant::now();
    display.render(chip8.frame());
    info!("running at {}Hz", args.clock);

    while !controls.quit {
        handle_events(&mut events, &mut keypad, &mut controls);

        let now = Instant::now();
        let elapsed = now - last_frame;
        last_frame = now;

        let outcome = if controls.rewind {
            let rewound = (0..REWIND_STEPS).take_while(|_| chip8.rewind()).count();
            debug!("rewound {} steps", rewound);
            display.render(chip8.frame());
            sound.stop();
            Ok(())
        } else if controls.paused {
            sound.stop();
            if std::mem::take(&mut controls.step) {
                chip8.update_keys(&keypad.poll());
                let step = single_step(chip8);
                display.render(chip8.frame());
                step
            } else {
                Ok(())
            }
        } else {
            let elapsed = if controls.fast_forward {
                elapsed * FAST_FORWARD
            } else {
                elapsed
            };
            scheduler
                .run_frame(chip8, &mut display, &mut keypad, sound.as_mut(), elapsed)
                .map(|_| ())
        };

        if let Err(e) = outcome {
            error!("halted: {}", e);
            sound.stop();
            return Err(e.into());
        }

        // Handle timing
        let busy = last_frame.elapsed();
        if frame_time > busy {
            std::thread::sleep(frame_time - busy);
        }
    }
    info!("quit");
    Ok(())
}
