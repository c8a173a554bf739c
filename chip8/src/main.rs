use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use chip8_core::constants::{MAX_CLOCK_SPEED, MAX_SAVED_STATES};
use chip8_core::{Chip8, CLOCK_SPEED};

mod keymap;
mod run;

/// A Chip-8 interpreter
#[derive(Parser, Debug)]
#[command(name = "chip8")]
#[command(about = "Run a Chip-8 ROM", long_about = None)]
pub struct Args {
    /// Path to the ROM
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(
        short,
        long,
        default_value_t = CLOCK_SPEED,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CLOCK_SPEED))
    )]
    clock: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// How many instructions can be rewound
    #[arg(long, default_value_t = MAX_SAVED_STATES)]
    history: usize,

    /// Start paused; press N to step and P to resume
    #[arg(short, long)]
    paused: bool,

    /// Don't open an audio device
    #[arg(short, long)]
    mute: bool,

    /// Print the registers as JSON on exit
    #[arg(short, long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let rom = fs::read(&args.rom)?;
    let mut chip8 = Chip8::new().with_history(args.history);
    chip8.load(&rom)?;
    info!("loaded {} bytes from {}", rom.len(), args.rom.display());

    let result = run::run(&mut chip8, &args);

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&chip8.registers())?);
    }
    result
}
