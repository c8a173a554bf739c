//! Assembles CHIP-8 source into a ROM.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "chip8-asm")]
#[command(about = "Assemble CHIP-8 source into a ROM", long_about = None)]
struct Args {
    /// Assembly source
    input: PathBuf,

    /// Where to write the ROM
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)?;
    let rom = chip8_asm::assemble(&source)?;
    fs::write(&args.output, &rom)?;
    info!("wrote {} bytes to {}", rom.len(), args.output.display());
    Ok(())
}
