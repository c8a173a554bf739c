//! Prints a listing of a CHIP-8 ROM.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chip8_core::constants::LOAD_BASE;
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "chip8-dis")]
#[command(about = "Disassemble a CHIP-8 ROM", long_about = None)]
struct Args {
    /// ROM to disassemble
    input: PathBuf,

    /// Address the ROM is loaded at
    #[arg(short, long, default_value_t = LOAD_BASE, value_parser = parse_address)]
    base: u16,

    /// Print bare statements that can be fed back into chip8-asm
    #[arg(short, long)]
    source: bool,
}

fn parse_address(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix('#'))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let rom = fs::read(&args.input)?;
    info!("disassembling {} bytes at {:#06X}", rom.len(), args.base);
    for line in chip8_asm::listing(&rom, args.base) {
        if args.source {
            println!("{}", line.text);
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}
