use std::path::PathBuf;

use clap::Parser;

use chip8_core::DEFAULT_CLOCK_HZ;

mod keymap;
mod run;

/// Runs a CHIP-8 ROM in an SDL2 window
#[derive(Debug, Parser)]
#[command(name = "chip8", version)]
pub struct Args {
    /// ROM image to load at 0x200
    pub rom: PathBuf,

    /// Instructions executed per second; the timers tick once per instruction
    #[arg(long, default_value_t = DEFAULT_CLOCK_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,

    /// Size of each CHIP-8 pixel in screen pixels
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: u32,

    /// Seed the random number generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run::run(Args::parse())
}
