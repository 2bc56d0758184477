use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::Chip8;
use chip8_display::Display;

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let size = chip8
        .load_rom(BufReader::new(file))
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {} byte ROM {}", size, args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.hz;
    let mut last_cycle = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(hex) = keymap(key) {
                        chip8.key_press(hex);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(hex) = keymap(key) {
                        chip8.key_release(hex);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        chip8.cycle();

        // Only redraw when the frame buffer has changed
        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("window closed, stopping");
    Ok(())
}
