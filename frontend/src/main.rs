use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vm8_core::Chip8Builder;

use crate::color::{PixelColor, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use crate::window::Window;

mod color;
mod input;
mod window;

/// CHIP-8 virtual machine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    #[clap(index = 1)]
    rom: PathBuf,

    /// Display scaling factor
    #[clap(short, long, default_value_t = 16)]
    scale: u32,

    /// Instructions per second
    #[clap(short, long, default_value_t = 500)]
    ips: u32,

    /// Background color as 0xRRGGBB hex
    #[clap(long)]
    background: Option<PixelColor>,

    /// Foreground color as 0xRRGGBB hex
    #[clap(long)]
    foreground: Option<PixelColor>,

    /// PRNG seed
    #[clap(long)]
    seed: Option<u64>,

    /// Log every executed opcode
    #[clap(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Trace);
    }
    logger.init();

    anyhow::ensure!(
        (1..=100).contains(&args.scale),
        "display scaling factor must be between 1 and 100"
    );
    anyhow::ensure!(
        (1..=1_000_000).contains(&args.ips),
        "instructions per second must be between 1 and 1000000"
    );

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("failed to read ROM file {}", args.rom.display()))?;

    let mut builder = Chip8Builder::new().with_program(rom.clone());

    if let Some(seed) = args.seed {
        builder = builder.with_rng_seed(seed);
    }

    let mut chip = builder.build()?;

    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut window = Window::new(
        &sdl_context,
        args.scale,
        args.background.unwrap_or(DEFAULT_BACKGROUND),
        args.foreground.unwrap_or(DEFAULT_FOREGROUND),
    )?;
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let delta_update = Duration::new(0, 1_000_000_000u32 / args.ips);
    let mut next_update = Instant::now();

    'running: loop {
        // Wait until the next cycle is due
        let now = Instant::now();
        if let Some(delay) = next_update.checked_duration_since(now) {
            std::thread::sleep(delay);
        }
        next_update += delta_update;

        chip.cycle()?;

        if chip.should_draw() {
            chip.video().draw(&mut window);
        }

        if chip.should_beep() {
            log::info!("beep");
        }

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    // Keys outside the CHIP-8 layout drive the emulator
                    if !input::handle_key(chip.keypad_mut(), keycode, true) {
                        match keycode {
                            Keycode::Escape => break 'running,
                            Keycode::P => chip.toggle_pause(),
                            Keycode::I => {
                                chip.reset();
                                chip.load_program(&rom)?;
                            }
                            _ => {}
                        }
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    input::handle_key(chip.keypad_mut(), keycode, false);
                }
                _ => {}
            }
        }
    }

    Ok(())
}
