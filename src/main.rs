//! NES CPU runner entry point.
//!
//! Loads a cartridge and executes its PRG ROM for a fixed instruction budget, then prints the
//! final machine state. With `--tiles` it shows the CHR pattern tables instead.
//! Usage: nes6502 [path/to/game.nes] [--steps N] [--entry $8000] [--trace] [--dump-ram]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use minifb::{Key, Scale, Window, WindowOptions};

use nes6502::{
    bus::MemoryImage,
    byte,
    cartridge::cartridge::Cartridge,
    config::{self, DEFAULT_STEPS, RunConfig},
    cpu::{cpu::CPU, trace::LogTracer},
    logger,
    ppu::pattern::{self, TABLE_DIM},
};

#[derive(Parser, Debug)]
#[command(about = "Run a NES cartridge's PRG ROM on an emulated 6502")]
struct Args {
    /// iNES image to load.
    #[arg(default_value = "super-mario-bros.nes")]
    rom: PathBuf,

    /// Instructions to execute.
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    steps: usize,

    /// ROM address to start at ($8000, 0x8000 or decimal).
    #[arg(long, value_name = "ADDR", value_parser = config::parse_address)]
    entry: Option<u16>,

    /// Log every executed instruction.
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// List non-zero RAM cells after the run.
    #[arg(long, default_value_t = false)]
    dump_ram: bool,

    /// Show the CHR pattern tables in a window instead of running the CPU.
    #[arg(long, default_value_t = false)]
    tiles: bool,

    /// Log level when not tracing.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            steps: self.steps,
            entry: self.entry.unwrap_or(defaults.entry),
            trace: self.trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.trace {
        LevelFilter::Trace
    } else {
        args.log_level
    };
    logger::init(level).context("failed to install logger")?;

    let cart = Cartridge::load(&args.rom)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;

    if args.tiles {
        return show_pattern_tables(&cart);
    }

    let config = args.run_config();
    let mut cpu = CPU::new(MemoryImage::new(&cart.prg_image()));
    cpu.jump_to(config.entry)
        .with_context(|| format!("entry point ${:04X}", config.entry))?;
    if config.trace {
        cpu.set_tracer(Some(Box::new(LogTracer)));
    }

    info!("running {} instructions from ${:04X}", config.steps, config.entry);
    let outcome = cpu.run(config.steps);

    println!("{}", cpu.state());
    if args.dump_ram {
        for (addr, value) in cpu.bus.nonzero_ram() {
            println!("{}: {}", addr, byte::to_signed(value));
        }
    }

    let summary = outcome.context("run aborted")?;
    info!(
        "executed {} of {} steps, {} errors reported",
        summary.executed, summary.steps, summary.reported_errors
    );
    Ok(())
}

fn show_pattern_tables(cart: &Cartridge) -> Result<()> {
    let width = 2 * TABLE_DIM;
    let buffer = pattern::render_chr_bank(&cart.chr_rom);

    let mut window = Window::new(
        "nes6502 - pattern tables",
        width,
        TABLE_DIM,
        WindowOptions {
            scale: Scale::X4,
            ..WindowOptions::default()
        },
    )
    .context("failed to create window")?;
    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&buffer, width, TABLE_DIM)
            .context("failed to update window")?;
    }
    Ok(())
}
