// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Chirp8: A chip-8 interpreter in Rust, in your terminal

mod ui;

use chirp8::{error::Result, *};
use gumdrop::*;
use log::{info, warn};
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    thread::JoinHandle,
    time::{Duration, Instant},
};
use ui::*;

pub fn main() -> Result<()> {
    env_logger::init();
    let options = Arguments::parse_args_default_or_exit();
    let rom = std::fs::read(&options.file)?;
    let raw_mode = RawMode::enable()?;
    let mut state = State::new(&rom, options)?;
    let result = state.run();
    state.shutdown();
    drop(raw_mode);
    if let Err(e) = result {
        eprintln!("{}", e.bold().red());
        if e.is_fault() {
            eprintln!("{}", state.ch8.cpu.dump());
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chirp8.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,
    #[options(help = "Seed the random number generator.", meta = "SEED")]
    pub seed: Option<u64>,
    #[options(help = "Set the timer rate.", default = "60", meta = "HZ")]
    pub timer_hz: u32,
    #[options(
        help = "Set the delay between instructions, in microseconds.",
        default = "1000",
        meta = "US"
    )]
    pub pace: u64,
    #[options(short = "r", help = "Store the raw bit shifted out by 8xyE in vF.")]
    pub raw_shift_flag: bool,
    #[options(short = "n", help = "Stop after N ticks. 0 runs until stopped.", meta = "N")]
    pub ticks: usize,
}

impl Arguments {
    fn config(&self) -> Config {
        Config {
            seed: self.seed,
            quirks: Quirks::from(self.raw_shift_flag),
            debug: self.debug,
            timer_hz: self.timer_hz,
            pace: Duration::from_micros(self.pace),
        }
    }
}

#[derive(Debug)]
struct State {
    pub ch8: Chip8,
    pub ui: UI<std::io::Stdout>,
    pub input: Option<JoinHandle<()>>,
    pub ticks: usize,
    pub pace: Duration,
}

impl State {
    fn new(rom: &[u8], options: Arguments) -> Result<Self> {
        let config = options.config();
        let ch8 = Chip8::new(rom, config.clone())?;
        let input = spawn_input(ch8.keypad(), ch8.stop_signal());
        info!("running {}", options.file.display());
        Ok(State {
            ch8,
            ui: UI::new(std::io::stdout()),
            input: Some(input),
            ticks: options.ticks,
            pace: config.pace,
        })
    }

    /// Ticks until the machine halts, or the tick limit runs out
    fn run(&mut self) -> Result<()> {
        let mut ticks = 0;
        let ui = &mut self.ui;
        let mut render = |screen: &Screen, debug: Option<&str>| ui.render(screen, debug);
        while self.ch8.tick(Instant::now(), &mut render)? == RunState::Running {
            ticks += 1;
            if ticks == self.ticks {
                info!("stopping after {ticks} ticks");
                break;
            }
            std::thread::sleep(self.pace);
        }
        Ok(())
    }

    /// Stops the machine, and waits for the input thread to let go of the terminal
    fn shutdown(&mut self) {
        self.ch8.stop_signal().stop();
        if let Some(input) = self.input.take() {
            if input.join().is_err() {
                warn!("input thread panicked");
            }
        }
    }
}
