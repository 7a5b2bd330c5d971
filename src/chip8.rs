// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The execution loop: runs the [CPU], paces its timers, and hands frames to a renderer

use crate::{
    cpu::{flags::Flags, quirks::Quirks, screen::Screen, CPU},
    error::Result,
    keypad::Keypad,
    timer::{Timer, TIMER_HZ},
};
use log::{error, info, trace};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Construction-time settings for a [Chip8]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Seed for `Cxbb`. If [None], the OS picks one.
    pub seed: Option<u64>,
    /// Compatibility behavior
    pub quirks: Quirks,
    /// Enables live disassembly
    pub debug: bool,
    /// Rate at which the delay and sound timers count down
    pub timer_hz: u32,
    /// How long [Chip8::run] sleeps between ticks
    pub pace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            quirks: Quirks::default(),
            debug: false,
            timer_hz: TIMER_HZ,
            pace: Duration::from_millis(1),
        }
    }
}

/// Asks a running [Chip8] to halt. Cloning it yields another handle to the same signal.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Requests a halt. It's observed at the next tick boundary.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release)
    }
    /// Returns true once a halt has been requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Whether a [Chip8] can make progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Executing instructions (or waiting on the keypad)
    #[default]
    Running,
    /// Stopped for good
    Halted,
}

/// A Chip-8 machine, and the loop that drives it
#[derive(Debug)]
pub struct Chip8 {
    /// The CPU, which owns all machine state but the keypad
    pub cpu: CPU,
    timer: Timer,
    stop: StopSignal,
    state: RunState,
    pace: Duration,
}

impl Chip8 {
    /// Constructs a machine with `rom` loaded at 0x200
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// # fn main() -> Result<()> {
    /// let ch8 = Chip8::new(&[0x12, 0x00], Config::default())?;
    /// assert_eq!(RunState::Running, ch8.state());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(rom: &[u8], config: Config) -> Result<Self> {
        let flags = Flags {
            debug: config.debug,
            quirks: config.quirks,
            ..Default::default()
        };
        let mut cpu = CPU::new(Keypad::new(), config.seed, flags);
        cpu.load_program_bytes(rom)?;
        info!(
            "machine ready (seed: {:?}, timers at {} Hz)",
            config.seed, config.timer_hz
        );
        Ok(Chip8 {
            cpu,
            timer: Timer::new(config.timer_hz, Instant::now()),
            stop: StopSignal::default(),
            state: RunState::Running,
            pace: config.pace,
        })
    }

    /// Gets a handle to the keypad, for an input thread to press keys on
    pub fn keypad(&self) -> Keypad {
        self.cpu.keypad().clone()
    }

    /// Gets a handle which halts this machine
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Gets the current [RunState]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs one tick at time `now`:
    /// 1. Executes one instruction (unless waiting on the keypad)
    /// 2. Counts the timers down once per timer period elapsed since the last tick
    /// 3. Renders the screen, if it changed
    ///
    /// A fault or renderer error halts the machine, and is returned.
    /// Once halted, ticking does nothing.
    pub fn tick<R>(&mut self, now: Instant, render: &mut R) -> Result<RunState>
    where
        R: FnMut(&Screen, Option<&str>) -> Result<()>,
    {
        if self.state == RunState::Halted {
            return Ok(RunState::Halted);
        }
        if self.stop.is_stopped() {
            info!("stop requested after {} cycles", self.cpu.cycle());
            return Ok(self.halt());
        }
        if let Err(e) = self.cpu.tick() {
            error!("{e}");
            self.halt();
            return Err(e);
        }
        let ticks = self.timer.poll(now);
        for _ in 0..ticks {
            self.cpu.tick_timers();
        }
        if ticks > 0 {
            trace!(
                "timers: DLY {} SND {} (+{ticks})",
                self.cpu.delay(),
                self.cpu.sound()
            );
        }
        if self.cpu.flags.take_redraw() {
            let debug = self.cpu.flags.debug.then(|| self.cpu.disassemble_next());
            if let Err(e) = render(self.cpu.screen(), debug.as_deref()) {
                error!("renderer failed: {e}");
                self.halt();
                return Err(e);
            }
        }
        Ok(self.state)
    }

    /// Ticks until halted, sleeping between ticks.
    ///
    /// Returns Ok once stopped by the [StopSignal], or the error that halted the machine.
    pub fn run<R>(&mut self, mut render: R) -> Result<()>
    where
        R: FnMut(&Screen, Option<&str>) -> Result<()>,
    {
        while self.tick(Instant::now(), &mut render)? == RunState::Running {
            std::thread::sleep(self.pace);
        }
        Ok(())
    }

    fn halt(&mut self) -> RunState {
        self.state = RunState::Halted;
        self.state
    }

    /// Runs ticks until halted, or until `limit` ticks have passed, without sleeping
    /// or rendering. Returns the [RunState] at the end.
    pub fn run_headless(&mut self, limit: usize) -> Result<RunState> {
        for _ in 0..limit {
            if self.tick(Instant::now(), &mut |_, _| Ok(()))? == RunState::Halted {
                break;
            }
        }
        Ok(self.state)
    }
}
