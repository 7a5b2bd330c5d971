// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter as if it were a real CPU architecture.
//!
//! The [CPU] owns memory, registers, the stack, timers and the screen.
//! The [Keypad] is the only state shared with the outside world: an input
//! thread presses keys on it while a [Chip8] ticks the CPU, paces the timers,
//! and hands each changed frame to a renderer.
//!
//! ```rust
//! # use chirp8::*;
//! # fn main() -> Result<()> {
//! let mut ch8 = Chip8::new(
//!     &[
//!         0x60, 0x05, // mov #05, v0
//!         0xf0, 0x29, // font v0, I
//!         0xd0, 0x05, // draw #5, v0, v0
//!         0x12, 0x06, // jmp 206
//!     ],
//!     Config { seed: Some(8), ..Default::default() },
//! )?;
//! ch8.run_headless(3)?;
//! assert!(!ch8.cpu.screen().is_blank());
//! # Ok(())
//! # }
//! ```

pub mod chip8;
pub mod cpu;
pub mod error;
pub mod keypad;
pub mod timer;

pub use chip8::{Chip8, Config, RunState, StopSignal};
pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region, Region::*, FONT, MEM_SIZE},
    quirks::Quirks,
    screen::{Screen, HEIGHT, WIDTH},
    Step, CPU, ENTRY_POINT, STACK_DEPTH,
};
pub use error::{Error, Fault, Result};
pub use keypad::{Keypad, KEYS};
pub use timer::{Timer, TIMER_HZ};

/// Common imports for chirp8
pub mod prelude {
    pub use super::{
        Chip8, Config, Dis, Disassembler, Error, Flags, Keypad, Quirks, Result, RunState, Screen,
        StopSignal, CPU,
    };
}
