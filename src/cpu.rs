// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod quirks;
pub mod screen;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region::*},
    quirks::Quirks,
    screen::Screen,
};
use crate::{
    error::{Error, Fault, Result},
    keypad::Keypad,
};
use log::{debug, info};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Number of return addresses the stack can hold
pub const STACK_DEPTH: usize = 16;
/// Address of the first instruction of every program
pub const ENTRY_POINT: Adr = 0x200;
/// Address of the font in memory
pub const FONT_ADDR: Adr = 0x000;

/// What happened during one [CPU::tick]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// An instruction ran
    Executed(Insn),
    /// The CPU is waiting on the keypad, and nothing ran
    Waiting,
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], the redraw flag, etc.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: [Adr; STACK_DEPTH],
    sp: usize,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    keypad: Keypad,
    rng: StdRng,
    // Execution data
    cycle: usize,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU, taking all configurable parameters
    ///
    /// If `seed` is [None], the random number generator is seeded from the OS.
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let cpu = CPU::new(Keypad::new(), Some(0xc0ffee), Flags::default());
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(keypad: Keypad, seed: Option<u64>, flags: Flags) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut cpu = CPU {
            flags,
            mem: Mem::new(),
            screen: Screen::new(),
            stack: [0; STACK_DEPTH],
            sp: 0,
            pc: ENTRY_POINT,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            keypad,
            rng,
            cycle: 0,
            disassembler: Dis::default(),
        };
        cpu.reset();
        cpu
    }

    /// Loads bytes into the CPU's program space
    ///
    /// Returns [Error::ProgramTooLarge] if the program doesn't fit between 0x200 and 0xfff.
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_region(Program, rom)?;
        info!("loaded {} byte program at {:03x}", rom.len(), ENTRY_POINT);
        Ok(self)
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Gets the occupied part of the stack, oldest return address first
    pub fn stack(&self) -> &[Adr] {
        &self.stack[..self.sp]
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the number of instructions the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the framebuffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets a handle to the keypad the CPU reads from
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns true while the CPU is suspended on `Fx0A`
    pub fn is_waiting(&self) -> bool {
        self.flags.keypause
    }

    /// Resets the emulator.
    ///
    /// Zeroes memory, registers, stack, timers and screen, reloads the font,
    /// releases every key, and sets the program counter to 0x200.
    ///
    /// Does not touch [Quirks], debug mode, or the random number generator.
    pub fn reset(&mut self) {
        self.flags = Flags {
            redraw: false,
            keypause: false,
            lastkey: None,
            ..self.flags
        };
        self.mem.reset();
        self.screen.clear();
        // clear the stack
        self.stack = [0; STACK_DEPTH];
        self.sp = 0;
        // Reset the program counter
        self.pc = ENTRY_POINT;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.keypad.clear();
        // Execution data
        self.cycle = 0;
    }

    /// Counts the delay and sound timers down by one, stopping at zero
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let mut cpu = CPU::default();
    /// cpu.tick_timers();
    /// assert_eq!(0, cpu.delay());
    /// ```
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Executes a single instruction.
    ///
    /// While the CPU is waiting on `Fx0A`, nothing executes until the keypad
    /// reports a new press; then `Fx0A` completes.
    ///
    /// Returns [Error::Fault] if the instruction at `pc` is unimplemented,
    /// or if it touched memory or stack that doesn't exist.
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::Fault] if the instruction is not implemented.
    /// ```rust
    /// # use chirp8::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect_err("Should return a fault for 0xffff");
    /// ```
    pub fn tick(&mut self) -> Result<Step> {
        if self.flags.keypause {
            match self.keypad.capture() {
                Some(key) => {
                    debug!("captured key {key:X}");
                    self.flags.lastkey = Some(key);
                    self.flags.keypause = false;
                }
                None => return Ok(Step::Waiting),
            }
        }

        let pc = self.pc;
        // fetch opcode
        let word = self
            .mem
            .read_word(pc as usize)
            .map_err(|fault| Error::Fault {
                pc,
                word: None,
                fault,
            })?;

        // Print opcode disassembly:
        if self.flags.debug {
            debug!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                pc,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        let insn = Insn::from_word(word).ok_or(Error::Fault {
            pc,
            word: Some(word),
            fault: Fault::UnimplementedInstruction { word },
        })?;

        self.pc = pc.wrapping_add(2);
        if let Err(fault) = self.execute(insn) {
            // Leave pc on the faulting instruction
            self.pc = pc;
            return Err(Error::Fault {
                pc,
                word: Some(word),
                fault,
            });
        }
        if self.flags.keypause {
            // Fx0A suspends before it completes, so it hasn't executed yet
            return Ok(Step::Waiting);
        }
        self.cycle += 1;
        Ok(Step::Executed(insn))
    }

    /// Disassembles the instruction at `pc`, for display
    pub fn disassemble_next(&self) -> String {
        match self.mem.read_word(self.pc as usize) {
            Ok(word) => format!("{:03x}: {}", self.pc, Dis::plain().once(word)),
            Err(_) => format!("{:03x}: <out of bounds>", self.pc),
        }
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let cpu = CPU::default();
    /// println!("{}", cpu.dump());
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) -> String {
        format!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.sp,
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        )
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("stack", &self.stack())
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("keypad", &self.keypad)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with its own keypad, a fixed seed, and default flags
    ///
    /// # Examples
    /// ```rust
    /// use chirp8::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU::new(Keypad::new(), Some(0), Flags::default())
    }
}
