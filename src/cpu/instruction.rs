// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Decodes Chip-8 words into [Insn]s
//!
//! Each variant's `opcode` pattern names its operand nibbles:
//! `x` and `y` are registers, `n` a 4-bit count, `BB` a byte, and `AAA` an address.

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

/// One decoded Chip-8 instruction, named by its assembler mnemonic
#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Insn {
    // System
    /// `00E0`: blank the screen
    #[opcode = "0x00e0"]
    cls,
    /// `00EE`: pop a call site, and resume after it
    #[opcode = "0x00ee"]
    ret,

    // Flow control
    /// `1AAA`: pc = AAA
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// `2AAA`: push the call site, then pc = AAA
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// `3XBB`: skip if vX == BB
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// `4XBB`: skip if vX != BB
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// `5XY0`: skip if vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// `9XY0`: skip if vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// `BAAA`: pc = AAA + v0
    #[opcode = "0xbAAA"]
    jmpr { A: u16 },

    // Immediates
    /// `6XBB`: vX = BB
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// `7XBB`: vX += BB, leaving vF alone
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// `AAAA`: I = AAA
    #[opcode = "0xaAAA"]
    movI { A: u16 },
    /// `CXBB`: vX = random & BB
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },

    // ALU
    /// `8XY0`: vX = vY
    #[opcode = "0x8xy0"]
    mov { x: usize, y: usize },
    /// `8XY1`: vX |= vY
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// `8XY2`: vX &= vY
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// `8XY3`: vX ^= vY
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// `8XY4`: vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// `8XY5`: vX -= vY, vF = not borrow
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// `8XY6`: vX >>= 1, vF = the bit shifted out
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// `8XY7`: vX = vY - vX, vF = not borrow
    #[opcode = "0x8xy7"]
    bsub { y: usize, x: usize },
    /// `8XYE`: vX <<= 1, vF = the bit shifted out
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },

    // Screen
    /// `DXYN`: XOR an n-row sprite at I onto the screen at (vX, vY), vF = collision
    #[opcode = "0xdxyn"]
    draw { y: usize, x: usize, n: u8 },

    // Keypad
    /// `EX9E`: skip if key vX was pressed, consuming the press
    #[opcode = "0xex9e"]
    sek { x: usize },
    /// `EXA1`: skip unless key vX was pressed, consuming the press
    #[opcode = "0xexa1"]
    snek { x: usize },
    /// `FX0A`: suspend until a key is pressed, then vX = key
    #[opcode = "0xfx0a"]
    waitk { x: usize },

    // Timers
    /// `FX07`: vX = delay timer
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// `FX15`: delay timer = vX
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// `FX18`: sound timer = vX
    #[opcode = "0xfx18"]
    movst { x: usize },

    // Memory
    /// `FX1E`: I += vX, vF = I > 0xfff
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// `FX29`: I = address of the font glyph for the low nibble of vX
    #[opcode = "0xfx29"]
    font { x: usize },
    /// `FX33`: store vX as three decimal digits at I..I+3
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// `FX55`: store v0..=vX at I..=I+X. I is unchanged.
    #[opcode = "0xfx55"]
    dmao { x: usize },
    /// `FX65`: load v0..=vX from I..=I+X. I is unchanged.
    #[opcode = "0xfx65"]
    dmai { x: usize },
}

impl Insn {
    /// Decodes a single big-endian instruction word
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// assert_eq!(Some(Insn::jmp { A: 0x234 }), Insn::from_word(0x1234));
    /// assert_eq!(None, Insn::from_word(0xffff));
    /// ```
    pub fn from_word(word: u16) -> Option<Self> {
        match Self::decode(&word.to_be_bytes()) {
            Ok((2, insn)) => Some(insn),
            _ => None,
        }
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { A }         => write!(f, "jmp    {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     #{B:02x}, v{x:X}"),
            Insn::sneb { B, x }     => write!(f, "sne    #{B:02x}, v{x:X}"),
            Insn::se { y, x }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { B, x }     => write!(f, "mov    #{B:02x}, v{x:X}"),
            Insn::addb { B, x }     => write!(f, "add    #{B:02x}, v{x:X}"),
            Insn::mov { x, y }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { y, x }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { y, x }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { y, x }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sub { y, x }      => write!(f, "sub    v{y:X}, v{x:X}"),
            Insn::shr { y, x }      => write!(f, "shr    v{y:X}, v{x:X}"),
            Insn::bsub { y, x }     => write!(f, "bsub   v{y:X}, v{x:X}"),
            Insn::shl { y, x }      => write!(f, "shl    v{y:X}, v{x:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movI { A }        => write!(f, "mov    ${A:03x}, I"),
            Insn::jmpr { A }        => write!(f, "jmp    ${A:03x}+v0"),
            Insn::rand { B, x }     => write!(f, "rand   #{B:02x}, v{x:X}"),
            Insn::draw { y, x, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x }         => write!(f, "sek    v{x:X}"),
            Insn::snek { x }        => write!(f, "snek   v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::movst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addI { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
        }
    }
}
