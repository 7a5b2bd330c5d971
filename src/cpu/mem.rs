// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Contains some handy utils for reading and writing

use crate::error::{Error, Fault, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Total size of addressable memory, in bytes
pub const MEM_SIZE: usize = 0x1000;

/// The built-in hexadecimal font. Glyph `N` lives at address `N * 5`.
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Interpreter-owned memory, including the charset
    Reserved,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the address range covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// assert_eq!(0x200..0x1000, Program.range());
    /// ```
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => 0x000..FONT.len(),
            Region::Reserved => 0x000..0x200,
            Region::Program => 0x200..MEM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Reserved => "Reserved",
                Region::Program => "Program",
            }
        )
    }
}

/// Stores memory as a series of named regions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mem {
    memory: Box<[u8; MEM_SIZE]>,
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Mem {
    /// Constructs zeroed memory with the font loaded into the [Region::Charset]
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let mem = Mem::new();
    /// assert_eq!(&FONT[..], mem.get_region(Charset));
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: Box::new([0; MEM_SIZE]),
        };
        mem.load_font();
        mem
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements. It never does.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Zeroes all of memory, then reloads the font
    pub fn reset(&mut self) -> &mut Self {
        self.memory.fill(0);
        self.load_font()
    }

    fn load_font(&mut self) -> &mut Self {
        self.memory[Region::Charset.range()].copy_from_slice(&FONT);
        self
    }

    /// Loads data into the start of a named [Region], zeroing the rest of it.
    ///
    /// Returns [Error::ProgramTooLarge] if the data doesn't fit.
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, b"Hello, world!")?;
    /// assert_eq!(b"Hello, world!", &mem.get_region(Program)[..13]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = &mut self.memory[name.range()];
        if data.len() > region.len() {
            return Err(Error::ProgramTooLarge {
                len: data.len(),
                max: region.len(),
            });
        }
        region.fill(0);
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Gets a slice of a named [Region] of memory
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a slice of memory, or faults if any of it is out of bounds
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// let mem = Mem::new();
    /// assert_eq!(&FONT[0..5], mem.grab(0..5).unwrap());
    /// assert!(mem.grab(0xffe..0x1002).is_err());
    /// ```
    #[inline(always)]
    pub fn grab(&self, range: Range<usize>) -> std::result::Result<&[u8], Fault> {
        self.memory
            .get(range.clone())
            .ok_or(Fault::AddressOutOfBounds { range })
    }

    /// Gets a mutable slice of memory, or faults if any of it is out of bounds
    #[inline(always)]
    pub fn grab_mut(&mut self, range: Range<usize>) -> std::result::Result<&mut [u8], Fault> {
        self.memory
            .get_mut(range.clone())
            .ok_or(Fault::AddressOutOfBounds { range })
    }

    /// Reads a big-endian word at `addr`
    #[inline(always)]
    pub fn read_word(&self, addr: usize) -> std::result::Result<u16, Fault> {
        match *self.grab(addr..addr + 2)? {
            [hi, lo] => Ok(u16::from_be_bytes([hi, lo])),
            _ => Err(Fault::AddressOutOfBounds {
                range: addr..addr + 2,
            }),
        }
    }
}
