// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Chirp8

use std::ops::Range;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Chirp8.
#[derive(Debug, Error)]
pub enum Error {
    /// The CPU trapped. Execution cannot continue.
    #[error("fault at {pc:03x}: {fault}")]
    Fault {
        /// Address of the faulting instruction
        pc: u16,
        /// The faulting instruction, if it could be fetched
        word: Option<u16>,
        /// What went wrong
        #[source]
        fault: Fault,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// The program doesn't fit in program memory
    #[error("program is {len} bytes, but only {max} bytes are available")]
    ProgramTooLarge {
        /// Length of the rejected program
        len: usize,
        /// Size of program memory
        max: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// An unrecoverable CPU trap
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum Fault {
    /// Represents an unimplemented operation
    #[error("opcode {word:04x} not recognized")]
    UnimplementedInstruction {
        /// The offending word
        word: u16,
    },
    /// Tried to touch memory that doesn't exist
    #[error("range {range:03x?} is out of bounds")]
    AddressOutOfBounds {
        /// The offending range
        range: Range<usize>,
    },
    /// Called a subroutine with a full stack
    #[error("stack overflow")]
    StackOverflow,
    /// Returned from a subroutine with an empty stack
    #[error("stack underflow")]
    StackUnderflow,
}

impl Error {
    /// Returns true if this error halted the CPU
    pub fn is_fault(&self) -> bool {
        matches!(self, Error::Fault { .. })
    }
}
