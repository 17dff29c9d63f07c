use crate::isa::OpcodeFamily;
use thiserror::Error;

/// Errors raised by bounds-checked memory accesses.
///
/// A byte access with a 16-bit address is always in range; only 16-bit word
/// accesses can fail, when `addr + 1` would fall outside the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MemoryError {
    /// A word read would straddle the end of memory.
    #[error("Memory read error: address out of bounds")]
    ReadOutOfBounds {
        /// Address of the offending access.
        addr: u16,
    },
    /// A word write would straddle the end of memory.
    #[error("Memory write error: address out of bounds")]
    WriteOutOfBounds {
        /// Address of the offending access.
        addr: u16,
    },
}

impl MemoryError {
    /// Address of the access that was rejected.
    #[must_use]
    pub const fn addr(self) -> u16 {
        match self {
            Self::ReadOutOfBounds { addr } | Self::WriteOutOfBounds { addr } => addr,
        }
    }
}

/// Raised when a 16-bit word does not decode to any assigned instruction.
///
/// Non-fatal by contract: the executor reports the rendered text on the
/// trace stream and advances one slot; the linear disassembler falls back
/// to a `.word` directive for the same condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Unknown {family}-type instruction")]
pub struct DecodeError {
    /// Encoding family of the rejected word.
    pub family: OpcodeFamily,
}

/// Errors raised while loading a program image into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LoadError {
    /// The image does not fit in the 64 KiB address space.
    #[error("program image of {len} bytes exceeds the 65536-byte address space")]
    ImageTooLarge {
        /// Size of the rejected image in bytes.
        len: usize,
    },
}
