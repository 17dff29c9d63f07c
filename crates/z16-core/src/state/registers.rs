use std::fmt;

use crate::memory::MEMORY_BYTES;

/// Number of architecturally visible general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Reset value of the stack pointer: the last word-aligned address.
pub const STACK_TOP: u16 = (MEMORY_BYTES - 2) as u16;

/// Architectural register identifier with its fixed ABI display name.
///
/// The index-to-name mapping is part of the disassembler's external
/// contract and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Reg {
    /// Temporary, index 0.
    T0 = 0,
    /// Return address, index 1.
    Ra = 1,
    /// Stack pointer, index 2.
    Sp = 2,
    /// Saved, index 3.
    S0 = 3,
    /// Saved, index 4.
    S1 = 4,
    /// Temporary, index 5.
    T1 = 5,
    /// Argument/result, index 6. Also carries environment-call operands.
    A0 = 6,
    /// Argument/result, index 7.
    A1 = 7,
}

impl Reg {
    /// All registers in index order.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::T0,
        Self::Ra,
        Self::Sp,
        Self::S0,
        Self::S1,
        Self::T1,
        Self::A0,
        Self::A1,
    ];

    /// Array index of this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 3-bit register field. Only the low three bits are used,
    /// so every field value maps to a register.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x7 {
            0 => Self::T0,
            1 => Self::Ra,
            2 => Self::Sp,
            3 => Self::S0,
            4 => Self::S1,
            5 => Self::T1,
            6 => Self::A0,
            _ => Self::A1,
        }
    }

    /// Fixed ABI display name.
    #[must_use]
    pub const fn abi_name(self) -> &'static str {
        match self {
            Self::T0 => "t0",
            Self::Ra => "ra",
            Self::Sp => "sp",
            Self::S0 => "s0",
            Self::S1 => "s1",
            Self::T1 => "t1",
            Self::A0 => "a0",
            Self::A1 => "a1",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abi_name())
    }
}

/// The eight 16-bit general-purpose registers.
///
/// No register is hard-wired to zero; every write is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    gpr: [u16; REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// All registers zero except `sp`, which starts at the top of memory.
    #[must_use]
    pub fn new() -> Self {
        let mut regs = Self {
            gpr: [0; REGISTER_COUNT],
        };
        regs.reset();
        regs
    }

    /// Reads a register.
    #[must_use]
    pub const fn read(&self, reg: Reg) -> u16 {
        self.gpr[reg.index()]
    }

    /// Writes a register.
    pub const fn write(&mut self, reg: Reg, value: u16) {
        self.gpr[reg.index()] = value;
    }

    /// Clears every register and restores the stack pointer.
    pub fn reset(&mut self) {
        self.gpr = [0; REGISTER_COUNT];
        self.gpr[Reg::Sp.index()] = STACK_TOP;
    }
}

#[cfg(test)]
mod tests {
    use super::{Reg, RegisterFile, REGISTER_COUNT, STACK_TOP};

    #[test]
    fn abi_name_table_is_fixed() {
        let names: Vec<&str> = Reg::ALL.iter().map(|reg| reg.abi_name()).collect();
        assert_eq!(names, ["t0", "ra", "sp", "s0", "s1", "t1", "a0", "a1"]);
    }

    #[test]
    fn register_field_decode_matches_index() {
        for bits in 0_u8..=7 {
            assert_eq!(Reg::from_bits(bits).index(), usize::from(bits));
        }
        // High bits of a wider field are ignored.
        assert_eq!(Reg::from_bits(0b1111_1010), Reg::Sp);
    }

    #[test]
    fn fresh_file_has_stack_pointer_at_top_of_memory() {
        let regs = RegisterFile::new();
        assert_eq!(STACK_TOP, 0xFFFE);
        assert_eq!(regs.read(Reg::Sp), STACK_TOP);
        for reg in Reg::ALL {
            if reg != Reg::Sp {
                assert_eq!(regs.read(reg), 0);
            }
        }
    }

    #[test]
    fn registers_track_writes_independently() {
        let mut regs = RegisterFile::new();
        for (offset, reg) in (0_u16..).zip(Reg::ALL.iter().copied()) {
            regs.write(reg, 0x2000 + offset);
        }
        for (offset, reg) in (0_u16..).zip(Reg::ALL.iter().copied()) {
            assert_eq!(regs.read(reg), 0x2000 + offset);
        }
        assert_eq!(REGISTER_COUNT, 8);
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut regs = RegisterFile::new();
        for reg in Reg::ALL {
            regs.write(reg, 0xDEAD);
        }
        regs.reset();
        assert_eq!(regs, RegisterFile::new());
    }
}
