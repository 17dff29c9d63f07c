//! Architectural machine state owned by one simulation run.

/// Register file types and the fixed ABI name table.
pub mod registers;

pub use registers::{Reg, RegisterFile, REGISTER_COUNT, STACK_TOP};

use crate::fault::LoadError;
use crate::memory::Memory;

/// Complete mutable state of the simulated machine.
///
/// Constructed once per run, mutated by the executor and by store
/// instructions, and read by the disassembler and the reporters. There is
/// no concurrent access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    /// General-purpose register file.
    pub regs: RegisterFile,
    /// Program counter; even in well-formed programs.
    pub pc: u16,
    /// Flat 64 KiB memory holding the program image.
    pub memory: Memory,
    /// Number of image bytes loaded at address 0. Bounds the run loop and
    /// the linear disassembly walk.
    pub program_size: usize,
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineState {
    /// Fresh state: registers at reset, `pc = 0`, zeroed memory, no image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            memory: Memory::new(),
            program_size: 0,
        }
    }

    /// Loads a raw program image at address 0 and records its size.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the image does not fit in memory.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.program_size = self.memory.load_image(image)?;
        Ok(())
    }

    /// Restores the register file and program counter for a fresh run.
    ///
    /// The loaded memory image is preserved, so execution observes exactly
    /// the bytes the disassembly pass walked.
    pub fn reset_for_run(&mut self) {
        self.regs.reset();
        self.pc = 0;
    }

    /// Image slice the linear disassembler walks.
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.memory.bytes()[..self.program_size]
    }
}

#[cfg(test)]
mod tests {
    use super::{MachineState, Reg, STACK_TOP};

    #[test]
    fn fresh_state_matches_initial_contract() {
        let state = MachineState::new();
        assert_eq!(state.pc, 0);
        assert_eq!(state.program_size, 0);
        assert_eq!(state.regs.read(Reg::Sp), STACK_TOP);
        assert!(state.image().is_empty());
    }

    #[test]
    fn load_image_records_program_size() {
        let mut state = MachineState::new();
        state.load_image(&[0x01, 0x02, 0x03, 0x04]).expect("fits");
        assert_eq!(state.program_size, 4);
        assert_eq!(state.image(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn reset_for_run_preserves_the_memory_image() {
        let mut state = MachineState::new();
        state.load_image(&[0xAB, 0xCD]).expect("fits");
        state.pc = 0x0042;
        state.regs.write(Reg::T0, 0x1234);
        state.memory.write_byte(0x8000, 0x55);

        state.reset_for_run();

        assert_eq!(state.pc, 0);
        assert_eq!(state.regs.read(Reg::T0), 0);
        assert_eq!(state.regs.read(Reg::Sp), STACK_TOP);
        assert_eq!(state.memory.read_byte(0x0000), 0xAB);
        assert_eq!(state.memory.read_byte(0x8000), 0x55);
        assert_eq!(state.program_size, 2);
    }
}
