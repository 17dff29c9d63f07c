//! Run loop, cycle budget and whole-session orchestration.

use crate::disasm::{disassemble, disassemble_image};
use crate::execute::{execute, StepOutcome};
use crate::fault::{LoadError, MemoryError};
use crate::output::TraceSink;
use crate::report;
use crate::state::MachineState;

/// Hard per-run instruction budget bounding accidental infinite loops.
pub const CYCLE_BUDGET: usize = 10_000;

/// Owns the machine state and drives the disassemble/execute/report phases
/// against one injected sink.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Simulator {
    state: MachineState,
}

impl Simulator {
    /// Simulator with a fresh machine state and no program loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: MachineState::new(),
        }
    }

    /// Loads a program image at address 0.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the image does not fit in memory.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.state.load_image(image)
    }

    /// Read access to the machine state, for embedders and tests.
    #[must_use]
    pub const fn state(&self) -> &MachineState {
        &self.state
    }

    /// Executes from the current `pc` until the program ends, the program
    /// halts, or the cycle budget runs out.
    ///
    /// Each cycle emits its trace line before the instruction's side
    /// effects are applied. Exhausting the budget emits a notice naming
    /// the current `pc` and returns normally.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError`] on an out-of-bounds word access; the trace
    /// produced so far remains in the sink.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<(), MemoryError> {
        let mut cycles = 0_usize;
        while usize::from(self.state.pc) < self.state.program_size {
            if cycles >= CYCLE_BUDGET {
                sink.line("");
                sink.line(&format!(
                    "Infinite loop detected at PC = 0x{:04x}. Exiting simulation.",
                    self.state.pc
                ));
                return Ok(());
            }
            cycles += 1;

            let pc = self.state.pc;
            let word = self.state.memory.read_word(pc)?;
            sink.line(&format!("0x{pc:04x}: {word:04x}  {}", disassemble(pc, word)));
            match execute(&mut self.state, word, sink)? {
                StepOutcome::Continue => {}
                StepOutcome::Halt => break,
            }
        }
        Ok(())
    }

    /// Produces one full session report: the linear disassembly of the
    /// loaded image, the execution trace from a reset state, the final
    /// register dump and the used-memory listing, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError`] when execution aborts on an out-of-bounds
    /// access; everything emitted up to that point remains in the sink.
    pub fn run_session(&mut self, sink: &mut dyn TraceSink) -> Result<(), MemoryError> {
        sink.line("Full disassembly of binary:");
        disassemble_image(self.state.image(), sink);

        self.state.reset_for_run();
        sink.line("");
        sink.line("Execution simulation trace:");
        self.run(sink)?;

        report::final_registers(&self.state.regs, sink);
        report::used_memory(&self.state.memory, sink);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Simulator, CYCLE_BUDGET};
    use crate::fault::MemoryError;
    use crate::state::Reg;

    fn image(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    #[test]
    fn run_stops_when_pc_leaves_the_image() {
        let mut sim = Simulator::new();
        // add t0, ra twice
        sim.load_image(&image(&[0x0200, 0x0200])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        sim.run(&mut sink).expect("clean run");
        assert_eq!(sim.state().pc, 4);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn trace_line_precedes_instruction_side_effects() {
        let mut sim = Simulator::new();
        // li t0, 16 then halt
        sim.load_image(&image(&[0x2039, 0x00C7])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        sim.run(&mut sink).expect("clean run");
        assert_eq!(
            sink,
            [
                "0x0000: 2039  li t0, 16",
                "0x0002: 00c7  ecall 3",
                "ecall 3",
                "ecall terminate simulation",
            ]
        );
        assert_eq!(sim.state().regs.read(Reg::T0), 16);
    }

    #[test]
    fn halting_call_stops_before_later_instructions() {
        let mut sim = Simulator::new();
        // ecall 3 then an add that must never run
        sim.load_image(&image(&[0x00C7, 0x0200])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        sim.run(&mut sink).expect("clean run");
        let trace_lines = sink.iter().filter(|line| line.starts_with("0x")).count();
        assert_eq!(trace_lines, 1);
    }

    #[test]
    fn budget_overrun_emits_a_notice_and_returns_cleanly() {
        let mut sim = Simulator::new();
        // j . : a one-instruction infinite loop
        sim.load_image(&image(&[0x0005])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        sim.run(&mut sink).expect("non-fatal");
        let trace_lines = sink.iter().filter(|line| line.starts_with("0x")).count();
        assert_eq!(trace_lines, CYCLE_BUDGET);
        assert_eq!(
            sink.last().map(String::as_str),
            Some("Infinite loop detected at PC = 0x0000. Exiting simulation.")
        );
    }

    #[test]
    fn fatal_memory_fault_keeps_the_partial_trace() {
        let mut sim = Simulator::new();
        // li sp, -1 (sp = 0xFFFF) then sw ra, 0(sp)
        sim.load_image(&image(&[0xFEB9, 0x028B])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        let result = sim.run(&mut sink);
        assert_eq!(result, Err(MemoryError::WriteOutOfBounds { addr: 0xFFFF }));
        assert_eq!(sink.len(), 2);
        assert!(sink[1].contains("sw ra, 0(sp)"));
    }

    #[test]
    fn session_sections_appear_in_fixed_order() {
        let mut sim = Simulator::new();
        sim.load_image(&image(&[0x00C7])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        sim.run_session(&mut sink).expect("clean session");

        let position = |needle: &str| {
            sink.iter()
                .position(|line| line == needle)
                .unwrap_or_else(|| panic!("missing section header {needle:?}"))
        };
        let disasm = position("Full disassembly of binary:");
        let trace = position("Execution simulation trace:");
        let regs = position("Final register state:");
        let memory = position("Used Memory Listing (only non-zero cells):");
        assert!(disasm < trace && trace < regs && regs < memory);
    }

    #[test]
    fn session_resets_registers_between_disassembly_and_execution() {
        let mut sim = Simulator::new();
        // addi sp, 1: visible only if sp was freshly reset to 0xfffe
        sim.load_image(&image(&[0x0289])).expect("fits");
        let mut sink: Vec<String> = Vec::new();
        sim.run_session(&mut sink).expect("clean session");
        assert!(sink.iter().any(|line| line == "sp = 0xffff"));
    }
}
