//! Core simulation and disassembly engine for the Z16 ISA.
//!
//! The Z16 is a compact 16-bit load/store architecture: eight 16-bit
//! registers, 64 KiB of byte-addressable little-endian memory and
//! fixed-width 16-bit instructions in eight encoding families. This crate
//! carries the fetch-decode-execute engine and the linear disassembler
//! that share one decode path, plus the session orchestration that
//! produces the canonical disassembly/trace/report output.

/// Error taxonomy for memory, decode and image-loading failures.
pub mod fault;
pub use fault::{DecodeError, LoadError, MemoryError};

/// Instruction-word field layout and shared bit helpers.
pub mod isa;
pub use isa::{comparison_branch_target, relative_target, sign_extend, OpcodeFamily};

/// Flat 64 KiB memory model with little-endian word helpers.
pub mod memory;
pub use memory::{Memory, MEMORY_BYTES};

/// Register file, ABI name table and whole-machine state.
pub mod state;
pub use state::{MachineState, Reg, RegisterFile, REGISTER_COUNT, STACK_TOP};

/// Pure instruction decode shared by execution and rendering.
pub mod decoder;
pub use decoder::{decode, Instr};

/// Textual rendering and linear image disassembly.
pub mod disasm;
pub use disasm::{disassemble, disassemble_image, render};

/// Single-step execution and environment calls.
pub mod execute;
pub use execute::{execute, StepOutcome};

/// Run loop, cycle budget and session orchestration.
pub mod runner;
pub use runner::{Simulator, CYCLE_BUDGET};

/// Final register dump and used-memory listing.
pub mod report;
pub use report::{final_registers, used_memory};

/// Line-oriented output sink shared by all emitters.
pub mod output;
pub use output::{StringSink, TraceSink};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
