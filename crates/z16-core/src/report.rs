//! Final-state reporting: register dump and used-memory listing.

use crate::memory::Memory;
use crate::output::TraceSink;
use crate::state::{Reg, RegisterFile};

/// Writes the final register section: one ABI-named line per register.
pub fn final_registers(regs: &RegisterFile, sink: &mut dyn TraceSink) {
    sink.line("");
    sink.line("Final register state:");
    for reg in Reg::ALL {
        sink.line(&format!("{reg} = 0x{:04x}", regs.read(reg)));
    }
}

/// Lists every non-zero byte in the full address space, or a fixed notice
/// when memory is entirely clear.
pub fn used_memory(memory: &Memory, sink: &mut dyn TraceSink) {
    sink.line("");
    sink.line("Used Memory Listing (only non-zero cells):");
    let mut found_any = false;
    for (addr, byte) in memory.bytes().iter().enumerate() {
        if *byte != 0 {
            sink.line(&format!("Addr 0x{addr:04x} : 0x{byte:02x}"));
            found_any = true;
        }
    }
    if !found_any {
        sink.line("No used memory addresses found.");
    }
}
