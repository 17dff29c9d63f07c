#![no_main]

use libfuzzer_sys::fuzz_target;
use z16_core::{decode, disassemble, MachineState, Simulator, StringSink};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let word = u16::from_le_bytes([data[0], data[1]]);
    let _ = decode(word);
    let _ = disassemble(0, word);
    let _ = disassemble(u16::MAX, word);

    let mut state = MachineState::new();
    let mut sink = StringSink::new();
    let _ = z16_core::execute(&mut state, word, &mut sink);

    // Treat the whole input as an image; the cycle budget bounds the run.
    let mut sim = Simulator::new();
    if sim.load_image(data).is_err() {
        return;
    }
    let mut sink = StringSink::new();
    let _ = sim.run_session(&mut sink);
});
