//! Runs a small built-in Z16 program and prints the full session report.
//!
//! The program stores a greeting in its image, prints it via `ecall 5`,
//! prints a computed integer via `ecall 1`, then terminates via `ecall 3`.

use proptest as _;
use rstest as _;
use thiserror as _;
use z16_core::{Simulator, StringSink};

const fn li(rd_rs1: u16, imm7: u16) -> u16 {
    (imm7 << 9) | (rd_rs1 << 6) | (0b111 << 3) | 0b001
}

const fn add(rd_rs1: u16, rs2: u16) -> u16 {
    (rs2 << 9) | (rd_rs1 << 6)
}

const fn ecall(service: u16) -> u16 {
    (service << 6) | 0b111
}

fn main() {
    let code: [u16; 8] = [
        li(6, 0x10), // a0 = address of the greeting
        ecall(5),    // print string
        li(6, 21),   // a0 = 21
        add(6, 6),   // a0 = 42
        ecall(1),    // print integer
        ecall(3),    // terminate
        0,           // padding up to the greeting at 0x10
        0,
    ];

    let mut image: Vec<u8> = code.iter().flat_map(|word| word.to_le_bytes()).collect();
    image.extend_from_slice(b"hello from the Z16\0");

    let mut sim = Simulator::new();
    sim.load_image(&image).expect("demo image fits in memory");

    let mut sink = StringSink::new();
    sim.run_session(&mut sink).expect("demo program runs cleanly");
    print!("{}", sink.as_str());
}
