//! Canonical decode/render table, one case per mnemonic.
//!
//! Every word below was assembled by hand from the family field layouts;
//! rendering is anchored at address 0.

use proptest as _;
use rstest::rstest;
use thiserror as _;

use z16_core::{decode, disassemble};

#[rstest]
#[case(0x0200, "add t0, ra")]
#[case(0x1200, "sub t0, ra")]
#[case(0x0208, "slt t0, ra")]
#[case(0x0210, "sltu t0, ra")]
#[case(0x2218, "sll t0, ra")]
#[case(0x4218, "srl t0, ra")]
#[case(0x8218, "sra t0, ra")]
#[case(0x1220, "or t0, ra")]
#[case(0x0228, "and t0, ra")]
#[case(0x0230, "xor t0, ra")]
#[case(0x0238, "mv t0, ra")]
#[case(0x4000, "jr t0")]
#[case(0x8200, "jalr ra")]
#[case(0x0A01, "addi t0, 5")]
#[case(0xFE09, "slti t0, -1")]
#[case(0x0A11, "sltui t0, 5")]
#[case(0x2419, "slli t0, 2")]
#[case(0x4419, "srli t0, 2")]
#[case(0x8419, "srai t0, 2")]
#[case(0x0A21, "ori t0, 5")]
#[case(0x0A29, "andi t0, 5")]
#[case(0x0A31, "xori t0, 5")]
#[case(0x0A39, "li t0, 5")]
#[case(0x1202, "beq t0, ra, 0x0004")]
#[case(0x120A, "bne t0, ra, 0x0004")]
#[case(0x1012, "bz t0, 0x0002")]
#[case(0x101A, "bnz t0, 0x0002")]
#[case(0x1222, "blt t0, ra, 0x0004")]
#[case(0x122A, "bge t0, ra, 0x0004")]
#[case(0x1232, "bltu t0, ra, 0x0004")]
#[case(0x123A, "bgeu t0, ra, 0x0004")]
#[case(0x3283, "sb ra, 3(sp)")]
#[case(0x328B, "sw ra, 3(sp)")]
#[case(0x3204, "lb t0, 3(ra)")]
#[case(0x320C, "lw t0, 3(ra)")]
#[case(0x3224, "lbu t0, 3(ra)")]
#[case(0x0015, "j 0x0004")]
#[case(0x8055, "jal ra, 0x0004")]
#[case(0x020E, "lui t0, 9")]
#[case(0x820E, "auipc t0, 9")]
#[case(0x0047, "ecall 1")]
fn renders_canonical_text(#[case] word: u16, #[case] expected: &str) {
    assert_eq!(disassemble(0x0000, word), expected);
    assert!(decode(word).is_ok());
}

#[rstest]
#[case(0xF000, "Unknown R-type instruction")]
#[case(0x3008, "Unknown R-type instruction")]
#[case(0x0019, "Unknown I-type instruction")]
#[case(0x6019, "Unknown I-type instruction")]
#[case(0x0013, "Unknown S-type instruction")]
#[case(0x001C, "Unknown L-type instruction")]
#[case(0x000F, "Unknown SYS-type instruction")]
fn rejected_words_render_their_family_diagnostic(#[case] word: u16, #[case] expected: &str) {
    assert!(decode(word).is_err());
    assert_eq!(disassemble(0x0000, word), expected);
}
