//! Textual instruction rendering and linear disassembly of program images.
//!
//! Rendering goes through the same [`decode`] the executor uses; the only
//! extra input is the instruction address, which anchors PC-relative
//! targets. The linear walker classifies each region of the image as an
//! ASCII string, zero padding, an instruction or a leftover byte, in that
//! fixed order, greedily and without backtracking.

use crate::decoder::{decode, Instr};
use crate::isa::{comparison_branch_target, relative_target};
use crate::output::TraceSink;

/// Minimum accumulated length for `.asciiz` classification.
const MIN_STRING_LEN: usize = 4;
/// Probe limit when scanning for a NUL terminator.
const MAX_STRING_PROBE: usize = 256;
/// Minimum run of contiguous zero words grouped into one `.space`.
const ZERO_RUN_THRESHOLD: usize = 4;

/// Renders the instruction word at `addr` to canonical assembly text.
///
/// Pure: the same `(addr, word)` always yields the same string. Unknown
/// encodings render as their diagnostic text (`Unknown R-type
/// instruction`, ..).
#[must_use]
pub fn disassemble(addr: u16, word: u16) -> String {
    match decode(word) {
        Ok(instr) => render(addr, &instr),
        Err(err) => err.to_string(),
    }
}

/// Renders a decoded instruction; `addr` anchors PC-relative targets.
#[must_use]
pub fn render(addr: u16, instr: &Instr) -> String {
    match *instr {
        Instr::Add { rd_rs1, rs2 } => format!("add {rd_rs1}, {rs2}"),
        Instr::Sub { rd_rs1, rs2 } => format!("sub {rd_rs1}, {rs2}"),
        Instr::Slt { rd_rs1, rs2 } => format!("slt {rd_rs1}, {rs2}"),
        Instr::Sltu { rd_rs1, rs2 } => format!("sltu {rd_rs1}, {rs2}"),
        Instr::Sll { rd_rs1, rs2 } => format!("sll {rd_rs1}, {rs2}"),
        Instr::Srl { rd_rs1, rs2 } => format!("srl {rd_rs1}, {rs2}"),
        Instr::Sra { rd_rs1, rs2 } => format!("sra {rd_rs1}, {rs2}"),
        Instr::Or { rd_rs1, rs2 } => format!("or {rd_rs1}, {rs2}"),
        Instr::And { rd_rs1, rs2 } => format!("and {rd_rs1}, {rs2}"),
        Instr::Xor { rd_rs1, rs2 } => format!("xor {rd_rs1}, {rs2}"),
        Instr::Mv { rd_rs1, rs2 } => format!("mv {rd_rs1}, {rs2}"),
        Instr::Jr { rs1 } => format!("jr {rs1}"),
        // The link register is implied in assembly text; only the jump
        // target register is shown.
        Instr::Jalr { rd: _, rs2 } => format!("jalr {rs2}"),

        Instr::Addi { rd_rs1, imm } => format!("addi {rd_rs1}, {imm}"),
        Instr::Slti { rd_rs1, imm } => format!("slti {rd_rs1}, {imm}"),
        Instr::Sltui { rd_rs1, imm } => format!("sltui {rd_rs1}, {imm}"),
        Instr::Slli { rd_rs1, shamt } => format!("slli {rd_rs1}, {shamt}"),
        Instr::Srli { rd_rs1, shamt } => format!("srli {rd_rs1}, {shamt}"),
        Instr::Srai { rd_rs1, shamt } => format!("srai {rd_rs1}, {shamt}"),
        Instr::Ori { rd_rs1, imm } => format!("ori {rd_rs1}, {imm}"),
        Instr::Andi { rd_rs1, imm } => format!("andi {rd_rs1}, {imm}"),
        Instr::Xori { rd_rs1, imm } => format!("xori {rd_rs1}, {imm}"),
        Instr::Li { rd_rs1, imm } => format!("li {rd_rs1}, {imm}"),

        Instr::Beq { rs1, rs2, offset } => {
            format!(
                "beq {rs1}, {rs2}, 0x{:04x}",
                comparison_branch_target(addr, offset)
            )
        }
        Instr::Bne { rs1, rs2, offset } => {
            format!(
                "bne {rs1}, {rs2}, 0x{:04x}",
                comparison_branch_target(addr, offset)
            )
        }
        Instr::Bz { rs1, offset } => {
            format!("bz {rs1}, 0x{:04x}", relative_target(addr, offset))
        }
        Instr::Bnz { rs1, offset } => {
            format!("bnz {rs1}, 0x{:04x}", relative_target(addr, offset))
        }
        Instr::Blt { rs1, rs2, offset } => {
            format!(
                "blt {rs1}, {rs2}, 0x{:04x}",
                comparison_branch_target(addr, offset)
            )
        }
        Instr::Bge { rs1, rs2, offset } => {
            format!(
                "bge {rs1}, {rs2}, 0x{:04x}",
                comparison_branch_target(addr, offset)
            )
        }
        Instr::Bltu { rs1, rs2, offset } => {
            format!(
                "bltu {rs1}, {rs2}, 0x{:04x}",
                comparison_branch_target(addr, offset)
            )
        }
        Instr::Bgeu { rs1, rs2, offset } => {
            format!(
                "bgeu {rs1}, {rs2}, 0x{:04x}",
                comparison_branch_target(addr, offset)
            )
        }

        Instr::Sb { rs2, rs1, offset } => format!("sb {rs2}, {offset}({rs1})"),
        Instr::Sw { rs2, rs1, offset } => format!("sw {rs2}, {offset}({rs1})"),

        Instr::Lb { rd, base, offset } => format!("lb {rd}, {offset}({base})"),
        Instr::Lw { rd, base, offset } => format!("lw {rd}, {offset}({base})"),
        Instr::Lbu { rd, base, offset } => format!("lbu {rd}, {offset}({base})"),

        Instr::J { offset } => format!("j 0x{:04x}", relative_target(addr, offset)),
        Instr::Jal { rd, offset } => {
            format!("jal {rd}, 0x{:04x}", relative_target(addr, offset))
        }

        Instr::Lui { rd, imm } => format!("lui {rd}, {imm}"),
        Instr::Auipc { rd, imm } => format!("auipc {rd}, {imm}"),

        Instr::Ecall { service } => format!("ecall {service}"),
    }
}

/// Walks a program image from address 0 and writes one line per region.
///
/// Classification order is fixed: NUL-terminated ASCII strings first, then
/// runs of zero words, then instructions, then a leftover trailing byte.
pub fn disassemble_image(image: &[u8], sink: &mut dyn TraceSink) {
    let mut addr = 0_usize;
    while addr < image.len() {
        if let Some(next) = emit_string(image, addr, sink) {
            addr = next;
            continue;
        }
        if let Some(next) = emit_zero_run(image, addr, sink) {
            addr = next;
            continue;
        }
        if addr + 1 < image.len() {
            let word = u16::from_le_bytes([image[addr], image[addr + 1]]);
            match decode(word) {
                Ok(instr) => sink.line(&format!(
                    "0x{addr:04x}: {word:04x}  {}",
                    render(addr as u16, &instr)
                )),
                Err(_) => sink.line(&format!("0x{addr:04x}: .word 0x{word:04x}")),
            }
            addr += 2;
            continue;
        }
        sink.line(&format!("0x{addr:04x}: .byte 0x{:02x}", image[addr]));
        addr += 1;
    }
}

/// Printable ASCII or whitespace, the byte alphabet of `.asciiz` runs.
const fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 0x09..=0x0D | 0x20..=0x7E)
}

fn emit_string(image: &[u8], addr: usize, sink: &mut dyn TraceSink) -> Option<usize> {
    let mut probe = addr;
    while probe < image.len() && probe - addr < MAX_STRING_PROBE {
        let byte = image[probe];
        if byte == 0 {
            if probe - addr >= MIN_STRING_LEN {
                let text = std::str::from_utf8(&image[addr..probe]).ok()?;
                sink.line(&format!("0x{addr:04x}: .asciiz \"{text}\""));
                return Some(probe + 1);
            }
            return None;
        }
        if !is_text_byte(byte) {
            return None;
        }
        probe += 1;
    }
    None
}

fn emit_zero_run(image: &[u8], addr: usize, sink: &mut dyn TraceSink) -> Option<usize> {
    if addr + 1 >= image.len() || image[addr] != 0 || image[addr + 1] != 0 {
        return None;
    }
    let start = addr;
    let mut cursor = addr;
    let mut count = 0_usize;
    while cursor + 1 < image.len() && image[cursor] == 0 && image[cursor + 1] == 0 {
        count += 1;
        cursor += 2;
    }
    if count >= ZERO_RUN_THRESHOLD {
        sink.line(&format!("0x{start:04x}: .space {} bytes", count * 2));
    } else {
        for slot in 0..count {
            sink.line(&format!("0x{:04x}: .word 0x0000", start + slot * 2));
        }
    }
    Some(cursor)
}
