//! Pure instruction decode for the Z16 ISA.
//!
//! [`decode`] maps a 16-bit instruction word to a tagged [`Instr`] that
//! both the executor and the textual renderer consume, so the two paths
//! cannot disagree on field extraction, sign extension or shift-amount
//! masking. Any field combination outside the assigned tables is rejected
//! with a [`DecodeError`] naming the family.

use crate::fault::DecodeError;
use crate::isa::{self, OpcodeFamily};
use crate::state::Reg;

/// A fully decoded instruction, one variant per mnemonic.
///
/// Immediates are stored pre-extended where the encoding calls for sign
/// extension; branch and jump offsets are counted in 16-bit instruction
/// slots. Store/load offsets are the raw 4-bit field (`0..=15`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instr {
    /// `rd_rs1 += rs2`
    Add { rd_rs1: Reg, rs2: Reg },
    /// `rd_rs1 -= rs2`
    Sub { rd_rs1: Reg, rs2: Reg },
    /// Signed less-than compare into `rd_rs1`.
    Slt { rd_rs1: Reg, rs2: Reg },
    /// Unsigned less-than compare into `rd_rs1`.
    Sltu { rd_rs1: Reg, rs2: Reg },
    /// `rd_rs1 <<= rs2 & 0xF`
    Sll { rd_rs1: Reg, rs2: Reg },
    /// Logical right shift by `rs2 & 0xF`.
    Srl { rd_rs1: Reg, rs2: Reg },
    /// Arithmetic right shift by `rs2 & 0xF`.
    Sra { rd_rs1: Reg, rs2: Reg },
    /// `rd_rs1 |= rs2`
    Or { rd_rs1: Reg, rs2: Reg },
    /// `rd_rs1 &= rs2`
    And { rd_rs1: Reg, rs2: Reg },
    /// `rd_rs1 ^= rs2`
    Xor { rd_rs1: Reg, rs2: Reg },
    /// `rd_rs1 = rs2`
    Mv { rd_rs1: Reg, rs2: Reg },
    /// `pc = rs1`, no link.
    Jr { rs1: Reg },
    /// `rd = pc + 2; pc = rs2`
    Jalr { rd: Reg, rs2: Reg },

    /// `rd_rs1 += imm`
    Addi { rd_rs1: Reg, imm: i16 },
    /// Signed compare against the sign-extended immediate.
    Slti { rd_rs1: Reg, imm: i16 },
    /// Unsigned compare; `imm` is the raw 7-bit field.
    Sltui { rd_rs1: Reg, imm: u8 },
    /// Shift left logical by `shamt`.
    Slli { rd_rs1: Reg, shamt: u8 },
    /// Shift right logical by `shamt`.
    Srli { rd_rs1: Reg, shamt: u8 },
    /// Shift right arithmetic by `shamt`.
    Srai { rd_rs1: Reg, shamt: u8 },
    /// `rd_rs1 |= imm`
    Ori { rd_rs1: Reg, imm: i16 },
    /// `rd_rs1 &= imm`
    Andi { rd_rs1: Reg, imm: i16 },
    /// `rd_rs1 ^= imm`
    Xori { rd_rs1: Reg, imm: i16 },
    /// `rd_rs1 = imm`
    Li { rd_rs1: Reg, imm: i16 },

    /// Branch if equal; taken target `pc + offset*2 + 2`.
    Beq { rs1: Reg, rs2: Reg, offset: i16 },
    /// Branch if not equal.
    Bne { rs1: Reg, rs2: Reg, offset: i16 },
    /// Branch if `rs1 == 0`; taken target `pc + offset*2`.
    Bz { rs1: Reg, offset: i16 },
    /// Branch if `rs1 != 0`; taken target `pc + offset*2`.
    Bnz { rs1: Reg, offset: i16 },
    /// Branch if less than, signed.
    Blt { rs1: Reg, rs2: Reg, offset: i16 },
    /// Branch if greater or equal, signed.
    Bge { rs1: Reg, rs2: Reg, offset: i16 },
    /// Branch if less than, unsigned.
    Bltu { rs1: Reg, rs2: Reg, offset: i16 },
    /// Branch if greater or equal, unsigned.
    Bgeu { rs1: Reg, rs2: Reg, offset: i16 },

    /// Store the low byte of `rs2` at `rs1 + offset`.
    Sb { rs2: Reg, rs1: Reg, offset: u16 },
    /// Store the full word of `rs2` at `rs1 + offset`.
    Sw { rs2: Reg, rs1: Reg, offset: u16 },

    /// Load a sign-extended byte from `base + offset`.
    Lb { rd: Reg, base: Reg, offset: u16 },
    /// Load a word from `base + offset`.
    Lw { rd: Reg, base: Reg, offset: u16 },
    /// Load a zero-extended byte from `base + offset`.
    Lbu { rd: Reg, base: Reg, offset: u16 },

    /// `pc += offset*2`
    J { offset: i16 },
    /// `rd = pc + 2; pc += offset*2`
    Jal { rd: Reg, offset: i16 },

    /// `rd = imm << 7`
    Lui { rd: Reg, imm: u16 },
    /// `rd = pc + (imm << 7)`
    Auipc { rd: Reg, imm: u16 },

    /// Environment call with a 10-bit service number.
    Ecall { service: u16 },
}

/// Decodes one instruction word.
///
/// Pure: the result depends only on `word`. PC-relative forms keep their
/// slot offsets; target addresses are computed by the consumer.
///
/// # Errors
///
/// Returns [`DecodeError`] for field combinations outside the assigned
/// encoding tables.
pub fn decode(word: u16) -> Result<Instr, DecodeError> {
    match OpcodeFamily::from_word(word) {
        OpcodeFamily::R => decode_r(word),
        OpcodeFamily::I => decode_i(word),
        OpcodeFamily::B => Ok(decode_b(word)),
        OpcodeFamily::S => decode_s(word),
        OpcodeFamily::L => decode_l(word),
        OpcodeFamily::J => Ok(decode_j(word)),
        OpcodeFamily::U => Ok(decode_u(word)),
        OpcodeFamily::Sys => decode_sys(word),
    }
}

fn decode_r(word: u16) -> Result<Instr, DecodeError> {
    let rs2 = Reg::from_bits(isa::field_rs2(word));
    let rd_rs1 = Reg::from_bits(isa::field_rd(word));
    match (isa::funct4(word), isa::funct3(word)) {
        (0b0000, 0b000) => Ok(Instr::Add { rd_rs1, rs2 }),
        (0b0001, 0b000) => Ok(Instr::Sub { rd_rs1, rs2 }),
        (0b0000, 0b001) => Ok(Instr::Slt { rd_rs1, rs2 }),
        (0b0000, 0b010) => Ok(Instr::Sltu { rd_rs1, rs2 }),
        (0b0010, 0b011) => Ok(Instr::Sll { rd_rs1, rs2 }),
        (0b0100, 0b011) => Ok(Instr::Srl { rd_rs1, rs2 }),
        (0b1000, 0b011) => Ok(Instr::Sra { rd_rs1, rs2 }),
        (0b0001, 0b100) => Ok(Instr::Or { rd_rs1, rs2 }),
        (0b0000, 0b101) => Ok(Instr::And { rd_rs1, rs2 }),
        (0b0000, 0b110) => Ok(Instr::Xor { rd_rs1, rs2 }),
        (0b0000, 0b111) => Ok(Instr::Mv { rd_rs1, rs2 }),
        (0b0100, 0b000) => Ok(Instr::Jr { rs1: rd_rs1 }),
        (0b1000, 0b000) => Ok(Instr::Jalr { rd: rd_rs1, rs2 }),
        _ => Err(DecodeError {
            family: OpcodeFamily::R,
        }),
    }
}

fn decode_i(word: u16) -> Result<Instr, DecodeError> {
    let raw = isa::imm7(word);
    let rd_rs1 = Reg::from_bits(isa::field_rd(word));
    let imm = isa::sign_extend(u16::from(raw), 7);
    match isa::funct3(word) {
        0b000 => Ok(Instr::Addi { rd_rs1, imm }),
        0b001 => Ok(Instr::Slti { rd_rs1, imm }),
        0b010 => Ok(Instr::Sltui { rd_rs1, imm: raw }),
        0b011 => {
            // The top three immediate bits select the shift; the shift
            // amount is the low four bits of the immediate field.
            let shamt = raw & 0xF;
            match isa::shift_funct(word) {
                0b001 => Ok(Instr::Slli { rd_rs1, shamt }),
                0b010 => Ok(Instr::Srli { rd_rs1, shamt }),
                0b100 => Ok(Instr::Srai { rd_rs1, shamt }),
                _ => Err(DecodeError {
                    family: OpcodeFamily::I,
                }),
            }
        }
        0b100 => Ok(Instr::Ori { rd_rs1, imm }),
        0b101 => Ok(Instr::Andi { rd_rs1, imm }),
        0b110 => Ok(Instr::Xori { rd_rs1, imm }),
        0b111 => Ok(Instr::Li { rd_rs1, imm }),
        _ => unreachable!("funct3 is a 3-bit field"),
    }
}

fn decode_b(word: u16) -> Instr {
    let offset = isa::sign_extend(u16::from(isa::offset4(word)), 4);
    let rs2 = Reg::from_bits(isa::field_rs2(word));
    let rs1 = Reg::from_bits(isa::field_rd(word));
    match isa::funct3(word) {
        0b000 => Instr::Beq { rs1, rs2, offset },
        0b001 => Instr::Bne { rs1, rs2, offset },
        0b010 => Instr::Bz { rs1, offset },
        0b011 => Instr::Bnz { rs1, offset },
        0b100 => Instr::Blt { rs1, rs2, offset },
        0b101 => Instr::Bge { rs1, rs2, offset },
        0b110 => Instr::Bltu { rs1, rs2, offset },
        0b111 => Instr::Bgeu { rs1, rs2, offset },
        _ => unreachable!("funct3 is a 3-bit field"),
    }
}

fn decode_s(word: u16) -> Result<Instr, DecodeError> {
    let offset = u16::from(isa::offset4(word));
    // Base register at [8:6], value register at [11:9].
    let rs1 = Reg::from_bits(isa::field_rd(word));
    let rs2 = Reg::from_bits(isa::field_rs2(word));
    match isa::funct3(word) {
        0b000 => Ok(Instr::Sb { rs2, rs1, offset }),
        0b001 => Ok(Instr::Sw { rs2, rs1, offset }),
        _ => Err(DecodeError {
            family: OpcodeFamily::S,
        }),
    }
}

fn decode_l(word: u16) -> Result<Instr, DecodeError> {
    let offset = u16::from(isa::offset4(word));
    let base = Reg::from_bits(isa::field_rs2(word));
    let rd = Reg::from_bits(isa::field_rd(word));
    match isa::funct3(word) {
        0b000 => Ok(Instr::Lb { rd, base, offset }),
        0b001 => Ok(Instr::Lw { rd, base, offset }),
        0b100 => Ok(Instr::Lbu { rd, base, offset }),
        _ => Err(DecodeError {
            family: OpcodeFamily::L,
        }),
    }
}

fn decode_j(word: u16) -> Instr {
    let imm = (u16::from(isa::imm6(word)) << 3) | u16::from(isa::imm3(word));
    let offset = isa::sign_extend(imm, 9);
    if isa::form_flag(word) {
        Instr::Jal {
            rd: Reg::from_bits(isa::field_rd(word)),
            offset,
        }
    } else {
        Instr::J { offset }
    }
}

fn decode_u(word: u16) -> Instr {
    let imm = (u16::from(isa::imm6(word)) << 3) | u16::from(isa::imm3(word));
    let rd = Reg::from_bits(isa::field_rd(word));
    if isa::form_flag(word) {
        Instr::Auipc { rd, imm }
    } else {
        Instr::Lui { rd, imm }
    }
}

fn decode_sys(word: u16) -> Result<Instr, DecodeError> {
    if isa::funct3(word) == 0b000 {
        Ok(Instr::Ecall {
            service: isa::service(word),
        })
    } else {
        Err(DecodeError {
            family: OpcodeFamily::Sys,
        })
    }
}
