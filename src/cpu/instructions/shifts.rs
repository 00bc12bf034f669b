//! # Shift and Rotate Instructions
//!
//! Work on A or a memory cell. C receives the bit shifted out; ROL and ROR shift the previous
//! C into the vacated bit. Z and N always reflect the modified operand.

use crate::{
    bus::Bus,
    cpu::{addressing::Operand, cpu::CPU, flags::Status},
    error::StepError,
};

pub(super) fn asl<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    shift(cpu, operand, |value, _| (value << 1, value & 0x80 != 0))
}

pub(super) fn lsr<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    shift(cpu, operand, |value, _| (value >> 1, value & 0x01 != 0))
}

pub(super) fn rol<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    shift(cpu, operand, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

pub(super) fn ror<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    shift(cpu, operand, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}

/// `op` maps (value, carry in) to (result, carry out).
fn shift<B: Bus>(
    cpu: &mut CPU<B>,
    operand: Operand,
    op: impl FnOnce(u8, bool) -> (u8, bool),
) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    let (result, carry) = op(value, cpu.regs.status.contains(Status::CARRY));

    cpu.write_operand(operand, result)?;

    cpu.regs.status.set(Status::CARRY, carry);
    cpu.regs.status.set_zero_negative(result);
    Ok(())
}
