//! # ALU Instructions
//!
//! ADC and SBC add in nine bits: carry-out is bit 8 of the unsigned sum and overflow is the
//! signed overflow of the 8-bit result. The decimal flag is ignored; the 2A03 has no BCD mode.

use crate::{
    bus::Bus,
    byte,
    cpu::{addressing::Operand, cpu::CPU, flags::Status},
    error::StepError,
};

pub(super) fn adc<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    add_with_carry(cpu, value);
    Ok(())
}

/// A - M - (1 - C) is A + !M + C.
pub(super) fn sbc<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    add_with_carry(cpu, !value);
    Ok(())
}

fn add_with_carry<B: Bus>(cpu: &mut CPU<B>, value: u8) {
    let a = cpu.regs.a_byte();
    let carry_in = cpu.regs.status.contains(Status::CARRY) as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    let status = &mut cpu.regs.status;
    status.set(Status::CARRY, sum > 0xFF);
    // Both inputs share a sign and the result does not
    status.set(Status::OVERFLOW, (!(a ^ value) & (a ^ result)) & 0x80 != 0);
    status.set_zero_negative(result);

    cpu.regs.a = byte::to_signed(result);
}

pub(super) fn and<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    logic(cpu, operand, |a, m| a & m)
}

pub(super) fn ora<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    logic(cpu, operand, |a, m| a | m)
}

pub(super) fn eor<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    logic(cpu, operand, |a, m| a ^ m)
}

fn logic<B: Bus>(
    cpu: &mut CPU<B>,
    operand: Operand,
    op: impl FnOnce(u8, u8) -> u8,
) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    let result = op(cpu.regs.a_byte(), value);

    cpu.regs.status.set_zero_negative(result);
    cpu.regs.a = byte::to_signed(result);
    Ok(())
}

/// Z from A & M, N and V copied from bits 7 and 6 of M. A is not modified.
pub(super) fn bit<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    let a = cpu.regs.a_byte();

    let status = &mut cpu.regs.status;
    status.set(Status::ZERO, a & value == 0);
    status.set(Status::NEGATIVE, value & 0x80 != 0);
    status.set(Status::OVERFLOW, value & 0x40 != 0);
    Ok(())
}
