//! # Compare Instructions
//!
//! Registers and operands are compared as unsigned bytes, the way the hardware subtracts them.

use crate::{
    bus::Bus,
    cpu::{addressing::Operand, cpu::CPU, flags::Status},
    error::StepError,
};

pub(super) fn cmp<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let register = cpu.regs.a_byte();
    compare(cpu, register, operand)
}

pub(super) fn cpx<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let register = cpu.regs.x_byte();
    compare(cpu, register, operand)
}

pub(super) fn cpy<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let register = cpu.regs.y_byte();
    compare(cpu, register, operand)
}

fn compare<B: Bus>(cpu: &mut CPU<B>, register: u8, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    let result = register.wrapping_sub(value);

    cpu.regs.status.set(Status::CARRY, register >= value);
    cpu.regs.status.set_zero_negative(result);
    Ok(())
}
