//! # Increment and Decrement Instructions
//!
//! All wrap in eight bits (127 + 1 = -128, -128 - 1 = 127) and set Z and N from the result.

use crate::{
    bus::Bus,
    byte,
    cpu::{addressing::Operand, cpu::CPU},
    error::StepError,
};

pub(super) fn inc<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    step_memory(cpu, operand, 1)
}

pub(super) fn dec<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    step_memory(cpu, operand, -1)
}

fn step_memory<B: Bus>(cpu: &mut CPU<B>, operand: Operand, delta: i8) -> Result<(), StepError> {
    let addr = cpu.operand_address(operand);
    let value = cpu.bus.read(addr)?.wrapping_add_signed(delta);
    cpu.bus.write(addr, value)?;
    cpu.regs.status.set_zero_negative(value);
    Ok(())
}

pub(super) fn inx<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.regs.status.set_zero_negative(byte::to_unsigned(cpu.regs.x));
    Ok(())
}

pub(super) fn iny<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.regs.status.set_zero_negative(byte::to_unsigned(cpu.regs.y));
    Ok(())
}

pub(super) fn dex<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.regs.status.set_zero_negative(byte::to_unsigned(cpu.regs.x));
    Ok(())
}

pub(super) fn dey<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.regs.status.set_zero_negative(byte::to_unsigned(cpu.regs.y));
    Ok(())
}
