//! # Load and Store Instructions
//!
//! Loads set Z and N from the loaded byte; stores change no flags.

use crate::{
    bus::Bus,
    byte,
    cpu::{addressing::Operand, cpu::CPU},
    error::StepError,
};

pub(super) fn lda<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    cpu.regs.a = byte::to_signed(value);
    cpu.regs.status.set_zero_negative(value);
    Ok(())
}

pub(super) fn ldx<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    cpu.regs.x = byte::to_signed(value);
    cpu.regs.status.set_zero_negative(value);
    Ok(())
}

pub(super) fn ldy<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let value = cpu.operand_value(operand)?;
    cpu.regs.y = byte::to_signed(value);
    cpu.regs.status.set_zero_negative(value);
    Ok(())
}

pub(super) fn sta<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let addr = cpu.operand_address(operand);
    cpu.bus.write(addr, cpu.regs.a_byte())?;
    Ok(())
}

pub(super) fn stx<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let addr = cpu.operand_address(operand);
    cpu.bus.write(addr, cpu.regs.x_byte())?;
    Ok(())
}

pub(super) fn sty<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let addr = cpu.operand_address(operand);
    cpu.bus.write(addr, cpu.regs.y_byte())?;
    Ok(())
}
