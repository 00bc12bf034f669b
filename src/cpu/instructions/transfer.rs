//! # Register Transfer Instructions
//!
//! The stack has no pointer register here, so TSX pops the top stack byte into X and TXS
//! pushes X.

use crate::{bus::Bus, byte, cpu::cpu::CPU, error::StepError};

pub(super) fn tax<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.x = cpu.regs.a;
    cpu.regs.status.set_zero_negative(cpu.regs.x_byte());
    Ok(())
}

pub(super) fn tay<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.y = cpu.regs.a;
    cpu.regs.status.set_zero_negative(cpu.regs.y_byte());
    Ok(())
}

pub(super) fn txa<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.a = cpu.regs.x;
    cpu.regs.status.set_zero_negative(cpu.regs.a_byte());
    Ok(())
}

pub(super) fn tya<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.a = cpu.regs.y;
    cpu.regs.status.set_zero_negative(cpu.regs.a_byte());
    Ok(())
}

pub(super) fn tsx<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    let value = cpu.pop()?;
    cpu.regs.x = byte::to_signed(value);
    cpu.regs.status.set_zero_negative(value);
    Ok(())
}

pub(super) fn txs<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.push(cpu.regs.x_byte());
    Ok(())
}
