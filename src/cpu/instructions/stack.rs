//! # Stack Instructions

use crate::{bus::Bus, byte, cpu::cpu::CPU, error::StepError};

pub(super) fn pha<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.push(cpu.regs.a_byte());
    Ok(())
}

/// Pushes P with B and bit 5 set.
pub(super) fn php<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.push(cpu.regs.status.pushed_byte());
    Ok(())
}

pub(super) fn pla<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    let value = cpu.pop()?;
    cpu.regs.a = byte::to_signed(value);
    cpu.regs.status.set_zero_negative(value);
    Ok(())
}

/// B and bit 5 of the pulled byte are ignored; B is cleared.
pub(super) fn plp<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    let value = cpu.pop()?;
    cpu.regs.status.restore_from(value);
    Ok(())
}
