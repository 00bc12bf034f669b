//! # Status Flag Instructions

use crate::{
    bus::Bus,
    cpu::{cpu::CPU, flags::Status},
    error::StepError,
};

pub(super) fn clc<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.remove(Status::CARRY);
    Ok(())
}

pub(super) fn sec<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.insert(Status::CARRY);
    Ok(())
}

pub(super) fn cli<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.remove(Status::INTERRUPT_DISABLE);
    Ok(())
}

pub(super) fn sei<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.insert(Status::INTERRUPT_DISABLE);
    Ok(())
}

pub(super) fn cld<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.remove(Status::DECIMAL);
    Ok(())
}

pub(super) fn sed<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.insert(Status::DECIMAL);
    Ok(())
}

pub(super) fn clv<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    cpu.regs.status.remove(Status::OVERFLOW);
    Ok(())
}
