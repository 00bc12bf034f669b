//! # Branch Instructions
//!
//! Each branch tests one flag. When taken, the signed offset is added to the address of the
//! following instruction. No flags are affected.

use crate::{
    bus::Bus,
    cpu::{addressing::Operand, cpu::CPU, flags::Status},
    error::StepError,
};

pub(super) fn bcc<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = !cpu.regs.status.contains(Status::CARRY);
    branch(cpu, operand, taken)
}

pub(super) fn bcs<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = cpu.regs.status.contains(Status::CARRY);
    branch(cpu, operand, taken)
}

pub(super) fn beq<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = cpu.regs.status.contains(Status::ZERO);
    branch(cpu, operand, taken)
}

pub(super) fn bne<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = !cpu.regs.status.contains(Status::ZERO);
    branch(cpu, operand, taken)
}

pub(super) fn bmi<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = cpu.regs.status.contains(Status::NEGATIVE);
    branch(cpu, operand, taken)
}

pub(super) fn bpl<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = !cpu.regs.status.contains(Status::NEGATIVE);
    branch(cpu, operand, taken)
}

pub(super) fn bvc<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = !cpu.regs.status.contains(Status::OVERFLOW);
    branch(cpu, operand, taken)
}

pub(super) fn bvs<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let taken = cpu.regs.status.contains(Status::OVERFLOW);
    branch(cpu, operand, taken)
}

fn branch<B: Bus>(cpu: &mut CPU<B>, operand: Operand, condition: bool) -> Result<(), StepError> {
    let Operand::Relative(offset) = operand else {
        unreachable!("branch with {:?} operand", operand);
    };

    if condition {
        let target = cpu.regs.pc_address() as i64 + offset as i64;
        cpu.set_pc_address(target as u32)?;
    }

    Ok(())
}
