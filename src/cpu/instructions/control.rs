//! # Control Flow Instructions
//!
//! JSR pushes the address of its own last byte, high byte first; RTS pops it and resumes one
//! byte later. BRK pushes the address two bytes past the opcode and P, then vectors through
//! $FFFE/$FFFF; RTI undoes that without the +1.

use crate::{
    bus::Bus,
    byte,
    cpu::{addressing::Operand, cpu::CPU, flags::Status},
    error::StepError,
};

const BRK_VECTOR: u16 = 0xFFFE;

pub(super) fn jmp<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let target = cpu.operand_address(operand);
    cpu.set_pc_address(target as u32)
}

pub(super) fn jsr<B: Bus>(cpu: &mut CPU<B>, operand: Operand) -> Result<(), StepError> {
    let target = cpu.operand_address(operand);
    let return_addr = cpu.regs.pc_address() - 1;

    cpu.set_pc_address(target as u32)?;
    cpu.push_word(return_addr as u16);
    Ok(())
}

/// The return address stays on the stack if it points outside ROM.
pub(super) fn rts<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    let return_addr = cpu.peek_word(0)?;
    cpu.set_pc_address(return_addr as u32 + 1)?;
    cpu.regs.stack.discard(2);
    Ok(())
}

pub(super) fn brk<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    // +1 skips the padding byte after BRK
    let return_addr = cpu.regs.pc_address() + 1;
    let lo = cpu.bus.read(BRK_VECTOR)?;
    let hi = cpu.bus.read(BRK_VECTOR + 1)?;

    cpu.set_pc_address(byte::word(lo, hi) as u32)?;
    cpu.push_word(return_addr as u16);
    cpu.push(cpu.regs.status.pushed_byte());
    cpu.regs
        .status
        .insert(Status::BREAK | Status::INTERRUPT_DISABLE);
    Ok(())
}

pub(super) fn rti<B: Bus>(cpu: &mut CPU<B>) -> Result<(), StepError> {
    let status = cpu.peek(0)?;
    let return_addr = cpu.peek_word(1)?;

    cpu.set_pc_address(return_addr as u32)?;
    cpu.regs.stack.discard(3);
    cpu.regs.status.restore_from(status);
    Ok(())
}
