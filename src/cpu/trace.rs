//! Instruction trace events.
//!
//! The CPU hands one [`TraceEvent`] per executed instruction to an optional sink. Sinks only
//! observe; nothing they do feeds back into execution.

use std::fmt;

use crate::cpu::flags::Status;
use crate::cpu::opcodes::Mnemonic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Address of the opcode byte.
    pub address: u16,
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    /// Operand in assembler syntax, empty for implied instructions.
    pub operand: String,
    /// Flags after execution, for ALU, compare, shift and branch instructions.
    pub flags: Option<Status>,
    pub a: i8,
    pub x: i8,
    pub y: i8,
    pub stack_depth: usize,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04X}  {:02X}  {} {:<10} A:{:02X} X:{:02X} Y:{:02X} S:{}",
            self.address,
            self.opcode,
            self.mnemonic,
            self.operand,
            self.a as u8,
            self.x as u8,
            self.y as u8,
            self.stack_depth
        )?;
        if let Some(flags) = self.flags {
            write!(f, " P:{}", flags)?;
        }
        Ok(())
    }
}

/// Receiver of trace events.
pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent);
}

/// Forwards events to the `log` facade at trace level.
#[derive(Debug, Default)]
pub struct LogTracer;

impl TraceSink for LogTracer {
    fn record(&mut self, event: &TraceEvent) {
        log::trace!(target: "nes6502::trace", "{}", event);
    }
}
