//! Addressing modes and the operand resolver.
//!
//! The resolver runs with PC just past the opcode byte, consumes the operand bytes (low byte
//! first for 16-bit operands) and produces a mode-tagged [`Operand`]. Handlers never look at the
//! addressing mode themselves.

use crate::bus::Bus;
use crate::byte;
use crate::cpu::cpu::CPU;
use crate::error::{MemoryError, StepError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand (CLC, RTS, ...).
    Implicit,
    /// Operates on A (ASL A, ROR A, ...).
    Accumulator,
    /// 8-bit constant, `#$10`.
    Immediate,
    /// `$80`: address in page zero.
    ZeroPage,
    /// `$80,X`: wraps within page zero.
    ZeroPageX,
    /// `$80,Y`: wraps within page zero.
    ZeroPageY,
    /// Signed 8-bit branch offset from the following instruction.
    Relative,
    /// `$1234`.
    Absolute,
    /// `$1234,X`: may cross a page.
    AbsoluteX,
    /// `$1234,Y`: may cross a page.
    AbsoluteY,
    /// `($FFFC)`: JMP only.
    Indirect,
    /// `($40,X)`: pointer at (operand + X) in page zero.
    IndirectX,
    /// `($40),Y`: pointer at operand in page zero, then + Y.
    IndirectY,
}

impl AddressingMode {
    /// Operand bytes after the opcode.
    pub const fn operand_width(self) -> usize {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Assembler syntax for a raw operand. `next` is the address of the following instruction,
    /// used to show branch targets.
    pub fn format_operand(self, raw: u16, next: u32) -> String {
        use AddressingMode::*;
        match self {
            Implicit => String::new(),
            Accumulator => "A".to_string(),
            Immediate => format!("#${:02X}", raw),
            ZeroPage => format!("${:02X}", raw),
            ZeroPageX => format!("${:02X},X", raw),
            ZeroPageY => format!("${:02X},Y", raw),
            Relative => {
                let offset = byte::to_signed(raw as u8) as i64;
                format!("${:04X}", next as i64 + offset)
            }
            Absolute => format!("${:04X}", raw),
            AbsoluteX => format!("${:04X},X", raw),
            AbsoluteY => format!("${:04X},Y", raw),
            Indirect => format!("(${:04X})", raw),
            IndirectX => format!("(${:02X},X)", raw),
            IndirectY => format!("(${:02X}),Y", raw),
        }
    }
}

/// A resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    /// Immediate operand as a signed value.
    Immediate(i8),
    /// Effective address, already checked to be mapped.
    Address(u16),
    /// Branch offset.
    Relative(i8),
}

impl<B: Bus> CPU<B> {
    /// Consume the operand bytes for `mode` and compute its effective value or address.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Result<Operand, StepError> {
        let operand = match mode {
            AddressingMode::Implicit => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(byte::to_signed(self.fetch_byte()?)),
            AddressingMode::ZeroPage => Operand::Address(self.fetch_byte()? as u16),
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte()?;
                Operand::Address(base.wrapping_add(self.regs.x_byte()) as u16)
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte()?;
                Operand::Address(base.wrapping_add(self.regs.y_byte()) as u16)
            }
            AddressingMode::Relative => Operand::Relative(byte::to_signed(self.fetch_byte()?)),
            AddressingMode::Absolute => Operand::Address(self.fetch_word()?),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word()?;
                Operand::Address(base.wrapping_add(self.regs.x_byte() as u16))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word()?;
                Operand::Address(base.wrapping_add(self.regs.y_byte() as u16))
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word()?;
                let lo = self.bus.read(ptr)?;
                // NMOS page-boundary bug: the high byte comes from the start of the same page
                let hi_ptr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let hi = self.bus.read(hi_ptr)?;
                Operand::Address(byte::word(lo, hi))
            }
            AddressingMode::IndirectX => {
                let ptr = self.fetch_byte()?.wrapping_add(self.regs.x_byte());
                Operand::Address(self.zero_page_word(ptr)?)
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte()?;
                let base = self.zero_page_word(zp)?;
                Operand::Address(base.wrapping_add(self.regs.y_byte() as u16))
            }
        };

        if let Operand::Address(addr) = operand {
            if !self.bus.is_mapped(addr) {
                return Err(MemoryError::Unmapped(addr).into());
            }
        }

        Ok(operand)
    }

    /// Little-endian pointer stored in page zero; the high byte wraps to $00 after $FF.
    fn zero_page_word(&self, ptr: u8) -> Result<u16, StepError> {
        let lo = self.bus.read(ptr as u16)?;
        let hi = self.bus.read(ptr.wrapping_add(1) as u16)?;
        Ok(byte::word(lo, hi))
    }

    /// Raw byte the operand denotes: the immediate value, A, or the byte at the address.
    pub(crate) fn operand_value(&self, operand: Operand) -> Result<u8, StepError> {
        match operand {
            Operand::Immediate(value) => Ok(byte::to_unsigned(value)),
            Operand::Accumulator => Ok(self.regs.a_byte()),
            Operand::Address(addr) => Ok(self.bus.read(addr)?),
            Operand::Implied | Operand::Relative(_) => {
                unreachable!("{:?} operand has no value", operand)
            }
        }
    }

    /// Write back a read-modify-write result to A or memory.
    pub(crate) fn write_operand(&mut self, operand: Operand, value: u8) -> Result<(), StepError> {
        match operand {
            Operand::Accumulator => {
                self.regs.a = byte::to_signed(value);
                Ok(())
            }
            Operand::Address(addr) => Ok(self.bus.write(addr, value)?),
            _ => unreachable!("{:?} operand is not writable", operand),
        }
    }

    pub(crate) fn operand_address(&self, operand: Operand) -> u16 {
        match operand {
            Operand::Address(addr) => addr,
            _ => unreachable!("{:?} operand has no address", operand),
        }
    }
}
