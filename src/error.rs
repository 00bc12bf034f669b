//! Error types for memory access, instruction execution and cartridge loading.

use std::fmt;
use std::io;

/// A memory access the image cannot satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// Address falls outside both RAM and ROM.
    Unmapped(u16),
    /// Write to the read-only ROM bank.
    ReadOnly(u16),
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryError::Unmapped(addr) => write!(f, "address ${:04X} is not mapped", addr),
            MemoryError::ReadOnly(addr) => write!(f, "write to ROM at ${:04X}", addr),
        }
    }
}

impl std::error::Error for MemoryError {}

/// Failure of a single fetch/decode/execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// Opcode byte has no entry in the opcode table.
    UnknownOpcode { opcode: u8, address: u16 },
    /// Operand or instruction fetch touched memory the image cannot serve.
    Memory(MemoryError),
    /// Pop from an empty stack.
    StackUnderflow { address: u16 },
    /// PC would leave ROM (jump/branch/return target or running off the end); PC can only
    /// address ROM.
    PcOutOfRom(u32),
}

impl StepError {
    /// Fatal errors end the run; the rest are reported and execution carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepError::StackUnderflow { .. })
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StepError::UnknownOpcode { opcode, address } => {
                write!(f, "unknown opcode ${:02X} at ${:04X}", opcode, address)
            }
            StepError::Memory(err) => write!(f, "addressing error: {}", err),
            StepError::StackUnderflow { address } => {
                write!(f, "stack underflow at ${:04X}", address)
            }
            StepError::PcOutOfRom(target) => {
                write!(f, "program counter ${:04X} is outside ROM", target)
            }
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepError::Memory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemoryError> for StepError {
    fn from(err: MemoryError) -> Self {
        StepError::Memory(err)
    }
}

/// Failure to read or parse an iNES image.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    /// First four bytes are not `NES\x1A`.
    BadSignature([u8; 4]),
    /// Header declares zero PRG-ROM banks.
    NoPrgRom,
    /// File is shorter than its header says.
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read ROM: {}", err),
            LoadError::BadSignature(sig) => write!(f, "not an iNES image (signature {:02X?})", sig),
            LoadError::NoPrgRom => write!(f, "header declares no PRG-ROM banks"),
            LoadError::Truncated { expected, actual } => write!(
                f,
                "ROM image truncated: header needs {} bytes, file has {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}
