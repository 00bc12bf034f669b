//! Register file: A, X, Y, PC, status flags and the call/data stack.

use crate::bus::ROM_BASE;
use crate::byte;
use crate::cpu::flags::Status;

/// Growable LIFO byte stack. Popping an empty stack yields `None`; callers turn that into a
/// `StackUnderflow`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    bytes: Vec<u8>,
}

impl Stack {
    pub fn push(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    /// Byte `depth` entries below the top; `peek_at(0)` is the top.
    pub fn peek_at(&self, depth: usize) -> Option<u8> {
        let index = self.bytes.len().checked_sub(depth + 1)?;
        self.bytes.get(index).copied()
    }

    /// Drop the top `count` bytes.
    pub fn discard(&mut self, count: usize) {
        let len = self.bytes.len().saturating_sub(count);
        self.bytes.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bottom to top.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: i8,
    pub x: i8,
    pub y: i8,
    /// Offset of the next instruction byte from the start of ROM.
    pub pc: u16,
    pub status: Status,
    pub stack: Stack,
}

impl Registers {
    /// CPU address of the next instruction byte.
    pub fn pc_address(&self) -> u32 {
        ROM_BASE as u32 + self.pc as u32
    }

    pub fn a_byte(&self) -> u8 {
        byte::to_unsigned(self.a)
    }

    pub fn x_byte(&self) -> u8 {
        byte::to_unsigned(self.x)
    }

    pub fn y_byte(&self) -> u8 {
        byte::to_unsigned(self.y)
    }
}
