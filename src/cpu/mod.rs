//! 6502 CPU emulation for the NES.
//!
//! Table-driven decode, one resolver for all addressing modes, and one handler per mnemonic.
//! Memory is reached through the `Bus` trait.

pub mod addressing;
pub mod cpu;
pub mod flags;
pub mod opcodes;
pub mod registers;
pub mod trace;

mod instructions;

#[cfg(test)]
mod tests;
