//! nes6502: the MOS 6502 instruction-execution engine of the NES, written in Rust.
//!
//! Implements the documented 6502 instruction set as described on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/CPU), running a cartridge's PRG ROM against a flat
//! RAM image for a bounded number of instructions.
//!
//! ## Modules
//!
//! - **bus** – memory image: RAM $0000-$4FFF, PRG ROM $8000-$FFFF, typed access errors
//! - **byte** – unsigned/signed byte conversions shared by every handler
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading
//! - **config** – run configuration
//! - **cpu** – registers, flags, opcode table, addressing modes, instruction handlers, trace
//! - **error** – memory, step and load errors
//! - **logger** – coloured console backend for the `log` facade
//! - **ppu** – [pattern table](https://www.nesdev.org/wiki/PPU_pattern_tables) tile decoding

pub mod bus;
pub mod byte;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod logger;
pub mod ppu;
