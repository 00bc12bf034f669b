//! Pattern-table graphics.
//!
//! See [PPU pattern tables](https://www.nesdev.org/wiki/PPU_pattern_tables). Reads raw CHR tile
//! records only; nothing here touches CPU state.

pub mod pattern;
