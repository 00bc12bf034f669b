//! NES cartridge loading.
//!
//! - **cartridge**: parses iNES (.nes) files and builds the 32 KiB PRG image the CPU sees at
//!   $8000-$FFFF. Bank switching is not modeled.

pub mod cartridge;
