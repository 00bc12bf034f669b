//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7, PRG-RAM size, region, padding),
//! an optional 512-byte trainer, then PRG ROM, then CHR ROM.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::bus::ROM_SIZE;
use crate::error::LoadError;

pub const HEADER_SIZE: usize = 16;
pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const CHR_BANK_SIZE: usize = 8 * 1024;
const TRAINER_SIZE: usize = 512;
const SIGNATURE: [u8; 4] = *b"NES\x1A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ntsc,
    Pal,
}

/// Parsed 16-byte iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of 16 KiB PRG-ROM banks.
    pub prg_banks: u8,
    /// Number of 8 KiB CHR-ROM (VROM) banks; 0 means the board has CHR RAM.
    pub chr_banks: u8,
    pub flags6: u8,
    pub flags7: u8,
    /// Number of 8 KiB PRG-RAM banks (0 is read as 1 by convention).
    pub ram_banks: u8,
    pub region: Region,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < HEADER_SIZE {
            return Err(LoadError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let signature = [data[0], data[1], data[2], data[3]];
        if signature != SIGNATURE {
            return Err(LoadError::BadSignature(signature));
        }

        Ok(Self {
            prg_banks: data[4],
            chr_banks: data[5],
            flags6: data[6],
            flags7: data[7],
            ram_banks: data[8],
            region: if data[9] & 1 != 0 {
                Region::Pal
            } else {
                Region::Ntsc
            },
        })
    }

    /// Mapper number: low nibble from flags 6, high nibble from flags 7.
    pub fn mapper(&self) -> u8 {
        (self.flags6 >> 4) | (self.flags7 & 0xF0)
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.flags6 & 1 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    pub fn has_trainer(&self) -> bool {
        self.flags6 & 0x04 != 0
    }

    pub fn prg_size(&self) -> usize {
        self.prg_banks as usize * PRG_BANK_SIZE
    }

    pub fn chr_size(&self) -> usize {
        self.chr_banks as usize * CHR_BANK_SIZE
    }
}

/// Cartridge contents: header, PRG ROM and CHR ROM.
pub struct Cartridge {
    pub header: Header,
    pub prg_rom: Vec<u8>,
    /// CHR ROM, or 8 KiB of zeroed CHR RAM when the header declares none.
    pub chr_rom: Vec<u8>,
}

impl Cartridge {
    /// Load cartridge from an iNES file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        let header = Header::parse(data)?;
        if header.prg_banks == 0 {
            return Err(LoadError::NoPrgRom);
        }

        let prg_start = HEADER_SIZE + if header.has_trainer() { TRAINER_SIZE } else { 0 };
        let prg_end = prg_start + header.prg_size();
        let chr_end = prg_end + header.chr_size();
        if data.len() < chr_end {
            return Err(LoadError::Truncated {
                expected: chr_end,
                actual: data.len(),
            });
        }

        let prg_rom = data[prg_start..prg_end].to_vec();
        let chr_rom = if header.chr_banks > 0 {
            data[prg_end..chr_end].to_vec()
        } else {
            vec![0; CHR_BANK_SIZE]
        };

        info!(
            "iNES: {} x 16KB PRG, {} x 8KB CHR, mapper {}, {:?} mirroring, {} x 8KB RAM, {:?}",
            header.prg_banks,
            header.chr_banks,
            header.mapper(),
            header.mirroring(),
            header.ram_banks,
            header.region
        );

        Ok(Self {
            header,
            prg_rom,
            chr_rom,
        })
    }

    /// The 32 KiB image mapped at $8000-$FFFF. A single 16 KiB bank appears in both halves
    /// (NROM-128); larger boards only expose their first 32 KiB.
    pub fn prg_image(&self) -> Vec<u8> {
        if self.prg_rom.len() == PRG_BANK_SIZE {
            return self.prg_rom.repeat(2);
        }
        if self.prg_rom.len() > ROM_SIZE {
            warn!(
                "{} PRG banks present; bank switching is not emulated, mapping the first two",
                self.header.prg_banks
            );
        }
        self.prg_rom[..ROM_SIZE.min(self.prg_rom.len())].to_vec()
    }
}
