//! Memory image and address decoding for the CPU.
//!
//! Maps CPU addresses to the two backing stores the core models: internal/expansion RAM
//! ($0000-$4FFF) and cartridge PRG ROM ($8000-$FFFF). Everything in between is unmapped.

use crate::error::MemoryError;

pub const RAM_SIZE: usize = 0x5000;
pub const ROM_BASE: u16 = 0x8000;
pub const ROM_SIZE: usize = 0x8000;

/// Trait for memory access used by the CPU. Accesses outside the mapped ranges fail instead of
/// returning open-bus garbage.
pub trait Bus {
    fn read(&self, addr: u16) -> Result<u8, MemoryError>;
    fn write(&mut self, addr: u16, data: u8) -> Result<(), MemoryError>;

    /// True when `addr` is backed by RAM or ROM.
    fn is_mapped(&self, addr: u16) -> bool {
        self.read(addr).is_ok()
    }
}

/// RAM + ROM image. Each access is routed to exactly one backing array.
pub struct MemoryImage {
    ram: Vec<u8>,
    rom: Vec<u8>,
}

impl MemoryImage {
    /// Create an image with zeroed RAM and the given ROM. Short ROMs are zero-padded to 32 KiB;
    /// anything past 32 KiB is dropped.
    pub fn new(rom: &[u8]) -> Self {
        let mut image = vec![0; ROM_SIZE];
        let len = rom.len().min(ROM_SIZE);
        image[..len].copy_from_slice(&rom[..len]);

        Self {
            ram: vec![0; RAM_SIZE],
            rom: image,
        }
    }

    /// Non-zero RAM cells in address order.
    pub fn nonzero_ram(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        self.ram
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(|(addr, value)| (addr as u16, *value))
    }
}

impl Bus for MemoryImage {
    fn read(&self, addr: u16) -> Result<u8, MemoryError> {
        match addr {
            0x0000..=0x4FFF => Ok(self.ram[addr as usize]),
            0x8000..=0xFFFF => Ok(self.rom[(addr - ROM_BASE) as usize]),
            _ => Err(MemoryError::Unmapped(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), MemoryError> {
        match addr {
            0x0000..=0x4FFF => {
                self.ram[addr as usize] = data;
                Ok(())
            }
            0x8000..=0xFFFF => Err(MemoryError::ReadOnly(addr)),
            _ => Err(MemoryError::Unmapped(addr)),
        }
    }

    fn is_mapped(&self, addr: u16) -> bool {
        !(0x5000..ROM_BASE).contains(&addr)
    }
}
