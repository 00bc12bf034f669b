//! Property-based tests for effective-address calculation.
//!
//! Zero-page indexing and zero-page pointers wrap within page zero; absolute indexing
//! carries into the high byte.

use nes6502::bus::{Bus, MemoryImage, ROM_SIZE};
use nes6502::cpu::cpu::CPU;
use proptest::prelude::*;

fn setup_cpu(program: &[u8]) -> CPU<MemoryImage> {
    let mut rom = vec![0xEA; ROM_SIZE];
    rom[..program.len()].copy_from_slice(program);
    CPU::new(MemoryImage::new(&rom))
}

proptest! {
    /// Property: Zero page,X addressing stays in 0x00-0xFF
    #[test]
    fn prop_zero_page_x_wraps_in_zero_page(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu(&[0xB5, base]); // LDA $base,X
        cpu.regs.x = x as i8;
        cpu.bus.write(base.wrapping_add(x) as u16, value).unwrap();

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.a_byte(), value);
    }

    /// Property: Zero page,Y addressing (LDX) stays in 0x00-0xFF
    #[test]
    fn prop_zero_page_y_wraps_in_zero_page(base in any::<u8>(), y in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu(&[0xB6, base]); // LDX $base,Y
        cpu.regs.y = y as i8;
        cpu.bus.write(base.wrapping_add(y) as u16, value).unwrap();

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.x_byte(), value);
    }

    /// Property: Absolute,Y adds Y to the full 16-bit base
    #[test]
    fn prop_absolute_y_crosses_pages(base in 0u16..0x4F00, y in any::<u8>(), value in any::<u8>()) {
        let [lo, hi] = base.to_le_bytes();
        let mut cpu = setup_cpu(&[0xB9, lo, hi]); // LDA $base,Y
        cpu.regs.y = y as i8;
        cpu.bus.write(base + y as u16, value).unwrap();

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.a_byte(), value);
    }

    /// Property: (zp,X) reads its pointer from zp+X and zp+X+1, both wrapped
    #[test]
    fn prop_indexed_indirect_pointer_wraps(
        zp in any::<u8>(),
        x in any::<u8>(),
        target in 0x0200u16..0x4000,
        value in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(&[0xA1, zp]); // LDA ($zp,X)
        cpu.regs.x = x as i8;
        let pointer = zp.wrapping_add(x);
        let [lo, hi] = target.to_le_bytes();
        cpu.bus.write(pointer as u16, lo).unwrap();
        cpu.bus.write(pointer.wrapping_add(1) as u16, hi).unwrap();
        cpu.bus.write(target, value).unwrap();

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.a_byte(), value);
    }

    /// Property: (zp),Y adds Y after reading the wrapped pointer
    #[test]
    fn prop_indirect_indexed_adds_y(
        zp in any::<u8>(),
        y in any::<u8>(),
        base in 0x0200u16..0x4000,
        value in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(&[0xB1, zp]); // LDA ($zp),Y
        cpu.regs.y = y as i8;
        let [lo, hi] = base.to_le_bytes();
        cpu.bus.write(zp as u16, lo).unwrap();
        cpu.bus.write(zp.wrapping_add(1) as u16, hi).unwrap();
        cpu.bus.write(base + y as u16, value).unwrap();

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.a_byte(), value);
    }

    /// Property: STA writes exactly the addressed cell
    #[test]
    fn prop_sta_absolute_writes_one_cell(addr in 0u16..0x5000, value in 1u8..=255) {
        let [lo, hi] = addr.to_le_bytes();
        // LDA #value; STA addr
        let mut cpu = setup_cpu(&[0xA9, value, 0x8D, lo, hi]);

        cpu.step().unwrap();
        cpu.step().unwrap();

        let written: Vec<(u16, u8)> = cpu.bus.nonzero_ram().collect();
        prop_assert_eq!(written, vec![(addr, value)]);
    }
}
