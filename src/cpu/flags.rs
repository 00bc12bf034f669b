//! 6502 processor status flags.

use std::fmt;

use bitflags::bitflags;

use crate::byte;

bitflags! {
    /// The seven status flags. Bit positions follow the packed P register (NV-BDIZC).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL = 1 << 3;   // Stored, but the 2A03 has no BCD adder
        const BREAK = 1 << 4;     // Set by BRK, cleared by PLP/RTI
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;
    }
}

/// Bit 5 of the packed register; reads as 1 and is not a flag.
pub const UNUSED_BIT: u8 = 1 << 5;

impl Status {
    /// Flags a pulled status byte may restore (PLP, RTI). B and bit 5 have no storage in P.
    pub const PULLABLE: Status = Status::NEGATIVE
        .union(Status::OVERFLOW)
        .union(Status::DECIMAL)
        .union(Status::INTERRUPT_DISABLE)
        .union(Status::ZERO)
        .union(Status::CARRY);

    /// Z and N from a result byte.
    pub fn set_zero_negative(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, byte::is_negative(value));
    }

    /// Byte pushed by PHP and BRK: B and bit 5 always set.
    pub fn pushed_byte(self) -> u8 {
        self.bits() | Status::BREAK.bits() | UNUSED_BIT
    }

    /// Replace the pullable flags with those in `value` and clear B. The pulled B bit is ignored.
    pub fn restore_from(&mut self, value: u8) {
        let pulled = Status::from_bits_truncate(value) & Status::PULLABLE;
        *self = (*self & !(Status::PULLABLE | Status::BREAK)) | pulled;
    }
}

impl fmt::Display for Status {
    /// `NV-BDIZC`, upper case when set.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const LETTERS: [(Status, char); 7] = [
            (Status::NEGATIVE, 'N'),
            (Status::OVERFLOW, 'V'),
            (Status::BREAK, 'B'),
            (Status::DECIMAL, 'D'),
            (Status::INTERRUPT_DISABLE, 'I'),
            (Status::ZERO, 'Z'),
            (Status::CARRY, 'C'),
        ];

        for (i, (flag, letter)) in LETTERS.iter().enumerate() {
            if i == 2 {
                write!(f, "-")?;
            }
            let c = if self.contains(*flag) {
                *letter
            } else {
                letter.to_ascii_lowercase()
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
