//! Byte representation conventions.
//!
//! Memory and instruction operands are raw unsigned bytes (`u8`); the A, X and Y registers hold
//! signed bytes (`i8`). Handlers convert with these helpers when a value enters or leaves a
//! register and do all arithmetic on the unsigned form in between.

/// Reinterpret a raw byte as a two's-complement value (0x80..=0xFF map to -128..=-1).
#[inline]
pub const fn to_signed(value: u8) -> i8 {
    value as i8
}

/// Reinterpret a signed register value as its raw byte (-1 maps to 0xFF).
#[inline]
pub const fn to_unsigned(value: i8) -> u8 {
    value as u8
}

/// Bit 7 of a raw byte, i.e. the sign of its signed reading.
#[inline]
pub const fn is_negative(value: u8) -> bool {
    value & 0x80 != 0
}

/// Compose a little-endian word.
#[inline]
pub const fn word(lo: u8, hi: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_boundaries() {
        assert_eq!(to_signed(0x00), 0);
        assert_eq!(to_signed(0x7F), 127);
        assert_eq!(to_signed(0x80), -128);
        assert_eq!(to_signed(0xFF), -1);
    }

    #[test]
    fn conversion_is_lossless_both_ways() {
        for raw in 0..=u8::MAX {
            assert_eq!(to_unsigned(to_signed(raw)), raw);
        }
        for value in i8::MIN..=i8::MAX {
            assert_eq!(to_signed(to_unsigned(value)), value);
        }
    }

    #[test]
    fn word_is_little_endian() {
        assert_eq!(word(0x23, 0x81), 0x8123);
        assert!(is_negative(0x80));
        assert!(!is_negative(0x7F));
    }
}
