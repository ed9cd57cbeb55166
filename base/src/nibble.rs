//! A four-bit unsigned quantity.
//!
//! The console's selector switches are wired to the input registers
//! in groups of four, one group in each half of a byte.  The CPU
//! control switches, the display selection switches, the context
//! switches and the register selection switches are all read this
//! way, so we give the nibble its own type rather than passing `u8`
//! values around whose top half must always be zero.

use std::fmt::{self, Binary, Debug, Display, Formatter, LowerHex, UpperHex};

use serde::Serialize;

use super::error::ConversionFailed;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Unsigned4Bit {
    bits: u8,
}

impl Unsigned4Bit {
    const VALUE_BITS: u8 = 0x0F;

    pub const ZERO: Unsigned4Bit = Unsigned4Bit { bits: 0 };
    pub const MAX: Unsigned4Bit = Unsigned4Bit {
        bits: Self::VALUE_BITS,
    };

    // Out-of-range values of N fail at compile time, so this is
    // usable from u4!().
    pub const fn new<const N: u8>() -> Unsigned4Bit {
        struct Helper<const M: u8>;
        impl<const M: u8> Helper<M> {
            const U: Unsigned4Bit = {
                if M > Unsigned4Bit::VALUE_BITS {
                    panic!("input value is out of range")
                } else {
                    Unsigned4Bit { bits: M }
                }
            };
        }
        Helper::<N>::U
    }

    /// Keeps only the four least significant bits of `value`.
    #[must_use]
    pub const fn truncating_from(value: u8) -> Unsigned4Bit {
        Unsigned4Bit {
            bits: value & Self::VALUE_BITS,
        }
    }

    /// Returns the state of bit `n` (0 being the least significant).
    /// Bits beyond the top of the nibble always read as clear.
    #[must_use]
    pub const fn bit(&self, n: u32) -> bool {
        n < 4 && (self.bits >> n) & 1 != 0
    }
}

macro_rules! from_self_to_native_type {
    ($($to:ty)*) => {
        $(
            impl From<Unsigned4Bit> for $to {
                fn from(n: Unsigned4Bit) -> $to {
                    n.bits.into()
                }
            }
        )*
    }
}

from_self_to_native_type!(u8 u16 u32 u64 usize i16 i32);

macro_rules! try_from_native_type_to_self {
    ($($from:ty)*) => {
        $(
            impl TryFrom<$from> for Unsigned4Bit {
                type Error = ConversionFailed;
                fn try_from(n: $from) -> Result<Self, ConversionFailed> {
                    #[allow(unused_comparisons)]
                    if n < 0 {
                        Err(ConversionFailed::TooSmall)
                    } else if n > 0x0F {
                        Err(ConversionFailed::TooLarge)
                    } else {
                        // In range, so the cast cannot truncate.
                        Ok(Unsigned4Bit { bits: n as u8 })
                    }
                }
            }
        )*
    }
}

try_from_native_type_to_self!(u8 u16 u32 i8 i16 i32);

impl Display for Unsigned4Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        Display::fmt(&self.bits, f)
    }
}

impl Debug for Unsigned4Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{:#X}", self.bits)
    }
}

impl LowerHex for Unsigned4Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        LowerHex::fmt(&self.bits, f)
    }
}

impl UpperHex for Unsigned4Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        UpperHex::fmt(&self.bits, f)
    }
}

impl Binary for Unsigned4Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        Binary::fmt(&self.bits, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn test_limits() {
        assert_eq!(u8::from(Unsigned4Bit::ZERO), 0);
        assert_eq!(u8::from(Unsigned4Bit::MAX), 15);
        assert_eq!(Unsigned4Bit::try_from(16_u8), Err(ConversionFailed::TooLarge));
        assert_eq!(Unsigned4Bit::try_from(-1_i16), Err(ConversionFailed::TooSmall));
        assert_eq!(Unsigned4Bit::new::<12>(), Unsigned4Bit::try_from(12_u8).unwrap());
    }

    #[test]
    fn test_bit() {
        let n = Unsigned4Bit::new::<0b1010>();
        assert!(!n.bit(0));
        assert!(n.bit(1));
        assert!(!n.bit(2));
        assert!(n.bit(3));
        assert!(!n.bit(4));
    }

    #[test]
    fn test_format() {
        let n = Unsigned4Bit::new::<0xC>();
        assert_eq!(format!("{n}"), "12");
        assert_eq!(format!("{n:?}"), "0xC");
        assert_eq!(format!("{n:x}"), "c");
        assert_eq!(format!("{n:04b}"), "1100");
    }

    #[proptest]
    fn truncation_keeps_low_bits(value: u8) {
        let n = Unsigned4Bit::truncating_from(value);
        assert_eq!(u8::from(n), value & 0x0F);
        assert_eq!(Unsigned4Bit::try_from(value & 0x0F), Ok(n));
    }
}
