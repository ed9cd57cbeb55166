//! The `base` crate defines the panel-related things which are
//! useful both to the panel logic and to whatever drives the panel
//! hardware (or pretends to).  The idea is that a host program which
//! only needs to know the register map and the meaning of the lamp
//! bits can depend on this crate without depending on the panel
//! logic itself.

mod error;
mod nibble;

pub mod flags;
pub mod prelude;
pub mod register;
pub mod subword;

pub use crate::error::ConversionFailed;
pub use crate::nibble::Unsigned4Bit;

#[macro_export]
macro_rules! u4 {
    ($n:expr) => {
        $crate::prelude::Unsigned4Bit::new::<{ $n }>()
    };
}

#[test]
fn test_u4() {
    use prelude::Unsigned4Bit;
    let m: Unsigned4Bit = u4!(0x8);
    let n: Unsigned4Bit = Unsigned4Bit::try_from(8_u8).expect("test data should be in range");
    assert_eq!(m, n);
}
