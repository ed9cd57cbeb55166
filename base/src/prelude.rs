//! The prelude exports the types which describe the panel's register
//! file and lamp bits.  Providing this prelude is the main purpose of
//! the base crate.
pub use super::error::ConversionFailed;
pub use super::flags::{
    EmulationOption, EmulationOptions, Flag, FlagSet, HardwareLines, StatusBits, StatusFlag,
};
pub use super::nibble::Unsigned4Bit;
pub use super::register::{HardwareLine, RegisterAddress, UnknownHardwareLine};
pub use super::subword::{high_nibble, join_bytes, low_nibble, split_word};
pub use super::u4;
