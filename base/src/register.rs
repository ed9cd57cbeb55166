//! The panel's register address space.
//!
//! The panel hardware exposes eight byte-wide registers.  Reads and
//! writes to the same address reach different physical registers:
//! writes drive the lamp latches while reads sample the switches.
//!
//! | Address | Written (lamps)       | Read (switches)                          |
//! | ------- | --------------------- | ---------------------------------------- |
//! | 0       | Address, low byte     |                                          |
//! | 1       | Address, high byte    |                                          |
//! | 2       | Data, low byte        | Switch register (R0), low byte           |
//! | 3       | Data, high byte       | Switch register (R0), high byte          |
//! | 4       | Status, low byte      | CPU control nibble / display select      |
//! | 5       | Status, high byte     | Context nibble / register display select |
//! | 6       | (unused)              | (unused)                                 |
//! | 7       | Output latch strobe   |                                          |
//!
//! Word-wide accesses use the even address for the low byte and the
//! following odd address for the high byte.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::error::ConversionFailed;

#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize)]
pub enum RegisterAddress {
    AddressLow = 0,
    AddressHigh = 1,
    DataLow = 2,
    DataHigh = 3,
    StatusLow = 4,
    StatusHigh = 5,
    Unused = 6,
    /// Writing any value here clocks the switches into the input
    /// buffers.  The value written is ignored.
    OutputLatch = 7,
}

impl RegisterAddress {
    /// Input alias: the low byte of the switch register.
    pub const SWITCHES_LOW: RegisterAddress = RegisterAddress::DataLow;
    /// Input alias: CPU control nibble (low) and display select (high).
    pub const CPU_CONTROL: RegisterAddress = RegisterAddress::StatusLow;
    /// Input alias: context nibble (low) and register display select (high).
    pub const DISPLAY_SELECT: RegisterAddress = RegisterAddress::StatusHigh;

    pub const ALL: [RegisterAddress; 8] = [
        RegisterAddress::AddressLow,
        RegisterAddress::AddressHigh,
        RegisterAddress::DataLow,
        RegisterAddress::DataHigh,
        RegisterAddress::StatusLow,
        RegisterAddress::StatusHigh,
        RegisterAddress::Unused,
        RegisterAddress::OutputLatch,
    ];

    /// The address of the high byte of a word whose low byte is at
    /// `self`.  The output latch has no partner, so its address wraps
    /// to 0.
    #[must_use]
    pub const fn next(self) -> RegisterAddress {
        Self::ALL[(self as usize + 1) % 8]
    }

    /// Selects a register by the three least significant bits of `n`.
    #[must_use]
    pub const fn from_low_bits(n: u8) -> RegisterAddress {
        Self::ALL[(n & 0x07) as usize]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for RegisterAddress {
    type Error = ConversionFailed;
    fn try_from(n: u8) -> Result<RegisterAddress, ConversionFailed> {
        match Self::ALL.get(usize::from(n)) {
            Some(addr) => Ok(*addr),
            None => Err(ConversionFailed::TooLarge),
        }
    }
}

impl From<RegisterAddress> for u8 {
    fn from(addr: RegisterAddress) -> u8 {
        addr as u8
    }
}

impl Display for RegisterAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", *self as u8)
    }
}

/// The hard-wired console lines.  Each is an independent input which
/// the I/O layer samples separately from the register file.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize)]
pub enum HardwareLine {
    Halt,
    MasterClear,
    ConsoleInterrupt,
    BreakpointHalt,
}

impl HardwareLine {
    pub const ALL: [HardwareLine; 4] = [
        HardwareLine::Halt,
        HardwareLine::MasterClear,
        HardwareLine::ConsoleInterrupt,
        HardwareLine::BreakpointHalt,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            HardwareLine::Halt => "HALT",
            HardwareLine::MasterClear => "M CLEAR",
            HardwareLine::ConsoleInterrupt => "CSL INT",
            HardwareLine::BreakpointHalt => "BP HLT",
        }
    }
}

impl Display for HardwareLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownHardwareLine(String);

impl Display for UnknownHardwareLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "unknown hardware line '{}'", self.0)
    }
}

impl Error for UnknownHardwareLine {}

impl TryFrom<&str> for HardwareLine {
    type Error = UnknownHardwareLine;
    fn try_from(s: &str) -> Result<HardwareLine, UnknownHardwareLine> {
        HardwareLine::ALL
            .into_iter()
            .find(|line| line.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHardwareLine(s.to_owned()))
    }
}

#[test]
fn test_register_address_numbering() {
    for (n, addr) in RegisterAddress::ALL.iter().enumerate() {
        assert_eq!(usize::from(u8::from(*addr)), n);
        assert_eq!(RegisterAddress::try_from(n as u8), Ok(*addr));
    }
    assert_eq!(RegisterAddress::try_from(8), Err(ConversionFailed::TooLarge));
    assert_eq!(RegisterAddress::SWITCHES_LOW.index(), 2);
    assert_eq!(RegisterAddress::CPU_CONTROL.index(), 4);
    assert_eq!(RegisterAddress::DISPLAY_SELECT.index(), 5);
}

#[test]
fn test_register_address_next() {
    assert_eq!(RegisterAddress::AddressLow.next(), RegisterAddress::AddressHigh);
    assert_eq!(RegisterAddress::StatusLow.next(), RegisterAddress::StatusHigh);
    assert_eq!(RegisterAddress::OutputLatch.next(), RegisterAddress::AddressLow);
}

#[test]
fn test_hardware_line_names() {
    for line in HardwareLine::ALL {
        assert_eq!(HardwareLine::try_from(line.name()), Ok(line));
    }
    assert_eq!(HardwareLine::try_from("m clear"), Ok(HardwareLine::MasterClear));
    assert!(HardwareLine::try_from("POWER").is_err());
}
