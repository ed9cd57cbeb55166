//! Typed sets of single-bit flags.
//!
//! The panel keeps several packed bit fields: the high status byte
//! shown on the status lamps, the sampled hardware lines and the
//! emulation options entered with ENT REG.  Each has its own flag
//! enumeration so that a status bit can't be tested against the
//! hardware line word by mistake.
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use serde::Serialize;

/// A single named bit within a [`FlagSet`].
pub trait Flag: Copy + Debug + 'static {
    /// Every flag of this kind, in bit order.
    const ALL: &'static [Self];

    /// Bit position of the flag (0 being the least significant).
    fn bit(self) -> u32;

    fn mask(self) -> u16 {
        1_u16 << self.bit()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FlagSet<F: Flag> {
    bits: u16,
    #[serde(skip)]
    _kind: PhantomData<F>,
}

impl<F: Flag> FlagSet<F> {
    #[must_use]
    pub const fn empty() -> FlagSet<F> {
        FlagSet {
            bits: 0,
            _kind: PhantomData,
        }
    }

    /// Builds a set from raw bits.  Bits which don't correspond to a
    /// flag of kind `F` are retained.
    #[must_use]
    pub const fn from_bits(bits: u16) -> FlagSet<F> {
        FlagSet {
            bits,
            _kind: PhantomData,
        }
    }

    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.bits
    }

    /// The low eight bits of the set, for sets which are written to a
    /// byte-wide register.
    #[must_use]
    pub const fn low_byte(&self) -> u8 {
        (self.bits & 0x00FF) as u8
    }

    pub fn set(&mut self, flag: F) {
        self.bits |= flag.mask();
    }

    pub fn clear(&mut self, flag: F) {
        self.bits &= !flag.mask();
    }

    #[must_use]
    pub fn test(&self, flag: F) -> bool {
        self.bits & flag.mask() != 0
    }

    pub fn assign(&mut self, flag: F, value: bool) {
        if value {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    pub fn clear_all(&mut self) {
        self.bits = 0;
    }

    /// Replaces the bits selected by `mask` with the corresponding
    /// bits of `value`, leaving the others untouched.
    pub fn replace_masked(&mut self, mask: u16, value: u16) {
        self.bits = (self.bits & !mask) | (value & mask);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates over the flags of kind `F` which are set.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        F::ALL.iter().copied().filter(|flag| self.test(*flag))
    }
}

impl<F: Flag> Default for FlagSet<F> {
    fn default() -> Self {
        FlagSet::empty()
    }
}

impl<F: Flag> Debug for FlagSet<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_set().entries(self.iter()).finish()?;
        write!(f, "({:#06x})", self.bits)
    }
}

impl<F: Flag> FromIterator<F> for FlagSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut result = FlagSet::empty();
        for flag in iter {
            result.set(flag);
        }
        result
    }
}

/// Bits of the high status byte (status register 5 on the output
/// side).
///
/// | Bit | Lamp  | Meaning                     |
/// | --- | ----- | --------------------------- |
/// | 0   | VM    | Virtual mode                |
/// | 1   | PM    | Privileged mode             |
/// | 2   | M ERR | Memory error                |
/// | 3   | RUN   | The CPU is running          |
/// | 4   | N     | Negative                    |
/// | 5   | Z     | Zero                        |
/// | 6   | O     | Overflow                    |
/// | 7   | C     | Carry                       |
///
/// VM and PM are never driven by the panel logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StatusFlag {
    VirtualMode,
    PrivilegedMode,
    MemoryError,
    Run,
    Negative,
    Zero,
    Overflow,
    Carry,
}

impl StatusFlag {
    /// Mask selecting the N, Z, O and C bits.
    pub const NZOC_MASK: u16 = 0x00F0;
}

impl Flag for StatusFlag {
    const ALL: &'static [StatusFlag] = &[
        StatusFlag::VirtualMode,
        StatusFlag::PrivilegedMode,
        StatusFlag::MemoryError,
        StatusFlag::Run,
        StatusFlag::Negative,
        StatusFlag::Zero,
        StatusFlag::Overflow,
        StatusFlag::Carry,
    ];

    fn bit(self) -> u32 {
        self as u32
    }
}

pub type StatusBits = FlagSet<StatusFlag>;

impl FlagSet<StatusFlag> {
    /// Replaces N, Z, O and C with bits 4..7 of `value`.  VM, PM,
    /// M ERR and RUN are preserved.
    pub fn set_nzoc(&mut self, value: u16) {
        self.replace_masked(StatusFlag::NZOC_MASK, value);
    }
}

impl Flag for super::register::HardwareLine {
    const ALL: &'static [Self] = &super::register::HardwareLine::ALL;

    fn bit(self) -> u32 {
        self as u32
    }
}

pub type HardwareLines = FlagSet<super::register::HardwareLine>;

/// Emulation options, clocked in from the switch register by ENT REG
/// while halted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EmulationOption {
    /// When set, the switches are only clocked into R0 while CSL INT
    /// is held.  When clear (the default) they take effect
    /// immediately.
    ClockSwitchesOnConsoleInterrupt,
}

impl Flag for EmulationOption {
    const ALL: &'static [EmulationOption] = &[EmulationOption::ClockSwitchesOnConsoleInterrupt];

    fn bit(self) -> u32 {
        self as u32
    }
}

pub type EmulationOptions = FlagSet<EmulationOption>;

#[cfg(test)]
mod tests {
    use super::super::register::HardwareLine;
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn test_set_clear_test() {
        let mut status = StatusBits::empty();
        assert!(!status.test(StatusFlag::Run));
        status.set(StatusFlag::Run);
        assert!(status.test(StatusFlag::Run));
        assert_eq!(status.low_byte(), 0x08);
        status.set(StatusFlag::Carry);
        assert_eq!(status.low_byte(), 0x88);
        status.clear(StatusFlag::Run);
        assert_eq!(status.low_byte(), 0x80);
        status.assign(StatusFlag::MemoryError, true);
        assert_eq!(status.low_byte(), 0x84);
        status.clear_all();
        assert!(status.is_empty());
    }

    #[test]
    fn test_hardware_line_bits() {
        // These match the order in which the lines are wired.
        assert_eq!(HardwareLine::Halt.mask(), 1);
        assert_eq!(HardwareLine::MasterClear.mask(), 2);
        assert_eq!(HardwareLine::ConsoleInterrupt.mask(), 4);
        assert_eq!(HardwareLine::BreakpointHalt.mask(), 8);
        let lines: HardwareLines = [HardwareLine::Halt, HardwareLine::BreakpointHalt]
            .into_iter()
            .collect();
        assert_eq!(lines.bits(), 9);
        assert_eq!(
            lines.iter().collect::<Vec<_>>(),
            vec![HardwareLine::Halt, HardwareLine::BreakpointHalt]
        );
    }

    #[test]
    fn test_debug_format() {
        let mut status = StatusBits::empty();
        status.set(StatusFlag::Zero);
        assert_eq!(format!("{status:?}"), "{Zero}(0x0020)");
    }

    #[test]
    fn test_unknown_bits_retained() {
        let options = EmulationOptions::from_bits(0x8001);
        assert!(options.test(EmulationOption::ClockSwitchesOnConsoleInterrupt));
        assert_eq!(options.bits(), 0x8001);
    }

    #[proptest]
    fn nzoc_update_preserves_low_nibble(initial: u8, value: u16) {
        let mut status = StatusBits::from_bits(u16::from(initial));
        status.set_nzoc(value);
        assert_eq!(status.low_byte() & 0x0F, initial & 0x0F);
        assert_eq!(u16::from(status.low_byte() & 0xF0), value & 0x00F0);
    }
}
