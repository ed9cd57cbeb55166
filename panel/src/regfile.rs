//! The register file through which the panel logic reaches the
//! switches and lamps.
//!
//! The physical layer (shift registers clocked over SPI, or whatever
//! else is wired up) is not part of this crate.  It implements
//! [`RegisterFile`], and the panel logic performs a short, fixed
//! sequence of reads and writes through it on each cycle.
//!
//! [`RegisterBank`] is an in-memory register file.  It keeps the
//! input (switch) side and the output (lamp) side of each address
//! separately, just as the hardware does, so that writing the data
//! lamps does not disturb the switch register which is read from the
//! same address.
use serde::Serialize;

use base::prelude::*;

pub trait RegisterFile {
    /// Reads the input register at `addr`.
    fn read(&mut self, addr: RegisterAddress) -> u8;

    /// Writes the output register at `addr`.
    fn write(&mut self, addr: RegisterAddress, value: u8);

    /// Samples one of the hard-wired console lines.
    fn read_hardware_line(&mut self, line: HardwareLine) -> bool;

    /// Reads a word whose low byte is at `addr` and whose high byte
    /// is at the following address.
    fn read_word(&mut self, addr: RegisterAddress) -> u16 {
        let low = self.read(addr);
        let high = self.read(addr.next());
        join_bytes(low, high)
    }

    /// Writes a word, low byte at `addr` and high byte at the
    /// following address.
    fn write_word(&mut self, addr: RegisterAddress, word: u16) {
        let (low, high) = split_word(word);
        self.write(addr, low);
        self.write(addr.next(), high);
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterBank {
    inputs: [u8; 8],
    outputs: [u8; 8],
    lines: HardwareLines,
    latch_strobes: u64,
}

impl RegisterBank {
    #[must_use]
    pub fn new() -> RegisterBank {
        RegisterBank::default()
    }

    pub fn set_input(&mut self, addr: RegisterAddress, value: u8) {
        self.inputs[addr.index()] = value;
    }

    pub fn set_input_word(&mut self, addr: RegisterAddress, word: u16) {
        let (low, high) = split_word(word);
        self.set_input(addr, low);
        self.set_input(addr.next(), high);
    }

    #[must_use]
    pub fn input(&self, addr: RegisterAddress) -> u8 {
        self.inputs[addr.index()]
    }

    /// Sets the switch register (R0 on the input side).
    pub fn set_switches(&mut self, word: u16) {
        self.set_input_word(RegisterAddress::SWITCHES_LOW, word);
    }

    /// Sets the CPU control nibble and the display selection nibble,
    /// which share input register 4.
    pub fn set_cpu_control(&mut self, command: Unsigned4Bit, display_select: Unsigned4Bit) {
        self.set_input(
            RegisterAddress::CPU_CONTROL,
            base::subword::join_nibbles(command, display_select),
        );
    }

    /// Sets the context nibble and the register display selection
    /// nibble, which share input register 5.
    pub fn set_display_select(&mut self, context: Unsigned4Bit, register_select: Unsigned4Bit) {
        self.set_input(
            RegisterAddress::DISPLAY_SELECT,
            base::subword::join_nibbles(context, register_select),
        );
    }

    #[must_use]
    pub fn output(&self, addr: RegisterAddress) -> u8 {
        self.outputs[addr.index()]
    }

    #[must_use]
    pub fn output_word(&self, addr: RegisterAddress) -> u16 {
        join_bytes(self.output(addr), self.output(addr.next()))
    }

    pub fn set_line(&mut self, line: HardwareLine, asserted: bool) {
        self.lines.assign(line, asserted);
    }

    #[must_use]
    pub fn lines(&self) -> HardwareLines {
        self.lines
    }

    /// The number of times the output latch has been strobed.
    #[must_use]
    pub fn latch_strobes(&self) -> u64 {
        self.latch_strobes
    }
}

impl RegisterFile for RegisterBank {
    fn read(&mut self, addr: RegisterAddress) -> u8 {
        self.inputs[addr.index()]
    }

    fn write(&mut self, addr: RegisterAddress, value: u8) {
        if addr == RegisterAddress::OutputLatch {
            self.latch_strobes += 1;
        } else {
            self.outputs[addr.index()] = value;
        }
    }

    fn read_hardware_line(&mut self, line: HardwareLine) -> bool {
        self.lines.test(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_and_outputs_are_separate() {
        let mut bank = RegisterBank::new();
        bank.set_switches(0x1234);
        bank.write_word(RegisterAddress::DataLow, 0xBEEF);
        assert_eq!(bank.read_word(RegisterAddress::SWITCHES_LOW), 0x1234);
        assert_eq!(bank.output_word(RegisterAddress::DataLow), 0xBEEF);
        assert_eq!(bank.output(RegisterAddress::DataHigh), 0xBE);
    }

    #[test]
    fn test_latch_strobe_is_counted() {
        let mut bank = RegisterBank::new();
        bank.write(RegisterAddress::OutputLatch, 0x55);
        bank.write(RegisterAddress::OutputLatch, 0);
        assert_eq!(bank.latch_strobes(), 2);
        assert_eq!(bank.output(RegisterAddress::OutputLatch), 0);
    }

    #[test]
    fn test_nibble_inputs() {
        let mut bank = RegisterBank::new();
        bank.set_cpu_control(u4!(0x8), u4!(0x1));
        bank.set_display_select(u4!(0x2), u4!(0xA));
        assert_eq!(bank.read(RegisterAddress::CPU_CONTROL), 0x18);
        assert_eq!(bank.read(RegisterAddress::DISPLAY_SELECT), 0xA2);
    }

    #[test]
    fn test_hardware_lines() {
        let mut bank = RegisterBank::new();
        bank.set_line(HardwareLine::Halt, true);
        assert!(bank.read_hardware_line(HardwareLine::Halt));
        assert!(!bank.read_hardware_line(HardwareLine::MasterClear));
        bank.set_line(HardwareLine::Halt, false);
        assert!(bank.lines().is_empty());
    }
}
