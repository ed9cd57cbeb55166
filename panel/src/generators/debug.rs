//! Shows the raw contents of any input register, for checking the
//! switch wiring.
//!
//! The top three bits of input register 5 choose the register to
//! show.  The address lamps show that choice in bits 0-2 together
//! with the hard-wired lines in bits 4-7, as sampled when the cycle
//! was decoded; the data lamps show the register's contents.
use base::prelude::*;

use crate::context::Context;
use crate::state::PanelState;

/// Bit positions of the hardware lines on the address lamps.
const LINE_BITS: [(HardwareLine, u8); 4] = [
    (HardwareLine::MasterClear, 4),
    (HardwareLine::Halt, 5),
    (HardwareLine::BreakpointHalt, 6),
    (HardwareLine::ConsoleInterrupt, 7),
];

/// Scratch registers: R1 the register shown, R2 the address lamp
/// byte and R3 the register's contents.
#[derive(Debug, Default)]
pub struct RegisterDebug;

impl RegisterDebug {
    pub fn step(&mut self, state: &mut PanelState, ctx: &mut Context<'_>) {
        let regs = &mut *ctx.registers;
        regs.write(RegisterAddress::OutputLatch, 0);
        let select = regs.read(RegisterAddress::DISPLAY_SELECT);
        let address = RegisterAddress::from_low_bits(select >> 5);

        let display = LINE_BITS
            .into_iter()
            .filter(|(line, _)| state.hardware.test(*line))
            .fold(u8::from(address), |byte, (_, bit)| byte | (1 << bit));
        regs.write(RegisterAddress::AddressLow, display);

        let data = regs.read(address);
        regs.write(RegisterAddress::DataLow, data);

        state.publish(1, i16::from(u8::from(address)));
        state.publish(2, i16::from(display));
        state.publish(3, i16::from(data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regfile::{RegisterBank, RegisterFile};
    use crate::testing::{RecordingDelay, ScriptedRandom};

    fn run(bank: &mut RegisterBank, hardware: HardwareLines) -> PanelState {
        let mut state = PanelState::new();
        state.hardware = hardware;
        let mut random = ScriptedRandom::default();
        let mut delay = RecordingDelay::default();
        let mut ctx = Context::new(bank, &mut delay, &mut random);
        RegisterDebug.step(&mut state, &mut ctx);
        assert!(delay.delays.is_empty());
        state
    }

    fn lines(asserted: &[HardwareLine]) -> HardwareLines {
        let mut lines = HardwareLines::default();
        for line in asserted {
            lines.set(*line);
        }
        lines
    }

    /// Counts how often the hardware lines are sampled.
    struct LineCounter<'a> {
        bank: &'a mut RegisterBank,
        line_reads: usize,
    }

    impl RegisterFile for LineCounter<'_> {
        fn read(&mut self, addr: RegisterAddress) -> u8 {
            self.bank.read(addr)
        }

        fn write(&mut self, addr: RegisterAddress, value: u8) {
            self.bank.write(addr, value);
        }

        fn read_hardware_line(&mut self, line: HardwareLine) -> bool {
            self.line_reads += 1;
            self.bank.read_hardware_line(line)
        }
    }

    #[test]
    fn test_shows_switch_register() {
        let mut bank = RegisterBank::new();
        // Select register 3 (the high switch byte).
        bank.set_input(RegisterAddress::DISPLAY_SELECT, 3 << 5);
        bank.set_switches(0xA55A);
        let state = run(&mut bank, HardwareLines::default());
        assert_eq!(bank.output(RegisterAddress::AddressLow), 0x03);
        assert_eq!(bank.output(RegisterAddress::DataLow), 0xA5);
        assert_eq!(&state.registers[1..=3], &[3, 3, 0xA5]);
        assert_eq!(bank.latch_strobes(), 1);
    }

    #[test]
    fn test_hardware_lines_on_address_lamps() {
        let mut bank = RegisterBank::new();
        bank.set_input(RegisterAddress::DISPLAY_SELECT, 5 << 5);
        run(
            &mut bank,
            lines(&[HardwareLine::Halt, HardwareLine::ConsoleInterrupt]),
        );
        assert_eq!(bank.output(RegisterAddress::AddressLow), 0b1010_0101);
        // Register 5 is the one doing the selecting.
        assert_eq!(bank.output(RegisterAddress::DataLow), 5 << 5);

        run(
            &mut bank,
            lines(&[HardwareLine::MasterClear, HardwareLine::BreakpointHalt]),
        );
        assert_eq!(bank.output(RegisterAddress::AddressLow), 0b0101_0101);
    }

    #[test]
    fn test_lines_come_from_decoded_snapshot() {
        // HALT was held when the cycle was decoded but has since been
        // released; the lamps show what was decoded, and the lines are
        // not sampled a second time.
        let mut bank = RegisterBank::new();
        bank.set_input(RegisterAddress::DISPLAY_SELECT, 2 << 5);
        bank.set_line(HardwareLine::MasterClear, true);
        let mut state = PanelState::new();
        state.hardware = lines(&[HardwareLine::Halt]);
        let mut counter = LineCounter {
            bank: &mut bank,
            line_reads: 0,
        };
        let mut random = ScriptedRandom::default();
        let mut delay = RecordingDelay::default();
        let mut ctx = Context::new(&mut counter, &mut delay, &mut random);
        RegisterDebug.step(&mut state, &mut ctx);
        assert_eq!(counter.line_reads, 0);
        assert_eq!(bank.output(RegisterAddress::AddressLow), 0b0010_0010);
        assert_eq!(state.registers[2], 0b0010_0010);
    }

    #[test]
    fn test_does_not_touch_high_bytes() {
        let mut bank = RegisterBank::new();
        bank.write_word(RegisterAddress::AddressLow, 0xFFFF);
        bank.write_word(RegisterAddress::DataLow, 0xFFFF);
        run(&mut bank, HardwareLines::default());
        assert_eq!(bank.output_word(RegisterAddress::AddressLow), 0xFF00);
        assert_eq!(bank.output_word(RegisterAddress::DataLow), 0xFF00);
    }
}
