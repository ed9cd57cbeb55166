//! Lamp test.  Every lamp is lit for the first part of the cycle.
//! For the second part, if any switch is up, every lamp is put out,
//! so that the operator can see both that each lamp works and that
//! none is stuck on.
use base::prelude::*;

use crate::context::Context;
use crate::state::PanelState;

/// Length of one complete on/off cycle.
pub const LAMP_TEST_PERIOD: u16 = 200;

/// Number of cycles at the start of each period with every lamp lit.
pub const ALL_ON_CYCLES: u16 = 100;

const LAMP_WORDS: [RegisterAddress; 3] = [
    RegisterAddress::AddressLow,
    RegisterAddress::DataLow,
    RegisterAddress::StatusLow,
];

/// Scratch registers:
///
/// - R1: position within the period
#[derive(Debug, Default)]
pub struct LampTest {
    count: u16,
}

impl LampTest {
    #[must_use]
    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn step(&mut self, state: &mut PanelState, ctx: &mut Context<'_>) {
        if state.first_tick_of_program {
            self.count = 0;
        }

        if self.count < ALL_ON_CYCLES {
            for addr in LAMP_WORDS {
                ctx.registers.write_word(addr, 0xFFFF);
            }
            state.status = StatusBits::from_bits(0x00FF);
        } else if state.registers[0] != 0 {
            for addr in LAMP_WORDS {
                ctx.registers.write_word(addr, 0x0000);
            }
            state.status.clear_all();
        }

        self.count = (self.count + 1) % LAMP_TEST_PERIOD;
        state.publish(1, self.count as i16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regfile::RegisterBank;
    use crate::testing::{RecordingDelay, ScriptedRandom};

    fn step(lamp_test: &mut LampTest, state: &mut PanelState, bank: &mut RegisterBank) {
        let mut random = ScriptedRandom::default();
        let mut delay = RecordingDelay::default();
        let mut ctx = Context::new(bank, &mut delay, &mut random);
        lamp_test.step(state, &mut ctx);
        state.first_tick_of_program = false;
    }

    fn all_lamps(bank: &RegisterBank) -> [u16; 3] {
        LAMP_WORDS.map(|addr| bank.output_word(addr))
    }

    #[test]
    fn test_full_period_with_switches_up() {
        let mut lamp_test = LampTest::default();
        let mut state = PanelState::new();
        state.registers[0] = 1;
        state.first_tick_of_program = true;
        let mut bank = RegisterBank::new();

        for n in 0..ALL_ON_CYCLES {
            step(&mut lamp_test, &mut state, &mut bank);
            assert_eq!(all_lamps(&bank), [0xFFFF; 3], "cycle {n}");
            assert_eq!(state.status.low_byte(), 0xFF);
        }
        for n in ALL_ON_CYCLES..LAMP_TEST_PERIOD {
            step(&mut lamp_test, &mut state, &mut bank);
            assert_eq!(all_lamps(&bank), [0x0000; 3], "cycle {n}");
            assert!(state.status.is_empty());
        }
        // The period starts again.
        assert_eq!(lamp_test.count(), 0);
        step(&mut lamp_test, &mut state, &mut bank);
        assert_eq!(all_lamps(&bank), [0xFFFF; 3]);
    }

    #[test]
    fn test_switches_down_leaves_lamps_lit() {
        let mut lamp_test = LampTest::default();
        let mut state = PanelState::new();
        let mut bank = RegisterBank::new();
        for _ in 0..LAMP_TEST_PERIOD {
            step(&mut lamp_test, &mut state, &mut bank);
            assert_eq!(all_lamps(&bank), [0xFFFF; 3]);
        }
    }

    #[test]
    fn test_first_tick_restarts_period() {
        let mut lamp_test = LampTest::default();
        let mut state = PanelState::new();
        state.registers[0] = 1;
        let mut bank = RegisterBank::new();
        for _ in 0..(ALL_ON_CYCLES + 5) {
            step(&mut lamp_test, &mut state, &mut bank);
        }
        assert_eq!(all_lamps(&bank), [0; 3]);
        state.first_tick_of_program = true;
        step(&mut lamp_test, &mut state, &mut bank);
        assert_eq!(all_lamps(&bank), [0xFFFF; 3]);
        assert_eq!(state.registers[1], 1);
    }
}
