//! Simulates a busy machine: the address lamps follow a program
//! counter which mostly steps forward, sometimes loops back and
//! occasionally jumps somewhere else entirely.
use std::time::Duration;

use tracing::{event, Level};

use base::prelude::*;

use crate::context::Context;
use crate::state::PanelState;

/// Simulated instructions at or above this value are jumps.
pub const JUMP_THRESHOLD: i16 = 32000;

/// Simulated instructions at or above this value (but below
/// [`JUMP_THRESHOLD`]) are backward branches.
pub const LOOP_THRESHOLD: i16 = 15000;

const DELAY_SWITCHES: u16 = 0x3FFF;

/// Scratch registers:
///
/// - R2: the simulated instruction
/// - R3: loop offset, then the random NZOC source
#[derive(Debug, Default)]
pub struct SimulatedRun;

impl SimulatedRun {
    pub fn step(&mut self, state: &mut PanelState, ctx: &mut Context<'_>) {
        let instruction = ctx.random.random_int();
        state.publish(2, instruction);

        if instruction >= JUMP_THRESHOLD {
            let target = ctx.random.random_int() as u16;
            event!(Level::TRACE, "jump to {target:#06x}");
            state.program_counter = target;
        } else if instruction >= LOOP_THRESHOLD {
            let offset: u16 = ctx.random.random_int().unsigned_abs() / 100;
            state.publish(3, offset as i16);
            if offset < state.program_counter {
                state.program_counter -= offset;
            }
        }

        ctx.registers
            .write_word(RegisterAddress::AddressLow, state.program_counter);
        ctx.registers
            .write_word(RegisterAddress::DataLow, instruction as u16);

        let flags = ctx.random.random_int();
        state.publish(3, flags);
        state.status.set_nzoc(flags as u16);
        // A zero result is never also negative, and can't have
        // overflowed or carried.
        if state.status.test(StatusFlag::Zero) {
            state.status.clear(StatusFlag::Negative);
            state.status.clear(StatusFlag::Overflow);
            state.status.clear(StatusFlag::Carry);
        }

        let units = u64::from(state.switches() & DELAY_SWITCHES);
        ctx.delay.delay(Duration::from_millis(units * 10));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regfile::RegisterBank;
    use crate::testing::{RecordingDelay, ScriptedRandom};

    fn step(state: &mut PanelState, bank: &mut RegisterBank, draws: &[i16]) -> RecordingDelay {
        let mut random = ScriptedRandom::new(draws);
        let mut delay = RecordingDelay::default();
        let mut ctx = Context::new(bank, &mut delay, &mut random);
        SimulatedRun.step(state, &mut ctx);
        delay
    }

    #[test]
    fn test_jump() {
        let mut state = PanelState::new();
        state.program_counter = 0x0100;
        let mut bank = RegisterBank::new();
        step(&mut state, &mut bank, &[JUMP_THRESHOLD, 0x1234, 0]);
        assert_eq!(state.program_counter, 0x1234);
        assert_eq!(bank.output_word(RegisterAddress::AddressLow), 0x1234);
        assert_eq!(bank.output_word(RegisterAddress::DataLow), JUMP_THRESHOLD as u16);
        assert_eq!(state.registers[2], JUMP_THRESHOLD);
    }

    #[test]
    fn test_loop() {
        let mut state = PanelState::new();
        state.program_counter = 500;
        let mut bank = RegisterBank::new();
        // An offset of 250 is less than the counter, so is taken.
        step(&mut state, &mut bank, &[LOOP_THRESHOLD, 25_000, 0]);
        assert_eq!(state.program_counter, 250);
        // An offset of 300 is not, so the counter stays put.
        step(&mut state, &mut bank, &[LOOP_THRESHOLD, 30_000, 0]);
        assert_eq!(state.program_counter, 250);
        assert_eq!(bank.output_word(RegisterAddress::AddressLow), 250);
    }

    #[test]
    fn test_straight_line() {
        let mut state = PanelState::new();
        state.program_counter = 77;
        let mut bank = RegisterBank::new();
        step(&mut state, &mut bank, &[LOOP_THRESHOLD - 1, 0]);
        assert_eq!(state.program_counter, 77);
        assert_eq!(
            bank.output_word(RegisterAddress::DataLow),
            (LOOP_THRESHOLD - 1) as u16
        );
    }

    #[test]
    fn test_nzoc_consistency() {
        let mut state = PanelState::new();
        state.status.set(StatusFlag::Run);
        state.status.set(StatusFlag::MemoryError);
        let mut bank = RegisterBank::new();

        // N, O and C only.
        step(&mut state, &mut bank, &[0, 0x00D0]);
        assert!(state.status.test(StatusFlag::Negative));
        assert!(!state.status.test(StatusFlag::Zero));
        assert!(state.status.test(StatusFlag::Overflow));
        assert!(state.status.test(StatusFlag::Carry));

        // Z wins over everything else.
        step(&mut state, &mut bank, &[0, 0x00F0]);
        assert!(state.status.test(StatusFlag::Zero));
        assert!(!state.status.test(StatusFlag::Negative));
        assert!(!state.status.test(StatusFlag::Overflow));
        assert!(!state.status.test(StatusFlag::Carry));

        // The low nibble is untouched.
        assert!(state.status.test(StatusFlag::Run));
        assert!(state.status.test(StatusFlag::MemoryError));
    }

    #[test]
    fn test_delay_follows_switches() {
        let mut state = PanelState::new();
        state.registers[0] = 0xC00A_u16 as i16;
        let mut bank = RegisterBank::new();
        let delay = step(&mut state, &mut bank, &[0, 0]);
        // Switches 14 and 15 are not part of the delay.
        assert_eq!(delay.delays, vec![Duration::from_millis(100)]);
    }
}
