//! A pair of counters, one counting up on the address lamps and the
//! other counting down on the data lamps.  The step sizes come from
//! the switches: the low byte plus one for the up counter and the
//! high byte plus one for the down counter.
use std::time::Duration;

use base::prelude::*;

use crate::context::Context;
use crate::state::PanelState;

/// Scratch registers:
///
/// - R1: up step
/// - R2: down step
/// - R3: up counter
/// - R4: down counter
///
/// The counters carry on from wherever they were, even across a new
/// FILL.
#[derive(Debug, Default)]
pub struct Counter {
    up: i16,
    down: i16,
}

impl Counter {
    #[must_use]
    pub fn up(&self) -> i16 {
        self.up
    }

    #[must_use]
    pub fn down(&self) -> i16 {
        self.down
    }

    pub fn step(&mut self, state: &mut PanelState, ctx: &mut Context<'_>, delay: Option<Duration>) {
        let switches = state.switches();
        let up_step = (switches & 0x00FF) as i16 + 1;
        let down_step = (switches >> 8) as i16 + 1;

        self.up = self.up.wrapping_add(up_step);
        self.down = self.down.wrapping_sub(down_step);
        state.publish(1, up_step);
        state.publish(2, down_step);
        state.publish(3, self.up);
        state.publish(4, self.down);

        ctx.registers
            .write_word(RegisterAddress::AddressLow, self.up as u16);
        ctx.registers
            .write_word(RegisterAddress::DataLow, self.down as u16);

        if let Some(duration) = delay {
            ctx.delay.delay(duration);
        }
    }
}
