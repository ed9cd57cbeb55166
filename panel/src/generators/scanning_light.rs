//! Scanning light (a "Larson scanner"): a bar of lit lamps which
//! sweeps back and forth across the data lamps.
//!
//! The switches control the effect:
//!
//! | Switches | Meaning                                          |
//! | -------- | ------------------------------------------------ |
//! | 0-7      | Delay between steps, in units of 10ms            |
//! | 8-14     | Effect length; the bar is this many lamps plus 1 |
//! | 15       | Extend the sweep onto the N, Z, O and C lamps    |
//!
//! The bar is described only by the position of its first lamp and
//! by its length, so the state needed is just that position and the
//! direction of travel.  Positions 0-15 are the data lamps and
//! positions 16-19 are N, Z, O and C.
use std::time::Duration;

use serde::Serialize;

use base::prelude::*;

use crate::context::Context;
use crate::state::PanelState;

const NZOC: [StatusFlag; 4] = [
    StatusFlag::Negative,
    StatusFlag::Zero,
    StatusFlag::Overflow,
    StatusFlag::Carry,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// Towards higher positions.
    #[default]
    Right,
    Left,
}

/// Scratch registers:
///
/// - R1: direction (0 = right, 1 = left)
/// - R2: position of the first lit lamp
/// - R3: maximum position
/// - R4: rendered data lamps
/// - R5: rendered N/Z/O/C lamps (bits 0-3)
/// - R15: effect length
#[derive(Debug, Default)]
pub struct ScanningLight {
    direction: Direction,
    position: i16,
}

/// The number of lamps in the bar, less one.
#[must_use]
pub fn effect_length(switches: u16) -> i16 {
    ((switches >> 8) & 0x7F) as i16
}

#[must_use]
pub fn uses_nzoc(switches: u16) -> bool {
    switches & 0x8000 != 0
}

/// The highest position at which the bar still fits on the lamps.
/// A bar too long to fit at all stays at position 0.
#[must_use]
pub fn max_position(length: i16, nzoc: bool) -> i16 {
    let lamps: i16 = if nzoc { 20 } else { 16 };
    (lamps - 1 - length).max(0)
}

/// Renders a bar starting at `position` into the data lamps and the
/// N/Z/O/C lamps (bits 0-3 of the second value, N being bit 0).
#[must_use]
pub fn render(position: i16, length: i16) -> (u16, u8) {
    let mut data: u16 = 0;
    let mut nzoc: u8 = 0;
    for lamp in position..=position.saturating_add(length) {
        match lamp {
            0..=15 => data |= 1 << lamp,
            16..=19 => nzoc |= 1 << (lamp - 16),
            _ => (),
        }
    }
    (data, nzoc)
}

impl ScanningLight {
    #[must_use]
    pub fn position(&self) -> i16 {
        self.position
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn step(&mut self, state: &mut PanelState, ctx: &mut Context<'_>) {
        if state.first_tick_of_program {
            self.position = 0;
            self.direction = Direction::Right;
            ctx.registers.write_word(RegisterAddress::AddressLow, 0);
        }

        let switches = state.switches();
        let length = effect_length(switches);
        let nzoc = uses_nzoc(switches);
        let max = max_position(length, nzoc);

        let (data_lamps, nzoc_lamps) = render(self.position, length);
        ctx.registers
            .write_word(RegisterAddress::DataLow, data_lamps);

        for flag in NZOC {
            state.status.clear(flag);
        }
        if nzoc {
            for (bit, flag) in NZOC.into_iter().enumerate() {
                state.status.assign(flag, nzoc_lamps & (1 << bit) != 0);
            }
            ctx.registers
                .write(RegisterAddress::StatusHigh, state.status.low_byte());
        }

        state.publish(2, self.position);
        state.publish(3, max);
        state.publish(4, data_lamps as i16);
        state.publish(5, i16::from(nzoc_lamps));
        state.publish(15, length);

        self.advance(max);
        state.publish(
            1,
            match self.direction {
                Direction::Right => 0,
                Direction::Left => 1,
            },
        );

        let units = u64::from(switches & 0x00FF);
        ctx.delay.delay(Duration::from_millis(units * 10));
    }

    fn advance(&mut self, max: i16) {
        match self.direction {
            Direction::Right => {
                if self.position >= max {
                    self.direction = Direction::Left;
                    self.position -= 1;
                } else {
                    self.position += 1;
                }
            }
            Direction::Left => {
                if self.position <= 0 {
                    self.direction = Direction::Right;
                    self.position += 1;
                } else if self.position > max {
                    // The bar got longer since the last step.
                    self.direction = Direction::Right;
                    self.position = max;
                } else {
                    self.position -= 1;
                }
            }
        }
        self.position = self.position.clamp(0, max);
    }
}
