//! The state of the panel as derived from the switches.
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use base::prelude::*;

use crate::program::Program;

/// How far the console has got through bringing up a program.
///
/// The only way back to an earlier state is a master clear, which
/// always leads to `Cleared`.  `PoweredUp` is never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BootState {
    PoweredUp,
    Cleared,
    Filled,
    Running,
}

impl Display for BootState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            BootState::PoweredUp => "POWERED UP",
            BootState::Cleared => "CLEARED",
            BootState::Filled => "FILLED",
            BootState::Running => "RUNNING",
        })
    }
}

pub const REGISTER_COUNT: usize = 16;

#[derive(Debug, Clone, Serialize)]
pub struct PanelState {
    /// R0 mirrors the switch register.  R1-R15 are scratch registers
    /// in which the pattern generators publish their working values.
    pub registers: [i16; REGISTER_COUNT],

    /// Drives the simulated address bus.
    pub program_counter: u16,

    /// Hard-wired lines, resampled on every cycle.
    pub hardware: HardwareLines,

    /// CPU control nibble (switch register 4, low nibble).
    pub control_nibble: Unsigned4Bit,

    /// The control nibble as it was on the previous cycle.  Commands
    /// which must only fire once are compared against this.
    pub control_nibble_prev: Unsigned4Bit,

    /// MEM/INTS/PSW/ISTK (switch register 4, high nibble).
    pub display_select: Unsigned4Bit,

    /// EAU/EAU/CPU/CPU (switch register 5, high nibble).
    pub register_select: Unsigned4Bit,

    pub boot_state: BootState,

    /// The high status byte, as shown on the status lamps.
    pub status: StatusBits,

    /// Raw program identifier, as captured from the switches at FILL.
    pub selected_program: u16,

    pub emulation_options: EmulationOptions,

    /// Set by FILL, cleared after the first executed cycle.
    pub first_tick_of_program: bool,
}

impl PanelState {
    #[must_use]
    pub fn new() -> PanelState {
        PanelState {
            registers: [0; REGISTER_COUNT],
            program_counter: 0,
            hardware: HardwareLines::empty(),
            control_nibble: Unsigned4Bit::ZERO,
            control_nibble_prev: Unsigned4Bit::ZERO,
            display_select: Unsigned4Bit::ZERO,
            register_select: Unsigned4Bit::ZERO,
            boot_state: BootState::PoweredUp,
            status: StatusBits::empty(),
            selected_program: Program::SimulatedRun.id(),
            emulation_options: EmulationOptions::empty(),
            first_tick_of_program: false,
        }
    }

    /// The switch register as last clocked into R0.
    #[must_use]
    pub fn switches(&self) -> u16 {
        self.registers[0] as u16
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.hardware.test(HardwareLine::Halt)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.test(StatusFlag::Run)
    }

    /// Stores a generator's working value in a scratch register.
    /// R0 belongs to the switches and can't be published to.
    pub(crate) fn publish(&mut self, register: usize, value: i16) {
        debug_assert!(register != 0 && register < REGISTER_COUNT);
        if let Some(slot) = self.registers.get_mut(register) {
            *slot = value;
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
