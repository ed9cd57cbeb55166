//! The pattern generators ("programs") which animate the lamps.
//!
//! Note that it is generally OK for a generator to write directly to
//! the panel registers.  However the high status byte should be
//! changed through [`PanelState::status`], because the decoder writes
//! it out on every cycle according to the RUN setting.  Generators
//! take their parameters from R0 rather than reading the switch
//! register, so that they honour the emulation options.
//!
//! Each generator keeps its own state between cycles and publishes
//! its working values in the scratch registers, where the operator
//! can examine them with the halted register display.
//!
//! [`PanelState::status`]: crate::state::PanelState::status
mod counter;
mod debug;
mod lamp_test;
mod scanning_light;
mod simulated_run;

pub use counter::Counter;
pub use debug::RegisterDebug;
pub use lamp_test::{LampTest, ALL_ON_CYCLES, LAMP_TEST_PERIOD};
pub use scanning_light::{Direction, ScanningLight};
pub use simulated_run::{SimulatedRun, JUMP_THRESHOLD, LOOP_THRESHOLD};

#[derive(Debug, Default)]
pub struct Generators {
    pub simulated_run: SimulatedRun,
    pub counter: Counter,
    pub lamp_test: LampTest,
    pub scanning_light: ScanningLight,
    pub debug: RegisterDebug,
}
