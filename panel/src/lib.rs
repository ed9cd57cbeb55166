//! This crate decodes the console switches and animates the lamps
//! of the front panel.
#![crate_name = "panel"]

mod command;
mod context;
mod control;
pub mod generators;
mod program;
mod regfile;
mod state;

#[cfg(test)]
mod testing;

pub use command::ConsoleCommand;
pub use context::{Context, Delay, RandomSource};
pub use control::{Execution, Panel, FILL_CONFIRMATION_TAG};
pub use program::{Program, UnknownProgram, SIMULATED_RUN_ALIAS, SLOW_COUNTER_DELAY};
pub use regfile::{RegisterBank, RegisterFile};
pub use state::{BootState, PanelState, REGISTER_COUNT};
