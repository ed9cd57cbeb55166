use tracing::{event, Level};

use base::prelude::*;

use crate::context::Context;
use crate::program::{Program, UnknownProgram, SLOW_COUNTER_DELAY};
use crate::state::BootState;

use super::Panel;

/// What [`Panel::execute`] did on a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Nothing ran: the console is halted or not yet running.
    Idle,
    /// The program ran and the program counter advanced.
    Ran(Program),
    /// The register debug program ran outside of a running cycle.
    Inspected,
    /// The selected identifier matches no program; M ERR was raised.
    UnknownProgram(u16),
}

impl Panel {
    /// Runs the selected program if the state calls for it.
    pub fn execute(&mut self, ctx: &mut Context<'_>) -> Execution {
        let program = Program::try_from(self.state.selected_program);
        if self.state.boot_state == BootState::Running && self.state.is_running() {
            let execution = match program {
                Ok(program) => {
                    self.run_program(program, ctx);
                    Execution::Ran(program)
                }
                Err(UnknownProgram(id)) => {
                    if !self.state.status.test(StatusFlag::MemoryError) {
                        event!(
                            Level::WARN,
                            "program {id:#06x} does not exist, raising M ERR"
                        );
                    }
                    self.state.status.set(StatusFlag::MemoryError);
                    Execution::UnknownProgram(id)
                }
            };
            self.state.program_counter = self.state.program_counter.wrapping_add(1);
            self.state.first_tick_of_program = false;
            execution
        } else if matches!(program, Ok(Program::RegisterDebug)) {
            // The debugger is a passive viewer, so it runs whether
            // or not the CPU does.
            self.generators.debug.step(&mut self.state, ctx);
            Execution::Inspected
        } else {
            Execution::Idle
        }
    }

    fn run_program(&mut self, program: Program, ctx: &mut Context<'_>) {
        let state = &mut self.state;
        let generators = &mut self.generators;
        match program {
            Program::SimulatedRun => generators.simulated_run.step(state, ctx),
            Program::Counter => generators.counter.step(state, ctx, None),
            Program::CounterSlow => generators
                .counter
                .step(state, ctx, Some(SLOW_COUNTER_DELAY)),
            Program::LampTest => generators.lamp_test.step(state, ctx),
            Program::ScanningLight => generators.scanning_light.step(state, ctx),
            Program::RegisterDebug => generators.debug.step(state, ctx),
        }
    }
}
