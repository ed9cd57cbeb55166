//! A scripted operator, who works the switches to bring up a
//! program as a person at the console would.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use base::prelude::*;
use panel::{BootState, ConsoleCommand, Context, Delay, Panel, RandomSource, RegisterBank};

/// One thing the operator does, followed by one panel cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Line(HardwareLine, bool),
    Switches(u16),
    Command(ConsoleCommand),
}

impl Action {
    fn perform(&self, bank: &mut RegisterBank) {
        match self {
            Action::Line(line, asserted) => bank.set_line(*line, *asserted),
            Action::Switches(word) => bank.set_switches(*word),
            Action::Command(command) => {
                bank.set_cpu_control(command.code(), Unsigned4Bit::ZERO);
            }
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Action::Line(line, true) => write!(f, "assert {line}"),
            Action::Line(line, false) => write!(f, "release {line}"),
            Action::Switches(word) => write!(f, "set switches to {word:#06x}"),
            Action::Command(command) => write!(f, "select {command}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootFailed {
    pub expected: BootState,
    pub actual: BootState,
}

impl Display for BootFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "boot sequence finished in state {} but should have reached {}",
            self.actual, self.expected
        )
    }
}

impl Error for BootFailed {}

#[derive(Debug, Clone, Default)]
pub struct BootScript {
    pub program: u16,
    /// The switch setting to leave in place once running.
    pub run_switches: u16,
    /// Enter the deferred switch latching option before FILL.
    pub deferred_switches: bool,
    /// Lines to keep asserted while running.
    pub hold_lines: Vec<HardwareLine>,
}

impl BootScript {
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = vec![
            Action::Line(HardwareLine::Halt, true),
            Action::Line(HardwareLine::MasterClear, true),
            Action::Command(ConsoleCommand::Idle),
            Action::Line(HardwareLine::MasterClear, false),
        ];
        if self.deferred_switches {
            let options: EmulationOptions =
                [EmulationOption::ClockSwitchesOnConsoleInterrupt].into_iter().collect();
            actions.extend([
                Action::Switches(options.bits()),
                Action::Command(ConsoleCommand::EnterRegister),
                Action::Command(ConsoleCommand::Idle),
            ]);
        }
        actions.extend([
            Action::Switches(self.program),
            Action::Command(ConsoleCommand::Fill),
            Action::Command(ConsoleCommand::Idle),
            Action::Switches(self.run_switches),
        ]);
        actions.extend(self.hold_lines.iter().map(|line| Action::Line(*line, true)));
        actions
    }

    /// Performs the script, one panel cycle per action, leaving the
    /// console filled and just about to run (HALT is released but no
    /// cycle has seen that yet).
    pub fn boot(
        &self,
        panel: &mut Panel,
        bank: &mut RegisterBank,
        delay: &mut dyn Delay,
        random: &mut dyn RandomSource,
    ) -> Result<(), BootFailed> {
        for action in self.actions() {
            event!(Level::DEBUG, "operator: {action}");
            action.perform(bank);
            let mut ctx = Context::new(bank, delay, random);
            panel.cycle(&mut ctx);
        }
        let actual = panel.state().boot_state;
        if actual != BootState::Filled {
            return Err(BootFailed {
                expected: BootState::Filled,
                actual,
            });
        }
        // Unless the operator is deliberately holding it.
        if !self.hold_lines.contains(&HardwareLine::Halt) {
            Action::Line(HardwareLine::Halt, false).perform(bank);
        }
        Ok(())
    }
}
