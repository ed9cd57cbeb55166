//! Decodes the console switches and runs the boot sequence.
//!
//! Every cycle begins with [`Panel::decode`], which samples the
//! hard-wired lines and the switch registers and works out what the
//! operator wants.  Then [`Panel::execute`] (in `dispatch.rs`) runs
//! at most one pattern generator.
//!
//! The boot sequence is driven by the operator:
//!
//! | From       | To        | How                                        |
//! | ---------- | --------- | ------------------------------------------ |
//! | any        | `Cleared` | HALT and M CLEAR together                  |
//! | `Cleared`  | `Filled`  | HALT, program identifier on switches, FILL |
//! | `Filled`   | `Running` | release HALT                               |
//!
//! FILL may also be repeated from `Filled` to choose a different
//! program.  Once running, the operator must master-clear before
//! filling again.
use tracing::{event, span, Level};

use base::prelude::*;
use base::subword;

use crate::command::ConsoleCommand;
use crate::context::Context;
use crate::generators::Generators;
use crate::program::Program;
use crate::regfile::RegisterFile;
use crate::state::{BootState, PanelState};

mod dispatch;


pub use dispatch::Execution;

/// Written to the data lamps (together with the program identifier)
/// to confirm a FILL.
pub const FILL_CONFIRMATION_TAG: u16 = 0x0AE8;

#[derive(Debug, Default)]
pub struct Panel {
    state: PanelState,
    generators: Generators,
    cycles: u64,
}

impl Panel {
    #[must_use]
    pub fn new() -> Panel {
        Panel::default()
    }

    #[must_use]
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    #[must_use]
    pub fn generators(&self) -> &Generators {
        &self.generators
    }

    /// The number of calls to [`Panel::cycle`] so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Performs one complete cycle: decode the switches, then run
    /// the selected program if the state calls for it.
    pub fn cycle(&mut self, ctx: &mut Context<'_>) -> Execution {
        self.cycles += 1;
        let cycle_span = span!(Level::TRACE, "cycle", n = self.cycles);
        let _enter = cycle_span.enter();
        self.decode(ctx.registers);
        let execution = self.execute(ctx);
        event!(
            Level::TRACE,
            "boot state {}, status {:?}, PC {:#06x}: {:?}",
            self.state.boot_state,
            self.state.status,
            self.state.program_counter,
            execution
        );
        execution
    }

    /// Examines the panel to set the current CPU state.
    pub fn decode(&mut self, regs: &mut dyn RegisterFile) {
        self.state.hardware = HardwareLine::ALL
            .into_iter()
            .filter(|line| regs.read_hardware_line(*line))
            .collect();

        // Clock the switches into the input buffers before reading
        // them.
        regs.write(RegisterAddress::OutputLatch, 0);

        let halted = self.state.is_halted();
        let deferred = self
            .state
            .emulation_options
            .test(EmulationOption::ClockSwitchesOnConsoleInterrupt);
        if !deferred || halted || self.state.hardware.test(HardwareLine::ConsoleInterrupt) {
            self.state.registers[0] = regs.read_word(RegisterAddress::SWITCHES_LOW) as i16;
        }

        // The low nibble (IOP/MBC/CTXT/MAP) selects nothing here.
        self.state.register_select = high_nibble(regs.read(RegisterAddress::DISPLAY_SELECT));

        let previous = self.state.control_nibble_prev;
        let (control, display_select) =
            subword::split_byte(regs.read(RegisterAddress::CPU_CONTROL));
        self.state.control_nibble = control;
        self.state.display_select = display_select;
        let rising = control != previous;

        if halted {
            self.state.status.clear(StatusFlag::Run);
            let master_clear = self.state.hardware.test(HardwareLine::MasterClear);
            if master_clear {
                self.master_clear(regs);
            }
            match ConsoleCommand::from(control) {
                ConsoleCommand::Fill if rising => {
                    self.fill(regs);
                }
                ConsoleCommand::SingleStep if rising => {
                    // RUN stays up for just this cycle; the next
                    // halted cycle clears it again.
                    event!(Level::DEBUG, "SINGLE STEP");
                    self.state.status.set(StatusFlag::Run);
                }
                ConsoleCommand::EnterRegister if rising => {
                    let options = regs.read_word(RegisterAddress::SWITCHES_LOW);
                    event!(Level::DEBUG, "ENT REG: emulation options are now {options:#06x}");
                    self.state.emulation_options = EmulationOptions::from_bits(options);
                }
                ConsoleCommand::Idle if !master_clear => {
                    self.display_halted_register(regs);
                }
                _ => (),
            }
        } else {
            self.state.status.set(StatusFlag::Run);
            if self.state.boot_state == BootState::Filled {
                self.change_boot_state(BootState::Running);
            }
        }

        regs.write(RegisterAddress::StatusHigh, self.state.status.low_byte());
        self.state.control_nibble_prev = self.state.control_nibble;
    }

    fn change_boot_state(&mut self, next: BootState) {
        if self.state.boot_state != next {
            event!(
                Level::DEBUG,
                "boot state {} -> {}",
                self.state.boot_state,
                next
            );
            self.state.boot_state = next;
        }
    }

    fn master_clear(&mut self, regs: &mut dyn RegisterFile) {
        self.change_boot_state(BootState::Cleared);
        regs.write_word(RegisterAddress::AddressLow, 0);
        regs.write_word(RegisterAddress::DataLow, 0);
        regs.write_word(RegisterAddress::StatusLow, 0);
        // Drops NZOC and M ERR as well as RUN.
        self.state.status.clear_all();
    }

    fn fill(&mut self, regs: &mut dyn RegisterFile) {
        match self.state.boot_state {
            BootState::Cleared | BootState::Filled => (),
            BootState::PoweredUp | BootState::Running => {
                event!(
                    Level::DEBUG,
                    "ignoring FILL in state {}; M CLEAR first",
                    self.state.boot_state
                );
                return;
            }
        }
        self.change_boot_state(BootState::Filled);
        let id = self.state.switches();
        self.state.selected_program = id;
        self.state.first_tick_of_program = true;
        match Program::try_from(id) {
            Ok(program) => {
                event!(Level::INFO, "FILL: selected program {id:#06x} ({program})");
            }
            Err(e) => {
                event!(Level::INFO, "FILL: {e}; running it will raise M ERR");
            }
        }
        regs.write_word(RegisterAddress::AddressLow, 0);
        regs.write_word(RegisterAddress::DataLow, id | FILL_CONFIRMATION_TAG);
    }

    /// While halted and idle, shows the register chosen with the
    /// register display select switches.  When the MEM display is
    /// selected nothing is shown, since there is no memory.
    fn display_halted_register(&mut self, regs: &mut dyn RegisterFile) {
        if self.state.display_select.bit(0) {
            return;
        }
        let selected = self.state.register_select;
        let value = self.state.registers[usize::from(selected)];
        regs.write_word(RegisterAddress::AddressLow, u16::from(selected));
        regs.write_word(RegisterAddress::DataLow, value as u16);
    }
}
