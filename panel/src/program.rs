//! The "programs" the console can be filled with.
//!
//! None of these is a real program; each selects one of the pattern
//! generators.  The operator selects a program by setting its
//! identifier on the switch register and pressing FILL.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use serde::Serialize;

/// Identifier which also selects [`Program::SimulatedRun`]: switches
/// 14 and 15 up.
pub const SIMULATED_RUN_ALIAS: u16 = 0xC000;

/// The delay used by [`Program::CounterSlow`] on every step.
pub const SLOW_COUNTER_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Program {
    /// Random address and data churn, as if the machine were busy.
    SimulatedRun,
    Counter,
    /// The counter, slowed to one step per second.
    CounterSlow,
    LampTest,
    /// A light bar sweeping back and forth across the data lamps.
    ScanningLight,
    /// Shows any input register on the lamps.  Unlike the others,
    /// this runs even while the CPU is halted.
    RegisterDebug,
}

impl Program {
    pub const ALL: [Program; 6] = [
        Program::SimulatedRun,
        Program::Counter,
        Program::CounterSlow,
        Program::LampTest,
        Program::ScanningLight,
        Program::RegisterDebug,
    ];

    /// The canonical identifier of the program.
    #[must_use]
    pub const fn id(&self) -> u16 {
        match self {
            Program::SimulatedRun => 0,
            Program::Counter => 1,
            Program::CounterSlow => 2,
            Program::LampTest => 3,
            Program::ScanningLight => 4,
            Program::RegisterDebug => 5,
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Program::SimulatedRun => "simulated run",
            Program::Counter => "counter",
            Program::CounterSlow => "slow counter",
            Program::LampTest => "lamp test",
            Program::ScanningLight => "scanning light",
            Program::RegisterDebug => "register debug",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownProgram(pub u16);

impl Display for UnknownProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "no program has identifier {:#06x}", self.0)
    }
}

impl Error for UnknownProgram {}

impl TryFrom<u16> for Program {
    type Error = UnknownProgram;
    fn try_from(id: u16) -> Result<Program, UnknownProgram> {
        if id == SIMULATED_RUN_ALIAS {
            return Ok(Program::SimulatedRun);
        }
        Program::ALL
            .into_iter()
            .find(|program| program.id() == id)
            .ok_or(UnknownProgram(id))
    }
}

#[test]
fn test_program_identifiers() {
    for program in Program::ALL {
        assert_eq!(Program::try_from(program.id()), Ok(program));
    }
    assert_eq!(Program::try_from(0xC000), Ok(Program::SimulatedRun));
    assert_eq!(Program::try_from(6), Err(UnknownProgram(6)));
    assert_eq!(Program::try_from(0x4000), Err(UnknownProgram(0x4000)));
    assert_eq!(
        UnknownProgram(6).to_string(),
        "no program has identifier 0x0006"
    );
}
