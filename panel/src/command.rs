//! Console commands selected with the CPU control switches.
//!
//! The commands only have an effect while the CPU is halted.  Most of
//! them refer to memory and instruction stepping facilities of the
//! real machine; the panel logic only acts on [`ConsoleCommand::Fill`],
//! [`ConsoleCommand::SingleStep`], [`ConsoleCommand::EnterRegister`]
//! and [`ConsoleCommand::Idle`].
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use base::prelude::*;

/// `V` means virtual, `ACT` actual, `OP` operand and `IN` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsoleCommand {
    SingleStep,
    EnterNextVirtualOperand,
    EnterNextActual,
    EnterNextVirtualInstruction,
    Idle,
    EnterPmaVirtualInstruction,
    EnterPmaActual,
    Fill,
    EnterMemoryVirtualOperand,
    EnterMemoryActual,
    EnterMemoryVirtualInstruction,
    EnterRegister,
    StepPmaVirtualInstruction,
    StepPmaActual,
    /// Codes 0x7 and 0xF have no assigned meaning.
    Undefined(Unsigned4Bit),
}

impl From<Unsigned4Bit> for ConsoleCommand {
    fn from(code: Unsigned4Bit) -> ConsoleCommand {
        match u8::from(code) {
            0x0 => ConsoleCommand::SingleStep,
            0x1 => ConsoleCommand::EnterNextVirtualOperand,
            0x2 => ConsoleCommand::EnterNextActual,
            0x3 => ConsoleCommand::EnterNextVirtualInstruction,
            0x4 => ConsoleCommand::Idle,
            0x5 => ConsoleCommand::EnterPmaVirtualInstruction,
            0x6 => ConsoleCommand::EnterPmaActual,
            0x8 => ConsoleCommand::Fill,
            0x9 => ConsoleCommand::EnterMemoryVirtualOperand,
            0xA => ConsoleCommand::EnterMemoryActual,
            0xB => ConsoleCommand::EnterMemoryVirtualInstruction,
            0xC => ConsoleCommand::EnterRegister,
            0xD => ConsoleCommand::StepPmaVirtualInstruction,
            0xE => ConsoleCommand::StepPmaActual,
            _ => ConsoleCommand::Undefined(code),
        }
    }
}

impl ConsoleCommand {
    /// The switch setting which selects this command.
    #[must_use]
    pub fn code(&self) -> Unsigned4Bit {
        match self {
            ConsoleCommand::SingleStep => u4!(0x0),
            ConsoleCommand::EnterNextVirtualOperand => u4!(0x1),
            ConsoleCommand::EnterNextActual => u4!(0x2),
            ConsoleCommand::EnterNextVirtualInstruction => u4!(0x3),
            ConsoleCommand::Idle => u4!(0x4),
            ConsoleCommand::EnterPmaVirtualInstruction => u4!(0x5),
            ConsoleCommand::EnterPmaActual => u4!(0x6),
            ConsoleCommand::Fill => u4!(0x8),
            ConsoleCommand::EnterMemoryVirtualOperand => u4!(0x9),
            ConsoleCommand::EnterMemoryActual => u4!(0xA),
            ConsoleCommand::EnterMemoryVirtualInstruction => u4!(0xB),
            ConsoleCommand::EnterRegister => u4!(0xC),
            ConsoleCommand::StepPmaVirtualInstruction => u4!(0xD),
            ConsoleCommand::StepPmaActual => u4!(0xE),
            ConsoleCommand::Undefined(code) => *code,
        }
    }
}

impl Display for ConsoleCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConsoleCommand::SingleStep => f.write_str("SINGLE STEP"),
            ConsoleCommand::EnterNextVirtualOperand => f.write_str("ENT NXT VOP"),
            ConsoleCommand::EnterNextActual => f.write_str("ENT NXT ACT"),
            ConsoleCommand::EnterNextVirtualInstruction => f.write_str("ENT NXT VIN"),
            ConsoleCommand::Idle => f.write_str("IDLE"),
            ConsoleCommand::EnterPmaVirtualInstruction => f.write_str("ENT PMA VIN"),
            ConsoleCommand::EnterPmaActual => f.write_str("ENT PMA ACT"),
            ConsoleCommand::Fill => f.write_str("FILL"),
            ConsoleCommand::EnterMemoryVirtualOperand => f.write_str("ENT MEM VOP"),
            ConsoleCommand::EnterMemoryActual => f.write_str("ENT MEM ACT"),
            ConsoleCommand::EnterMemoryVirtualInstruction => f.write_str("ENT MEM VIN"),
            ConsoleCommand::EnterRegister => f.write_str("ENT REG"),
            ConsoleCommand::StepPmaVirtualInstruction => f.write_str("STP PMA VIN"),
            ConsoleCommand::StepPmaActual => f.write_str("STP PMA ACT"),
            ConsoleCommand::Undefined(code) => write!(f, "undefined ({code:#x})"),
        }
    }
}

#[test]
fn test_command_codes() {
    for n in 0..=15_u8 {
        let code = Unsigned4Bit::try_from(n).expect("valid test data");
        let command = ConsoleCommand::from(code);
        assert_eq!(command.code(), code, "code {n:#x} decoded as {command}");
    }
    assert_eq!(ConsoleCommand::from(u4!(0x8)), ConsoleCommand::Fill);
    assert_eq!(ConsoleCommand::from(u4!(0xC)), ConsoleCommand::EnterRegister);
    assert_eq!(
        ConsoleCommand::from(u4!(0x7)),
        ConsoleCommand::Undefined(u4!(0x7))
    );
    assert_eq!(
        ConsoleCommand::from(u4!(0xF)),
        ConsoleCommand::Undefined(u4!(0xF))
    );
}
