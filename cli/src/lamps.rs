//! Draws the panel lamps on the terminal.
use std::io::{self, Write};

use termcolor::{self, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{event, Level};

use base::prelude::*;
use panel::{PanelState, RegisterBank};

const LIT: char = '●';
const UNLIT: char = '○';

/// One letter per status lamp, bit 0 first: VM, PM, ME, RUN, N, Z,
/// O, C.
const STATUS_LABELS: [char; 8] = ['V', 'P', 'E', 'R', 'N', 'Z', 'O', 'C'];

fn get_colour_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Renders the `width` least significant bits of `bits`, most
/// significant first, grouped in fours as on the panel.
#[must_use]
pub fn lamp_row(bits: u16, width: u32) -> String {
    grouped(width, |bit| if bits & (1 << bit) != 0 { LIT } else { UNLIT })
}

/// The status lamp letters, laid out to sit under `lamp_row(_, 8)`.
#[must_use]
pub fn status_legend() -> String {
    grouped(8, |bit| STATUS_LABELS[bit as usize])
}

fn grouped<F: Fn(u32) -> char>(width: u32, lamp: F) -> String {
    let mut row = String::new();
    for bit in (0..width).rev() {
        row.push(lamp(bit));
        if bit != 0 && bit % 4 == 0 {
            row.push(' ');
        }
    }
    row
}

pub struct LampWriter {
    stream: StandardStream,
}

impl LampWriter {
    pub fn new() -> LampWriter {
        LampWriter {
            stream: StandardStream::stdout(get_colour_choice()),
        }
    }

    fn set_colour(&mut self, lit: bool) {
        let mut colour = ColorSpec::new();
        if lit {
            colour.set_fg(Some(termcolor::Color::Red)).set_bold(true);
        } else {
            colour.set_fg(Some(termcolor::Color::White)).set_dimmed(true);
        }
        if let Err(e) = self.stream.set_color(&colour) {
            event!(Level::ERROR, "Failed to select colour {:?}: {}", colour, e);
        }
    }

    fn write_row(&mut self, label: &str, bits: u16, width: u32) -> Result<(), io::Error> {
        write!(self.stream, "{label:>6} ")?;
        for lamp in lamp_row(bits, width).chars() {
            match lamp {
                LIT => self.set_colour(true),
                UNLIT => self.set_colour(false),
                _ => {
                    self.stream.reset()?;
                }
            }
            write!(self.stream, "{lamp}")?;
        }
        self.stream.reset()?;
        writeln!(self.stream)
    }

    /// Draws one frame: the address and data lamps, the high status
    /// byte with a letter under each lamp, then the boot state.
    pub fn draw(&mut self, bank: &RegisterBank, state: &PanelState) -> Result<(), io::Error> {
        let status = bank.output(RegisterAddress::StatusHigh);
        self.write_row("ADDR", bank.output_word(RegisterAddress::AddressLow), 16)?;
        self.write_row("DATA", bank.output_word(RegisterAddress::DataLow), 16)?;
        self.write_row("STATUS", u16::from(status), 8)?;
        writeln!(self.stream, "{:>6} {}", "", status_legend())?;
        writeln!(
            self.stream,
            "{:>6} {} PC {:#06x}",
            "",
            state.boot_state,
            state.program_counter
        )?;
        self.stream.flush()
    }

    pub fn disconnect(&mut self) {
        if let Err(e) = self.stream.reset() {
            event!(Level::ERROR, "Failed to reset terminal: {}", e);
        }
    }
}

#[test]
fn test_lamp_row() {
    assert_eq!(lamp_row(0x8001, 16), "●○○○ ○○○○ ○○○○ ○○○●");
    assert_eq!(lamp_row(0x00F0, 8), "●●●● ○○○○");
    assert_eq!(lamp_row(0x0005, 3), "●○●");
}

#[test]
fn test_status_legend_lines_up() {
    let legend: Vec<char> = status_legend().chars().collect();
    assert_eq!(legend.iter().collect::<String>(), "COZN REPV");
    for (bit, label) in STATUS_LABELS.iter().enumerate() {
        // The lamp for this bit is the only lit one in its row.
        let row: Vec<char> = lamp_row(1 << bit, 8).chars().collect();
        assert_eq!(row.len(), legend.len());
        let column = row.iter().position(|c| *c == LIT);
        assert_eq!(column.map(|n| legend[n]), Some(*label));
    }
}
