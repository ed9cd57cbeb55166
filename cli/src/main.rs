//! Runs the front panel logic against an in-memory register bank,
//! with a scripted operator at the switches and the lamps drawn on
//! the terminal.
use std::error::Error;
use std::num::ParseIntError;
use std::time::Duration;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use base::prelude::*;
use panel::{Context, Panel, RegisterBank};

mod lamps;
mod operator;
mod pacing;
mod rng;

use lamps::LampWriter;
use operator::BootScript;
use pacing::{Pacer, Speed, ThreadSleep};
use rng::CRand;

/// Sleep debts shorter than this are carried forward.
const MIN_SLEEP: Duration = Duration::from_millis(5);

/// Parses a number in decimal, or in hex or octal with a `0x` or
/// `0o` prefix.
fn parse_word(s: &str) -> Result<u16, ParseIntError> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else if let Some(octal) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        u16::from_str_radix(octal, 8)
    } else {
        s.parse()
    }
}

fn parse_speed(s: &str) -> Result<Speed, String> {
    if s == "MAX" {
        return Ok(Speed::Max);
    }
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() && x > 0.0 => Ok(Speed::Multiplier(x)),
        Ok(x) => Err(format!("speed multiplier {x} should be a positive number")),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_line(s: &str) -> Result<HardwareLine, UnknownHardwareLine> {
    HardwareLine::try_from(s)
}

/// Simulate the front panel of a replica minicomputer console
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Program to FILL (0 simulated run, 1 counter, 2 slow counter,
    /// 3 lamp test, 4 scanning light, 5 register debug)
    #[clap(action = Set, long, default_value = "0", value_parser = parse_word)]
    program: u16,

    /// Switch register setting while the program runs
    #[clap(action = Set, long, default_value = "0", value_parser = parse_word)]
    switches: u16,

    /// Stop after this many running cycles
    #[clap(action = Set, long)]
    cycles: Option<u64>,

    /// Run this many times faster than real-time ('MAX' for as-fast-as-possible)
    #[clap(action = Set, long, default_value = "1.0", value_parser = parse_speed)]
    speed_multiplier: Speed,

    /// Only take in the switches while CSL INT is held
    #[clap(action = SetTrue, long)]
    deferred_switches: bool,

    /// Hold a hardware line (HALT, M CLEAR, CSL INT or BP HLT) while running
    #[clap(action = clap::ArgAction::Append, long, value_parser = parse_line)]
    hold_line: Vec<HardwareLine>,

    /// Seed for the pseudo-random numbers of the simulated run
    #[clap(action = Set, long, default_value = "1")]
    seed: u32,

    /// Draw the lamps every this many cycles (0 for never)
    #[clap(action = Set, long, default_value = "1")]
    render_every: u64,

    /// Print the final panel state as JSON
    #[clap(action = SetTrue, long)]
    dump_state: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut panel = Panel::new();
    let mut bank = RegisterBank::new();
    let mut pacer = Pacer::new(cli.speed_multiplier, MIN_SLEEP, ThreadSleep);
    let mut random = CRand::new(cli.seed);

    let script = BootScript {
        program: cli.program,
        run_switches: cli.switches,
        deferred_switches: cli.deferred_switches,
        hold_lines: cli.hold_line.clone(),
    };
    script.boot(&mut panel, &mut bank, &mut pacer, &mut random)?;
    event!(
        Level::INFO,
        "booted program {:#06x} with switches {:#06x}",
        cli.program,
        cli.switches
    );

    let mut lamps = LampWriter::new();
    let mut count: u64 = 0;
    while cli.cycles.map_or(true, |limit| count < limit) {
        let mut ctx = Context::new(&mut bank, &mut pacer, &mut random);
        panel.cycle(&mut ctx);
        count += 1;
        if cli.render_every != 0 && count % cli.render_every == 0 {
            lamps.draw(&bank, panel.state())?;
        }
    }
    lamps.disconnect();
    event!(
        Level::INFO,
        "ran {} cycles in {:?} of simulated time, {:?} spent sleeping",
        count,
        pacer.simulated(),
        pacer.slept()
    );

    if cli.dump_state {
        println!("{}", serde_json::to_string_pretty(panel.state())?);
    }
    Ok(())
}

fn run_panel() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.2.19/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Box::new(e));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    match cli.speed_multiplier {
        Speed::Max => {
            event!(Level::INFO, "--speed-multiplier=MAX, running at maximum speed");
        }
        Speed::Multiplier(x) => {
            event!(Level::INFO, "running at speed multiplier {}", x);
        }
    }
    run(&cli)
}

fn main() {
    match run_panel() {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

#[test]
fn test_parse_word() {
    assert_eq!(parse_word("42"), Ok(42));
    assert_eq!(parse_word("0xC000"), Ok(0xC000));
    assert_eq!(parse_word("0o17"), Ok(0o17));
    assert!(parse_word("0x10000").is_err());
    assert!(parse_word("-1").is_err());
}

#[test]
fn test_parse_speed() {
    assert_eq!(parse_speed("MAX"), Ok(Speed::Max));
    assert_eq!(parse_speed("2.5"), Ok(Speed::Multiplier(2.5)));
    assert_eq!(parse_speed("1e-300"), Ok(Speed::Multiplier(1e-300)));
    assert!(parse_speed("0").is_err());
    assert!(parse_speed("fast").is_err());
}

#[test]
fn test_command_line() {
    let cli = Cli::try_parse_from([
        "mc-panel",
        "--program",
        "4",
        "--switches",
        "0x8305",
        "--hold-line",
        "csl int",
        "--cycles",
        "10",
    ])
    .expect("valid command line");
    assert_eq!(cli.program, 4);
    assert_eq!(cli.switches, 0x8305);
    assert_eq!(cli.hold_line, vec![HardwareLine::ConsoleInterrupt]);
    assert_eq!(cli.cycles, Some(10));
    assert_eq!(cli.speed_multiplier, Speed::Multiplier(1.0));
    assert!(Cli::try_parse_from(["mc-panel", "--hold-line", "RESET"]).is_err());
}
