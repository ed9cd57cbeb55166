//! This module manages the context in which the panel logic performs
//! a single cycle.
//!
//! Apart from the register file, the pattern generators need two
//! other services from whatever is driving them: a way to pause (the
//! generators slow themselves down according to the switches) and a
//! source of pseudo-random numbers (for the simulated run).  We keep
//! these together in a struct so that a cycle can be invoked with a
//! single argument, and so that tests can substitute each of them.
use std::time::Duration;

use crate::regfile::RegisterFile;

/// A blocking pause.  The panel has no other work to do while it
/// waits, so a delay simply holds up the whole cycle.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// A bounded source of pseudo-random integers.  Hosts are expected to
/// return non-negative values (as C's `rand()` would, 0..=32767) but
/// the panel logic copes with any `i16`.
pub trait RandomSource {
    fn random_int(&mut self) -> i16;
}

pub struct Context<'a> {
    pub registers: &'a mut dyn RegisterFile,
    pub delay: &'a mut dyn Delay,
    pub random: &'a mut dyn RandomSource,
}

impl<'a> Context<'a> {
    #[must_use]
    pub fn new(
        registers: &'a mut dyn RegisterFile,
        delay: &'a mut dyn Delay,
        random: &'a mut dyn RandomSource,
    ) -> Context<'a> {
        Context {
            registers,
            delay,
            random,
        }
    }
}
