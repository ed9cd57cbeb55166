//! Test doubles for the services in [`Context`](crate::context::Context).
use std::collections::VecDeque;
use std::time::Duration;

use crate::context::{Delay, RandomSource};

/// Hands out a fixed sequence of values, then zeroes.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandom {
    values: VecDeque<i16>,
}

impl ScriptedRandom {
    pub(crate) fn new(values: &[i16]) -> ScriptedRandom {
        ScriptedRandom {
            values: values.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn random_int(&mut self) -> i16 {
        self.values.pop_front().unwrap_or(0)
    }
}

/// Remembers each requested delay instead of waiting.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    pub(crate) delays: Vec<Duration>,
}

impl Delay for RecordingDelay {
    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}
