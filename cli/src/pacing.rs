//! Paces the panel's delays against the wall clock.
//!
//! The pattern generators ask for delays of anything from zero to
//! several minutes.  The panel keeps track of the total as simulated
//! time, and (unless running flat out) sleeps for the delay scaled by
//! the speed multiplier.
//!
//! Sleeping in very short slices wastes system calls and is
//! inaccurate anyway, so short delays are saved up as a sleep debt
//! until it exceeds a minimum.  When the OS oversleeps, the excess is
//! kept as a credit against future delays, so on average we sleep for
//! the right amount of time.
use std::thread;
use std::time::{Duration, Instant};

use tracing::{event, Level};

use panel::Delay;

/// Something which can actually wait.
pub trait Sleep {
    /// Waits for about `duration` and returns the time actually
    /// spent waiting.
    fn sleep(&mut self, duration: Duration) -> Duration;
}

#[derive(Debug, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&mut self, duration: Duration) -> Duration {
        let then = Instant::now();
        thread::sleep(duration);
        then.elapsed()
    }
}

/// How fast the panel runs relative to real time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speed {
    /// Never sleep.
    Max,
    /// Sleep for each delay divided by this (positive, finite) value.
    Multiplier(f64),
}

#[derive(Debug)]
pub struct Pacer<S: Sleep> {
    speed: Speed,
    min_sleep: Duration,
    sleeper: S,
    /// Total of all requested delays.
    simulated: Duration,
    owed: Duration,
    credit: Duration,
    slept: Duration,
}

impl<S: Sleep> Pacer<S> {
    pub fn new(speed: Speed, min_sleep: Duration, sleeper: S) -> Pacer<S> {
        Pacer {
            speed,
            min_sleep,
            sleeper,
            simulated: Duration::ZERO,
            owed: Duration::ZERO,
            credit: Duration::ZERO,
            slept: Duration::ZERO,
        }
    }

    /// Simulated time so far: the sum of all delays requested.
    pub fn simulated(&self) -> Duration {
        self.simulated
    }

    /// Time actually spent sleeping so far.
    pub fn slept(&self) -> Duration {
        self.slept
    }

    fn pay(&mut self) {
        event!(Level::TRACE, "sleeping off a debt of {:?}", self.owed);
        let actual = self.sleeper.sleep(self.owed);
        self.slept = self.slept.saturating_add(actual);
        self.credit = self.credit.saturating_add(actual.saturating_sub(self.owed));
        self.owed = self.owed.saturating_sub(actual);
    }
}

impl<S: Sleep> Delay for Pacer<S> {
    fn delay(&mut self, duration: Duration) {
        self.simulated = self.simulated.saturating_add(duration);
        let scaled = match self.speed {
            Speed::Max => return,
            // Tiny multipliers scale past the largest Duration.
            Speed::Multiplier(m) => Duration::try_from_secs_f64(duration.as_secs_f64() / m)
                .unwrap_or(Duration::MAX),
        };
        let from_credit = scaled.min(self.credit);
        self.credit -= from_credit;
        self.owed = self.owed.saturating_add(scaled - from_credit);
        if self.owed > self.min_sleep {
            self.pay();
        }
    }
}

impl<S: Sleep> Drop for Pacer<S> {
    fn drop(&mut self) {
        event!(
            Level::DEBUG,
            "pacer: {:?} simulated, {:?} spent sleeping",
            self.simulated,
            self.slept
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oversleeps by a fixed amount, without really waiting.
    #[derive(Debug, Default)]
    struct FakeSleep {
        overshoot: Duration,
        calls: Vec<Duration>,
    }

    impl Sleep for &mut FakeSleep {
        fn sleep(&mut self, duration: Duration) -> Duration {
            self.calls.push(duration);
            duration.saturating_add(self.overshoot)
        }
    }

    const MIN_SLEEP: Duration = Duration::from_millis(5);

    #[test]
    fn test_max_speed_never_sleeps() {
        let mut fake = FakeSleep::default();
        let mut pacer = Pacer::new(Speed::Max, MIN_SLEEP, &mut fake);
        pacer.delay(Duration::from_secs(3));
        pacer.delay(Duration::from_millis(10));
        assert_eq!(pacer.simulated(), Duration::from_millis(3010));
        assert_eq!(pacer.slept(), Duration::ZERO);
        drop(pacer);
        assert!(fake.calls.is_empty());
    }

    #[test]
    fn test_short_delays_are_saved_up() {
        let mut fake = FakeSleep::default();
        let mut pacer = Pacer::new(Speed::Multiplier(1.0), MIN_SLEEP, &mut fake);
        for _ in 0..5 {
            pacer.delay(Duration::from_millis(2));
        }
        drop(pacer);
        // 2ms, 4ms, then 6ms exceeds the minimum; 2ms, 4ms are left.
        assert_eq!(fake.calls, vec![Duration::from_millis(6)]);
    }

    #[test]
    fn test_multiplier_scales_sleep() {
        let mut fake = FakeSleep::default();
        let mut pacer = Pacer::new(Speed::Multiplier(4.0), MIN_SLEEP, &mut fake);
        pacer.delay(Duration::from_millis(100));
        assert_eq!(pacer.simulated(), Duration::from_millis(100));
        assert_eq!(pacer.slept(), Duration::from_millis(25));
        drop(pacer);
        assert_eq!(fake.calls, vec![Duration::from_millis(25)]);
    }

    #[test]
    fn test_oversleep_is_credited() {
        let mut fake = FakeSleep {
            overshoot: Duration::from_millis(3),
            ..FakeSleep::default()
        };
        let mut pacer = Pacer::new(Speed::Multiplier(1.0), MIN_SLEEP, &mut fake);
        pacer.delay(Duration::from_millis(10));
        // The 3ms overslept covers the next two 1ms delays and most
        // of a third.
        pacer.delay(Duration::from_millis(1));
        pacer.delay(Duration::from_millis(1));
        pacer.delay(Duration::from_millis(10));
        assert_eq!(pacer.slept(), Duration::from_millis(13 + 12));
        drop(pacer);
        assert_eq!(
            fake.calls,
            vec![Duration::from_millis(10), Duration::from_millis(9)]
        );
    }

    #[test]
    fn test_tiny_multiplier_saturates() {
        let mut fake = FakeSleep::default();
        let mut pacer = Pacer::new(Speed::Multiplier(1e-300), MIN_SLEEP, &mut fake);
        pacer.delay(Duration::from_millis(10));
        pacer.delay(Duration::from_millis(10));
        assert_eq!(pacer.simulated(), Duration::from_millis(20));
        assert_eq!(pacer.slept(), Duration::MAX);
        drop(pacer);
        assert_eq!(fake.calls, vec![Duration::MAX, Duration::MAX]);
    }
}
