// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Paces the delay and sound timers against a monotonic clock

use std::time::{Duration, Instant};

/// Rate at which the delay and sound timers count down, in Hz
pub const TIMER_HZ: u32 = 60;

/// Counts fixed-length periods of wall-clock time.
///
/// The timers decrement once per elapsed period, no matter how many
/// instructions ran in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timer {
    period: Duration,
    next: Instant,
}

impl Timer {
    /// The most periods a single [Timer::poll] will report.
    /// Any more and an 8-bit timer is empty anyway.
    pub const MAX_CATCH_UP: u32 = u8::MAX as u32;

    /// Constructs a timer ticking `hz` times per second, starting at `now`
    ///
    /// A rate of 0 is treated as 1 Hz. The period never drops below 1ns.
    pub fn new(hz: u32, now: Instant) -> Self {
        let period = (Duration::from_secs(1) / hz.max(1)).max(Duration::from_nanos(1));
        Timer {
            period,
            next: now + period,
        }
    }

    /// Gets the length of one period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Reports how many whole periods have elapsed since the last poll
    /// # Examples
    /// ```rust
    /// # use chirp8::*;
    /// # use std::time::{Duration, Instant};
    /// let start = Instant::now();
    /// let mut timer = Timer::new(60, start);
    /// assert_eq!(0, timer.poll(start));
    /// assert_eq!(2, timer.poll(start + timer.period() * 2));
    /// assert_eq!(0, timer.poll(start + timer.period() * 2));
    /// ```
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next {
            ticks += 1;
            self.next += self.period;
            if ticks == Self::MAX_CATCH_UP {
                // Resynchronize rather than spin through a long stall
                self.next = now + self.period;
                break;
            }
        }
        ticks
    }
}
