use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// Time source polled by the scene player.
pub trait Clock {
    /// Time elapsed since the clock started.
    fn elapsed(&self) -> Duration;

    /// Blocks (or pretends to) for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Monotonic wall clock anchored at the moment it was started.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    started: Instant,
}

impl PlaybackClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for PlaybackClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock whose time only moves through [`Clock::sleep`] or
/// [`ManualClock::advance`]. Lets the poll loop run without real waiting.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
