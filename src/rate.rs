use log::{debug, warn};
use std::time::{Duration, Instant};

/// Maximum successful requests counted before the gate throttles.
pub const RATE_LIMIT: u32 = 10;
/// Length of the rate window in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Time source for the gate. `sleep` must block the calling thread.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub request_count: u32,
    pub window_start: Instant,
}

impl RateWindow {
    pub fn new(window_start: Instant) -> Self {
        Self {
            request_count: 0,
            window_start,
        }
    }

    fn reset(&mut self, now: Instant) {
        self.request_count = 0;
        self.window_start = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Open,
    Throttled,
}

/// Counts successful calls and blocks once the quota is used up.
///
/// The window only restarts when a call finds the quota exhausted. A client that
/// stays below the limit keeps accumulating into the same window no matter how
/// much time passes; the next limit hit then resets without sleeping.
#[derive(Debug)]
pub struct RateGate<C: Clock = SystemClock> {
    clock: C,
    window: RateWindow,
    limit: u32,
    window_len: Duration,
}

impl RateGate<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for RateGate<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateGate<C> {
    pub fn with_clock(clock: C) -> Self {
        let start = clock.now();
        Self {
            clock,
            window: RateWindow::new(start),
            limit: RATE_LIMIT,
            window_len: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
        }
    }

    pub fn window(&self) -> &RateWindow {
        &self.window
    }

    pub fn state(&self) -> GateState {
        if self.window.request_count >= self.limit {
            GateState::Throttled
        } else {
            GateState::Open
        }
    }

    /// Runs before every dispatch. Returns how long the caller was blocked.
    pub fn acquire(&mut self) -> Duration {
        let elapsed = self
            .clock
            .now()
            .saturating_duration_since(self.window.window_start);
        if self.state() == GateState::Open {
            return Duration::ZERO;
        }
        let wait = self.window_len.saturating_sub(elapsed);
        if !wait.is_zero() {
            warn!(
                "Rate limit reached. Sleeping for {:.2}s...",
                wait.as_secs_f64()
            );
            self.clock.sleep(wait);
        } else {
            debug!("Rate limit reached after window elapsed; starting new window");
        }
        self.window.reset(self.clock.now());
        wait
    }

    /// Counts one successful dispatch against the current window.
    pub fn record_success(&mut self) {
        self.window.request_count = self.window.request_count.saturating_add(1);
    }
}
