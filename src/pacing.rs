//! Request pacing toward the upstream API.
//!
//! The upstream is asked politely: consecutive requests start at least
//! `min_interval` apart and never overlap. Time comes from a [`Clock`], so the
//! policy can be exercised without real sleeps.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic time plus the ability to wait.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, dur: Duration);
}

/// Real clock: `Instant::now` and a blocking thread sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// Fake clock for tests: `sleep` advances time immediately and is recorded.
///
/// Clones share the same timeline, so a test can keep a handle while the
/// pacer owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    inner: Arc<Mutex<ManualState>>,
}

#[derive(Debug, Default)]
struct ManualState {
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            inner: Arc::new(Mutex::new(ManualState::default())),
        }
    }

    /// Move time forward without recording a sleep (simulates work).
    pub fn advance(&self, dur: Duration) {
        self.lock().elapsed += dur;
    }

    /// Every pause requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        // A poisoned fake clock only happens after a panicking test; keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.lock().elapsed
    }

    fn sleep(&self, dur: Duration) {
        let mut st = self.lock();
        st.elapsed += dur;
        st.sleeps.push(dur);
    }
}

/// Minimum-interval policy between request starts.
///
/// The gap is measured start to start, not as a fixed pause after a request
/// finishes: time spent waiting for a slow response counts toward it, so a first
/// request that takes longer than `min_interval` lets the next one start at once.
#[derive(Debug)]
pub struct RequestPacer<C: Clock = SystemClock> {
    min_interval: Duration,
    clock: C,
    starts: Vec<Instant>,
}

impl RequestPacer<SystemClock> {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, SystemClock)
    }
}

impl<C: Clock> RequestPacer<C> {
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        Self {
            min_interval,
            clock,
            starts: Vec::new(),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until the next request may start, then mark it as started.
    ///
    /// Returns the recorded start instant.
    pub fn wait_turn(&mut self) -> Instant {
        if let Some(last) = self.starts.last().copied() {
            let elapsed = self.clock.now().saturating_duration_since(last);
            if elapsed < self.min_interval {
                let pause = self.min_interval - elapsed;
                log::debug!("pacing upstream requests: waiting {:?}", pause);
                self.clock.sleep(pause);
            }
        }
        let start = self.clock.now();
        self.starts.push(start);
        start
    }

    /// Start instants of every request made so far.
    pub fn starts(&self) -> &[Instant] {
        &self.starts
    }
}
