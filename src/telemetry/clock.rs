use std::time::{Duration, Instant};
/// Monotonic time since some fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}
/// Wall-clock time measured from construction.
pub struct Stopwatch {
    origin: Instant,
}
impl Stopwatch {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}
impl Clock for Stopwatch {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
/// Hand-driven clock; clones share the same time so a test can keep a handle.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Duration>>,
}
#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
    pub fn set(&self, to: Duration) {
        debug_assert!(to >= self.now.get(), "clock must not run backwards");
        self.now.set(to);
    }
}
#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
