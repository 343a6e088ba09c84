//! Deferred execution for gestures: cancellable deadlines and a throttle.
//!
//! Timers are plain values owned by a gesture session. The host drives them by
//! passing the current time into the controller; a timer that is dropped with
//! its session can never fire afterwards.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};

/// A cancellable one-shot deadline.
#[derive(Debug, Clone, Default)]
pub struct ScopedTimer {
    deadline: Option<Instant>,
}

impl ScopedTimer {
    /// A timer that is not armed.
    pub fn idle() -> Self {
        Self { deadline: None }
    }

    /// A timer armed to fire `delay` after `now`.
    pub fn armed(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: Some(now + delay),
        }
    }

    /// Arm (or re-arm) the timer for an absolute deadline.
    pub fn arm_at(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the timer if its deadline has passed. Disarms it when it fires.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Rate limiter that runs at most once per interval and keeps the newest
/// coalesced value for a single trailing run.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_run: Option<Instant>,
    pending: Option<T>,
    timer: ScopedTimer,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: None,
            timer: ScopedTimer::idle(),
        }
    }

    /// Offer a value. Returns it back if it may execute now; otherwise it
    /// replaces any pending value and a trailing run is scheduled.
    pub fn submit(&mut self, now: Instant, value: T) -> Option<T> {
        match self.last_run {
            Some(last) if now < last + self.interval => {
                self.pending = Some(value);
                if !self.timer.is_armed() {
                    self.timer.arm_at(last + self.interval);
                }
                None
            }
            _ => {
                self.run_at(now);
                Some(value)
            }
        }
    }

    /// Release the pending value once its trailing deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if !self.timer.fire_if_due(now) {
            return None;
        }
        let value = self.pending.take()?;
        self.last_run = Some(now);
        Some(value)
    }

    /// Release the pending value immediately, regardless of the deadline.
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        let value = self.pending.take()?;
        self.run_at(now);
        Some(value)
    }

    /// Drop any pending value and disarm the trailing timer.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.timer.cancel();
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    fn run_at(&mut self, now: Instant) {
        self.last_run = Some(now);
        self.pending = None;
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_scoped_timer_fires_once() {
        let t0 = Instant::now();
        let mut timer = ScopedTimer::armed(t0, ms(200));
        assert!(!timer.fire_if_due(t0 + ms(199)));
        assert!(timer.fire_if_due(t0 + ms(200)));
        assert!(!timer.fire_if_due(t0 + ms(400)));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = ScopedTimer::armed(t0, ms(10));
        timer.cancel();
        assert!(!timer.fire_if_due(t0 + ms(1000)));
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn test_throttle_leading_edge() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(50));
        assert_eq!(throttle.submit(t0, 1), Some(1));
        assert_eq!(throttle.submit(t0 + ms(10), 2), None);
        assert_eq!(throttle.submit(t0 + ms(20), 3), None);
        assert_eq!(throttle.next_deadline(), Some(t0 + ms(50)));
        assert_eq!(throttle.poll(t0 + ms(49)), None);
        // Only the newest coalesced value runs.
        assert_eq!(throttle.poll(t0 + ms(50)), Some(3));
        assert_eq!(throttle.poll(t0 + ms(200)), None);
    }

    #[test]
    fn test_throttle_submit_after_interval_supersedes_pending() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(50));
        throttle.submit(t0, 1);
        throttle.submit(t0 + ms(30), 2);
        assert_eq!(throttle.submit(t0 + ms(60), 3), Some(3));
        assert!(!throttle.has_pending());
        assert_eq!(throttle.poll(t0 + ms(100)), None);
    }

    #[test]
    fn test_throttle_execution_bound() {
        let t0 = Instant::now();
        let interval = ms(50);
        let mut throttle = Throttle::new(interval);
        let mut runs = 0;
        let mut last = None;

        // 100 moves, 3ms apart; poll on every event like a host would.
        for i in 0..100u64 {
            let now = t0 + ms(i * 3);
            if let Some(v) = throttle.poll(now) {
                runs += 1;
                last = Some(v);
            }
            if let Some(v) = throttle.submit(now, i) {
                runs += 1;
                last = Some(v);
            }
        }
        let end = t0 + ms(99 * 3) + interval;
        if let Some(v) = throttle.poll(end) {
            runs += 1;
            last = Some(v);
        }

        let elapsed = (end - t0).as_millis() as f64;
        let bound = (elapsed / interval.as_millis() as f64).ceil() as usize + 1;
        assert!(runs <= bound, "{runs} runs exceeds bound {bound}");
        assert_eq!(last, Some(99));
    }

    #[test]
    fn test_throttle_flush_and_cancel() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(50));
        throttle.submit(t0, "a");
        throttle.submit(t0 + ms(5), "b");
        assert_eq!(throttle.flush(t0 + ms(6)), Some("b"));
        assert_eq!(throttle.flush(t0 + ms(7)), None);

        throttle.submit(t0 + ms(8), "c");
        throttle.cancel();
        assert_eq!(throttle.poll(t0 + ms(500)), None);
    }
}
