//! Cancellable quiet-period timer used to coalesce resize bursts
//!
//! The clock is passed in by the caller so the state machine stays
//! independent of the GUI toolkit.

use std::time::{Duration, Instant};

#[derive(Debug)]
enum State<T> {
    Idle,
    Pending { deadline: Instant, value: T },
}

/// `Idle -> Pending -> Idle`; every `notify` while pending restarts the timer
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    state: State<T>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            state: State::Idle,
        }
    }

    /// Cancel any pending deadline and schedule a new one for `value`
    pub fn notify(&mut self, now: Instant, value: T) {
        self.state = State::Pending {
            deadline: now + self.quiet,
            value,
        };
    }

    /// Fire at most once per burst, handing back the latest value
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.state {
            State::Pending { deadline, .. } if now >= *deadline => {
                match std::mem::replace(&mut self.state, State::Idle) {
                    State::Pending { value, .. } => Some(value),
                    State::Idle => None,
                }
            }
            _ => None,
        }
    }

    /// Time left before the pending deadline, `None` when idle
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            State::Pending { deadline, .. } => Some(deadline.saturating_duration_since(now)),
            State::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(250);

    #[test]
    fn test_idle_never_fires() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(QUIET);
        let start = Instant::now();
        assert_eq!(debouncer.poll(start + Duration::from_secs(10)), None);
        assert_eq!(debouncer.remaining(start), None);
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.notify(start, (640, 480));
        assert_eq!(debouncer.poll(start + Duration::from_millis(249)), None);
        assert_eq!(debouncer.poll(start + QUIET), Some((640, 480)));
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
        assert_eq!(debouncer.remaining(start), None);
    }

    #[test]
    fn test_burst_coalesces_into_one_render() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();
        let mut fired = Vec::new();

        // A resize every 50ms for one second, then silence. Poll every 10ms.
        let mut last_notify = start;
        for tick in 0..=200u64 {
            let now = start + Duration::from_millis(tick * 10);
            if tick * 10 <= 1000 && (tick * 10) % 50 == 0 {
                debouncer.notify(now, tick);
                last_notify = now;
            }
            if let Some(value) = debouncer.poll(now) {
                fired.push((now, value));
            }
        }

        assert_eq!(fired.len(), 1);
        let (when, value) = fired[0];
        assert_eq!(value, 100);
        assert_eq!(when.duration_since(last_notify), QUIET);
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.notify(start, ());
        assert_eq!(debouncer.remaining(start), Some(QUIET));
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(100)),
            Some(Duration::from_millis(150))
        );
        assert_eq!(debouncer.remaining(start + Duration::from_secs(1)), Some(Duration::ZERO));
    }
}
