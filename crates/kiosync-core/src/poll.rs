// ── Poll gate ──
//
// Converts the fixed, frequent scheduler tick into the user-configured
// refresh cadence, and enforces that at most one refresh cycle is in
// flight. The cadence check records the grant time of every attempt
// (successful or not): a dead tablet is retried once per configured
// interval, never once per tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Elapsed-time refresh gate with a re-entrancy guard.
///
/// `try_acquire` hands out a [`PollPermit`] only when the configured
/// interval has elapsed since the last grant *and* no permit is currently
/// outstanding. The guard is mandatory: a refresh includes a blocking
/// transport call whose duration is not bounded below the tick period.
#[derive(Debug)]
pub struct PollGate {
    interval: Duration,
    last_grant: Option<Instant>,
    in_flight: Arc<AtomicBool>,
}

/// Proof that the holder may run one refresh cycle.
///
/// Releases the in-flight flag on `Drop`, so every exit path -- early
/// return, error, panic unwind -- releases the guard.
#[derive(Debug)]
pub struct PollPermit {
    in_flight: Arc<AtomicBool>,
}

impl PollGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_grant: None,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request a refresh permit for a tick observed at `now`.
    ///
    /// The first request always qualifies on elapsed time. Returns `None`
    /// when the interval hasn't elapsed or a previous permit is still
    /// outstanding.
    pub fn try_acquire(&mut self, now: Instant) -> Option<PollPermit> {
        if let Some(last) = self.last_grant {
            if now.duration_since(last) < self.interval {
                return None;
            }
        }

        if self.in_flight.swap(true, Ordering::AcqRel) {
            return None;
        }

        self.last_grant = Some(now);
        Some(PollPermit {
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

impl Drop for PollPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(60);
    const TICK: Duration = Duration::from_secs(10);

    #[test]
    fn first_tick_grants_immediately() {
        let mut gate = PollGate::new(INTERVAL);
        assert!(gate.try_acquire(Instant::now()).is_some());
    }

    #[test]
    fn grants_bounded_by_window_over_interval() {
        let mut gate = PollGate::new(INTERVAL);
        let base = Instant::now();
        let window = Duration::from_secs(300);

        let mut grants = 0;
        let mut elapsed = Duration::ZERO;
        while elapsed <= window {
            if let Some(permit) = gate.try_acquire(base + elapsed) {
                grants += 1;
                drop(permit);
            }
            elapsed += TICK;
        }

        let bound = (window.as_secs() / INTERVAL.as_secs()) + 1;
        assert!(grants as u64 <= bound, "{grants} grants > bound {bound}");
        // ticks at 0, 60, 120, 180, 240, 300
        assert_eq!(grants, 6);
    }

    #[test]
    fn tick_before_interval_elapsed_is_noop() {
        let mut gate = PollGate::new(INTERVAL);
        let base = Instant::now();

        assert!(gate.try_acquire(base).is_some());
        assert!(gate.try_acquire(base + TICK).is_none());
        assert!(gate.try_acquire(base + INTERVAL - TICK).is_none());
        assert!(gate.try_acquire(base + INTERVAL).is_some());
    }

    #[test]
    fn outstanding_permit_blocks_new_grant() {
        let mut gate = PollGate::new(INTERVAL);
        let base = Instant::now();

        let permit = gate.try_acquire(base);
        assert!(permit.is_some());

        // Interval has elapsed twice over, but the cycle is still running.
        assert!(gate.try_acquire(base + INTERVAL * 2).is_none());

        drop(permit);
        assert!(gate.try_acquire(base + INTERVAL * 2).is_some());
    }

    #[test]
    fn permit_released_on_panic_unwind() {
        let mut gate = PollGate::new(INTERVAL);
        let base = Instant::now();

        let permit = gate.try_acquire(base).expect("first grant");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _held = permit;
            panic!("refresh blew up");
        }));
        assert!(result.is_err());

        assert!(gate.try_acquire(base + INTERVAL).is_some());
    }
}
