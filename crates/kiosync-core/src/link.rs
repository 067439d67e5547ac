// ── Connection health state machine ──
//
// Tri-state link health with transition-only notifications: a sustained
// outage logs exactly one error, recovery exactly one info line. The
// current state is observable through a `watch` channel (the hub-alerting
// seam, also read by the `status` command).
//
// Single-writer by contract: only the refresh/dispatch call site that just
// completed a transport call updates the monitor, behind the controller's
// lock.

use kiosync_api::FailureKind;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Observable connectivity of the tablet link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// No transport call has completed yet.
    Unknown,
    /// Last transport call succeeded.
    Connected,
    /// Last transport call failed; `reason` is the first classified
    /// failure of the outage.
    Degraded { reason: String },
}

impl LinkState {
    pub fn is_degraded(&self) -> bool {
        matches!(self, LinkState::Degraded { .. })
    }
}

/// Single-writer health tracker.
pub struct LinkMonitor {
    state: LinkState,
    tx: watch::Sender<LinkState>,
}

impl LinkMonitor {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LinkState::Unknown);
        Self {
            state: LinkState::Unknown,
            tx,
        }
    }

    /// Subscribe to state transitions. Repeated identical outcomes do not
    /// wake subscribers.
    pub fn subscribe(&self) -> watch::Receiver<LinkState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> &LinkState {
        &self.state
    }

    /// Record a successful transport call.
    ///
    /// Returns `true` when this emitted a "restored" notification, i.e.
    /// the link was `Degraded` before.
    pub fn record_success(&mut self) -> bool {
        match self.state {
            LinkState::Connected => false,
            LinkState::Unknown => {
                debug!("tablet link established");
                self.set(LinkState::Connected);
                false
            }
            LinkState::Degraded { .. } => {
                info!("tablet connection restored");
                self.set(LinkState::Connected);
                true
            }
        }
    }

    /// Record a failed transport call.
    ///
    /// Returns `true` when this emitted a "degraded" notification, i.e.
    /// the link was not already `Degraded`. Subsequent failures during the
    /// same outage are logged at debug level only.
    pub fn record_failure(&mut self, kind: FailureKind, detail: &str) -> bool {
        if self.state.is_degraded() {
            debug!(%kind, "tablet still unreachable: {detail}");
            return false;
        }

        error!(%kind, "tablet unreachable: {detail}");
        self.set(LinkState::Degraded {
            reason: kind.to_string(),
        });
        true
    }

    fn set(&mut self, state: LinkState) {
        self.state = state.clone();
        self.tx.send_replace(state);
    }
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        let monitor = LinkMonitor::new();
        assert_eq!(*monitor.state(), LinkState::Unknown);
    }

    #[test]
    fn first_success_connects_without_restored_notification() {
        let mut monitor = LinkMonitor::new();
        assert!(!monitor.record_success());
        assert_eq!(*monitor.state(), LinkState::Connected);
    }

    #[test]
    fn one_notification_across_consecutive_failures() {
        let mut monitor = LinkMonitor::new();
        monitor.record_success();

        let notifications: usize = (0..5)
            .map(|_| monitor.record_failure(FailureKind::Refused, "connect error") as usize)
            .sum();

        assert_eq!(notifications, 1);
        assert!(monitor.state().is_degraded());
    }

    #[test]
    fn one_restored_notification_after_outage() {
        let mut monitor = LinkMonitor::new();
        monitor.record_success();
        monitor.record_failure(FailureKind::TimedOut, "deadline elapsed");
        monitor.record_failure(FailureKind::TimedOut, "deadline elapsed");

        assert!(monitor.record_success());
        assert!(!monitor.record_success());
        assert_eq!(*monitor.state(), LinkState::Connected);
    }

    #[test]
    fn outage_keeps_first_reason() {
        let mut monitor = LinkMonitor::new();
        monitor.record_failure(FailureKind::NoRoute, "unreachable");
        monitor.record_failure(FailureKind::Refused, "connect error");

        assert_eq!(
            *monitor.state(),
            LinkState::Degraded {
                reason: "no route to host".into()
            }
        );
    }

    #[test]
    fn watch_channel_tracks_transitions() {
        let mut monitor = LinkMonitor::new();
        let rx = monitor.subscribe();

        monitor.record_failure(FailureKind::Refused, "connect error");
        assert!(rx.borrow().is_degraded());

        monitor.record_success();
        assert_eq!(*rx.borrow(), LinkState::Connected);
    }
}
