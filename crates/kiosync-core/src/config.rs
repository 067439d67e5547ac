// ── Runtime session configuration ──
//
// Describes *how* to reach one tablet. Carries credentials and polling
// cadence, but never touches disk -- the binary resolves config files and
// environment variables into a `TabletConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

/// Default tablet control port.
pub const DEFAULT_PORT: u16 = 2323;

/// Default full-refresh cadence.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

/// Floor for the refresh cadence. Anything lower would hammer the tablet
/// on every scheduler tick.
pub const MIN_REFRESH: Duration = Duration::from_secs(1);

/// Configuration for one tablet session.
///
/// Created once at startup and owned by the [`Controller`](crate::Controller)
/// for the life of the process.
#[derive(Debug, Clone)]
pub struct TabletConfig {
    /// Tablet hostname or IP address.
    pub host: String,
    /// Control port (defaults to 2323).
    pub port: u16,
    /// Remote-admin username. `None` or empty means "don't send one".
    pub username: Option<String>,
    /// Remote-admin password. May be empty; always sent.
    pub password: SecretString,
    /// Full-refresh cadence, clamped to [`MIN_REFRESH`].
    pub refresh_interval: Duration,
    /// Per-request transport timeout.
    pub timeout: Duration,
}

impl TabletConfig {
    /// Config with defaults for everything but the host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: None,
            password: String::new().into(),
            refresh_interval: DEFAULT_REFRESH,
            timeout: kiosync_api::DEFAULT_TIMEOUT,
        }
    }

    /// Set the refresh cadence, clamping to the floor.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval.max(MIN_REFRESH);
        self
    }
}
