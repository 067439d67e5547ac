// ── Core error types ──
//
// User-facing errors from kiosync-core. Consumers never see reqwest
// internals directly; the `From<kiosync_api::Error>` impl translates
// transport failures into domain-appropriate variants.

use kiosync_api::FailureKind;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach tablet: {reason}")]
    Unreachable { reason: String },

    #[error("Tablet request timed out")]
    Timeout,

    #[error("Tablet API error: {message}")]
    Api { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<kiosync_api::Error> for CoreError {
    fn from(err: kiosync_api::Error) -> Self {
        match &err {
            kiosync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid tablet address: {e}"),
            },
            kiosync_api::Error::Http { status } => CoreError::Api {
                message: format!("tablet returned HTTP {status}"),
            },
            kiosync_api::Error::Transport(_) => match err.failure_kind() {
                FailureKind::TimedOut => CoreError::Timeout,
                kind => CoreError::Unreachable {
                    reason: format!("{kind}: {err}"),
                },
            },
        }
    }
}
