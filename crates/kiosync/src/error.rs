//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and per-category exit codes.

use miette::Diagnostic;
use thiserror::Error;

use kiosync_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("No tablet host configured")]
    #[diagnostic(
        code(kiosync::no_host),
        help(
            "Pass --host, set KIOSYNC_HOST, or add `host = \"192.168.1.200\"`\n\
             to the config file at {path}"
        )
    )]
    NoHost { path: String },

    #[error("Cannot reach the tablet")]
    #[diagnostic(
        code(kiosync::unreachable),
        help(
            "Check that the tablet is on the network and remote administration\n\
             is enabled in the kiosk-browser settings. Details: {reason}"
        )
    )]
    Unreachable { reason: String },

    #[error("Tablet request timed out")]
    #[diagnostic(
        code(kiosync::timeout),
        help("The tablet accepted the connection but never answered. Try --timeout 10.")
    )]
    Timeout,

    #[error("{0}")]
    #[diagnostic(code(kiosync::core))]
    Core(CoreError),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unreachable { reason } => CliError::Unreachable { reason },
            CoreError::Timeout => CliError::Timeout,
            other => CliError::Core(other),
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoHost { .. } => exit_code::USAGE,
            CliError::Unreachable { .. } => exit_code::CONNECTION,
            CliError::Timeout => exit_code::TIMEOUT,
            CliError::Core(_) => exit_code::GENERAL,
        }
    }
}
