use thiserror::Error;

/// Top-level error type for the `kiosync-api` crate.
///
/// Every variant is a transport-level failure: the request never produced a
/// usable HTTP 200 response. A 200 with an undecodable body is *not* an
/// error -- the client reports it as "no data" instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured host/port doesn't form a valid endpoint URL.
    #[error("Invalid tablet address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The tablet answered with a non-success status code.
    #[error("Tablet returned HTTP {status}")]
    Http { status: u16 },
}

/// Coarse classification of a transport failure, for logging.
///
/// Derived best-effort from reqwest predicates and the rendered error
/// chain -- the underlying OS error strings are platform-dependent, so
/// callers must only branch on success vs. error, never on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoRoute,
    Refused,
    TimedOut,
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRoute => write!(f, "no route to host"),
            Self::Refused => write!(f, "connection refused"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl Error {
    /// Classify this failure for log messages.
    pub fn failure_kind(&self) -> FailureKind {
        let Self::Transport(err) = self else {
            return FailureKind::Other;
        };

        if err.is_timeout() {
            return FailureKind::TimedOut;
        }

        let chain = error_chain_text(err);
        if chain.contains("no route to host") {
            FailureKind::NoRoute
        } else if chain.contains("connection refused") {
            FailureKind::Refused
        } else if chain.contains("timed out") {
            FailureKind::TimedOut
        } else {
            FailureKind::Other
        }
    }
}

/// Render the full source chain of an error, lowercased, for matching.
fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_classifies_as_other() {
        let err = Error::Http { status: 500 };
        assert_eq!(err.failure_kind(), FailureKind::Other);
    }

    #[test]
    fn failure_kind_display() {
        assert_eq!(FailureKind::NoRoute.to_string(), "no route to host");
        assert_eq!(FailureKind::Refused.to_string(), "connection refused");
        assert_eq!(FailureKind::TimedOut.to_string(), "timed out");
    }
}
