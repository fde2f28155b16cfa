// ── Core error types ──
//
// Every remote failure collapses into `RemoteRequestFailure`: network
// unreachability, non-success status, and malformed responses are one
// kind. The `kind` field keeps just enough detail for a one-shot CLI to
// pick an exit code; the sync layer never looks at it.

use thiserror::Error;

/// Coarse cause of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never reached the service.
    Unreachable,
    /// The service answered with a non-success status.
    Status(u16),
    /// Anything else: bad URL, TLS setup, undecodable body.
    Other,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{operation} failed: {reason}")]
    RemoteRequestFailure {
        operation: &'static str,
        reason: String,
        kind: FailureKind,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Wrap an API error with the name of the operation that produced it.
    pub fn remote(operation: &'static str, err: &roster_api::Error) -> Self {
        let kind = if err.is_unreachable() {
            FailureKind::Unreachable
        } else if let Some(status) = err.status() {
            FailureKind::Status(status)
        } else {
            FailureKind::Other
        };
        Self::RemoteRequestFailure {
            operation,
            reason: err.to_string(),
            kind,
        }
    }

    /// Failure kind, if this is a remote failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::RemoteRequestFailure { kind, .. } => Some(*kind),
            Self::Config { .. } => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<roster_api::Error> for CoreError {
    fn from(err: roster_api::Error) -> Self {
        match err {
            roster_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            roster_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Base URL cannot carry API paths: {url}"),
            },
            roster_api::Error::Tls(message) => CoreError::Config { message },
            other => CoreError::remote("request", &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_keep_their_code() {
        let api = roster_api::Error::Status {
            status: 404,
            body: String::new(),
        };
        let err = CoreError::remote("get_by_id", &api);
        assert_eq!(err.failure_kind(), Some(FailureKind::Status(404)));
        assert!(err.to_string().starts_with("get_by_id failed"));
    }

    #[test]
    fn tls_setup_is_a_config_error() {
        let err = CoreError::from(roster_api::Error::Tls("bad pem".into()));
        assert!(matches!(err, CoreError::Config { .. }));
        assert_eq!(err.failure_kind(), None);
    }

    #[test]
    fn malformed_body_is_a_remote_failure() {
        let err = CoreError::from(roster_api::Error::Deserialization {
            message: "expected array".into(),
            body: "{}".into(),
        });
        assert_eq!(err.failure_kind(), Some(FailureKind::Other));
    }
}
