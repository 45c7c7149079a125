//! Error types for the standby controller workflow

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a run the controller accepted
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the controller rejects the CIMC credentials or the join request
pub const EXIT_REJECTED: i32 = 1;
/// Exit code for configuration, transport and schema faults
pub const EXIT_FAULT: i32 = 2;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for a standby controller run
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A configuration document is missing, unreadable or incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP request could not be completed
    #[error("request to controller failed")]
    Transport(#[from] reqwest::Error),

    /// The controller refused the administrator credentials
    #[error("controller login failed: HTTP {status}")]
    LoginRejected { status: u16, payload: Value },

    /// A success response did not have the expected shape
    #[error("malformed {stage} response: {detail}")]
    MalformedResponse { stage: &'static str, detail: String },

    /// The controller could not verify the CIMC credentials
    #[error("CIMC credentials are invalid: HTTP {status}")]
    ValidationRejected { status: u16, payload: Value },

    /// The controller refused the join request
    #[error("failed to add standby APIC: HTTP {status}")]
    JoinRejected { status: u16, payload: Value },

    /// The session artifact could not be read or written
    #[error("session file {}", .path.display())]
    Session {
        path: PathBuf,
        #[source]
        source: SessionFileError,
    },
}

impl Error {
    /// Create a malformed response error for the given stage
    pub fn malformed(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            stage,
            detail: detail.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// Only the two business rejections map to 1. Everything else is a fault.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ValidationRejected { .. } | Error::JoinRejected { .. } => EXIT_REJECTED,
            _ => EXIT_FAULT,
        }
    }

    /// Response body the controller sent with a rejection, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::LoginRejected { payload, .. }
            | Error::ValidationRejected { payload, .. }
            | Error::JoinRejected { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Configuration document errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {detail}", .path.display())]
    Parse { path: PathBuf, detail: String },

    #[error("missing required key '{key}' in {}", .path.display())]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("invalid value for '{key}' in {}: expected {expected}", .path.display())]
    InvalidValue {
        path: PathBuf,
        key: &'static str,
        expected: &'static str,
    },

    #[error("'{key}' must not be empty")]
    EmptyValue { key: &'static str },
}

/// Underlying cause of a session artifact failure
#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("missing token attribute")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejections_exit_with_one() {
        let err = Error::ValidationRejected {
            status: 400,
            payload: json!({"error": "bad creds"}),
        };
        assert_eq!(err.exit_code(), EXIT_REJECTED);

        let err = Error::JoinRejected {
            status: 500,
            payload: json!({}),
        };
        assert_eq!(err.exit_code(), EXIT_REJECTED);
    }

    #[test]
    fn test_faults_exit_with_two() {
        let err = Error::malformed("verify", "serialNumber missing");
        assert_eq!(err.exit_code(), EXIT_FAULT);

        let err: Error = ConfigError::EmptyValue { key: "apic_user" }.into();
        assert_eq!(err.exit_code(), EXIT_FAULT);

        let err = Error::LoginRejected {
            status: 401,
            payload: json!({}),
        };
        assert_eq!(err.exit_code(), EXIT_FAULT);
    }

    #[test]
    fn test_payload_only_on_rejections() {
        let err = Error::JoinRejected {
            status: 409,
            payload: json!({"error": "node exists"}),
        };
        assert_eq!(err.payload(), Some(&json!({"error": "node exists"})));
        assert!(Error::malformed("login", "x").payload().is_none());
    }

    #[test]
    fn test_missing_key_message_names_file() {
        let err = ConfigError::MissingKey {
            path: PathBuf::from("apic.yaml"),
            key: "apic_ip",
        };
        assert_eq!(err.to_string(), "missing required key 'apic_ip' in apic.yaml");
    }
}
