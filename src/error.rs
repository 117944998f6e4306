//! Custom error types for the parameter panel.
//!
//! This module defines the primary error type, `PanelError`, for the whole
//! crate. Using the `thiserror` crate, it provides a centralized and
//! consistent way to handle the different failures the engine can meet, from
//! I/O and configuration issues to rejected parameter writes.
//!
//! ## Error Hierarchy
//!
//! `PanelError` is an enum that consolidates the failure sources:
//!
//! - **`Config`**: Wraps errors from the `config` crate, typically file
//!   parsing or format issues in the settings file.
//! - **`Io`**: Wraps standard `std::io::Error`, covering catalogue and
//!   parameter file reads.
//! - **`Catalogue`**: A malformed or unreadable metadata catalogue. Failures
//!   scoped to a single parameter's metadata never surface here; the
//!   classifier records them as per-parameter skips instead.
//! - **`UnknownParameter`**: A write was attempted against a name the store
//!   does not hold.
//! - **`StoreRejected`**: The store refused a write for a known name.
//! - **`LinkUnavailable`**: The parameter link had no active connection when
//!   a list refresh was requested. Recoverable by retrying the refresh.
//! - **`CommitFailed`**: Batch-level commit result naming every parameter
//!   whose write did not land. Individual failures never abort the batch;
//!   this variant is how the caller learns which names need remediation.
//!
//! Nothing here is fatal to the process; every failure is recoverable by
//! re-running the refresh or the commit.

use thiserror::Error;

/// Convenience alias for results using the panel error type.
pub type PanelResult<T> = std::result::Result<T, PanelError>;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("Store rejected write to '{name}': {reason}")]
    StoreRejected { name: String, reason: String },

    #[error("Parameter link unavailable: {0}")]
    LinkUnavailable(String),

    #[error("Commit failed for: {}", .0.join(", "))]
    CommitFailed(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_failure_names_every_casualty() {
        let err = PanelError::CommitFailed(vec!["RATE_P".into(), "RATE_I".into()]);
        let message = err.to_string();
        assert!(message.contains("RATE_P"));
        assert!(message.contains("RATE_I"));
    }

    #[test]
    fn store_rejection_carries_name_and_reason() {
        let err = PanelError::StoreRejected {
            name: "TRIM_AUTO".into(),
            reason: "device offline".into(),
        };
        assert!(err.to_string().contains("TRIM_AUTO"));
        assert!(err.to_string().contains("device offline"));
    }
}
