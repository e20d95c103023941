//! Shipa client error types

use thiserror::Error;

/// Errors surfaced by the Shipa control-plane client.
///
/// Every failure is terminal for the invocation: there is no retry and no
/// rollback. If a create succeeds but the verifying re-fetch fails, the
/// invocation still reports failure even though the server state was
/// mutated.
#[derive(Error, Debug)]
pub enum ShipaError {
    #[error("shipa client auth failed: {0}")]
    AuthFailed(String),

    #[error("resource '{resource}' not found: {response}")]
    NotFound { resource: String, response: String },

    #[error("write rejected by server: {response}")]
    WriteFailed { response: String },

    #[error("deploy rejected by security scan: {response}")]
    SecurityGate { response: String },

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShipaError>;
