//! Hermod error types.
//!
//! These cover construction and configuration failures only. Request
//! handling never returns an error: every failure mode is folded into a
//! [`GatewayResponse`](crate::GatewayResponse) by the component that
//! detects it, so nothing propagates past the orchestrator boundary.

/// Hermod error types.
#[derive(Debug, thiserror::Error)]
pub enum HermodError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hermod operations.
pub type Result<T> = std::result::Result<T, HermodError>;
