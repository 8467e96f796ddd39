//! Text-generation collaborator contract.
//!
//! The pipeline treats the backend as a replaceable black box: one call,
//! best-effort JSON back. Whoever constructs the parser decides whether a
//! backend exists at all; nothing in the core reads ambient configuration.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("backend is disabled in configuration")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("backend returned an empty completion")]
    Empty,
}

/// One completion attempt. Callers treat any error as a signal to fall back
/// to the deterministic parser; they never retry.
pub trait TextGenerationBackend: Send + Sync {
    fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, BackendError>;
}
