use thiserror::Error;

/// Unified error type for the helm crates.
#[derive(Error, Debug)]
pub enum HelmError {
    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Message catalog errors ─────────────────────────────────
    #[error("message catalog error: {0}")]
    Catalog(String),

    // ── Registration errors ────────────────────────────────────
    #[error("sub-command registration failed: {reason}")]
    Registration { reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HelmError>;
