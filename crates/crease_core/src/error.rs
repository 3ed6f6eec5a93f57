use thiserror::Error;

/// Errors raised at the configuration and JSON boundaries.
///
/// The recalculation itself is total and never produces one of these.
#[derive(Error, Debug)]
pub enum CreaseError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },
}

pub type Result<T> = std::result::Result<T, CreaseError>;
