use thiserror::Error;

pub type Result<T, E = RigbenchError> = std::result::Result<T, E>;

/// Unified error type covering common failure scenarios across subsystems.
#[derive(Debug, Error)]
pub enum RigbenchError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Lookup(String),
    #[error("{0}")]
    Analysis(String),
    #[error("{0}")]
    Translation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("operational error: {0}")]
    Ops(String),
    #[error("no saved result with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
