//! Operational helpers: logging setup and on-disk persistence.

use std::path::PathBuf;

use rigbench_types::{config::OpsConfig, RigbenchError, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod store;
mod translations;

pub use store::{JsonFileStore, MemoryStore, ResultStore, SAVED_RESULTS_FILE};
pub use translations::{TranslationStore, TranslationTable, BUILTIN_LANGUAGES, TRANSLATIONS_FILE};

pub fn init_tracing(config: &OpsConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.log_level.clone())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| RigbenchError::Ops(format!("failed to create log filter: {err}")))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| RigbenchError::Ops(format!("tracing init error: {err}")))?;
    Ok(())
}

pub fn ensure_data_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    std::fs::create_dir_all(&dir)
        .map_err(|err| RigbenchError::Ops(format!("failed to create data dir: {err}")))?;
    info!("Data directory ready at {:?}", dir);
    Ok(dir)
}

pub fn storage_error(message: impl Into<String>) -> RigbenchError {
    RigbenchError::Storage(message.into())
}
