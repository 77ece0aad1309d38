use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use rigbench_types::{saved::SavedResult, Result};
use tracing::{info, warn};

use crate::storage_error;

pub const SAVED_RESULTS_FILE: &str = "saved_results.json";

/// Ordered collection of saved analyses that survives between sessions.
pub trait ResultStore: Send + Sync {
    fn load(&self) -> Result<Vec<SavedResult>>;
    fn save(&self, results: &[SavedResult]) -> Result<()>;
}

/// Stores the whole collection as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SAVED_RESULTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for JsonFileStore {
    fn load(&self) -> Result<Vec<SavedResult>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|err| {
            storage_error(format!("unable to read {}: {err}", self.path.display()))
        })?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|err| {
            warn!("Saved results at {:?} are unreadable: {err}", self.path);
            storage_error(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    fn save(&self, results: &[SavedResult]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                storage_error(format!("unable to create {}: {err}", parent.display()))
            })?;
        }
        let doc = serde_json::to_string_pretty(results)
            .map_err(|err| storage_error(format!("failed to encode saved results: {err}")))?;
        fs::write(&self.path, doc).map_err(|err| {
            storage_error(format!("unable to write {}: {err}", self.path.display()))
        })?;
        info!("Persisted {} saved results to {:?}", results.len(), self.path);
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    results: Arc<Mutex<Vec<SavedResult>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<SavedResult>) -> Self {
        Self {
            results: Arc::new(Mutex::new(results)),
        }
    }
}

impl ResultStore for MemoryStore {
    fn load(&self) -> Result<Vec<SavedResult>> {
        self.results
            .lock()
            .map(|results| results.clone())
            .map_err(|_| storage_error("failed to lock memory store"))
    }

    fn save(&self, results: &[SavedResult]) -> Result<()> {
        let mut guard = self
            .results
            .lock()
            .map_err(|_| storage_error("failed to lock memory store"))?;
        *guard = results.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigbench_types::{
        analysis::AnalysisRecord, hardware::HardwareSpec, saved::SavedResult,
    };

    fn saved(game: &str, score: u32) -> SavedResult {
        SavedResult::new(
            game,
            HardwareSpec::new("Pixel 8", "Mali-G715", "8GB"),
            AnalysisRecord {
                summary: "s".into(),
                key_factor: "k".into(),
                bottleneck_component: "GPU".into(),
                bottleneck_explanation: "e".into(),
                upgrade_suggestion: "u".into(),
                estimated_power_draw: "10W".into(),
                performance_score: Some(score),
                component_breakdown: Vec::new(),
                scenarios: Vec::new(),
            },
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn round_trips_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::in_dir(dir.path().join("nested"));
        let results = vec![saved("Genshin Impact", 70), saved("PUBG Mobile", 85)];
        store.save(&results).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded, results);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "not json").expect("write");
        assert!(matches!(
            store.load(),
            Err(rigbench_types::RigbenchError::Storage(_))
        ));
    }

    #[test]
    fn memory_store_replaces_contents() {
        let store = MemoryStore::with_results(vec![saved("A", 1)]);
        store.save(&[saved("B", 2), saved("C", 3)]).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(
            loaded.iter().map(|r| r.game_name.as_str()).collect::<Vec<_>>(),
            ["B", "C"]
        );
    }
}
