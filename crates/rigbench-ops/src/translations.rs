use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use rigbench_types::Result;
use tracing::info;

use crate::storage_error;

pub const TRANSLATIONS_FILE: &str = "translations.json";

/// Languages shipped with the application; never written to disk.
pub const BUILTIN_LANGUAGES: [&str; 2] = ["en", "tr"];

/// Language key -> (string key -> translated text).
pub type TranslationTable = BTreeMap<String, BTreeMap<String, String>>;

/// Persists user-added UI translations.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    path: PathBuf,
}

impl TranslationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(TRANSLATIONS_FILE))
    }

    pub fn load(&self) -> Result<TranslationTable> {
        if !self.path.exists() {
            return Ok(TranslationTable::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|err| {
            storage_error(format!("unable to read {}: {err}", self.path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            storage_error(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    /// Writes custom languages only; removes the file when none remain.
    pub fn save(&self, table: &TranslationTable) -> Result<()> {
        let custom: TranslationTable = table
            .iter()
            .filter(|(lang, _)| !BUILTIN_LANGUAGES.contains(&lang.as_str()))
            .map(|(lang, strings)| (lang.clone(), strings.clone()))
            .collect();

        if custom.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|err| {
                    storage_error(format!("unable to remove {}: {err}", self.path.display()))
                })?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                storage_error(format!("unable to create {}: {err}", parent.display()))
            })?;
        }
        let doc = serde_json::to_string_pretty(&custom)
            .map_err(|err| storage_error(format!("failed to encode translations: {err}")))?;
        fs::write(&self.path, doc).map_err(|err| {
            storage_error(format!("unable to write {}: {err}", self.path.display()))
        })?;
        info!("Persisted {} custom languages", custom.len());
        Ok(())
    }
}
