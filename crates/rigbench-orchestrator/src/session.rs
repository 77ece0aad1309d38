use rigbench_advisor::{Analyzer, SpecLookup};
use rigbench_ops::ResultStore;
use rigbench_types::{
    analysis::AnalysisRecord, hardware::HardwareSpec, saved::SavedResult, RigbenchError, Result,
};
use tracing::info;

use crate::validation_error;

/// Single-device flow: fill specs, analyze one game, keep what is worth comparing.
pub struct AnalysisSession<L, A, S>
where
    L: SpecLookup,
    A: Analyzer,
    S: ResultStore,
{
    lookup: L,
    analyzer: A,
    store: S,
    language: String,
}

impl<L, A, S> AnalysisSession<L, A, S>
where
    L: SpecLookup,
    A: Analyzer,
    S: ResultStore,
{
    pub fn new(lookup: L, analyzer: A, store: S, language: impl Into<String>) -> Self {
        Self {
            lookup,
            analyzer,
            store,
            language: language.into(),
        }
    }

    pub async fn lookup_specs(&self, device: &str) -> Result<HardwareSpec> {
        let device = device.trim();
        if device.is_empty() {
            return Err(validation_error("Please enter a device name."));
        }
        self.lookup.resolve(device, &self.language).await
    }

    pub async fn analyze(&self, spec: &HardwareSpec, game: &str) -> Result<AnalysisRecord> {
        let required = [game, spec.cpu.as_str(), spec.gpu.as_str(), spec.ram.as_str()];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(validation_error(
                "Please fill in the game, CPU, GPU and RAM fields.",
            ));
        }
        info!("Analyzing {game:?} on {}", spec.cpu);
        self.analyzer.analyze(spec, game.trim(), &self.language).await
    }

    /// Newest saves come first.
    pub fn save(
        &self,
        device_label: Option<&str>,
        spec: &HardwareSpec,
        game: &str,
        analysis: AnalysisRecord,
    ) -> Result<SavedResult> {
        let device_specs = match device_label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(label) => spec.labelled(label),
            None => spec.clone(),
        };
        let saved = SavedResult::new(game.trim(), device_specs, analysis);
        let mut results = self.store.load()?;
        results.insert(0, saved.clone());
        self.store.save(&results)?;
        info!("Saved result {} for comparison", saved.id);
        Ok(saved)
    }

    pub fn delete(&self, id: &str) -> Result<SavedResult> {
        let mut results = self.store.load()?;
        let position = results
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RigbenchError::NotFound(id.to_string()))?;
        let removed = results.remove(position);
        self.store.save(&results)?;
        Ok(removed)
    }

    pub fn saved(&self) -> Result<Vec<SavedResult>> {
        self.store.load()
    }
}
