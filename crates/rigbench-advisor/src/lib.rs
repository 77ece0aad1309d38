//! Generative-AI collaborators: device spec lookup, game analysis, UI translation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rigbench_types::{analysis::AnalysisRecord, hardware::HardwareSpec, RigbenchError, Result};

mod canned;
mod gemini;
mod prompts;
mod schema;

pub use canned::CannedAdvisor;
pub use gemini::GeminiClient;

/// Resolves a free-text device name into concrete hardware.
#[async_trait]
pub trait SpecLookup: Send + Sync {
    async fn resolve(&self, device: &str, language: &str) -> Result<HardwareSpec>;
}

/// Estimates how a game performs on the given hardware.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, spec: &HardwareSpec, game: &str, language: &str)
        -> Result<AnalysisRecord>;
}

/// Translates a flat string table, keeping every key.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        base: &BTreeMap<String, String>,
        target_language: &str,
    ) -> Result<BTreeMap<String, String>>;
}

pub fn lookup_error(device: &str) -> RigbenchError {
    RigbenchError::Lookup(format!(
        "Failed to find specs for \"{device}\". The device may be obscure or the name too generic."
    ))
}

pub fn analysis_error(message: impl Into<String>) -> RigbenchError {
    RigbenchError::Analysis(message.into())
}

pub fn translation_error(target_language: &str) -> RigbenchError {
    RigbenchError::Translation(format!(
        "Failed to translate UI to {target_language}. The model may be busy or the request could not be processed."
    ))
}
