use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{analysis::AnalysisRecord, hardware::HardwareSpec};

/// Analysis tagged with provenance so it can be compared or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResult {
    pub id: String,
    pub game_name: String,
    pub device_specs: HardwareSpec,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: AnalysisRecord,
}

impl SavedResult {
    pub fn new(game_name: impl Into<String>, device_specs: HardwareSpec, analysis: AnalysisRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            game_name: game_name.into(),
            device_specs,
            saved_at: Utc::now(),
            analysis,
        }
    }

    /// Label shown for the device; batch runs store the typed device name here.
    pub fn device_label(&self) -> &str {
        &self.device_specs.cpu
    }

    pub fn score(&self) -> u32 {
        self.analysis.score()
    }
}
