use serde::{Deserialize, Serialize};

/// Hardware part covered by a breakdown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    #[serde(rename = "Virtual RAM")]
    VirtualRam,
}

impl ComponentKind {
    pub fn label(self) -> &'static str {
        match self {
            ComponentKind::Cpu => "CPU",
            ComponentKind::Gpu => "GPU",
            ComponentKind::Ram => "RAM",
            ComponentKind::VirtualRam => "Virtual RAM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    pub component: ComponentKind,
    pub model: String,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FpsScenario {
    pub name: String,
    pub resolution: String,
    pub settings: String,
    pub avg_fps: String,
    pub analysis: String,
}

/// Structured performance estimate for one hardware + game combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub summary: String,
    pub key_factor: String,
    /// "CPU", "GPU", "RAM" or "Balanced".
    pub bottleneck_component: String,
    pub bottleneck_explanation: String,
    pub upgrade_suggestion: String,
    pub estimated_power_draw: String,
    #[serde(default)]
    pub performance_score: Option<u32>,
    #[serde(default)]
    pub component_breakdown: Vec<ComponentAnalysis>,
    #[serde(default)]
    pub scenarios: Vec<FpsScenario>,
}

impl AnalysisRecord {
    /// Score used for ordering; a missing score counts as zero.
    pub fn score(&self) -> u32 {
        self.performance_score.unwrap_or(0)
    }

    pub fn primary_scenario(&self) -> Option<&FpsScenario> {
        self.scenarios.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "summary": "Runs well.",
        "keyFactor": "GPU bound title",
        "bottleneckComponent": "GPU",
        "bottleneckExplanation": "The GPU limits frame rate.",
        "upgradeSuggestion": "Upgrade to an RTX 4060.",
        "estimatedPowerDraw": "350-450W",
        "performanceScore": 72,
        "componentBreakdown": [
            {"component": "CPU", "model": "Ryzen 5 5600", "analysis": "Plenty."},
            {"component": "Virtual RAM", "model": "16GB", "analysis": "Safety net."}
        ],
        "scenarios": [
            {"name": "1080p Low", "resolution": "1920x1080", "settings": "Low", "avgFps": "70-110 FPS", "analysis": "Smooth."}
        ]
    }"#;

    #[test]
    fn parses_model_response() {
        let record: AnalysisRecord = serde_json::from_str(SAMPLE).expect("parse record");
        assert_eq!(record.score(), 72);
        assert_eq!(
            record.component_breakdown[1].component,
            ComponentKind::VirtualRam
        );
        assert_eq!(
            record.primary_scenario().map(|s| s.avg_fps.as_str()),
            Some("70-110 FPS")
        );
    }

    #[test]
    fn missing_score_counts_as_zero() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).expect("parse value");
        value
            .as_object_mut()
            .expect("object")
            .remove("performanceScore");
        let record: AnalysisRecord = serde_json::from_value(value).expect("parse record");
        assert_eq!(record.performance_score, None);
        assert_eq!(record.score(), 0);
    }
}
