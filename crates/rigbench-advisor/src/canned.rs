use std::collections::BTreeMap;

use async_trait::async_trait;
use rigbench_types::{
    analysis::{AnalysisRecord, ComponentAnalysis, ComponentKind, FpsScenario},
    hardware::HardwareSpec,
    Result,
};
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::{analysis_error, lookup_error, Analyzer, SpecLookup, Translator};

const CPUS: [&str; 4] = [
    "Qualcomm Snapdragon 8 Gen 2",
    "Apple M2",
    "AMD Ryzen 5 5600",
    "Intel Core i7-12700H",
];
const GPUS: [&str; 4] = ["Adreno 740", "Apple 10-core GPU", "RTX 3060", "RTX 3070 Ti Laptop"];
const RAM: [&str; 4] = ["8GB", "16GB", "12GB", "32GB"];
const RAM_MHZ: [&str; 4] = ["N/A", "6400", "3200", "4800"];
const GENERIC_NAMES: [&str; 5] = ["phone", "laptop", "pc", "tablet", "computer"];

/// Deterministic offline advisor for dry runs; answers are derived from the inputs.
#[derive(Debug, Clone, Default)]
pub struct CannedAdvisor {
    latency: Duration,
}

impl CannedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

fn fingerprint(parts: &[&str]) -> u64 {
    // FNV-1a, stable across runs and toolchains.
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for byte in part.to_lowercase().bytes().chain(std::iter::once(0)) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
    }
    hash
}

fn is_too_generic(device: &str) -> bool {
    let trimmed = device.trim();
    trimmed.chars().count() < 3
        || GENERIC_NAMES
            .iter()
            .any(|generic| trimmed.eq_ignore_ascii_case(generic))
}

#[async_trait]
impl SpecLookup for CannedAdvisor {
    async fn resolve(&self, device: &str, _language: &str) -> Result<HardwareSpec> {
        self.pause().await;
        if is_too_generic(device) {
            info!("Canned lookup rejected generic device name {device:?}");
            return Err(lookup_error(device));
        }
        let slot = (fingerprint(&[device]) % CPUS.len() as u64) as usize;
        Ok(HardwareSpec::new(CPUS[slot], GPUS[slot], RAM[slot]).with_ram_mhz(RAM_MHZ[slot]))
    }
}

#[async_trait]
impl Analyzer for CannedAdvisor {
    async fn analyze(
        &self,
        spec: &HardwareSpec,
        game: &str,
        _language: &str,
    ) -> Result<AnalysisRecord> {
        self.pause().await;
        if game.trim().is_empty() {
            return Err(analysis_error("Failed to get analysis: no game given."));
        }
        let hash = fingerprint(&[&spec.cpu, &spec.gpu, &spec.ram, game]);
        let score = 20 + (hash % 80) as u32;
        let bottleneck = match hash % 4 {
            0 => "CPU",
            1 => "GPU",
            2 => "RAM",
            _ => "Balanced",
        };
        let high_fps = score + score / 2;
        let low_fps = score / 2 + 10;

        info!("Canned analysis for {game:?} on {} scored {score}", spec.cpu);
        Ok(AnalysisRecord {
            summary: format!("{game} should be playable with a score of {score}."),
            key_factor: format!("{bottleneck} performance decides how {game} feels."),
            bottleneck_component: bottleneck.to_string(),
            bottleneck_explanation: format!("Offline estimate: {bottleneck} limits this setup."),
            upgrade_suggestion: match bottleneck {
                "Balanced" => "No single upgrade stands out.".to_string(),
                part => format!("Upgrade the {part} first."),
            },
            estimated_power_draw: format!("{}-{}W", 150 + score * 2, 200 + score * 3),
            performance_score: Some(score),
            component_breakdown: vec![
                ComponentAnalysis {
                    component: ComponentKind::Cpu,
                    model: spec.cpu.clone(),
                    analysis: "Offline estimate.".into(),
                },
                ComponentAnalysis {
                    component: ComponentKind::Gpu,
                    model: spec.gpu.clone(),
                    analysis: "Offline estimate.".into(),
                },
                ComponentAnalysis {
                    component: ComponentKind::Ram,
                    model: spec.ram.clone(),
                    analysis: "Offline estimate.".into(),
                },
                ComponentAnalysis {
                    component: ComponentKind::VirtualRam,
                    model: spec.virtual_ram.clone().unwrap_or_else(|| "N/A".into()),
                    analysis: "Offline estimate.".into(),
                },
            ],
            scenarios: vec![
                FpsScenario {
                    name: "1080p Low Settings".into(),
                    resolution: "1920x1080".into(),
                    settings: "Low".into(),
                    avg_fps: format!("{}-{} FPS", high_fps, high_fps + 20),
                    analysis: "Competitive frame rates.".into(),
                },
                FpsScenario {
                    name: "1080p High Settings".into(),
                    resolution: "1920x1080".into(),
                    settings: "High".into(),
                    avg_fps: format!("{}-{} FPS", low_fps, low_fps + 15),
                    analysis: "Visual quality first.".into(),
                },
            ],
        })
    }
}

#[async_trait]
impl Translator for CannedAdvisor {
    async fn translate(
        &self,
        base: &BTreeMap<String, String>,
        target_language: &str,
    ) -> Result<BTreeMap<String, String>> {
        self.pause().await;
        Ok(base
            .iter()
            .map(|(key, value)| (key.clone(), format!("[{target_language}] {value}")))
            .collect())
    }
}
