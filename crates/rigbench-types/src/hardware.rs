use serde::{Deserialize, Serialize};

/// Hardware resolved for a device, or typed in by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSpec {
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_mhz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_ram: Option<String>,
}

impl HardwareSpec {
    pub fn new(cpu: impl Into<String>, gpu: impl Into<String>, ram: impl Into<String>) -> Self {
        Self {
            cpu: cpu.into(),
            gpu: gpu.into(),
            ram: ram.into(),
            ram_mhz: None,
            virtual_ram: None,
        }
    }

    pub fn with_ram_mhz(mut self, mhz: impl Into<String>) -> Self {
        self.ram_mhz = Some(mhz.into());
        self
    }

    /// Copy of this spec whose `cpu` field shows the user-facing device label.
    pub fn labelled(&self, label: &str) -> Self {
        Self {
            cpu: label.to_string(),
            ..self.clone()
        }
    }

    /// RAM speed if the lookup produced a usable value.
    pub fn known_ram_mhz(&self) -> Option<&str> {
        self.ram_mhz
            .as_deref()
            .map(str::trim)
            .filter(|mhz| !mhz.is_empty() && !mhz.eq_ignore_ascii_case("N/A"))
    }
}
