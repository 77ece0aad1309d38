use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{RigbenchError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub language: String,
}

impl AdvisorConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            api_key: None,
            api_key_env: "API_KEY".into(),
            timeout_secs: 60,
            language: "en".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub event_capacity: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self { event_capacity: 256 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    pub log_level: String,
    pub data_dir: String,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            data_dir: ".rigbench".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RigbenchConfig {
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub matrix: MatrixConfig,
    #[serde(default)]
    pub ops: OpsConfig,
}

impl RigbenchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            RigbenchError::Configuration(format!(
                "unable to read config file {}: {err}",
                path_ref.display()
            ))
        })?;
        toml::from_str(&contents).map_err(|err| {
            RigbenchError::Configuration(format!(
                "failed to parse config file {}: {err}",
                path_ref.display()
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.advisor.endpoint.trim().is_empty() {
            return Err(RigbenchError::Configuration(
                "advisor.endpoint must not be empty".into(),
            ));
        }
        if self.advisor.model.trim().is_empty() {
            return Err(RigbenchError::Configuration(
                "advisor.model must not be empty".into(),
            ));
        }
        if self.advisor.timeout_secs == 0 {
            return Err(RigbenchError::Configuration(
                "advisor.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.advisor.language.trim().is_empty() {
            return Err(RigbenchError::Configuration(
                "advisor.language must not be empty".into(),
            ));
        }
        if self.matrix.event_capacity == 0 {
            return Err(RigbenchError::Configuration(
                "matrix.event_capacity must be greater than zero".into(),
            ));
        }
        if self.ops.data_dir.trim().is_empty() {
            return Err(RigbenchError::Configuration(
                "ops.data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}
