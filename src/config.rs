use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    FlowError, Result,
    sync::{AuthorizationConfig, DEFAULT_STATUS_CAPACITY},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// workflow engine connection
    #[serde(default)]
    pub engine: EngineConfig,
    /// number of workflows whose sync status is remembered, defaults to 1024.
    /// Past this, evicted workflows report `unsynced` until saved again.
    #[serde(default = "default_status_capacity")]
    pub status_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// engine REST root, e.g. `http://localhost:5678/api/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// how the credential is sent
    #[serde(default)]
    pub auth: AuthorizationConfig,
}

fn default_status_capacity() -> u64 {
    DEFAULT_STATUS_CAPACITY
}

fn default_base_url() -> String {
    "http://localhost:5678/api/v1".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: AuthorizationConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            status_capacity: DEFAULT_STATUS_CAPACITY,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|err| FlowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), err)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        if config.status_capacity == 0 {
            return Err(FlowError::Config("status_capacity must be greater than 0".to_string()));
        }
        Ok(config)
    }
}
