use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub redundancy: RedundancyConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedundancyConfig {
    /// Identity at or above which two sequences are redundant
    pub cutoff: f64,
    /// Resolve redundancy between key species records instead of keeping both
    pub discard_key: bool,
    /// Quality metric columns, most significant first (lower is better)
    pub metric_columns: Vec<String>,
    /// Species protected from removal unless `discard_key` is set
    pub key_species: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Worker threads (-1 = all available)
    pub num_threads: i64,
    pub silent: bool,
}

impl Default for RedundancyConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.95,
            discard_key: false,
            metric_columns: Vec::new(),
            key_species: Vec::new(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            num_threads: -1,
            silent: false,
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::PruneError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::PruneError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::PruneError> {
    let contents = to_toml(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn to_toml(config: &Config) -> Result<String, crate::PruneError> {
    toml::to_string_pretty(config)
        .map_err(|e| crate::PruneError::Config(format!("Failed to serialize config: {}", e)))
}
