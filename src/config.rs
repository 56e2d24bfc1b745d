//! Configuration loaded from an optional TOML file.
//!
//! Every section and field is optional; missing values fall back to the defaults
//! below.

use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::heuristics::score::BinScore;
use crate::placement::{ExtentBound, OverlapTest, PlacementEngine};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Config, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, LoadError> {
        path.map_or_else(|| Ok(Config::default()), Config::load)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.search.max_steps == 0 {
            return Err(LoadError::Validation {
                message: "search.max_steps must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn engine(&self) -> PlacementEngine {
        PlacementEngine::new(
            self.search.overlap,
            self.search.extent,
            self.search.max_steps,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub overlap: OverlapTest,

    #[serde(default)]
    pub extent: ExtentBound,

    /// Steps after which a single item search gives up on the bin.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapTest::default(),
            extent: ExtentBound::default(),
            max_steps: default_max_steps(),
        }
    }
}

const fn default_max_steps() -> u64 {
    100_000
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankingConfig {
    #[serde(default)]
    pub bin_score: BinScore,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Split items with a quantity above one into that many separate items.
    #[serde(default)]
    pub expand_quantity: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
