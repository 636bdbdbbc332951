//! # Configuration
//!
//! Optional `tickseq.toml`:
//!
//! ```toml
//! [intro]
//! max_ticks = 10000
//!
//! [[location_lists]]
//! name = "pokecenter"
//! bit = 0
//! maps = [[2, 2], [2, 3]]
//! ```
//!
//! When any `[[location_lists]]` table is present, the lists replace the
//! built-in classifier set entirely.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tickseq_core::{ClassifierEntry, ClassifierSet, LocationList, MapLocation, TickseqError};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tickseq.toml";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Default tick budget for a headless intro run.
pub const DEFAULT_MAX_TICKS: u64 = 10_000;

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TickseqConfig {
    pub intro: IntroConfig,
    pub location_lists: Vec<LocationListConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    /// Ticks allowed before a headless run gives up.
    pub max_ticks: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// One location list and the save-warp bit it drives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocationListConfig {
    pub name: String,
    pub bit: u8,
    /// `[group, num]` pairs.
    #[serde(default)]
    pub maps: Vec<[u8; 2]>,
}

// =============================================================================
// LOADING
// =============================================================================

impl TickseqConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, TickseqError> {
        toml::from_str(contents).map_err(|e| TickseqError::ConfigError(e.to_string()))
    }

    /// Load `path`, or `tickseq.toml` from the working directory.
    ///
    /// An explicit path must exist. Without one, a missing default file
    /// yields the built-in configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, TickseqError> {
        let path = match path {
            Some(p) => p,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("no config file, using built-in defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            TickseqError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(TickseqError::ConfigError(format!(
                "Config size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TickseqError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), lists = config.location_lists.len(), "config loaded");
        Ok(config)
    }

    /// The classifier set: configured lists, or the built-in save-warp lists.
    pub fn classifier_set(&self) -> Result<ClassifierSet, TickseqError> {
        if self.location_lists.is_empty() {
            return ClassifierSet::save_warp_defaults();
        }

        let entries = self
            .location_lists
            .iter()
            .map(|cfg| {
                let maps = cfg.maps.iter().map(|&[g, n]| MapLocation::new(g, n));
                Ok(ClassifierEntry {
                    list: LocationList::new(cfg.name.clone(), maps)?,
                    bit: cfg.bit,
                })
            })
            .collect::<Result<Vec<_>, TickseqError>>()?;
        ClassifierSet::new(entries)
    }
}

// =============================================================================
// TESTS
// =============================================================================
