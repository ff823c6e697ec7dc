//! Console configuration, read from environment variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::{Ledger, TargetLevels};
use stockroom_observability::LogFormat;

pub const ENV_SEED_FILE: &str = "STOCKROOM_SEED_FILE";
pub const ENV_RETENTION: &str = "STOCKROOM_RETENTION";
pub const ENV_LOG_FORMAT: &str = "STOCKROOM_LOG_FORMAT";

/// Items every fresh session starts with when no seed file is given.
pub const DEFAULT_STOCK: [&str; 4] = [
    "Laptop Dell",
    "Monitor LG",
    "Myszka Logitech",
    "Klawiatura Mechaniczna",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read seed file {}: {source}", .path.display())]
    ReadSeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {}: {source}", .path.display())]
    ParseSeed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid seed data: {0}")]
    InvalidSeed(#[from] DomainError),

    #[error("invalid STOCKROOM_RETENTION value '{0}' (expected session or reset)")]
    InvalidRetention(String),

    #[error("invalid STOCKROOM_LOG_FORMAT value: {0}")]
    InvalidLogFormat(String),
}

/// Who decides how long a ledger lives between interactions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Retention {
    /// One ledger for the whole session.
    #[default]
    Session,
    /// Re-seed the ledger before every interaction.
    Reset,
}

impl Retention {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "session" => Ok(Retention::Session),
            "reset" => Ok(Retention::Reset),
            _ => Err(ConfigError::InvalidRetention(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Retention::Session => "session",
            Retention::Reset => "reset",
        }
    }
}

/// Starting stock and targets, as found in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub stock: BTreeMap<String, i64>,
    #[serde(default)]
    pub targets: BTreeMap<String, i64>,
}

impl Seed {
    /// One unit of each default item, no targets.
    pub fn builtin() -> Self {
        Self {
            stock: DEFAULT_STOCK.iter().map(|name| (name.to_string(), 1)).collect(),
            targets: BTreeMap::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSeed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::ParseSeed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate and materialize the seed.
    pub fn build(&self) -> Result<(Ledger, TargetLevels), DomainError> {
        let ledger = Ledger::from_stock(self.stock.iter().map(|(k, v)| (k.as_str(), *v)))?;
        let targets = TargetLevels::from_pairs(self.targets.iter().map(|(k, v)| (k.as_str(), *v)))?;
        Ok((ledger, targets))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub seed: Seed,
    pub seed_source: SeedSource,
    pub retention: Retention,
    pub log_format: LogFormat,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset or blank variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (seed, seed_source) = match var(ENV_SEED_FILE) {
            Some(path) => {
                let path = PathBuf::from(path.trim());
                (Seed::load(&path)?, SeedSource::File(path))
            }
            None => (Seed::builtin(), SeedSource::Builtin),
        };

        // Fail at startup rather than on the first interaction.
        seed.build()?;

        let retention = match var(ENV_RETENTION) {
            Some(raw) => Retention::parse(&raw)?,
            None => Retention::default(),
        };

        let log_format = match var(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>().map_err(ConfigError::InvalidLogFormat)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            seed,
            seed_source,
            retention,
            log_format,
        })
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            seed: Seed::builtin(),
            seed_source: SeedSource::Builtin,
            retention: Retention::default(),
            log_format: LogFormat::default(),
        }
    }
}
