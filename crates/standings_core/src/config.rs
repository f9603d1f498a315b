use std::env;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "STANDINGS_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "./standings_data";

/// Where snapshot files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl EngineConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `STANDINGS_DATA_DIR`, trimmed; unset or blank means the default.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(DATA_DIR_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }
}
