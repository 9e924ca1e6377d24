use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::persist::project_dirs;

pub const DEFAULT_COUNT: usize = 5;

/// Optional `config.yaml`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories or files searched for question sets when none are given
    /// on the command line.
    pub question_dirs: Vec<PathBuf>,
    pub default_count: usize,
    /// Shared passcode for the entry gate. No gate passcode when unset.
    pub passcode: Option<String>,
    pub user_name: Option<String>,
    /// Where stats and the gate flag are kept.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_dirs: Vec::new(),
            default_count: DEFAULT_COUNT,
            passcode: None,
            user_name: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load `explicit` if given (it must exist), otherwise the per-user
    /// config file if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.yaml"))
}
