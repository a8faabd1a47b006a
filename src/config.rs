use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What happens to subtrees that an edit detaches from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Detached nodes stay in the node map, unreachable but still exported.
    #[default]
    Retain,
    /// Detached nodes are removed right after the edit that detached them.
    Sweep,
}

/// Editor settings, typically read from a small JSON file.
///
/// Every field is optional in the file; missing ones fall back to the
/// defaults below.
///
/// ```json
/// { "history_capacity": 50, "orphan_policy": "sweep", "export_dir": "exports" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_capacity: usize,
    pub orphan_policy: OrphanPolicy,
    pub export_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            orphan_policy: OrphanPolicy::Retain,
            export_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.history_capacity));
        }
        Ok(())
    }
}
