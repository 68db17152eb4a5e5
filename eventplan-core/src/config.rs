//! User configuration at ~/.config/eventplan/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AUTOSAVE_DELAY_MS;
use crate::error::{PlanError, PlanResult};
use crate::export::DEFAULT_EXPORT_FILE;

/// Overrides `data_dir` when set.
pub const DATA_DIR_ENV: &str = "EVENTPLAN_DATA_DIR";

fn default_autosave_delay() -> String {
    humantime::format_duration(Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS)).to_string()
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Where the saved schedule lives. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Quiet period before an automatic save, e.g. "1s" or "500ms".
    #[serde(default = "default_autosave_delay")]
    pub autosave_delay: String,

    /// Default output file for `eventplan export`.
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            data_dir: None,
            autosave_delay: default_autosave_delay(),
            export_path: default_export_path(),
        }
    }
}

impl PlanConfig {
    pub fn config_path() -> PlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
            .join("eventplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> PlanResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> PlanResult<Self> {
        if !path.exists() {
            return Ok(PlanConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| PlanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Directory for saved state: `$EVENTPLAN_DATA_DIR`, then `data_dir`, then
    /// the platform data directory.
    pub fn data_path(&self) -> PlanResult<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(expand(&dir));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(expand(dir));
        }
        dirs::data_dir()
            .map(|d| d.join("eventplan"))
            .ok_or_else(|| PlanError::Config("Could not determine data directory".into()))
    }

    pub fn autosave_delay(&self) -> PlanResult<Duration> {
        humantime::parse_duration(&self.autosave_delay).map_err(|e| {
            PlanError::Config(format!("Invalid autosave_delay '{}': {}", self.autosave_delay, e))
        })
    }

    pub fn export_path(&self) -> PathBuf {
        expand(&self.export_path)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanResult<()> {
        let contents = format!(
            "\
# eventplan configuration

# Where the saved schedule is kept:
# data_dir = \"~/.local/share/eventplan\"

# Quiet period before changes are saved automatically:
# autosave_delay = \"{}\"

# Default file written by `eventplan export`:
# export_path = \"{}\"
",
            default_autosave_delay(),
            DEFAULT_EXPORT_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
