//! Global learnplan configuration.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::config::SyncConfig;
use crate::error::{PlanError, PlanResult};
use crate::store::Columns;

static DEFAULT_SCHEDULE_PATH: &str = "~/learning/dev-schedule.csv";
static DEFAULT_PROVIDER: &str = "google";

fn default_schedule_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEDULE_PATH)
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// Configuration at ~/.config/learnplan/config.toml
///
/// Every field has a default, so a missing file is the same as an empty one.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LearnplanConfig {
    #[serde(default = "default_schedule_path")]
    pub schedule_path: PathBuf,

    /// Name of the calendar provider binary (`learnplan-provider-{provider}`)
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub calendar: SyncConfig,

    #[serde(default)]
    pub columns: Columns,
}

impl Default for LearnplanConfig {
    fn default() -> Self {
        LearnplanConfig {
            schedule_path: default_schedule_path(),
            provider: default_provider(),
            calendar: SyncConfig::default(),
            columns: Columns::default(),
        }
    }
}

impl LearnplanConfig {
    pub fn config_path() -> PlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
            .join("learnplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/learnplan/config.toml, writing a commented template
    /// there first if it does not exist yet.
    pub fn load() -> PlanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::debug!("No config at {}, writing template", config_path.display());
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> PlanResult<Self> {
        Self::build(File::from(path).required(false))
    }

    pub fn parse(content: &str) -> PlanResult<Self> {
        Self::build(File::from_str(content, FileFormat::Toml))
    }

    fn build<S>(source: S) -> PlanResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| PlanError::Config(format!("Invalid config file: {e}")))?
            .try_deserialize()
            .map_err(|e| PlanError::Config(format!("Invalid config file: {e}")))
    }

    /// Schedule path with `~` and environment variables expanded.
    pub fn schedule_path(&self) -> PlanResult<PathBuf> {
        expand_path(&self.schedule_path)
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanResult<()> {
        let contents = format!(
            "\
# learnplan configuration

# CSV file holding the plan:
# schedule_path = \"{}\"

# Calendar provider (binary learnplan-provider-<name> on PATH):
# provider = \"{}\"

# [calendar]
# name = \"{}\"
# time_zone = \"{}\"
# color_id = \"{}\"
# reminder_minutes = [1440, 60]
",
            DEFAULT_SCHEDULE_PATH,
            DEFAULT_PROVIDER,
            crate::config::sync_config::DEFAULT_CALENDAR_NAME,
            crate::config::sync_config::DEFAULT_TIME_ZONE,
            crate::config::sync_config::DEFAULT_COLOR_ID,
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

/// Expand `~` and `$VARS` in a path.
pub fn expand_path(path: &Path) -> PlanResult<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| PlanError::Config(format!("Could not expand path '{raw}': {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
