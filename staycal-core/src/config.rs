//! Export configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;
use tracing::info;

use crate::error::{StayCalError, StayCalResult};
use crate::ics::DEFAULT_PROD_ID;
use crate::normalize::{DEFAULT_TITLE, NormalizeOptions};
use crate::reservation::ReservationStatus;

fn default_prod_id() -> String {
    DEFAULT_PROD_ID.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration at ~/.config/staycal/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StayCalConfig {
    #[serde(default = "default_prod_id")]
    pub prod_id: String,

    #[serde(default)]
    pub calendar_name: Option<String>,

    /// Use guest names as event titles
    #[serde(default = "default_true")]
    pub show_guest_names: bool,

    #[serde(default = "default_title")]
    pub default_title: String,

    /// Reservation statuses that produce no events (e.g. "cancelled")
    #[serde(default)]
    pub exclude_statuses: Vec<ReservationStatus>,
}

impl Default for StayCalConfig {
    fn default() -> Self {
        StayCalConfig {
            prod_id: default_prod_id(),
            calendar_name: None,
            show_guest_names: true,
            default_title: default_title(),
            exclude_statuses: Vec::new(),
        }
    }
}

impl StayCalConfig {
    pub fn config_path() -> StayCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StayCalError::Config("Could not determine config directory".into()))?
            .join("staycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented default file on
    /// first run.
    pub fn load() -> StayCalResult<Self> {
        Self::load_or_init(&Self::config_path()?)
    }

    /// Load from `path`, creating the commented default file there if it is
    /// missing.
    pub fn load_or_init(path: &Path) -> StayCalResult<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
            info!(path = %path.display(), "Created default config");
        }

        Self::load_from(path)
    }

    /// Load from an explicit path, expanding a leading `~`. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> StayCalResult<Self> {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());

        let config: StayCalConfig = Config::builder()
            .add_source(File::from(expanded).required(false))
            .build()
            .map_err(|e| StayCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StayCalError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            show_guest_names: self.show_guest_names,
            default_title: self.default_title.clone(),
            exclude_statuses: self.exclude_statuses.clone(),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> StayCalResult<()> {
        let contents = format!(
            "\
# staycal configuration

# Product identifier written as PRODID:
# prod_id = \"{DEFAULT_PROD_ID}\"

# Calendar display name (X-WR-CALNAME):
# calendar_name = \"Beach House\"

# Use guest names as event titles:
# show_guest_names = true

# Title used when the guest name is missing or hidden:
# default_title = \"{DEFAULT_TITLE}\"

# Reservation statuses that produce no events:
# exclude_statuses = [\"cancelled\", \"denied\"]
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StayCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StayCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
