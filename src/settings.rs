use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SettingsError;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub default_rows: i64,
    pub default_cols: i64,
    /// Side of one grid cell in points.
    pub cell_size: f32,
    pub confirm_clear: bool,
    pub accent_color: [u8; 4],
    pub show_json_panel: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_rows: 10,
            default_cols: 10,
            cell_size: 25.0,
            confirm_clear: true,
            accent_color: [84, 168, 196, 255],
            show_json_panel: true,
        }
    }
}

impl EditorSettings {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "floorplan-studio").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = serde_json::from_str(text)?;
        settings.cell_size = settings.cell_size.clamp(12.0, 64.0);
        Ok(settings)
    }

    /// Loads the user's settings file. A missing file is normal; a broken
    /// one is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring settings file");
                Self::default()
            }
        }
    }
}
