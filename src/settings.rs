//! Persisted viewer preferences (lives in the OS config directory).

use std::path::{Path, PathBuf};

use crate::model::{GanttConfig, ZoomLevel};
use crate::scene::ChartOptions;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub zoom: ZoomLevel,
    pub show_dependencies: bool,
    pub show_today_marker: bool,
    pub show_progress: bool,
    /// Schedule opened most recently; reloaded on the next launch.
    pub last_file: Option<PathBuf>,
    /// Layout constants; any subset may be overridden.
    pub chart: GanttConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            zoom: ZoomLevel::default(),
            show_dependencies: true,
            show_today_marker: true,
            show_progress: true,
            last_file: None,
            chart: GanttConfig::default(),
        }
    }
}

impl AppSettings {
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            show_dependencies: self.show_dependencies,
            show_today_marker: self.show_today_marker,
            show_progress: self.show_progress,
            ..ChartOptions::default()
        }
    }
}

/// Settings plus the file they are persisted to.
pub struct SettingsStore {
    pub settings: AppSettings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Load from the platform config directory. Missing or unreadable files
    /// fall back to defaults.
    pub fn open() -> Self {
        let path = Self::config_path();
        let settings = path.as_deref().map(load_settings).unwrap_or_default();
        Self { settings, path }
    }

    pub fn save(&self) {
        if let Some(path) = &self.path {
            save_settings(&self.settings, path);
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "GanttTimeline")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

pub fn load_settings(path: &Path) -> AppSettings {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AppSettings::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings");
            return AppSettings::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to parse settings");
        AppSettings::default()
    })
}

pub fn save_settings(settings: &AppSettings, path: &Path) {
    let json = match serde_json::to_string_pretty(settings) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize settings");
            return;
        }
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(path, json) {
        tracing::warn!(path = %path.display(), error = %e, "failed to save settings");
    }
}
