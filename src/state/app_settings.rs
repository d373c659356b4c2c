use crate::playback::DEFAULT_SPEED_MS;
use chrono::Local;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Playback speed in milliseconds — persisted across sessions.
    pub speed_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            speed_ms: DEFAULT_SPEED_MS,
        }
    }
}

/// On-disk shape of the settings file.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    speed_ms: u64,
    saved_at: String,
}

impl AppSettings {
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Ok(content) = std::fs::read_to_string(settings_path())
            && let Ok(file) = serde_json::from_str::<SettingsFile>(&content)
        {
            settings.speed_ms = file.speed_ms;
        }
        settings
    }

    pub fn save(&self) -> Result<(), String> {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
        }
        let file = SettingsFile {
            speed_ms: self.speed_ms,
            saved_at: Local::now().to_rfc3339(),
        };
        let payload = serde_json::to_string_pretty(&file)
            .map_err(|e| format!("serialize settings failed: {e}"))?;
        std::fs::write(&path, payload).map_err(|e| format!("write settings failed: {e}"))?;
        Ok(())
    }
}

fn settings_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("swooptui").join("settings.json");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join("swooptui")
            .join("settings.json");
    }
    PathBuf::from("swooptui_settings.json")
}
