// Settings Engine
// Loads, saves, updates and resets the bookmarker settings.
// Settings live in a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::BookmarkerSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BookmarkerSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BookmarkerSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BookmarkerSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// `path_override` replaces the default `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: BookmarkerSettings::default(),
        }
    }

    /// Turns `"marketplace.timeout_secs"` into the JSON pointer `/marketplace/timeout_secs`.
    fn pointer_for(key: &str) -> Result<String, SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }
        if key.split('.').any(str::is_empty) {
            return Err(SettingsError::InvalidKey(format!("Malformed key '{}'", key)));
        }
        Ok(format!("/{}", key.replace('.', "/")))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed one is a serialization error.
    fn load(&mut self) -> Result<BookmarkerSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!("no settings file at {}, using defaults", self.config_path);
            self.settings = BookmarkerSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    /// Saves the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &BookmarkerSettings {
        &self.settings
    }

    /// Updates one setting addressed by a dot-notation key, then saves.
    ///
    /// The key must name an existing field. The new value is validated by
    /// deserializing the whole document back into `BookmarkerSettings`.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let pointer = Self::pointer_for(key)?;

        let mut document = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let slot = document
            .pointer_mut(&pointer)
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        *slot = value;

        self.settings = serde_json::from_value(document).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.save()
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BookmarkerSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
