//! Display-settings reader. JSON is the native shape; YAML is accepted for
//! hand-written project files.

use std::fs;
use std::path::Path;

use equiptab_core::config::DisplaySettings;

use crate::error::Result;

use super::extension;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Yaml,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Self {
        match extension(path).as_deref() {
            Some("yaml") | Some("yml") => SettingsFormat::Yaml,
            _ => SettingsFormat::Json,
        }
    }
}

pub fn parse_settings(text: &str, format: SettingsFormat) -> Result<DisplaySettings> {
    let settings = match format {
        SettingsFormat::Json => DisplaySettings::from_json_str(text)?,
        SettingsFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(settings)
}

pub fn read_settings(path: impl AsRef<Path>) -> Result<DisplaySettings> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_settings(&text, SettingsFormat::from_path(path))
}
