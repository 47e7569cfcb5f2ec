//! Projection configuration and the project display settings document.
//!
//! `ProjectionConfig` holds the knobs of the projection itself (block-listed
//! fields, decimal digits, export file name). `DisplaySettings` is the
//! project configuration document that supplies the ordered allow-list of
//! display columns and may override parts of `ProjectionConfig`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::names::normalize_field_name;
use crate::schema::CellRenderer;

pub const DEFAULT_EXPORT_FILENAME: &str = "EquipmentList.csv";
pub const DEFAULT_TITLE: &str = "Equipment List";
pub const DEFAULT_DECIMAL_DIGITS: u32 = 2;

/// Structural/geometric fields whose columns are never shown by default.
pub const DEFAULT_HIDDEN_FIELDS: [&str; 4] = ["geometry", "geometryStream", "bBoxHigh", "bBoxLow"];

/// Normalized names of fields rendered in a styled container.
pub const DEFAULT_STYLED_FIELDS: [&str; 1] = ["manufactureraddress"];

/// Upper bound for `decimal_digits`; 10^15 still scales an f64 exactly.
pub const MAX_DECIMAL_DIGITS: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Raw field names whose columns get `visible = false`. Exact match.
    pub hidden_fields: Vec<String>,

    /// Field names (compared normalized) that get the styled-container hint.
    pub styled_fields: Vec<String>,

    /// Numbers are truncated toward zero to this many decimal digits.
    pub decimal_digits: u32,

    /// File name offered for the CSV download.
    pub export_filename: String,

    /// CSV field separator. Must be a single ASCII character.
    pub separator: char,

    /// Table title shown above the grid.
    pub title: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            hidden_fields: DEFAULT_HIDDEN_FIELDS.iter().map(|s| s.to_string()).collect(),
            styled_fields: DEFAULT_STYLED_FIELDS.iter().map(|s| s.to_string()).collect(),
            decimal_digits: DEFAULT_DECIMAL_DIGITS,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            separator: ',',
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ProjectionConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `EQUIPTAB_EXPORT_FILENAME`: CSV download file name
    /// - `EQUIPTAB_SEPARATOR`: CSV separator (first character is used)
    /// - `EQUIPTAB_DECIMAL_DIGITS`: truncation digits
    /// - `EQUIPTAB_HIDDEN_FIELDS`: comma-separated raw field names
    /// - `EQUIPTAB_STYLED_FIELDS`: comma-separated field names
    /// - `EQUIPTAB_TITLE`: table title
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("EQUIPTAB_EXPORT_FILENAME") {
            if !s.trim().is_empty() {
                cfg.export_filename = s;
            }
        }

        if let Ok(s) = std::env::var("EQUIPTAB_SEPARATOR") {
            if let Some(c) = s.chars().next() {
                cfg.separator = c;
            }
        }

        if let Ok(s) = std::env::var("EQUIPTAB_DECIMAL_DIGITS") {
            if let Ok(v) = s.parse::<u32>() {
                cfg.decimal_digits = v;
            }
        }

        if let Ok(s) = std::env::var("EQUIPTAB_HIDDEN_FIELDS") {
            cfg.hidden_fields = split_list(&s);
        }

        if let Ok(s) = std::env::var("EQUIPTAB_STYLED_FIELDS") {
            cfg.styled_fields = split_list(&s);
        }

        if let Ok(s) = std::env::var("EQUIPTAB_TITLE") {
            cfg.title = s;
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if !self.separator.is_ascii() {
            return Err(Error::Config(format!(
                "separator must be an ASCII character, got {:?}",
                self.separator
            )));
        }
        if self.decimal_digits > MAX_DECIMAL_DIGITS {
            return Err(Error::Config(format!(
                "decimal_digits must be at most {}, got {}",
                MAX_DECIMAL_DIGITS, self.decimal_digits
            )));
        }
        if self.export_filename.trim().is_empty() {
            return Err(Error::Config("export_filename must not be empty".into()));
        }
        Ok(())
    }

    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden_fields.iter().any(|f| f == field)
    }

    pub fn renderer_for(&self, field: &str) -> Option<CellRenderer> {
        let normalized = normalize_field_name(field);
        self.styled_fields
            .iter()
            .any(|f| normalize_field_name(f) == normalized)
            .then_some(CellRenderer::StyledContainer)
    }
}

/// The project display-settings document.
///
/// ```json
/// {
///   "properties": {
///     "DisplayProperties": [
///       { "PropertyName": "TAG_NO", "DisplayStatus": "Show" },
///       { "PropertyName": "geometry", "DisplayStatus": "Hide" }
///     ]
///   },
///   "settings": { "decimal_digits": 3 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub properties: DisplayProperties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayProperties {
    #[serde(rename = "DisplayProperties", default)]
    pub display_properties: Vec<DisplayProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProperty {
    #[serde(rename = "PropertyName")]
    pub property_name: String,

    /// `"Hide"` drops the property; anything else (or nothing) shows it.
    #[serde(rename = "DisplayStatus", default, skip_serializing_if = "Option::is_none")]
    pub display_status: Option<String>,
}

impl DisplayProperty {
    pub fn is_hidden(&self) -> bool {
        self.display_status.as_deref() == Some("Hide")
    }
}

/// Optional per-project overrides layered over `ProjectionConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    pub export_filename: Option<String>,
    pub separator: Option<char>,
    pub decimal_digits: Option<u32>,
    pub hidden_fields: Option<Vec<String>>,
    pub styled_fields: Option<Vec<String>>,
    pub title: Option<String>,
}

impl DisplaySettings {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Ordered allow-list: every property not marked `Hide`, normalized,
    /// in document order.
    pub fn allow_list(&self) -> Vec<String> {
        self.properties
            .display_properties
            .iter()
            .filter(|p| !p.is_hidden())
            .map(|p| normalize_field_name(&p.property_name))
            .collect()
    }

    /// Layer the document's `settings` block over `cfg`.
    pub fn apply_overrides(&self, cfg: &mut ProjectionConfig) {
        let Some(o) = &self.settings else {
            return;
        };
        if let Some(name) = &o.export_filename {
            cfg.export_filename = name.clone();
        }
        if let Some(sep) = o.separator {
            cfg.separator = sep;
        }
        if let Some(digits) = o.decimal_digits {
            cfg.decimal_digits = digits;
        }
        if let Some(fields) = &o.hidden_fields {
            cfg.hidden_fields = fields.clone();
        }
        if let Some(fields) = &o.styled_fields {
            cfg.styled_fields = fields.clone();
        }
        if let Some(title) = &o.title {
            cfg.title = title.clone();
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
