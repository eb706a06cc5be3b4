use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment variable naming the connector configuration file.
pub const CONFIG_PATH_ENV: &str = "SMOOCH_CONNECTOR_CONFIG";

/// Names of the answer attributes that describe URL buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlButtonsConfig {
    #[serde(default)]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub button_title_var: Option<String>,
    #[serde(default)]
    pub button_url_var: Option<String>,
}

/// Digester settings. Every key is optional; an unset or empty key disables the feature it
/// drives.
///
/// ```
/// use smooch_core::DigesterConfig;
///
/// let cfg: DigesterConfig = serde_json::from_str(r#"{"button_title": "BUTTON_TEXT"}"#).unwrap();
/// assert_eq!(cfg.button_title_attribute(), Some("BUTTON_TEXT"));
/// assert_eq!(cfg.url_button_attribute(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigesterConfig {
    #[serde(default)]
    pub url_buttons: Option<UrlButtonsConfig>,
    #[serde(default)]
    pub button_title: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl DigesterConfig {
    /// Answer attribute holding URL-button definitions.
    pub fn url_button_attribute(&self) -> Option<&str> {
        non_empty(self.url_buttons.as_ref()?.attribute_name.as_ref())
    }

    /// Keys of the title and URL fields inside each URL-button definition.
    pub fn url_button_fields(&self) -> Option<(&str, &str)> {
        let buttons = self.url_buttons.as_ref()?;
        Some((
            non_empty(buttons.button_title_var.as_ref())?,
            non_empty(buttons.button_url_var.as_ref())?,
        ))
    }

    /// Option/sub-answer attribute that overrides a button's text.
    pub fn button_title_attribute(&self) -> Option<&str> {
        non_empty(self.button_title.as_ref())
    }
}

/// One entry of the content-rating prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingOption {
    pub id: Value,
    pub label: String,
    #[serde(default)]
    pub comment: bool,
    #[serde(rename = "isNegative", default)]
    pub is_negative: bool,
}

/// Host-level settings for a connector instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    pub digester: DigesterConfig,
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    #[serde(default)]
    pub ratings: Vec<RatingOption>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ConnectorConfig {
    /// Reads a YAML (or JSON) configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read connector config {}", path.display()))?;
        let config = serde_yaml_bw::from_str(&raw)
            .with_context(|| format!("{} is not a valid connector config", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded connector config");
        Ok(config)
    }

    /// Loads from `path`, else from [`CONFIG_PATH_ENV`], else returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }
}
