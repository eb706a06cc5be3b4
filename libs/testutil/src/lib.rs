//! Fixtures and assertions shared by the connector's test suites.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

mod assertions;

pub use assertions::{assert_no_actions, decoded_action_payloads, message_contains_text};

/// Directory holding the shared webhook and bot-answer fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Loads a JSON or YAML fixture by file name, e.g. `"webhook_text.json"`.
pub fn load_fixture(name: &str) -> Result<Value> {
    let path = fixtures_dir().join(name);
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse json {}", path.display())),
        "yaml" | "yml" => {
            let yaml: serde_yaml_bw::Value = serde_yaml_bw::from_str(&content)
                .with_context(|| format!("failed to parse yaml {}", path.display()))?;
            serde_json::to_value(yaml)
                .with_context(|| format!("failed to convert yaml {}", path.display()))
        }
        other => Err(anyhow!("unsupported fixture extension: {other}")),
    }
}
