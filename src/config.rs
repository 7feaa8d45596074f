// config.rs — panel defaults and widget candidate lists, embedded as JSON.
use serde::Deserialize;
use thiserror::Error;

use crate::blocks::{ApplyMode, PreviewSource};
use crate::prompt::BatchMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("asset '{0}' not embedded")]
    MissingAsset(String),
    #[error("parse error in {name}: {source}")]
    Parse { name: String, #[source] source: serde_json::Error },
}

const ANCHOR_CANDIDATES: &[&str] = &[
    "loras_multipliers", "loras_choices", "loras", "lora", "advanced_settings",
    "generation_settings", "model_settings", "resolution", "prompts", "prompt",
];

const PROMPT_CANDIDATES: &[&str] = &[
    "prompts", "prompt_lines", "prompts_box", "prompt", "positive_prompt", "prompt_text", "prompt_box",
];

fn owned(ids: &[&str]) -> Vec<String> { ids.iter().map(|s| s.to_string()).collect() }

fn default_anchor_candidates() -> Vec<String> { owned(ANCHOR_CANDIDATES) }
fn default_prompt_candidates() -> Vec<String> { owned(PROMPT_CANDIDATES) }

fn default_requested_components() -> Vec<String> {
    let mut ids = default_anchor_candidates();
    for id in PROMPT_CANDIDATES {
        if !ids.iter().any(|x| x == id) { ids.push(id.to_string()); }
    }
    ids
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PanelConfig {
    #[serde(default = "default_requested_components")]
    pub requested_components: Vec<String>,
    #[serde(default = "default_anchor_candidates")]
    pub anchor_candidates: Vec<String>,
    #[serde(default = "default_prompt_candidates")]
    pub prompt_candidates: Vec<String>,
    #[serde(default)]
    pub defaults: PanelDefaults,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            requested_components: default_requested_components(),
            anchor_candidates:    default_anchor_candidates(),
            prompt_candidates:    default_prompt_candidates(),
            defaults:             PanelDefaults::default(),
        }
    }
}

fn default_true() -> bool { true }
fn default_batch_mode() -> String { BatchMode::AzimuthSweep.label().to_string() }
fn default_apply_mode() -> String { ApplyMode::Append.label().to_string() }
fn default_blank_lines() -> usize { 1 }
fn default_apply_source() -> String { PreviewSource::Batch.label().to_string() }

/// Initial widget values. Mode fields hold display labels; unknown labels
/// resolve through the enums' `from_label` fallbacks.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PanelDefaults {
    #[serde(default = "default_true")]         pub include_trigger: bool,
    #[serde(default = "default_batch_mode")]   pub batch_mode: String,
    #[serde(default = "default_apply_mode")]   pub apply_mode: String,
    #[serde(default = "default_blank_lines")]  pub blank_lines: usize,
    #[serde(default = "default_apply_source")] pub apply_source: String,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            include_trigger: true,
            batch_mode:      default_batch_mode(),
            apply_mode:      default_apply_mode(),
            blank_lines:     default_blank_lines(),
            apply_source:    default_apply_source(),
        }
    }
}

impl PanelDefaults {
    pub fn batch_mode(&self) -> BatchMode { BatchMode::from_label(&self.batch_mode) }
    pub fn apply_mode(&self) -> ApplyMode { ApplyMode::from_label(&self.apply_mode) }
    pub fn apply_source(&self) -> PreviewSource { PreviewSource::from_label(&self.apply_source) }
}

// include_str! requires compile-time paths; all assets must be listed here.
fn asset(name: &str) -> Result<&'static str, ConfigError> {
    match name {
        "panel_config.json" => Ok(include_str!("../assets/panel_config.json")),
        _ => Err(ConfigError::MissingAsset(name.to_string())),
    }
}

pub fn parse(name: &str, raw: &str) -> Result<PanelConfig, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::Parse { name: name.to_string(), source })
}

pub fn load(name: &str) -> Result<PanelConfig, ConfigError> {
    parse(name, asset(name)?)
}

/// Embedded config, or built-in defaults if it cannot be read.
pub fn load_or_default() -> PanelConfig {
    load("panel_config.json").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to built-in panel config");
        PanelConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_config_matches_builtin_defaults() {
        let cfg = load("panel_config.json").expect("embedded config parses");
        assert_eq!(cfg.anchor_candidates, PanelConfig::default().anchor_candidates);
        assert_eq!(cfg.prompt_candidates, PanelConfig::default().prompt_candidates);
        assert_eq!(cfg.defaults, PanelDefaults::default());
    }

    #[test]
    fn embedded_config_requests_every_candidate() {
        let cfg = load("panel_config.json").unwrap();
        for id in cfg.anchor_candidates.iter().chain(&cfg.prompt_candidates) {
            assert!(cfg.requested_components.contains(id), "{id} not requested");
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = parse("inline", r#"{ "defaults": { "blank_lines": 3 } }"#).unwrap();
        assert_eq!(cfg.anchor_candidates, default_anchor_candidates());
        assert_eq!(cfg.defaults.blank_lines, 3);
        assert!(cfg.defaults.include_trigger);
        assert_eq!(cfg.defaults.batch_mode(), BatchMode::AzimuthSweep);
        assert_eq!(cfg.defaults.apply_source(), PreviewSource::Batch);
    }

    #[test]
    fn bad_labels_fall_back() {
        let cfg = parse("inline", r#"{ "defaults": { "batch_mode": "spiral", "apply_mode": "?" } }"#).unwrap();
        assert_eq!(cfg.defaults.batch_mode(), BatchMode::Single);
        assert_eq!(cfg.defaults.apply_mode(), ApplyMode::Append);
    }

    #[test]
    fn errors_name_the_asset() {
        assert!(matches!(load("nope.json"), Err(ConfigError::MissingAsset(n)) if n == "nope.json"));
        let err = parse("broken.json", "{").unwrap_err();
        assert!(err.to_string().starts_with("parse error in broken.json"));
    }
}
