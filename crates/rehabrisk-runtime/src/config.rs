//! Configuration loading for rehabrisk.
//! Reads rehabrisk.toml from the current directory or the path in REHABRISK_CONFIG.
//! YAML and JSON files are accepted by extension.

use std::path::Path;

use anyhow::Context;
use rehabrisk_common::FusionConfig;
use rehabrisk_ranker::FusionPolicy;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIG_ENV_VAR: &str = "REHABRISK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "rehabrisk.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub paths: FusionConfig,
    #[serde(default)]
    pub policy: FusionPolicy,
}

impl RuntimeConfig {
    /// Load configuration, checking REHABRISK_CONFIG first, then the current
    /// directory. Falls back to defaults when no file exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let path = Path::new(&path);

        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    /// Load from a TOML, YAML or JSON file, chosen by extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_toml(&content)?,
        };

        config
            .policy
            .validate()
            .with_context(|| format!("Invalid policy in {}", path.display()))?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_toml_is_default() {
        let config = RuntimeConfig::from_toml("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = RuntimeConfig::from_toml(
            r#"
            [paths]
            output_path = "reports/fusion.csv"

            [policy.threshold]
            early = 0.5

            [policy.weights]
            gait_abnormal = 0.4
            action_risk = 0.4
            functioning_deficit = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.output_path, PathBuf::from("reports/fusion.csv"));
        assert_eq!(config.paths.icf_path, FusionConfig::default().icf_path);
        assert_eq!(config.policy.threshold.early, 0.5);
        assert_eq!(config.policy.threshold.late, 0.65);
        assert_eq!(config.policy.weights.action_risk, 0.4);
    }

    #[test]
    fn test_yaml_config() {
        let config = RuntimeConfig::from_yaml("policy:\n  neutral_value: 0.4\n").unwrap();
        assert_eq!(config.policy.neutral_value, 0.4);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RuntimeConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(RuntimeConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_policy_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[policy.weights]\ngait_abnormal = 0.9\n").unwrap();
        let err = RuntimeConfig::from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("weights"));
    }
}
