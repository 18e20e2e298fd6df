use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::history::FRESH_WEIGHT;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub verb_catalog: Option<PathBuf>,
    #[serde(default)]
    pub form_catalog: Option<PathBuf>,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub quiz_length: Option<usize>,
    #[serde(default = "default_fresh_weight")]
    pub fresh_weight: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jvdrill")
}
fn default_fresh_weight() -> f64 {
    FRESH_WEIGHT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verb_catalog: None,
            form_catalog: None,
            data_dir: default_data_dir(),
            quiz_length: None,
            fresh_weight: default_fresh_weight(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing config {}", path.display()))?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jvdrill")
            .join("config.toml")
    }

    /// Reset values the sampler cannot use.
    pub fn validate(&mut self) {
        if !self.fresh_weight.is_finite() || self.fresh_weight <= 0.0 {
            tracing::warn!(
                fresh_weight = self.fresh_weight,
                "fresh_weight must be positive, using default"
            );
            self.fresh_weight = default_fresh_weight();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.verb_catalog, None);
        assert_eq!(config.form_catalog, None);
        assert_eq!(config.quiz_length, None);
        assert_eq!(config.fresh_weight, 3.0);
        assert!(config.data_dir.ends_with("jvdrill"));
    }

    #[test]
    fn test_config_partial_fields() {
        let toml_str = r#"
verb_catalog = "/tmp/verbs.jvp"
quiz_length = 15
seed = 7
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.verb_catalog, Some(PathBuf::from("/tmp/verbs.jvp")));
        assert_eq!(config.quiz_length, Some(15));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.form_catalog, None);
        assert_eq!(config.fresh_weight, 3.0);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.quiz_length = Some(10);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.data_dir, deserialized.data_dir);
        assert_eq!(config.quiz_length, deserialized.quiz_length);
        assert_eq!(config.fresh_weight, deserialized.fresh_weight);
    }

    #[test]
    fn test_validate_resets_bad_weight() {
        let mut config = Config::default();
        config.fresh_weight = -1.0;
        config.validate();
        assert_eq!(config.fresh_weight, 3.0);

        config.fresh_weight = f64::INFINITY;
        config.validate();
        assert_eq!(config.fresh_weight, 3.0);

        config.fresh_weight = 0.5;
        config.validate();
        assert_eq!(config.fresh_weight, 0.5);
    }
}
