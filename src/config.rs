//! # Configuration Module
//!
//! Composition settings for the command line and for services that load
//! contracts from disk.
//!
//! ## File format
//!
//! YAML (`.yaml`/`.yml`), TOML (`.toml`) or JSON (anything else):
//!
//! ```yaml
//! path_prefix: /api/v1
//! merge: object
//! shared_headers:
//!   type: object
//!   properties:
//!     x-tenant-id: { type: string }
//!   required: [x-tenant-id]
//! ```
//!
//! ## Environment Variables
//!
//! Applied on top of the file by [`ContractConfig::with_env`]:
//!
//! - `BRRTC_PATH_PREFIX` - root path prefix
//! - `BRRTC_MERGE` - `object` or `none`

use crate::compose::ComposeOptions;
use crate::schema::{ObjectSchemaMerger, SchemaShape};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Header merge strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// [`ObjectSchemaMerger`]
    #[default]
    Object,
    /// No merger; composing a tree that needs one fails
    None,
}

impl FromStr for MergeStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "object" => Ok(MergeStrategy::Object),
            "none" => Ok(MergeStrategy::None),
            other => bail!("unknown merge strategy '{other}' (expected 'object' or 'none')"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    pub path_prefix: Option<String>,
    pub shared_headers: Option<SchemaShape>,
    pub merge: MergeStrategy,
}

impl ContractConfig {
    /// Read a configuration file, choosing the parser from the extension
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ContractConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> anyhow::Result<Self> {
        ContractConfig::default().with_env()
    }

    /// Apply `BRRTC_*` overrides
    pub fn with_env(self) -> anyhow::Result<Self> {
        self.with_overrides(
            env::var("BRRTC_PATH_PREFIX").ok(),
            env::var("BRRTC_MERGE").ok().as_deref(),
        )
    }

    fn with_overrides(mut self, path_prefix: Option<String>, merge: Option<&str>) -> anyhow::Result<Self> {
        if let Some(prefix) = path_prefix {
            self.path_prefix = Some(prefix);
        }
        if let Some(merge) = merge {
            self.merge = merge.parse().context("invalid BRRTC_MERGE")?;
        }
        Ok(self)
    }

    pub fn into_compose_options(self) -> ComposeOptions {
        let mut options = ComposeOptions::new();
        if let Some(prefix) = self.path_prefix {
            options = options.path_prefix(prefix);
        }
        if let Some(headers) = self.shared_headers {
            options = options.shared_headers(headers);
        }
        match self.merge {
            MergeStrategy::Object => options.merger(ObjectSchemaMerger),
            MergeStrategy::None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_yaml_config() {
        let file = write_config(
            ".yaml",
            "path_prefix: /api\nmerge: none\nshared_headers:\n  type: object\n",
        );
        let config = ContractConfig::from_file(file.path()).unwrap();
        assert_eq!(config.path_prefix.as_deref(), Some("/api"));
        assert_eq!(config.merge, MergeStrategy::None);
        assert!(config.shared_headers.is_some());
    }

    #[test]
    fn test_toml_config_defaults_to_object_merge() {
        let file = write_config(".toml", "path_prefix = \"/v2\"\n");
        let config = ContractConfig::from_file(file.path()).unwrap();
        assert_eq!(config.path_prefix.as_deref(), Some("/v2"));
        assert_eq!(config.merge, MergeStrategy::Object);
        assert!(config.into_compose_options().has_merger());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let file = write_config(".json", r#"{"prefix": "/api"}"#);
        assert!(ContractConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = ContractConfig::default()
            .with_overrides(Some("/env".into()), Some("NONE"))
            .unwrap();
        assert_eq!(config.path_prefix.as_deref(), Some("/env"));
        assert!(!config.into_compose_options().has_merger());

        assert!(ContractConfig::default()
            .with_overrides(None, Some("deep"))
            .is_err());
    }
}
