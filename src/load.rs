//! # Load Module
//!
//! Reads route contracts from YAML or JSON documents.
//!
//! ## Document format
//!
//! A document is a serialized [`RouteGroup`] with an optional `title` and
//! `version`. Every route carries an explicit `kind`:
//!
//! ```yaml
//! title: Blog API
//! version: "1.0.0"
//! path_prefix: /api
//! shared_headers:
//!   type: object
//!   properties:
//!     x-tenant-id: { type: string }
//! routes:
//!   posts:
//!     kind: group
//!     path_prefix: /posts
//!     routes:
//!       getOne:
//!         kind: endpoint
//!         method: GET
//!         path: /{id}
//!         responses:
//!           200: { type: object }
//! ```
//!
//! Files ending in `.yaml` / `.yml` are parsed as YAML, everything else as JSON.

use crate::tree::RouteGroup;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A route contract as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub root: RouteGroup,
}

impl ContractDocument {
    /// Lowercase, underscore-separated title, `contract` when untitled
    pub fn slug(&self) -> String {
        let slug = self
            .title
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
            .trim_matches('_')
            .to_string();
        if slug.is_empty() {
            "contract".to_string()
        } else {
            slug
        }
    }
}

/// Document format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse a contract document from a string
pub fn parse_contract(content: &str, format: DocumentFormat) -> anyhow::Result<ContractDocument> {
    let document: ContractDocument = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML contract document")?,
        DocumentFormat::Json => serde_json::from_str(content).context("invalid JSON contract document")?,
    };
    document.root.validate_keys()?;
    debug!(
        endpoints = document.root.endpoint_count(),
        "Parsed contract document"
    );
    Ok(document)
}

/// Load a contract document from disk
pub fn load_contract(path: impl AsRef<Path>) -> anyhow::Result<ContractDocument> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read contract file {}", path.display()))?;
    let document = parse_contract(&content, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to load contract file {}", path.display()))?;
    info!(
        file = %path.display(),
        title = document.title.as_deref().unwrap_or("<untitled>"),
        endpoints = document.root.endpoint_count(),
        "Loaded route contract"
    );
    Ok(document)
}
