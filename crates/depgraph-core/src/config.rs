//! Configuration for graph location, traversal defaults, and export.
//!
//! Load order: `.depgraph/config.toml` → environment variables → defaults.

use crate::export::ExportFormat;
use crate::storage::DEFAULT_GRAPH_FILE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepgraphConfig {
    pub graph: GraphFileConfig,
    pub traversal: TraversalConfig,
    pub export: ExportConfig,
}

/// Where the graph file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFileConfig {
    /// Graph file path. Relative paths are resolved against the project root.
    pub path: PathBuf,
}

/// Defaults for `levels` and `check`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Root vertex used when none is given on the command line.
    pub root: Option<String>,
    /// Follow edges target → source instead of as stored.
    pub reverse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format: "dot" or "mermaid".
    pub format: String,
}

impl Default for GraphFileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_GRAPH_FILE),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "dot".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl DepgraphConfig {
    /// Load config from `.depgraph/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".depgraph").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Environment variable overrides
        env_override("DEPGRAPH_GRAPH", &mut config.graph.path);
        env_override("DEPGRAPH_REVERSE", &mut config.traversal.reverse);
        env_override("DEPGRAPH_EXPORT_FORMAT", &mut config.export.format);
        if let Ok(root) = std::env::var("DEPGRAPH_ROOT")
            && !root.is_empty()
        {
            config.traversal.root = Some(root);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, mid-command.
    pub fn validate(&self) -> Result<()> {
        if self.export.format.parse::<ExportFormat>().is_err() {
            anyhow::bail!(
                "unknown export format '{}': expected 'dot' or 'mermaid'",
                self.export.format
            );
        }
        if self.traversal.root.as_deref() == Some("") {
            anyhow::bail!("traversal root must not be empty");
        }
        Ok(())
    }

    /// Graph file path resolved against `project_root`.
    pub fn graph_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.graph.path)
    }
}
