//! Configuration module
//!
//! Settings live in `~/.titools/config.toml`. Every field has a default,
//! so a missing file (or a missing section) is a valid configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::policy::TargetFile;

mod layout;

pub use layout::{home_dir, Layout};

/// Version of this tool, compared against the latest published release
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag written into the knowledge block start marker
pub const KNOWLEDGE_VERSION: &str = "v1.0.0";

/// Source repository of the skills bundle
pub const DEFAULT_REPO_URL: &str = "https://github.com/macCesar/titools";

/// Template holding the compressed documentation index
pub const AGENTS_TEMPLATE_FILE: &str = "AGENTS-TEMPLATE.md";

/// Helper script shipped under `scripts/`
pub const DOCS_INDEX_SCRIPT: &str = "ti-docs-index";

/// Skill bundles shipped under `skills/`
pub const SKILLS: &[&str] = &[
    "alloy-expert",
    "alloy-guides",
    "alloy-howtos",
    "purgetss",
    "ti-guides",
    "ti-howtos",
    "ti-ui",
];

/// Agent prompt files shipped under `agents/` (without `.md`)
pub const AGENTS: &[&str] = &["ti-researcher"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Where skills are downloaded from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repo_url: default_repo_url(),
            branch: default_branch(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_repo_url() -> String {
    DEFAULT_REPO_URL.to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Knowledge block settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Version tag of the start marker
    #[serde(default = "default_knowledge_version")]
    pub version: String,

    /// File created when a project has no AI file and no prompt is possible
    #[serde(default = "default_file")]
    pub default_file: TargetFile,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            version: default_knowledge_version(),
            default_file: default_file(),
        }
    }
}

fn default_knowledge_version() -> String {
    KNOWLEDGE_VERSION.to_string()
}

fn default_file() -> TargetFile {
    TargetFile::Claude
}

impl Config {
    /// Load config from the default location (`~/.titools/config.toml`)
    pub fn load() -> Result<Self> {
        let path = Layout::from_env().config_path();
        if path.exists() {
            return Self::load_from(&path);
        }

        Ok(Self::default())
    }

    /// Load config from an explicit file, or the default location
    ///
    /// A file that does not exist yet means defaults in both cases.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from(path),
            Some(_) => Ok(Self::default()),
            None => Self::load(),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config path
    pub fn default_path() -> PathBuf {
        Layout::from_env().config_path()
    }
}
