//! Configuration for plantdesk, read from `plantdesk.toml`.
//!
//! Layering is file → CLI: the file (if present) overrides the defaults
//! below, and command-line flags override the file.
//!
//! # Configuration File Format
//!
//! Every key is optional; the file below spells out the defaults. Set a
//! `[fallback]` entry to `"disabled"` to make an empty or unreadable table
//! an error for that kind.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3141
//! db_path = ".plantdesk/reference.db"
//! cors_permissive = false
//!
//! [logging]
//! filter = "plantdesk=info,tower_http=info"
//! json = false
//!
//! [fallback]
//! department = "builtin"
//! category = "builtin"
//! priority = "builtin"
//! status = "builtin"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::refdata::models::ReferenceKind;

pub const DEFAULT_CONFIG_FILE: &str = "plantdesk.toml";

/// What the resolver does when a kind's table is empty or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Serve the built-in collection for the kind.
    #[default]
    Builtin,
    /// No fallback; the request fails with an internal error.
    Disabled,
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackPolicy::Builtin => write!(f, "builtin"),
            FallbackPolicy::Disabled => write!(f, "disabled"),
        }
    }
}

/// Per-kind fallback policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    #[serde(default)]
    pub department: FallbackPolicy,
    #[serde(default)]
    pub category: FallbackPolicy,
    #[serde(default)]
    pub priority: FallbackPolicy,
    #[serde(default)]
    pub status: FallbackPolicy,
}

impl FallbackConfig {
    pub fn policy_for(&self, kind: ReferenceKind) -> FallbackPolicy {
        match kind {
            ReferenceKind::Department => self.department,
            ReferenceKind::Category => self.category,
            ReferenceKind::Priority => self.priority,
            ReferenceKind::Status => self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Permissive CORS for a local front-end dev server
    #[serde(default)]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3141
}

fn default_db_path() -> PathBuf {
    PathBuf::from(".plantdesk/reference.db")
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "plantdesk=info,tower_http=info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantdeskConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl PlantdeskConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse plantdesk.toml")
    }

    /// Load `path`, or the defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Problems that make the configuration unusable. Empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.server.port == 0 {
            problems.push("server.port must be non-zero".to_string());
        }
        if self.server.db_path.as_os_str().is_empty() {
            problems.push("server.db_path must not be empty".to_string());
        }
        if self.server.host.trim().is_empty() {
            problems.push("server.host must not be empty".to_string());
        }
        problems
    }
}
