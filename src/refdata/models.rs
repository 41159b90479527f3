use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The reference-data table being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Department,
    Category,
    Priority,
    Status,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        Self::Department,
        Self::Category,
        Self::Priority,
        Self::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Category => "category",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }

    /// SQLite table backing this kind.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Category => "categories",
            Self::Priority => "priorities",
            Self::Status => "statuses",
        }
    }

    /// Only priorities and statuses carry a display color.
    pub fn has_color(&self) -> bool {
        matches!(self, Self::Priority | Self::Status)
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "department" | "departments" => Ok(Self::Department),
            "category" | "categories" => Ok(Self::Category),
            "priority" | "priorities" => Ok(Self::Priority),
            "status" | "statuses" => Ok(Self::Status),
            _ => Err(format!("Invalid reference kind: {}", s)),
        }
    }
}

/// One row of reference data. Every kind shares this shape; optional fields
/// serialize as `null` so clients always see the same keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
    pub label: String,
    pub thai_label: Option<String>,
    pub description: Option<String>,
    pub thai_description: Option<String>,
    pub color: Option<String>,
}

/// Partial update applied by administrators. `id` and `name` are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReferencePatch {
    pub label: Option<String>,
    pub thai_label: Option<String>,
    pub description: Option<String>,
    pub thai_description: Option<String>,
    pub color: Option<String>,
}

impl ReferencePatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.thai_label.is_none()
            && self.description.is_none()
            && self.thai_description.is_none()
            && self.color.is_none()
    }

    /// Check the patch against the rules for `kind`.
    pub fn validate(&self, kind: ReferenceKind) -> Result<(), String> {
        if self.is_empty() {
            return Err("Update must contain at least one field".to_string());
        }
        if let Some(label) = &self.label {
            if label.trim().is_empty() {
                return Err("label must not be blank".to_string());
            }
        }
        if let Some(color) = &self.color {
            if !kind.has_color() {
                return Err(format!("{} entries do not have a color", kind));
            }
            if !is_hex_color(color) {
                return Err(format!("Invalid color '{}': expected #RRGGBB", color));
            }
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Where a resolved collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    StorageUnavailable,
    StorageEmpty,
}

impl Source {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback(FallbackReason::StorageUnavailable) => {
                f.write_str("fallback (storage unavailable)")
            }
            Self::Fallback(FallbackReason::StorageEmpty) => f.write_str("fallback (storage empty)"),
        }
    }
}

/// Rows returned by the resolver, tagged with the path that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub rows: Vec<ReferenceItem>,
    pub source: Source,
}
