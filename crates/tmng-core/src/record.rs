//! Tool records and their file representation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use tmng_fs::ManagedDir;

/// Literal written to the registry file for a tool without a group.
pub const NO_GROUP: &str = "None";

/// Where a tool's symlink lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Linked into `startup/` and run when a shell starts
    Startup,
    /// Linked into `tool/` and only exposed on PATH
    Tool,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Startup, Category::Tool];

    /// Managed directory holding links of this category.
    pub fn managed_dir(&self) -> ManagedDir {
        match self {
            Category::Startup => ManagedDir::Startup,
            Category::Tool => ManagedDir::Tool,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Startup => "startup",
            Category::Tool => "tool",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "startup" => Ok(Category::Startup),
            "tool" => Ok(Category::Tool),
            other => Err(format!("unknown category '{other}' (expected startup or tool)")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a tool currently produces a symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Enabled,
    Disabled,
}

impl From<bool> for Status {
    fn from(enabled: bool) -> Self {
        if enabled {
            Status::Enabled
        } else {
            Status::Disabled
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Enabled => f.write_str("enabled"),
            Status::Disabled => f.write_str("disabled"),
        }
    }
}

/// A managed script or binary.
///
/// Field order here is the field order in the registry file.
///
/// Missing optional fields take these defaults when loading:
///
/// | field         | default    |
/// |---------------|------------|
/// | `group`       | no group   |
/// | `path`        | `""`       |
/// | `description` | `""`       |
/// | `enabled`     | `true`     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Unique identifier derived from the alias
    pub name: String,
    /// File name of the symlink exposed on PATH
    pub alias: String,
    pub category: Category,
    #[serde(
        default,
        serialize_with = "serialize_group",
        deserialize_with = "deserialize_group"
    )]
    pub group: Option<String>,
    /// Target path, possibly starting with `~`; resolved at reconciliation
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn serialize_group<S: Serializer>(group: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(group.as_deref().unwrap_or(NO_GROUP))
}

fn deserialize_group<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|g| g != NO_GROUP))
}

impl ToolRecord {
    pub fn status(&self) -> Status {
        Status::from(self.enabled)
    }

    /// Check whether this tool belongs to `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.group.as_deref() == Some(group)
    }
}
