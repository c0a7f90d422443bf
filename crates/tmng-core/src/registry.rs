//! The in-memory registry and its mutators
//!
//! Mutators only touch memory. Persisting and reconciling is the job of
//! [`RegistryStore::save`](crate::RegistryStore::save).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::record::{Category, NO_GROUP, ToolRecord};
use crate::{Error, Result};

/// Schema version written to new registry files.
pub const REGISTRY_VERSION: &str = "1.0";

/// Characters an alias may not contain.
pub const FORBIDDEN_ALIAS_CHARS: &[char] = &['/', '\\', ':', '?', '*', '"', '<', '>', '|'];

static NAME_FILLER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

/// Input for [`Registry::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    pub alias: String,
    pub category: Category,
    pub group: Option<String>,
    pub path: String,
    pub description: String,
}

/// The list of managed tools, as stored in the registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default = "default_version")]
    pub version: String,
    /// Tools in insertion order; reconciliation follows this order
    #[serde(default)]
    pub tools: Vec<ToolRecord>,
}

fn default_version() -> String {
    REGISTRY_VERSION.to_string()
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            version: default_version(),
            tools: Vec::new(),
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Look up a tool by alias.
    pub fn find_alias(&self, alias: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.alias == alias)
    }

    /// Distinct group names, sorted. Ungrouped tools are not listed.
    pub fn groups(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter_map(|t| t.group.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn count_in_group(&self, group: &str) -> usize {
        self.tools.iter().filter(|t| t.in_group(group)).count()
    }

    /// Derive a unique tool name from an alias.
    ///
    /// Every character outside `[A-Za-z0-9]` becomes `_`. On collision a
    /// numeric suffix `_1`, `_2`, ... is appended to the base name.
    pub fn derive_name(&self, alias: &str) -> String {
        let base = NAME_FILLER.replace_all(alias, "_").into_owned();
        if self.get(&base).is_none() {
            return base;
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }

    /// Insert a new enabled tool after validating its alias.
    ///
    /// A group spelled like the no-group marker is stored as no group, so
    /// the record reads back unchanged. Returns the stored record, including
    /// its derived name.
    pub fn add(&mut self, tool: NewTool) -> Result<&ToolRecord> {
        let alias = validate_alias(&tool.alias)?;
        if self.find_alias(&alias).is_some() {
            return Err(Error::DuplicateAlias { alias });
        }

        let name = self.derive_name(&alias);
        tracing::debug!(%name, %alias, "Adding tool");

        let index = self.tools.len();
        self.tools.push(ToolRecord {
            name,
            alias,
            category: tool.category,
            group: tool.group.filter(|g| g.trim() != NO_GROUP),
            path: tool.path.trim().to_string(),
            description: tool.description.trim().to_string(),
            enabled: true,
        });
        Ok(&self.tools[index])
    }

    /// Flip the enabled flag of one tool. Returns the new state.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let tool = self
            .tools
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::ToolNotFound {
                name: name.to_string(),
            })?;
        tool.enabled = !tool.enabled;
        Ok(tool.enabled)
    }

    /// Flip the enabled flag of every tool in `group`, each independently.
    ///
    /// Returns how many tools were toggled.
    pub fn toggle_group(&mut self, group: &str) -> Result<usize> {
        let mut toggled = 0;
        for tool in self.tools.iter_mut().filter(|t| t.in_group(group)) {
            tool.enabled = !tool.enabled;
            toggled += 1;
        }
        if toggled == 0 {
            return Err(Error::GroupNotFound {
                group: group.to_string(),
            });
        }
        Ok(toggled)
    }

    /// Remove one tool by name.
    pub fn remove(&mut self, name: &str) -> Result<ToolRecord> {
        let pos = self
            .tools
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| Error::ToolNotFound {
                name: name.to_string(),
            })?;
        Ok(self.tools.remove(pos))
    }

    /// Remove every tool in `group`. Returns how many were removed.
    pub fn remove_group(&mut self, group: &str) -> Result<usize> {
        let before = self.tools.len();
        self.tools.retain(|t| !t.in_group(group));
        let removed = before - self.tools.len();
        if removed == 0 {
            return Err(Error::GroupNotFound {
                group: group.to_string(),
            });
        }
        Ok(removed)
    }
}

/// Check that an alias can be used as a symlink file name.
///
/// Returns the trimmed alias.
pub fn validate_alias(alias: &str) -> Result<String> {
    let trimmed = alias.trim();
    let invalid = |reason: &str| Error::InvalidAlias {
        alias: alias.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("alias is empty"));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(invalid("alias cannot be a directory reference"));
    }
    if let Some(c) = trimmed.chars().find(|c| FORBIDDEN_ALIAS_CHARS.contains(c)) {
        return Err(invalid(&format!("contains forbidden character '{c}'")));
    }
    Ok(trimmed.to_string())
}
