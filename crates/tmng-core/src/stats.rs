//! Counts over the registry

use std::collections::BTreeMap;

use crate::record::{Category, ToolRecord};

/// Summary counts for a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub startup: usize,
    pub tool: usize,
    /// Tools per group, sorted by group name; ungrouped tools are not counted
    pub groups: BTreeMap<String, usize>,
}

impl Statistics {
    pub fn from_tools(tools: &[ToolRecord]) -> Self {
        let mut stats = Self {
            total: tools.len(),
            ..Self::default()
        };

        for tool in tools {
            if tool.enabled {
                stats.enabled += 1;
            } else {
                stats.disabled += 1;
            }
            match tool.category {
                Category::Startup => stats.startup += 1,
                Category::Tool => stats.tool += 1,
            }
            if let Some(group) = &tool.group {
                *stats.groups.entry(group.clone()).or_default() += 1;
            }
        }

        stats
    }

    /// Share of `count` in the total, in percent. Zero for an empty registry.
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}
