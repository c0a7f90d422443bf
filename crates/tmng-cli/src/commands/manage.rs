//! Registry mutations that are persisted immediately
//!
//! Each operation works on a copy of the registry. The copy replaces the
//! caller's registry only once it has been saved, so a failed write leaves
//! memory and disk in agreement.

use tmng_core::{NewTool, Registry, RegistryStore, SaveReport, ToolRecord};

use crate::error::Result;

/// Actions offered by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    ToggleTool,
    ToggleGroup,
    DeleteTool,
    DeleteGroup,
    Refresh,
    Exit,
}

impl ManageAction {
    pub const ALL: [ManageAction; 6] = [
        ManageAction::ToggleTool,
        ManageAction::ToggleGroup,
        ManageAction::DeleteTool,
        ManageAction::DeleteGroup,
        ManageAction::Refresh,
        ManageAction::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ManageAction::ToggleTool => "Toggle tool status",
            ManageAction::ToggleGroup => "Toggle group status",
            ManageAction::DeleteTool => "Delete tool",
            ManageAction::DeleteGroup => "Delete group",
            ManageAction::Refresh => "Refresh view",
            ManageAction::Exit => "Exit",
        }
    }
}

/// A saved change and what the save did on disk.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub report: SaveReport,
}

fn commit<T>(
    store: &RegistryStore,
    registry: &mut Registry,
    change: impl FnOnce(&mut Registry) -> tmng_core::Result<T>,
) -> Result<Applied<T>> {
    let mut next = registry.clone();
    let value = change(&mut next)?;
    let report = store.save(&next)?;
    *registry = next;
    Ok(Applied { value, report })
}

/// Flip one tool; the value is its new enabled state.
pub fn toggle_tool(store: &RegistryStore, registry: &mut Registry, name: &str) -> Result<Applied<bool>> {
    commit(store, registry, |r| r.toggle(name))
}

/// Flip every tool in `group`; the value is how many were flipped.
pub fn toggle_group(store: &RegistryStore, registry: &mut Registry, group: &str) -> Result<Applied<usize>> {
    commit(store, registry, |r| r.toggle_group(group))
}

/// Remove one tool; the value is the removed record.
pub fn delete_tool(store: &RegistryStore, registry: &mut Registry, name: &str) -> Result<Applied<ToolRecord>> {
    commit(store, registry, |r| r.remove(name))
}

/// Remove every tool in `group`; the value is how many were removed.
pub fn delete_group(store: &RegistryStore, registry: &mut Registry, group: &str) -> Result<Applied<usize>> {
    commit(store, registry, |r| r.remove_group(group))
}

/// Register a new tool; the value is the stored record.
pub fn add_tool(store: &RegistryStore, registry: &mut Registry, tool: NewTool) -> Result<Applied<ToolRecord>> {
    commit(store, registry, |r| r.add(tool).cloned())
}
