//! Error types for tmng-core

/// Result type for tmng-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tmng-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Alias is empty or contains characters unusable in a file name
    #[error("Invalid alias '{alias}': {reason}")]
    InvalidAlias { alias: String, reason: String },

    /// Another tool already uses this alias
    #[error("Alias '{alias}' already exists")]
    DuplicateAlias { alias: String },

    /// No tool with this name
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    /// No tool belongs to this group
    #[error("Group not found: {group}")]
    GroupNotFound { group: String },

    /// Filesystem error from tmng-fs
    #[error(transparent)]
    Fs(#[from] tmng_fs::Error),
}
