//! Error types for tmng-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tmng-core
    #[error(transparent)]
    Core(#[from] tmng_core::Error),

    /// Error from tmng-fs
    #[error(transparent)]
    Fs(#[from] tmng_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(dialoguer::Error),

    /// The user interrupted a prompt
    #[error("Operation cancelled")]
    Cancelled,

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Map an I/O error from a terminal read.
    ///
    /// Raw-mode reads report Ctrl-C as `Interrupted`; that becomes
    /// [`CliError::Cancelled`].
    pub fn from_terminal(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::Interrupted {
            Self::Cancelled
        } else {
            Self::Io(err)
        }
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Self::from_terminal(io)
            }
            other => Self::Dialoguer(other),
        }
    }
}
