//! Theme engine error types

use themed_core::StateError;
use thiserror::Error;

/// Theme-related errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// No theme with this name
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// A theme with this name already exists
    #[error("theme already exists: {0}")]
    DuplicateTheme(String),

    /// The requested parent theme does not exist
    #[error("theme {theme} names unknown parent theme {parent}")]
    UnknownParent { theme: String, parent: String },

    /// Bad state spec in a map entry
    #[error(transparent)]
    State(#[from] StateError),

    /// Theme file could not be parsed
    #[error("theme config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Theme file could not be read
    #[error("theme config read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
