//! Core error types

use thiserror::Error;

use crate::widget::WidgetId;

/// Widget-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The widget does not exist or has already been destroyed
    #[error("widget {0:?} does not exist or has been destroyed")]
    InvalidWidget(WidgetId),

    /// The parent given for a new widget does not exist
    #[error("parent widget {0:?} does not exist or has been destroyed")]
    UnknownParent(WidgetId),
}

/// State spec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A state name that is not one of the known flags
    #[error("unknown state name: {0:?}")]
    UnknownState(String),
}

/// Errors while parsing screen distances and padding specs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not a valid screen distance (`12`, `7p`, `1.5m`, ...)
    #[error("bad screen distance: {0:?}")]
    Distance(String),

    /// More than four components in a padding spec
    #[error("padding spec takes at most 4 values, got {0}")]
    TooManyValues(usize),
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
