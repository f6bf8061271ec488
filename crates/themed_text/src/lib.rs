//! Themed Text
//!
//! A text-editing surface that looks and reacts like a themed entry field.
//!
//! - [`ThemedTextFrame`]: container that aggregates focus, hover and pressed
//!   state from its bound widgets and restyles the content from the theme
//! - [`ThemedText`]: a `Text` widget inside its own frame
//! - [`ScrolledText`]: a themed text with scrollbars that restyle the field
//!   without changing its state
//! - [`Host`]: the headless toolkit both run on
//!
//! # Example
//!
//! ```rust
//! use themed_core::StateFlags;
//! use themed_text::{Host, TextOptions, ThemedText};
//!
//! let mut host = Host::new();
//! host.theme_use("dark").unwrap();
//! let root = host.root();
//! let text = ThemedText::new(&mut host, root, TextOptions::new()).unwrap();
//!
//! host.focus_set(text.id());
//! host.run_idle();
//!
//! assert_eq!(text.frame().state(), StateFlags::FOCUS);
//! assert_eq!(text.cget(&host, "background"), Some("#1c1c1c"));
//! ```

pub mod frame;
pub mod geometry;
pub mod host;
pub mod scrolled;
pub mod text;

pub use frame::{BoundText, FrameOptions, ThemedTextFrame, DEFAULT_CLASS, DEFAULT_STYLE};
pub use geometry::Geometry;
pub use host::{Host, DEFAULT_PIXELS_PER_POINT};
pub use scrolled::{ScrolledText, ScrolledTextOptions, SCROLLBAR_CLASS};
pub use text::{TextOptions, ThemedText, TEXT_CLASS};

pub use themed_core::WidgetError;

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
