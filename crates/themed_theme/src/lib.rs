//! Themed Text Theme Engine
//!
//! Named themes holding per-style option values, with ordered state maps that
//! pick a value depending on the widget's interaction state.
//!
//! # Overview
//!
//! - **Themes**: named, optionally inheriting from a parent theme. The root
//!   theme `default` always exists.
//! - **Styles**: dotted names (`ThemedText.TEntry`) falling back to their
//!   suffixes (`TEntry`, then `.`) when an option is not set.
//! - **State maps**: `(state spec, value)` lists, first match wins.
//! - **Resolver**: lookups with caller-supplied defaults.
//!
//! # Quick Start
//!
//! ```rust
//! use themed_core::StateFlags;
//! use themed_theme::{StyleEngine, StyleResolver};
//!
//! let mut engine = StyleEngine::with_presets();
//! engine.theme_use("light").unwrap();
//!
//! let resolver = StyleResolver::new(&engine);
//! let hovered = resolver.lookup("ThemedText.TEntry", "fieldbackground", Some(StateFlags::HOVER));
//! assert_eq!(hovered.as_deref(), Some("#f9f9f9"));
//!
//! let missing = resolver.lookup_or("ThemedText.TEntry", "insertofftime", None, "300");
//! assert_eq!(missing, "300");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod presets;
pub mod resolver;
pub mod theme;

pub use config::{ConfigValue, MapEntryConfig, StyleConfig, ThemeConfig, ThemeDefinition};
pub use engine::{StyleEngine, ROOT_THEME};
pub use error::{Result, ThemeError};
pub use presets::ThemePreset;
pub use resolver::StyleResolver;
pub use theme::{StateMapEntry, StyleSpec, Theme};
