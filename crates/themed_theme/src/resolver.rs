//! Style lookups with caller-supplied defaults
//!
//! Themes commonly answer with an empty string rather than "absent", so the
//! resolver treats an empty result as not found. Nothing is cached: every
//! call asks the engine again, since the active theme may have just changed.

use themed_core::StateFlags;

use crate::engine::StyleEngine;

/// Read-only view over a [`StyleEngine`] for resolving option values
#[derive(Clone, Copy)]
pub struct StyleResolver<'a> {
    engine: &'a StyleEngine,
}

impl<'a> StyleResolver<'a> {
    pub fn new(engine: &'a StyleEngine) -> Self {
        Self { engine }
    }

    /// Resolved value, `None` when the theme has nothing (or only `""`)
    pub fn lookup(&self, style: &str, option: &str, state: Option<StateFlags>) -> Option<String> {
        let value = self.engine.lookup(style, option, state);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Resolved value or `default`
    pub fn lookup_or(
        &self,
        style: &str,
        option: &str,
        state: Option<StateFlags>,
        default: &str,
    ) -> String {
        self.lookup(style, option, state)
            .unwrap_or_else(|| default.to_string())
    }

    /// Name of the theme lookups currently resolve against
    pub fn theme(&self) -> &'a str {
        self.engine.current_theme()
    }
}
