//! The style engine: theme registry and lookups
//!
//! Lookups walk the current theme and its parents; inside each theme the
//! dotted style chain is tried from most to least specific. Within a style
//! the state map wins over the default setting.

use rustc_hash::FxHashMap;
use themed_core::StateFlags;

use crate::error::{Result, ThemeError};
use crate::presets::ThemePreset;
use crate::theme::{style_chain, StateMapEntry, Theme};

/// Name of the root theme every engine starts with
pub const ROOT_THEME: &str = "default";

/// Registry of themes with one active theme
pub struct StyleEngine {
    themes: FxHashMap<String, Theme>,
    current: String,
}

impl StyleEngine {
    /// An engine holding only an empty root theme
    pub fn new() -> Self {
        let mut themes = FxHashMap::default();
        themes.insert(ROOT_THEME.to_string(), Theme::new(ROOT_THEME, None));
        Self {
            themes,
            current: ROOT_THEME.to_string(),
        }
    }

    /// An engine with all built-in presets installed, `default` active
    pub fn with_presets() -> Self {
        let mut engine = Self::new();
        for preset in ThemePreset::all() {
            preset.install(&mut engine);
        }
        engine
    }

    /// Create a new theme inheriting from `parent` (the root theme when `None`)
    pub fn theme_create(&mut self, name: &str, parent: Option<&str>) -> Result<&mut Theme> {
        if self.themes.contains_key(name) {
            return Err(ThemeError::DuplicateTheme(name.to_string()));
        }
        let parent = parent.unwrap_or(ROOT_THEME);
        if !self.themes.contains_key(parent) {
            return Err(ThemeError::UnknownParent {
                theme: name.to_string(),
                parent: parent.to_string(),
            });
        }
        tracing::debug!(theme = name, parent, "theme created");
        Ok(self
            .themes
            .entry(name.to_string())
            .or_insert_with(|| Theme::new(name, Some(parent.to_string()))))
    }

    /// Switch the active theme
    ///
    /// Returns whether the active theme actually changed.
    pub fn theme_use(&mut self, name: &str) -> Result<bool> {
        if !self.themes.contains_key(name) {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }
        if self.current == name {
            return Ok(false);
        }
        tracing::debug!(from = %self.current, to = name, "switching theme");
        self.current = name.to_string();
        Ok(true)
    }

    /// Name of the active theme
    pub fn current_theme(&self) -> &str {
        &self.current
    }

    /// All theme names, sorted
    pub fn theme_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn has_theme(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn theme_mut(&mut self, name: &str) -> Option<&mut Theme> {
        self.themes.get_mut(name)
    }

    fn current_mut(&mut self) -> &mut Theme {
        let current = self.current.clone();
        self.themes
            .entry(current.clone())
            .or_insert_with(|| Theme::new(current, None))
    }

    /// Set default option values of a style in the active theme
    pub fn configure<I, K, V>(&mut self, style: &str, options: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.current_mut().configure(style, options);
    }

    /// Set the state map of an option of a style in the active theme
    pub fn map<I>(&mut self, style: &str, option: &str, entries: I)
    where
        I: IntoIterator<Item = StateMapEntry>,
    {
        self.current_mut().map(style, option, entries);
    }

    /// The active theme followed by its ancestors
    fn theme_chain(&self) -> impl Iterator<Item = &Theme> {
        let mut next = self.themes.get(&self.current);
        let mut depth = 0;
        std::iter::from_fn(move || {
            let theme = next?;
            depth += 1;
            // Parent links are validated on creation, the depth cap only
            // guards against cycles built through `theme_mut`.
            next = if depth < self.themes.len() {
                theme.parent().and_then(|p| self.themes.get(p))
            } else {
                None
            };
            Some(theme)
        })
    }

    /// Look up an option value
    ///
    /// `state` of `None` is the empty state. Returns an empty string when no
    /// theme in the chain has a value.
    pub fn lookup(&self, style: &str, option: &str, state: Option<StateFlags>) -> String {
        let state = state.unwrap_or_default();
        for theme in self.theme_chain() {
            for name in style_chain(style) {
                if let Some(value) = theme.lookup_local(name, option, state) {
                    return value.to_string();
                }
            }
        }
        String::new()
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new()
    }
}
