//! Theme definitions loaded from TOML
//!
//! ```toml
//! use_theme = "ocean"
//!
//! [[theme]]
//! name = "ocean"
//! parent = "light"
//!
//! [theme.styles."ThemedText.TEntry".configure]
//! fieldbackground = "#e0f0ff"
//! textpadding = 5
//!
//! [[theme.styles."ThemedText.TEntry".map.fieldbackground]]
//! state = "hover !focus"
//! value = "#d0e8ff"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use themed_core::StateSpec;

use crate::engine::StyleEngine;
use crate::error::{Result, ThemeError};
use crate::theme::StateMapEntry;

/// Top-level theme file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Theme to activate after loading
    #[serde(default)]
    pub use_theme: Option<String>,
    #[serde(default, rename = "theme")]
    pub themes: Vec<ThemeDefinition>,
}

/// One theme, created if missing and merged otherwise
#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeDefinition {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleConfig>,
}

/// Settings and state maps of one style
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub configure: BTreeMap<String, ConfigValue>,
    #[serde(default)]
    pub map: BTreeMap<String, Vec<MapEntryConfig>>,
}

/// One `(state spec, value)` pair of a state map
#[derive(Debug, Deserialize, Serialize)]
pub struct MapEntryConfig {
    #[serde(default)]
    pub state: String,
    pub value: ConfigValue,
}

/// Option value as written in the file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ConfigValue>),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Str(s) => f.write_str(s),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Float(x) => write!(f, "{x}"),
            ConfigValue::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            ConfigValue::List(items) => {
                let words: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&words.join(" "))
            }
        }
    }
}

impl ThemeConfig {
    /// Parse a theme file
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a theme file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Create or merge every theme into `engine`, then switch to `use_theme`
    ///
    /// Themes are applied in file order, so a theme may name an earlier one
    /// as its parent. Returns whether the active theme changed.
    pub fn apply(&self, engine: &mut StyleEngine) -> Result<bool> {
        for definition in &self.themes {
            definition.apply(engine)?;
        }
        match &self.use_theme {
            Some(name) => engine.theme_use(name),
            None => Ok(false),
        }
    }
}

impl ThemeDefinition {
    fn apply(&self, engine: &mut StyleEngine) -> Result<()> {
        if !engine.has_theme(&self.name) {
            engine.theme_create(&self.name, self.parent.as_deref())?;
        }
        let theme = engine
            .theme_mut(&self.name)
            .ok_or_else(|| ThemeError::UnknownTheme(self.name.clone()))?;

        for (style, config) in &self.styles {
            theme.configure(
                style,
                config
                    .configure
                    .iter()
                    .map(|(option, value)| (option.clone(), value.to_string())),
            );
            for (option, entries) in &config.map {
                let entries = entries
                    .iter()
                    .map(|e| -> Result<StateMapEntry> {
                        Ok(StateMapEntry::new(
                            StateSpec::parse(&e.state)?,
                            e.value.to_string(),
                        ))
                    })
                    .collect::<Result<Vec<_>>>()?;
                theme.map(style, option, entries);
            }
        }
        tracing::debug!(
            theme = %self.name,
            styles = self.styles.len(),
            "theme definition applied"
        );
        Ok(())
    }
}
