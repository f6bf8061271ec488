//! Themes and their styles

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use themed_core::{StateFlags, StateSpec};

/// One entry of a state map
#[derive(Clone, Debug, PartialEq)]
pub struct StateMapEntry {
    pub spec: StateSpec,
    pub value: String,
}

impl StateMapEntry {
    pub fn new(spec: StateSpec, value: impl Into<String>) -> Self {
        Self {
            spec,
            value: value.into(),
        }
    }
}

/// Option values of a single style in a single theme
#[derive(Clone, Debug, Default)]
pub struct StyleSpec {
    settings: FxHashMap<String, String>,
    maps: FxHashMap<String, SmallVec<[StateMapEntry; 2]>>,
}

impl StyleSpec {
    /// Default value of an option, regardless of state
    pub fn setting(&self, option: &str) -> Option<&str> {
        self.settings.get(option).map(String::as_str)
    }

    /// State map of an option
    pub fn map(&self, option: &str) -> &[StateMapEntry] {
        self.maps
            .get(option)
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }

    /// First map entry matching `state`
    pub fn mapped(&self, option: &str, state: StateFlags) -> Option<&str> {
        self.map(option)
            .iter()
            .find(|entry| entry.spec.matches(state))
            .map(|entry| entry.value.as_str())
    }

    pub fn set(&mut self, option: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(option.into(), value.into());
    }

    /// Replace the state map of an option
    pub fn set_map<I>(&mut self, option: impl Into<String>, entries: I)
    where
        I: IntoIterator<Item = StateMapEntry>,
    {
        self.maps.insert(option.into(), entries.into_iter().collect());
    }
}

/// A named set of styles
#[derive(Clone, Debug)]
pub struct Theme {
    name: String,
    parent: Option<String>,
    styles: FxHashMap<String, StyleSpec>,
}

impl Theme {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            styles: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Theme consulted when this one has no value
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn style(&self, name: &str) -> Option<&StyleSpec> {
        self.styles.get(name)
    }

    /// Style entry, created on first use
    pub fn style_mut(&mut self, name: &str) -> &mut StyleSpec {
        self.styles.entry(name.to_string()).or_default()
    }

    /// Set default option values of a style
    pub fn configure<I, K, V>(&mut self, style: &str, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let spec = self.style_mut(style);
        for (option, value) in options {
            spec.set(option, value);
        }
        self
    }

    /// Set the state map of one option of a style
    pub fn map<I>(&mut self, style: &str, option: &str, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = StateMapEntry>,
    {
        self.style_mut(style).set_map(option, entries);
        self
    }

    /// Look up an option in one style of this theme only
    ///
    /// The state map is consulted before the default setting.
    pub fn lookup_local(&self, style: &str, option: &str, state: StateFlags) -> Option<&str> {
        let spec = self.styles.get(style)?;
        spec.mapped(option, state).or_else(|| spec.setting(option))
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

/// Dotted fallback chain of a style name
///
/// `"ThemedText.TEntry"` yields `"ThemedText.TEntry"`, `"TEntry"`, `"."`.
pub fn style_chain(style: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(style);
    std::iter::from_fn(move || {
        let current = next?;
        next = match current {
            "." => None,
            _ => Some(current.split_once('.').map_or(".", |(_, rest)| rest)),
        };
        Some(current)
    })
    .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_chain() {
        let chain: Vec<&str> = style_chain("ThemedText.TEntry").collect();
        assert_eq!(chain, vec!["ThemedText.TEntry", "TEntry", "."]);

        let chain: Vec<&str> = style_chain("A.B.C").collect();
        assert_eq!(chain, vec!["A.B.C", "B.C", "C", "."]);

        let chain: Vec<&str> = style_chain(".").collect();
        assert_eq!(chain, vec!["."]);
    }

    #[test]
    fn test_map_before_setting() {
        let mut theme = Theme::new("t", None);
        theme
            .configure("TEntry", [("fieldbackground", "white")])
            .map(
                "TEntry",
                "fieldbackground",
                [
                    StateMapEntry::new(StateSpec::parse("hover !focus").unwrap(), "#eee"),
                    StateMapEntry::new(StateSpec::parse("focus").unwrap(), "#ddd"),
                ],
            );

        assert_eq!(
            theme.lookup_local("TEntry", "fieldbackground", StateFlags::EMPTY),
            Some("white")
        );
        assert_eq!(
            theme.lookup_local("TEntry", "fieldbackground", StateFlags::HOVER),
            Some("#eee")
        );
        assert_eq!(
            theme.lookup_local(
                "TEntry",
                "fieldbackground",
                StateFlags::HOVER | StateFlags::FOCUS
            ),
            Some("#ddd")
        );
        assert_eq!(theme.lookup_local("TEntry", "foreground", StateFlags::EMPTY), None);
        assert_eq!(theme.lookup_local("TButton", "foreground", StateFlags::EMPTY), None);
    }

    #[test]
    fn test_first_match_wins() {
        let mut theme = Theme::new("t", None);
        theme.map(
            "TEntry",
            "foreground",
            [
                StateMapEntry::new(StateSpec::parse("pressed").unwrap(), "red"),
                StateMapEntry::new(StateSpec::parse("hover").unwrap(), "blue"),
            ],
        );
        assert_eq!(
            theme.lookup_local("TEntry", "foreground", StateFlags::PRESSED | StateFlags::HOVER),
            Some("red")
        );
    }
}
