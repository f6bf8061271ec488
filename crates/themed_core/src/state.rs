//! Interaction state flags
//!
//! A widget's visual state is a set of flags. Themes select values with
//! state specs such as `"hover !focus"`: every listed flag must be set and
//! every negated flag must be clear.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::StateError;

/// Set of widget state flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateFlags {
    bits: u16,
}

impl StateFlags {
    pub const EMPTY: StateFlags = StateFlags { bits: 0 };
    pub const ACTIVE: StateFlags = StateFlags { bits: 1 << 0 };
    pub const DISABLED: StateFlags = StateFlags { bits: 1 << 1 };
    pub const FOCUS: StateFlags = StateFlags { bits: 1 << 2 };
    pub const PRESSED: StateFlags = StateFlags { bits: 1 << 3 };
    pub const SELECTED: StateFlags = StateFlags { bits: 1 << 4 };
    pub const BACKGROUND: StateFlags = StateFlags { bits: 1 << 5 };
    pub const ALTERNATE: StateFlags = StateFlags { bits: 1 << 6 };
    pub const INVALID: StateFlags = StateFlags { bits: 1 << 7 };
    pub const READONLY: StateFlags = StateFlags { bits: 1 << 8 };
    pub const HOVER: StateFlags = StateFlags { bits: 1 << 9 };

    const NAMES: [(StateFlags, &'static str); 10] = [
        (Self::ACTIVE, "active"),
        (Self::DISABLED, "disabled"),
        (Self::FOCUS, "focus"),
        (Self::PRESSED, "pressed"),
        (Self::SELECTED, "selected"),
        (Self::BACKGROUND, "background"),
        (Self::ALTERNATE, "alternate"),
        (Self::INVALID, "invalid"),
        (Self::READONLY, "readonly"),
        (Self::HOVER, "hover"),
    ];

    /// Look up a single flag by name
    pub fn from_name(name: &str) -> Result<Self, StateError> {
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
            .ok_or_else(|| StateError::UnknownState(name.to_string()))
    }

    /// Build a set from plain flag names (`["focus", "hover"]`)
    pub fn from_names<'a, I>(names: I) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .try_fold(Self::EMPTY, |set, name| Ok(set | Self::from_name(name)?))
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub const fn contains(&self, other: StateFlags) -> bool {
        self.bits & other.bits == other.bits
    }

    pub const fn intersects(&self, other: StateFlags) -> bool {
        self.bits & other.bits != 0
    }

    pub fn insert(&mut self, other: StateFlags) {
        self.bits |= other.bits;
    }

    pub fn remove(&mut self, other: StateFlags) {
        self.bits &= !other.bits;
    }

    /// Apply `["focus", "!hover"]` style changes, returning the new set
    pub fn with_changes<'a, I>(mut self, changes: I) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for change in changes {
            match change.strip_prefix('!') {
                Some(name) => self.remove(Self::from_name(name)?),
                None => self.insert(Self::from_name(change)?),
            }
        }
        Ok(self)
    }

    /// Names of the set flags, in canonical order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        Self::NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

impl BitOr for StateFlags {
    type Output = StateFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        StateFlags {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for StateFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl fmt::Display for StateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        f.write_str(&names.join(" "))
    }
}

/// A state predicate: flags that must be set and flags that must be clear
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateSpec {
    on: StateFlags,
    off: StateFlags,
}

impl StateSpec {
    /// Matches every state
    pub const ANY: StateSpec = StateSpec {
        on: StateFlags::EMPTY,
        off: StateFlags::EMPTY,
    };

    pub fn new(on: StateFlags, off: StateFlags) -> Self {
        Self { on, off }
    }

    /// Parse a whitespace-separated spec; `!name` negates
    pub fn parse(spec: &str) -> Result<Self, StateError> {
        spec.split_whitespace().try_fold(Self::ANY, |mut acc, word| {
            match word.strip_prefix('!') {
                Some(name) => acc.off.insert(StateFlags::from_name(name)?),
                None => acc.on.insert(StateFlags::from_name(word)?),
            }
            Ok(acc)
        })
    }

    /// Whether `state` satisfies this spec
    pub const fn matches(&self, state: StateFlags) -> bool {
        state.contains(self.on) && !state.intersects(self.off)
    }
}

impl fmt::Display for StateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = self.on.names().map(str::to_string).collect();
        words.extend(self.off.names().map(|n| format!("!{n}")));
        f.write_str(&words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_set_operations() {
        let mut state = StateFlags::EMPTY;
        state.insert(StateFlags::FOCUS);
        state |= StateFlags::HOVER;
        assert!(state.contains(StateFlags::FOCUS | StateFlags::HOVER));

        state.remove(StateFlags::FOCUS);
        assert_eq!(state, StateFlags::HOVER);
        assert_eq!(state.to_string(), "hover");
    }

    #[test]
    fn test_with_changes() {
        let state = StateFlags::FOCUS
            .with_changes(["hover", "!focus", "pressed"])
            .unwrap();
        assert_eq!(state, StateFlags::HOVER | StateFlags::PRESSED);
        assert_eq!(state.to_string(), "pressed hover");

        assert_eq!(
            StateFlags::EMPTY.with_changes(["shiny"]),
            Err(StateError::UnknownState("shiny".to_string()))
        );
    }

    #[test]
    fn test_spec_matching() {
        let spec = StateSpec::parse("hover !focus").unwrap();
        assert!(spec.matches(StateFlags::HOVER));
        assert!(spec.matches(StateFlags::HOVER | StateFlags::PRESSED));
        assert!(!spec.matches(StateFlags::HOVER | StateFlags::FOCUS));
        assert!(!spec.matches(StateFlags::EMPTY));
        assert_eq!(spec.to_string(), "hover !focus");
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = StateSpec::parse("  ").unwrap();
        assert_eq!(spec, StateSpec::ANY);
        assert!(spec.matches(StateFlags::EMPTY));
        assert!(spec.matches(StateFlags::DISABLED | StateFlags::FOCUS));
    }

    #[test]
    fn test_negated_only_spec() {
        let spec = StateSpec::parse("!disabled").unwrap();
        assert!(spec.matches(StateFlags::EMPTY));
        assert!(!spec.matches(StateFlags::DISABLED));
    }

    #[test]
    fn test_unknown_name_in_spec() {
        assert_eq!(
            StateSpec::parse("hover !sparkly"),
            Err(StateError::UnknownState("sparkly".to_string()))
        );
    }
}
