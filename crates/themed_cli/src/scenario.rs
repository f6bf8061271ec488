//! Scenario files
//!
//! A scenario is a list of steps run in order against one session:
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "enter", "target": "icon" },
//!     { "action": "idle" },
//!     { "action": "snapshot", "label": "hovered" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Widgets of a session a step can address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The text widget
    Text,
    /// The surrounding container
    Frame,
    /// Vertical scrollbar, bound without state penetration
    Scrollbar,
    /// Horizontal scrollbar, present when the session was built with one
    HorizontalScrollbar,
    /// Decorative icon bound with state penetration
    Icon,
}

fn primary_button() -> u8 {
    themed_core::PRIMARY_BUTTON
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Move keyboard focus; no target drops focus
    Focus {
        #[serde(default)]
        target: Option<Target>,
    },
    Enter {
        target: Target,
    },
    Leave {
        target: Target,
    },
    Press {
        target: Target,
        #[serde(default = "primary_button")]
        button: u8,
    },
    Release {
        target: Target,
        #[serde(default = "primary_button")]
        button: u8,
    },
    /// Run pending idle tasks
    Idle,
    /// Switch the active theme
    Theme {
        name: String,
    },
    Destroy {
        target: Target,
    },
    /// Record how the widget looks right now
    Snapshot {
        #[serde(default)]
        label: Option<String>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Focus, hover and theme switching on the stock presets
    pub fn builtin() -> Self {
        let snapshot = |label: &str| Step::Snapshot {
            label: Some(label.to_string()),
        };
        Self {
            steps: vec![
                snapshot("initial"),
                Step::Enter {
                    target: Target::Icon,
                },
                Step::Idle,
                snapshot("icon hovered"),
                Step::Leave {
                    target: Target::Icon,
                },
                Step::Enter {
                    target: Target::Scrollbar,
                },
                Step::Idle,
                snapshot("scrollbar hovered"),
                Step::Focus {
                    target: Some(Target::Text),
                },
                Step::Idle,
                snapshot("focused"),
                Step::Theme {
                    name: "dark".to_string(),
                },
                snapshot("dark theme"),
                Step::Press {
                    target: Target::Text,
                    button: primary_button(),
                },
                Step::Idle,
                snapshot("pressed"),
                Step::Release {
                    target: Target::Text,
                    button: primary_button(),
                },
                Step::Focus { target: None },
                Step::Idle,
                snapshot("released"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "steps": [
                    { "action": "focus", "target": "text" },
                    { "action": "focus" },
                    { "action": "press", "target": "icon" },
                    { "action": "release", "target": "icon", "button": 3 },
                    { "action": "theme", "name": "light" },
                    { "action": "idle" },
                    { "action": "snapshot" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            scenario.steps,
            vec![
                Step::Focus {
                    target: Some(Target::Text)
                },
                Step::Focus { target: None },
                Step::Press {
                    target: Target::Icon,
                    button: 1
                },
                Step::Release {
                    target: Target::Icon,
                    button: 3
                },
                Step::Theme {
                    name: "light".to_string()
                },
                Step::Idle,
                Step::Snapshot { label: None },
            ]
        );
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(Scenario::from_json(r#"{ "steps": [{ "action": "wiggle" }] }"#).is_err());
        assert!(Scenario::from_json(r#"{ "steps": [{ "action": "enter", "target": "moon" }] }"#).is_err());
    }
}
