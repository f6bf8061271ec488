//! A scripted session: one scrolled themed text with an icon

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use themed_core::{GridOptions, Sticky, WidgetId};
use themed_text::{Host, ScrolledText, ScrolledTextOptions};
use tracing::{debug, warn};

use crate::scenario::{Scenario, Step, Target};

/// Content attributes reported in snapshots
const CONTENT_ATTRIBUTES: [&str; 6] = [
    "background",
    "foreground",
    "selectbackground",
    "selectforeground",
    "insertwidth",
    "font",
];

/// Frame attributes reported in snapshots
const FRAME_ATTRIBUTES: [&str; 3] = ["style", "padding", "borderwidth"];

/// What the widget looks like at one point of a scenario
#[derive(Debug, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub theme: String,
    pub state: Vec<String>,
    pub pending_refresh: bool,
    pub content: BTreeMap<String, String>,
    pub frame: BTreeMap<String, String>,
}

pub struct Session {
    host: Host,
    text: ScrolledText,
    icon: WidgetId,
}

impl Session {
    /// A scrolled text plus an icon bound as a penetrating widget
    pub fn new(mut host: Host, horizontal: bool) -> Result<Self> {
        let root = host.root();
        let options = ScrolledTextOptions::new().horizontal(horizontal);
        let text = ScrolledText::new(&mut host, root, options)?;

        let icon = host.create_widget(text.frame().id(), "Label")?;
        host.grid(icon, GridOptions::new(0, 1).sticky(Sticky::E))?;
        text.frame().bind_widget(&mut host, icon, true)?;
        host.run_idle();

        debug!(path = %text, horizontal, "session ready");
        Ok(Self { host, text, icon })
    }

    pub fn theme(&self) -> &str {
        self.host.style().current_theme()
    }

    /// Run every step, collecting snapshots
    pub fn run(&mut self, scenario: &Scenario) -> Vec<Snapshot> {
        let mut snapshots = Vec::new();
        for step in &scenario.steps {
            if let Some(snapshot) = self.step(step) {
                snapshots.push(snapshot);
            }
        }
        snapshots
    }

    fn step(&mut self, step: &Step) -> Option<Snapshot> {
        debug!(?step, "step");
        match *step {
            Step::Focus { target: None } => self.host.focus_clear(),
            Step::Focus {
                target: Some(target),
            } => self.on_target(target, Host::focus_set),
            Step::Enter { target } => self.on_target(target, Host::enter),
            Step::Leave { target } => self.on_target(target, Host::leave),
            Step::Press { target, button } => {
                self.on_target(target, |host, widget| host.button_press(widget, button))
            }
            Step::Release { target, button } => {
                self.on_target(target, |host, widget| host.button_release(widget, button))
            }
            Step::Idle => {
                self.host.run_idle();
            }
            Step::Theme { ref name } => {
                if let Err(err) = self.host.theme_use(name) {
                    warn!(%err, "theme step skipped");
                }
            }
            Step::Destroy { target } => self.on_target(target, Host::destroy),
            Step::Snapshot { ref label } => return Some(self.snapshot(label.clone())),
        }
        None
    }

    /// Run `action` on the widget a step targets, if the session has it
    fn on_target<F>(&mut self, target: Target, action: F)
    where
        F: FnOnce(&mut Host, WidgetId),
    {
        match self.widget(target) {
            Some(widget) => action(&mut self.host, widget),
            None => warn!(?target, "step skipped, no such widget"),
        }
    }

    fn widget(&self, target: Target) -> Option<WidgetId> {
        match target {
            Target::Text => Some(self.text.id()),
            Target::Frame => Some(self.text.frame().id()),
            Target::Scrollbar => Some(self.text.vertical_scrollbar()),
            Target::HorizontalScrollbar => self.text.horizontal_scrollbar(),
            Target::Icon => Some(self.icon),
        }
    }

    pub fn snapshot(&self, label: Option<String>) -> Snapshot {
        let collect = |widget: WidgetId, names: &[&str]| {
            names
                .iter()
                .filter_map(|name| {
                    self.host
                        .cget(widget, name)
                        .map(|value| (name.to_string(), value.to_string()))
                })
                .collect::<BTreeMap<_, _>>()
        };
        let frame = self.text.frame();
        Snapshot {
            label,
            theme: self.theme().to_string(),
            state: frame.state().names().map(str::to_string).collect(),
            pending_refresh: frame.has_pending_update(),
            content: collect(self.text.id(), &CONTENT_ATTRIBUTES),
            frame: collect(frame.id(), &FRAME_ATTRIBUTES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn background(snapshot: &Snapshot) -> Option<&str> {
        snapshot.content.get("background").map(String::as_str)
    }

    #[test]
    fn test_builtin_scenario() {
        let mut session = Session::new(Host::new(), false).unwrap();
        let snapshots = session.run(&Scenario::builtin());

        let labels: Vec<_> = snapshots.iter().filter_map(|s| s.label.as_deref()).collect();
        assert_eq!(
            labels,
            vec![
                "initial",
                "icon hovered",
                "scrollbar hovered",
                "focused",
                "dark theme",
                "pressed",
                "released"
            ]
        );

        assert_eq!(snapshots[0].theme, "default");
        assert_eq!(snapshots[1].state, vec!["hover"]);
        assert!(snapshots[2].state.is_empty());
        assert_eq!(snapshots[3].state, vec!["focus"]);

        let dark = &snapshots[4];
        assert_eq!(dark.theme, "dark");
        assert!(!dark.pending_refresh);
        assert_eq!(background(dark), Some("#1c1c1c"));
        assert_eq!(dark.frame.get("padding").map(String::as_str), Some("2"));

        assert_eq!(
            snapshots[5].content.get("foreground").map(String::as_str),
            Some("#ffffff")
        );
        assert!(snapshots[6].state.is_empty());
        assert_eq!(background(&snapshots[6]), Some("#292929"));
    }

    #[test]
    fn test_horizontal_scrollbar_target() {
        let scenario = Scenario::from_json(
            r#"{ "steps": [
                { "action": "enter", "target": "horizontal_scrollbar" },
                { "action": "snapshot" }
            ] }"#,
        )
        .unwrap();

        let mut without = Session::new(Host::new(), false).unwrap();
        let snapshots = without.run(&scenario);
        assert!(!snapshots[0].pending_refresh);

        let mut with = Session::new(Host::new(), true).unwrap();
        let snapshots = with.run(&scenario);
        assert!(snapshots[0].pending_refresh);
        assert!(snapshots[0].state.is_empty());
    }

    #[test]
    fn test_destroyed_text_reports_no_content() {
        let mut session = Session::new(Host::new(), false).unwrap();
        let scenario = Scenario::from_json(
            r#"{ "steps": [
                { "action": "destroy", "target": "text" },
                { "action": "enter", "target": "text" },
                { "action": "snapshot" }
            ] }"#,
        )
        .unwrap();

        let snapshots = session.run(&scenario);
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].content.is_empty());
        assert!(!snapshots[0].pending_refresh);
    }
}
