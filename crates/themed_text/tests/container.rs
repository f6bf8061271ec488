//! Behaviour of a themed text container driven through the headless host

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use themed_core::event_types::{BUTTON_PRESS, FOCUS_IN, POINTER_ENTER, THEME_CHANGED};
use themed_core::{Event, Placement, StateFlags, WidgetError, WidgetId, PRIMARY_BUTTON};
use themed_theme::presets::THEMED_TEXT_STYLE;
use themed_theme::StyleEngine;
use themed_text::{FrameOptions, Host, TextOptions, ThemedText, ThemedTextFrame};

/// Dark theme, a themed text, a scrollbar (non-penetrating) and an icon
/// (penetrating) inside the frame
struct Fixture {
    host: Host,
    text: ThemedText,
    scrollbar: WidgetId,
    icon: WidgetId,
}

impl Fixture {
    fn new() -> Self {
        let mut host = Host::new();
        host.theme_use("dark").unwrap();
        let root = host.root();
        let text = ThemedText::new(&mut host, root, TextOptions::new()).unwrap();
        let scrollbar = host.create_widget(text.frame().id(), "Scrollbar").unwrap();
        let icon = host.create_widget(text.frame().id(), "Label").unwrap();
        text.frame().bind_widget(&mut host, scrollbar, false).unwrap();
        text.frame().bind_widget(&mut host, icon, true).unwrap();
        host.run_idle();
        Self {
            host,
            text,
            scrollbar,
            icon,
        }
    }

    fn frame(&self) -> &ThemedTextFrame {
        self.text.frame()
    }

    fn content(&self, name: &str) -> Option<&str> {
        self.text.cget(&self.host, name)
    }

    fn snapshot(&self, widget: WidgetId, names: &[&str]) -> BTreeMap<String, String> {
        names
            .iter()
            .filter_map(|name| {
                self.host
                    .cget(widget, name)
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect()
    }
}

fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn bind_content_applies_full_style() {
    let fx = Fixture::new();

    assert_eq!(
        fx.snapshot(
            fx.text.id(),
            &[
                "relief",
                "borderwidth",
                "highlightthickness",
                "selectbackground",
                "selectforeground",
                "insertwidth",
                "font",
                "background",
                "foreground",
            ],
        ),
        attrs(&[
            ("relief", "flat"),
            ("borderwidth", "0"),
            ("highlightthickness", "0"),
            ("selectbackground", "#2f60d8"),
            ("selectforeground", "#ffffff"),
            ("insertwidth", "1"),
            ("font", "TkTextFont"),
            ("background", "#292929"),
            ("foreground", "#fafafa"),
        ])
    );
    assert_eq!(
        fx.snapshot(fx.frame().id(), &["style", "padding", "borderwidth"]),
        attrs(&[
            ("style", THEMED_TEXT_STYLE),
            ("padding", "2"),
            ("borderwidth", "1"),
        ])
    );

    let grid = fx
        .host
        .placement(fx.text.id())
        .and_then(Placement::as_grid)
        .unwrap();
    assert_eq!((grid.padx, grid.pady), ((5.0, 5.0), (5.0, 5.0)));
}

#[test]
fn focus_changes_field_background() {
    let mut fx = Fixture::new();

    fx.host.focus_set(fx.text.id());
    fx.host.run_idle();
    assert_eq!(fx.frame().state(), StateFlags::FOCUS);
    assert_eq!(fx.content("background"), Some("#1c1c1c"));

    fx.host.focus_clear();
    fx.host.run_idle();
    assert_eq!(fx.frame().state(), StateFlags::EMPTY);
    assert_eq!(fx.content("background"), Some("#292929"));
}

#[test]
fn penetrating_decoration_hovers_the_field() {
    let mut fx = Fixture::new();

    fx.host.enter(fx.icon);
    fx.host.run_idle();
    assert_eq!(fx.frame().state(), StateFlags::HOVER);
    assert_eq!(fx.content("background"), Some("#2f2f2f"));

    fx.host.leave(fx.icon);
    fx.host.run_idle();
    assert_eq!(fx.content("background"), Some("#292929"));
}

#[test]
fn non_penetrating_widget_restyles_without_changing_state() {
    let mut fx = Fixture::new();
    let refreshes = fx.frame().refresh_count();

    fx.host.enter(fx.scrollbar);
    fx.host.focus_set(fx.scrollbar);
    assert!(fx.frame().has_pending_update());
    assert_eq!(fx.host.run_idle(), 1);

    assert_eq!(fx.frame().state(), StateFlags::EMPTY);
    assert_eq!(fx.frame().refresh_count(), refreshes + 1);
    assert_eq!(fx.content("background"), Some("#292929"));
    // Scrollbars never see button subscriptions.
    assert_eq!(fx.host.binding_count(fx.scrollbar, BUTTON_PRESS), 0);
}

#[test]
fn burst_of_events_yields_one_refresh_with_final_state() {
    let mut fx = Fixture::new();
    let refreshes = fx.frame().refresh_count();
    let text = fx.text.id();

    fx.host.enter(text);
    fx.host.button_press(text, PRIMARY_BUTTON);
    fx.host.button_release(text, PRIMARY_BUTTON);
    fx.host.focus_set(text);
    assert_eq!(fx.host.pending_idle(), 1);
    // Nothing is written before the idle point.
    assert_eq!(fx.content("background"), Some("#292929"));

    assert_eq!(fx.host.run_idle(), 1);
    assert_eq!(fx.frame().refresh_count(), refreshes + 1);
    assert_eq!(fx.frame().state(), StateFlags::HOVER | StateFlags::FOCUS);
    assert_eq!(fx.content("background"), Some("#1c1c1c"));
    assert_eq!(fx.content("foreground"), Some("#fafafa"));
}

#[test]
fn primary_press_changes_foreground() {
    let mut fx = Fixture::new();
    let text = fx.text.id();

    fx.host.button_press(text, PRIMARY_BUTTON);
    fx.host.run_idle();
    assert_eq!(fx.content("foreground"), Some("#ffffff"));

    fx.host.button_release(text, PRIMARY_BUTTON);
    fx.host.run_idle();
    assert_eq!(fx.content("foreground"), Some("#fafafa"));

    fx.host.button_press(text, 2);
    assert_eq!(fx.host.pending_idle(), 0);
    assert_eq!(fx.frame().state(), StateFlags::EMPTY);
}

#[test]
fn binding_twice_does_not_duplicate_handlers() {
    let mut fx = Fixture::new();
    let icon = fx.icon;
    let count = fx.frame().bound_widget_count();

    fx.text.frame().bind_widget(&mut fx.host, icon, true).unwrap();
    fx.text.frame().bind_widget(&mut fx.host, icon, true).unwrap();

    assert_eq!(fx.frame().bound_widget_count(), count);
    assert_eq!(fx.host.binding_count(icon, POINTER_ENTER), 1);
    assert_eq!(fx.host.binding_count(icon, FOCUS_IN), 1);

    fx.host.enter(icon);
    fx.host.run_idle();
    assert_eq!(fx.frame().state(), StateFlags::HOVER);
}

#[test]
fn theme_change_restyles_immediately_and_drops_pending_refresh() {
    let mut fx = Fixture::new();

    fx.host.enter(fx.text.id());
    assert!(fx.frame().has_pending_update());

    assert!(fx.host.theme_use("light").unwrap());
    assert!(!fx.frame().has_pending_update());
    assert_eq!(fx.host.run_idle(), 0);

    assert_eq!(fx.content("background"), Some("#f9f9f9"));
    assert_eq!(fx.content("selectbackground"), Some("#0560b6"));
    assert_eq!(fx.content("foreground"), Some("#1c1c1c"));
}

#[test]
fn reselecting_active_theme_applies_edits() {
    let mut fx = Fixture::new();
    fx.host
        .style_mut()
        .configure(THEMED_TEXT_STYLE, [("fieldbackground", "#101010")]);
    assert_eq!(fx.content("background"), Some("#292929"));

    assert!(!fx.host.theme_use("dark").unwrap());
    assert_eq!(fx.content("background"), Some("#101010"));
}

#[test]
fn theme_changed_from_other_origin_is_ignored() {
    let mut fx = Fixture::new();
    let text = fx.text.id();
    fx.text.configure(&mut fx.host, [("background", "marker")]).unwrap();

    // A copy addressed to a child, delivered to the frame's handlers.
    let frame = fx.frame().id();
    fx.host.deliver(frame, &Event::new(THEME_CHANGED, text));

    assert_eq!(fx.content("background"), Some("marker"));
    assert_eq!(fx.host.pending_idle(), 0);
}

#[test]
fn destroyed_content_is_forgotten() {
    let mut host = Host::new();
    let root = host.root();
    let frame = ThemedTextFrame::new(&mut host, root, FrameOptions::new()).unwrap();
    let text = host.create_widget(frame.id(), "Text").unwrap();
    let proxy = host.create_widget(frame.id(), "Canvas").unwrap();
    frame.bind_text(&mut host, text, Some(proxy)).unwrap();
    let bound = frame.bound_widget_count();

    host.destroy(text);
    assert_eq!(frame.bound_text(), None);
    assert_eq!(frame.penetrates(text), None);
    assert_eq!(frame.bound_widget_count(), bound - 1);

    host.configure(proxy, [("background", "marker"), ("font", "marker")])
        .unwrap();
    host.theme_use("dark").unwrap();
    frame.update_style(&mut host);
    assert_eq!(host.cget(proxy, "background"), Some("marker"));
    assert_eq!(host.cget(proxy, "font"), Some("marker"));
}

#[test]
fn destroying_the_frame_cancels_pending_refresh() {
    let mut fx = Fixture::new();

    fx.host.enter(fx.text.id());
    assert_eq!(fx.host.pending_idle(), 1);

    let frame = fx.frame().clone();
    fx.text.clone().destroy(&mut fx.host);
    assert_eq!(fx.host.pending_idle(), 0);
    assert!(!frame.has_pending_update());
    assert_eq!(frame.bound_widget_count(), 0);
}

#[test]
fn missing_theme_values_fall_back_to_defaults() {
    let mut host = Host::with_style_engine(StyleEngine::new());
    let root = host.root();
    let text = ThemedText::new(&mut host, root, TextOptions::new()).unwrap();

    assert_eq!(text.cget(&host, "insertwidth"), Some("1"));
    assert_eq!(text.cget(&host, "font"), Some("TkDefaultFont"));
    assert_eq!(text.cget(&host, "selectbackground"), None);
    assert_eq!(text.cget(&host, "background"), None);
    assert_eq!(host.cget(text.frame().id(), "padding"), Some("1"));
    assert_eq!(host.cget(text.frame().id(), "borderwidth"), Some("1"));

    let grid = host
        .placement(text.id())
        .and_then(Placement::as_grid)
        .unwrap();
    assert_eq!((grid.padx, grid.pady), ((0.0, 0.0), (0.0, 0.0)));
}

#[test]
fn text_padding_units_follow_scaling() {
    let mut host = Host::new();
    host.set_pixels_per_point(2.0);
    host.style_mut()
        .theme_create("ocean", Some("dark"))
        .unwrap()
        .configure(THEMED_TEXT_STYLE, [("textpadding", "3p 1p")]);
    host.theme_use("ocean").unwrap();

    let root = host.root();
    let text = ThemedText::new(&mut host, root, TextOptions::new()).unwrap();
    let grid = host
        .placement(text.id())
        .and_then(Placement::as_grid)
        .unwrap();
    assert_eq!((grid.padx, grid.pady), ((6.0, 6.0), (2.0, 2.0)));
    // Inherited from the parent theme.
    assert_eq!(text.cget(&host, "background"), Some("#292929"));
}

#[test]
fn dead_widgets_are_rejected() {
    let mut fx = Fixture::new();
    let ghost = fx.host.create_widget(fx.host.root(), "Label").unwrap();
    fx.host.destroy(ghost);

    assert_eq!(
        fx.text.frame().bind_widget(&mut fx.host, ghost, true),
        Err(WidgetError::InvalidWidget(ghost))
    );

    let before = fx.frame().bound_text();
    assert_eq!(
        fx.text.frame().bind_text(&mut fx.host, fx.icon, Some(ghost)),
        Err(WidgetError::InvalidWidget(ghost))
    );
    assert_eq!(fx.frame().bound_text(), before);
}
