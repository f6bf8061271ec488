//! Themed text container
//!
//! A [`ThemedTextFrame`] draws an entry-style field around a content widget.
//! It aggregates interaction state (focus, hover, pressed) from every widget
//! bound to it, so the field looks hovered or focused no matter which inner
//! widget the pointer or keyboard is on, and pushes the resolved colors onto
//! the content surface.
//!
//! Bound widgets come in two kinds:
//!
//! - **penetrating**: their focus, pointer and primary-button events change
//!   the container's state
//! - **non-penetrating**: their focus and pointer events only trigger a
//!   restyle (a scrollbar should not make the text look focused)
//!
//! Stateful refreshes are coalesced: any number of events before the next
//! idle point produce a single refresh.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use themed_core::event_types::{
    self, BUTTON_PRESS, BUTTON_RELEASE, DESTROY, FOCUS_IN, FOCUS_OUT, POINTER_ENTER,
    POINTER_LEAVE, THEME_CHANGED,
};
use themed_core::{
    BindingId, Event, EventType, GridOptions, PackOptions, Padding, PlaceOptions, Placement,
    StateFlags, TaskId, WidgetError, WidgetId,
};
use tracing::{debug, trace};

use crate::geometry::Geometry;
use crate::host::Host;
use crate::Result;

/// Style the container resolves against unless told otherwise
pub const DEFAULT_STYLE: &str = "ThemedText.TEntry";

/// Widget class of the container unless told otherwise
pub const DEFAULT_CLASS: &str = "ThemedText";

/// Events a non-penetrating widget is subscribed to
const STYLE_EVENTS: [EventType; 4] = [FOCUS_IN, FOCUS_OUT, POINTER_ENTER, POINTER_LEAVE];

/// Events a penetrating widget is subscribed to
const STATE_EVENTS: [EventType; 6] = [
    FOCUS_IN,
    FOCUS_OUT,
    POINTER_ENTER,
    POINTER_LEAVE,
    BUTTON_PRESS,
    BUTTON_RELEASE,
];

/// Construction options for [`ThemedTextFrame`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameOptions {
    pub style: Option<String>,
    pub class: Option<String>,
    pub relief: Option<String>,
    pub padding: Option<String>,
    pub borderwidth: Option<String>,
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn relief(mut self, relief: impl Into<String>) -> Self {
        self.relief = Some(relief.into());
        self
    }

    pub fn padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn borderwidth(mut self, borderwidth: impl Into<String>) -> Self {
        self.borderwidth = Some(borderwidth.into());
        self
    }
}

/// The content widget and the widget that receives its visual attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundText {
    pub widget: WidgetId,
    pub proxy: WidgetId,
}

struct BoundWidget {
    penetrates: bool,
    bindings: SmallVec<[BindingId; 8]>,
}

struct FrameState {
    id: WidgetId,
    path: String,
    style: String,
    bound_text: Option<BoundText>,
    bound_widgets: FxHashMap<WidgetId, BoundWidget>,
    state: StateFlags,
    pending_update: Option<TaskId>,
    refreshes: u64,
}

/// Field-style container that tracks interaction state across bound widgets
///
/// Cloning yields another handle to the same container. Event handlers hold
/// only weak references, so dropping every handle stops all restyling even
/// while the widgets live on.
#[derive(Clone)]
pub struct ThemedTextFrame {
    inner: Rc<RefCell<FrameState>>,
}

impl ThemedTextFrame {
    /// Create the container widget inside `parent`
    ///
    /// The container binds itself as a penetrating widget and listens for
    /// theme changes.
    pub fn new(host: &mut Host, parent: WidgetId, options: FrameOptions) -> Result<Self> {
        let style = options
            .style
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STYLE.to_string());
        let class = options
            .class
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CLASS.to_string());

        let id = host.create_widget(parent, &class)?;
        let mut attributes = vec![("style", style.clone())];
        attributes.extend(options.relief.map(|v| ("relief", v)));
        attributes.extend(options.padding.map(|v| ("padding", v)));
        attributes.extend(options.borderwidth.map(|v| ("borderwidth", v)));
        host.configure(id, attributes)?;

        let frame = Self {
            inner: Rc::new(RefCell::new(FrameState {
                id,
                path: host.path(id).to_string(),
                style,
                bound_text: None,
                bound_widgets: FxHashMap::default(),
                state: StateFlags::EMPTY,
                pending_update: None,
                refreshes: 0,
            })),
        };

        frame.bind_widget(host, id, true)?;
        host.bind(id, THEME_CHANGED, frame.handler(Self::on_theme_changed))?;
        debug!(path = host.path(id), style = %frame.style_name(), "themed text frame created");
        Ok(frame)
    }

    /// The container widget
    pub fn id(&self) -> WidgetId {
        self.inner.borrow().id
    }

    pub fn style_name(&self) -> String {
        self.inner.borrow().style.clone()
    }

    /// Current aggregated state
    pub fn state(&self) -> StateFlags {
        self.inner.borrow().state
    }

    pub fn bound_text(&self) -> Option<BoundText> {
        self.inner.borrow().bound_text
    }

    /// Whether `widget` is bound, and if so whether it penetrates
    pub fn penetrates(&self, widget: WidgetId) -> Option<bool> {
        self.inner
            .borrow()
            .bound_widgets
            .get(&widget)
            .map(|bound| bound.penetrates)
    }

    pub fn bound_widget_count(&self) -> usize {
        self.inner.borrow().bound_widgets.len()
    }

    /// Whether a stateful refresh is scheduled for the next idle point
    pub fn has_pending_update(&self) -> bool {
        self.inner.borrow().pending_update.is_some()
    }

    /// Number of stateful refreshes that have run
    pub fn refresh_count(&self) -> u64 {
        self.inner.borrow().refreshes
    }

    /// Register `widget` with the container
    ///
    /// Binding a widget again replaces its earlier registration, so handlers
    /// never stack up.
    pub fn bind_widget(&self, host: &mut Host, widget: WidgetId, penetrates: bool) -> Result<()> {
        if !host.exists(widget) {
            return Err(WidgetError::InvalidWidget(widget));
        }

        let previous = self.inner.borrow_mut().bound_widgets.remove(&widget);
        if let Some(previous) = previous {
            for binding in previous.bindings {
                host.unbind(binding);
            }
        }

        let events: &[EventType] = if penetrates { &STATE_EVENTS } else { &STYLE_EVENTS };
        let mut bindings = SmallVec::new();
        for &event_type in events {
            bindings.push(host.bind(widget, event_type, self.handler(Self::on_interaction))?);
        }
        bindings.push(host.bind(widget, DESTROY, self.handler(Self::on_widget_destroyed))?);

        self.inner
            .borrow_mut()
            .bound_widgets
            .insert(widget, BoundWidget { penetrates, bindings });
        debug!(path = host.path(widget), penetrates, "widget bound");
        Ok(())
    }

    /// Make `text` the content widget and restyle immediately
    ///
    /// Visual attributes go to `proxy`, which defaults to `text` itself. The
    /// proxy's own border is switched off; the container draws the field.
    pub fn bind_text(&self, host: &mut Host, text: WidgetId, proxy: Option<WidgetId>) -> Result<()> {
        let proxy = proxy.unwrap_or(text);
        for widget in [proxy, text] {
            if !host.exists(widget) {
                return Err(WidgetError::InvalidWidget(widget));
            }
        }

        host.configure(
            proxy,
            [("relief", "flat"), ("borderwidth", "0"), ("highlightthickness", "0")],
        )?;
        self.inner.borrow_mut().bound_text = Some(BoundText { widget: text, proxy });
        self.bind_widget(host, text, true)?;
        self.update_style(host);
        Ok(())
    }

    /// Re-resolve every style option and write it out
    ///
    /// Ends with a stateful refresh.
    pub fn update_style(&self, host: &mut Host) {
        let (id, style, bound) = {
            let state = self.inner.borrow();
            (state.id, state.style.clone(), state.bound_text)
        };
        if !host.exists(id) {
            return;
        }

        if let Some(bound) = bound {
            let resolver = host.resolver();
            let focus = Some(StateFlags::FOCUS);
            let mut attributes: SmallVec<[(&str, String); 5]> = SmallVec::new();
            if let Some(value) = resolver.lookup(&style, "selectbackground", focus) {
                attributes.push(("selectbackground", value));
            }
            if let Some(value) = resolver.lookup(&style, "selectforeground", focus) {
                attributes.push(("selectforeground", value));
            }
            attributes.push(("insertwidth", resolver.lookup_or(&style, "insertwidth", focus, "1")));
            attributes.push(("font", resolver.lookup_or(&style, "font", None, "TkDefaultFont")));
            let text_padding = resolver.lookup(&style, "textpadding", None);

            let (padx, pady) = text_padding_pixels(text_padding.as_deref(), host.pixels_per_point());
            write_attributes(host, bound.proxy, attributes);
            if let Err(err) = host.grid_configure(bound.proxy, |grid| {
                grid.padx = padx;
                grid.pady = pady;
            }) {
                trace!(%err, "content padding not applied");
            }
        }

        let resolver = host.resolver();
        let attributes = [
            ("padding", resolver.lookup_or(&style, "padding", None, "1")),
            ("borderwidth", resolver.lookup_or(&style, "borderwidth", None, "1")),
        ];
        write_attributes(host, id, attributes);

        self.update_stateful_style(host);
    }

    /// Push colors for the current state onto the content surface
    ///
    /// Cancels any scheduled refresh, since this one supersedes it.
    fn update_stateful_style(&self, host: &mut Host) {
        let (style, flags, bound) = {
            let mut state = self.inner.borrow_mut();
            if let Some(task) = state.pending_update.take() {
                host.cancel_idle(task);
            }
            state.refreshes += 1;
            (state.style.clone(), state.state, state.bound_text)
        };
        let Some(bound) = bound else {
            return;
        };

        let resolver = host.resolver();
        let mut attributes: SmallVec<[(&str, String); 2]> = SmallVec::new();
        if let Some(value) = resolver.lookup(&style, "fieldbackground", Some(flags)) {
            attributes.push(("background", value));
        }
        if let Some(value) = resolver.lookup(&style, "foreground", Some(flags)) {
            attributes.push(("foreground", value));
        }
        trace!(state = %flags, "stateful refresh");
        write_attributes(host, bound.proxy, attributes);
    }

    /// Replace the pending refresh with a new one at the next idle point
    fn schedule_stateful_update(&self, host: &mut Host) {
        let weak = Rc::downgrade(&self.inner);
        let mut state = self.inner.borrow_mut();
        if let Some(task) = state.pending_update.take() {
            host.cancel_idle(task);
        }
        state.pending_update = Some(host.schedule_idle(move |host| {
            if let Some(frame) = Self::upgrade(&weak) {
                frame.update_stateful_style(host);
            }
        }));
    }

    fn on_interaction(&self, host: &mut Host, event: &Event) {
        let penetrates = {
            let state = self.inner.borrow();
            match state.bound_widgets.get(&event.target) {
                Some(bound) => bound.penetrates,
                None => {
                    trace!(event = event_types::name(event.event_type), "event from unbound widget");
                    return;
                }
            }
        };

        if penetrates {
            let Some((flag, on)) = transition(event) else {
                return;
            };
            let mut state = self.inner.borrow_mut();
            if on {
                state.state.insert(flag);
            } else {
                state.state.remove(flag);
            }
        }
        self.schedule_stateful_update(host);
    }

    fn on_theme_changed(&self, host: &mut Host, event: &Event) {
        // Only the copy aimed at the container itself; children get their own.
        if event.target != self.id() {
            return;
        }
        self.update_style(host);
    }

    fn on_widget_destroyed(&self, host: &mut Host, event: &Event) {
        let mut state = self.inner.borrow_mut();
        state.bound_widgets.remove(&event.target);
        if state.bound_text.is_some_and(|bound| bound.widget == event.target) {
            state.bound_text = None;
        }
        if event.target == state.id {
            if let Some(task) = state.pending_update.take() {
                host.cancel_idle(task);
            }
        }
        debug!(path = host.path(event.target), "bound widget destroyed");
    }

    /// Wrap a method as an event handler holding a weak reference
    fn handler(&self, method: fn(&Self, &mut Host, &Event)) -> impl Fn(&mut Host, &Event) + 'static {
        let weak = Rc::downgrade(&self.inner);
        move |host: &mut Host, event: &Event| {
            if let Some(frame) = Self::upgrade(&weak) {
                method(&frame, host, event);
            }
        }
    }

    fn upgrade(weak: &Weak<RefCell<FrameState>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

impl Geometry for ThemedTextFrame {
    fn pack(&self, host: &mut Host, options: PackOptions) -> Result<()> {
        host.pack(self.id(), options)
    }

    fn grid(&self, host: &mut Host, options: GridOptions) -> Result<()> {
        host.grid(self.id(), options)
    }

    fn place(&self, host: &mut Host, options: PlaceOptions) -> Result<()> {
        host.place(self.id(), options)
    }

    fn forget(&self, host: &mut Host) -> Result<()> {
        host.forget(self.id())
    }

    fn placement<'h>(&self, host: &'h Host) -> Option<&'h Placement> {
        host.placement(self.id())
    }
}

impl fmt::Display for ThemedTextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.borrow().path)
    }
}

impl fmt::Debug for ThemedTextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ThemedTextFrame")
            .field("path", &state.path)
            .field("style", &state.style)
            .field("state", &state.state)
            .field("bound_widgets", &state.bound_widgets.len())
            .finish()
    }
}

/// State flag an event sets or clears, if any
///
/// A leave from any penetrating widget clears hover, even when the pointer
/// moved onto another widget of the same container; the enter that follows
/// sets it again.
fn transition(event: &Event) -> Option<(StateFlags, bool)> {
    match event.event_type {
        FOCUS_IN => Some((StateFlags::FOCUS, true)),
        FOCUS_OUT => Some((StateFlags::FOCUS, false)),
        POINTER_ENTER => Some((StateFlags::HOVER, true)),
        POINTER_LEAVE => Some((StateFlags::HOVER, false)),
        BUTTON_PRESS if event.is_primary_button() => Some((StateFlags::PRESSED, true)),
        BUTTON_RELEASE if event.is_primary_button() => Some((StateFlags::PRESSED, false)),
        _ => None,
    }
}

/// Horizontal and vertical content padding in pixels
///
/// A missing or malformed spec pads nothing.
fn text_padding_pixels(spec: Option<&str>, pixels_per_point: f32) -> ((f32, f32), (f32, f32)) {
    let padding = match spec.map(Padding::parse) {
        Some(Ok(Some(padding))) => padding,
        Some(Err(err)) => {
            trace!(%err, "ignoring text padding");
            return ((0.0, 0.0), (0.0, 0.0));
        }
        _ => return ((0.0, 0.0), (0.0, 0.0)),
    };
    let (left, right) = padding.to_padx();
    let (top, bottom) = padding.to_pady();
    (
        (left.to_pixels(pixels_per_point), right.to_pixels(pixels_per_point)),
        (top.to_pixels(pixels_per_point), bottom.to_pixels(pixels_per_point)),
    )
}

/// Write attributes, tolerating a widget that is already gone
fn write_attributes<'a, I>(host: &mut Host, widget: WidgetId, attributes: I)
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    if let Err(err) = host.configure(widget, attributes) {
        trace!(%err, "skipping style write");
    }
}
