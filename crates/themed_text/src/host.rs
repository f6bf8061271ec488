//! Headless host toolkit
//!
//! [`Host`] owns everything the themed widgets talk to: the widget arena, the
//! event dispatcher, the idle queue and the style engine. It runs on a single
//! thread; handlers and idle tasks get `&mut Host` and run to completion.
//!
//! ```rust
//! use themed_core::event_types::FOCUS_IN;
//! use themed_text::Host;
//!
//! let mut host = Host::new();
//! let entry = host.create_widget(host.root(), "Text").unwrap();
//! host.bind(entry, FOCUS_IN, |host, event| {
//!     host.configure(event.target, [("background", "#ffffff")]).ok();
//! })
//! .unwrap();
//!
//! host.focus_set(entry);
//! assert_eq!(host.cget(entry, "background"), Some("#ffffff"));
//! ```

use themed_core::event_types::{
    self, BUTTON_PRESS, BUTTON_RELEASE, DESTROY, FOCUS_IN, FOCUS_OUT, POINTER_ENTER,
    POINTER_LEAVE, THEME_CHANGED,
};
use themed_core::{
    BindingId, Event, EventDispatcher, EventType, GridOptions, IdleQueue, PackOptions,
    PlaceOptions, Placement, TaskId, WidgetError, WidgetId, WidgetNode, WidgetTree,
};
use themed_theme::{StyleEngine, StyleResolver, ThemeError};
use tracing::{debug, trace};

use crate::Result;

/// Default display scaling: 96 dpi screen, 72 points per inch
pub const DEFAULT_PIXELS_PER_POINT: f32 = 96.0 / 72.0;

/// Single-threaded toolkit state: widgets, bindings, idle tasks, themes
pub struct Host {
    widgets: WidgetTree,
    dispatcher: EventDispatcher<Host>,
    idle: IdleQueue<Host>,
    style: StyleEngine,
    focus: Option<WidgetId>,
    pointer: Option<WidgetId>,
    pixels_per_point: f32,
}

impl Host {
    /// A host with the built-in theme presets installed
    pub fn new() -> Self {
        Self::with_style_engine(StyleEngine::with_presets())
    }

    pub fn with_style_engine(style: StyleEngine) -> Self {
        Self {
            widgets: WidgetTree::new(),
            dispatcher: EventDispatcher::new(),
            idle: IdleQueue::new(),
            style,
            focus: None,
            pointer: None,
            pixels_per_point: DEFAULT_PIXELS_PER_POINT,
        }
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// The toplevel widget
    pub fn root(&self) -> WidgetId {
        self.widgets.root()
    }

    pub fn create_widget(&mut self, parent: WidgetId, class: &str) -> Result<WidgetId> {
        let id = self.widgets.create(parent, class)?;
        trace!(class, path = self.path(id), "widget created");
        Ok(id)
    }

    /// Destroy a widget and its descendants
    ///
    /// Children go first. Each widget receives its destroy event while its
    /// bindings are still in place, then the bindings are dropped. Destroying
    /// the root destroys its children only.
    pub fn destroy(&mut self, id: WidgetId) {
        let doomed = if id == self.root() {
            let children = self
                .widgets
                .get(id)
                .map(|node| node.children().to_vec())
                .unwrap_or_default();
            children
                .into_iter()
                .flat_map(|child| self.widgets.subtree_post_order(child))
                .collect()
        } else {
            self.widgets.subtree_post_order(id)
        };

        for widget in doomed {
            if !self.widgets.exists(widget) {
                continue;
            }
            debug!(path = self.path(widget), "destroying widget");
            self.deliver(widget, &Event::new(DESTROY, widget));
            self.dispatcher.unregister_widget(widget);
            self.widgets.remove(widget);
            if self.focus == Some(widget) {
                self.focus = None;
            }
            if self.pointer == Some(widget) {
                self.pointer = None;
            }
        }
    }

    pub fn exists(&self, id: WidgetId) -> bool {
        self.widgets.exists(id)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.widgets.get(id)
    }

    /// Path name of a widget, empty once destroyed
    pub fn path(&self, id: WidgetId) -> &str {
        self.widgets.get(id).map_or("", WidgetNode::path)
    }

    /// Write widget attributes
    pub fn configure<I, K, V>(&mut self, id: WidgetId, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.widgets.configure(id, attributes)
    }

    pub fn cget(&self, id: WidgetId, name: &str) -> Option<&str> {
        self.widgets.cget(id, name)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Add a handler for `event_type` on `widget`
    pub fn bind<F>(&mut self, widget: WidgetId, event_type: EventType, handler: F) -> Result<BindingId>
    where
        F: Fn(&mut Host, &Event) + 'static,
    {
        if !self.widgets.exists(widget) {
            return Err(WidgetError::InvalidWidget(widget));
        }
        Ok(self.dispatcher.register(widget, event_type, handler))
    }

    pub fn unbind(&mut self, binding: BindingId) -> bool {
        self.dispatcher.unregister(binding)
    }

    /// Number of handlers bound for an event type on a widget
    pub fn binding_count(&self, widget: WidgetId, event_type: EventType) -> usize {
        self.dispatcher.count(widget, event_type)
    }

    /// Deliver an event to the handlers bound on its target
    pub fn dispatch(&mut self, event: &Event) {
        self.deliver(event.target, event);
    }

    /// Deliver an event to the handlers bound on `listener`
    ///
    /// `listener` may differ from `event.target`, which is how events
    /// originating at one widget reach handlers bound on another.
    pub fn deliver(&mut self, listener: WidgetId, event: &Event) {
        let handlers = self.dispatcher.handlers(listener, event.event_type);
        if handlers.is_empty() {
            return;
        }
        trace!(
            event = event_types::name(event.event_type),
            handlers = handlers.len(),
            "delivering event"
        );
        for handler in handlers {
            handler(self, event);
        }
    }

    /// Move keyboard focus, sending focus-out and focus-in
    pub fn focus_set(&mut self, id: WidgetId) {
        if self.focus == Some(id) || !self.exists(id) {
            return;
        }
        if let Some(previous) = self.focus.take() {
            self.dispatch(&Event::new(FOCUS_OUT, previous));
        }
        self.focus = Some(id);
        self.dispatch(&Event::new(FOCUS_IN, id));
    }

    /// Drop keyboard focus
    pub fn focus_clear(&mut self) {
        if let Some(previous) = self.focus.take() {
            self.dispatch(&Event::new(FOCUS_OUT, previous));
        }
    }

    pub fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// Move the pointer over `target` (or off all widgets), sending leave/enter
    pub fn pointer_move(&mut self, target: Option<WidgetId>) {
        if self.pointer == target {
            return;
        }
        if let Some(previous) = self.pointer.take() {
            self.dispatch(&Event::new(POINTER_LEAVE, previous));
        }
        if let Some(next) = target.filter(|id| self.exists(*id)) {
            self.pointer = Some(next);
            self.dispatch(&Event::new(POINTER_ENTER, next));
        }
    }

    pub fn pointer(&self) -> Option<WidgetId> {
        self.pointer
    }

    pub fn enter(&mut self, id: WidgetId) {
        self.dispatch(&Event::new(POINTER_ENTER, id));
    }

    pub fn leave(&mut self, id: WidgetId) {
        self.dispatch(&Event::new(POINTER_LEAVE, id));
    }

    pub fn button_press(&mut self, id: WidgetId, button: u8) {
        self.dispatch(&Event::button(BUTTON_PRESS, id, button));
    }

    pub fn button_release(&mut self, id: WidgetId, button: u8) {
        self.dispatch(&Event::button(BUTTON_RELEASE, id, button));
    }

    // =========================================================================
    // Idle tasks
    // =========================================================================

    /// Run `task` at the next idle point
    pub fn schedule_idle<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce(&mut Host) + 'static,
    {
        self.idle.schedule(task)
    }

    /// Cancel an idle task that has not run yet
    pub fn cancel_idle(&mut self, task: TaskId) -> bool {
        self.idle.cancel(task)
    }

    pub fn is_idle_pending(&self, task: TaskId) -> bool {
        self.idle.is_pending(task)
    }

    /// Number of idle tasks waiting
    pub fn pending_idle(&self) -> usize {
        self.idle.len()
    }

    /// Run idle tasks until none are left, returning how many ran
    pub fn run_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some((id, task)) = self.idle.pop() {
            trace!(?id, "running idle task");
            task(self);
            ran += 1;
        }
        ran
    }

    // =========================================================================
    // Themes
    // =========================================================================

    pub fn style(&self) -> &StyleEngine {
        &self.style
    }

    /// Mutable access to the style engine
    ///
    /// Changes made here are not announced; call [`Host::theme_changed`] or
    /// re-select the theme with [`Host::theme_use`] so widgets restyle.
    pub fn style_mut(&mut self) -> &mut StyleEngine {
        &mut self.style
    }

    pub fn resolver(&self) -> StyleResolver<'_> {
        StyleResolver::new(&self.style)
    }

    /// Switch the active theme and announce it
    ///
    /// The announcement goes out even when `name` is already active, so
    /// widgets pick up edits made to it through [`Host::style_mut`]. Returns
    /// whether the active theme changed.
    pub fn theme_use(&mut self, name: &str) -> std::result::Result<bool, ThemeError> {
        let changed = self.style.theme_use(name)?;
        self.theme_changed();
        Ok(changed)
    }

    /// Send theme-changed to every live widget, each as its own origin
    pub fn theme_changed(&mut self) {
        debug!(theme = self.style.current_theme(), "broadcasting theme change");
        for widget in self.widgets.walk() {
            if self.widgets.exists(widget) {
                self.dispatch(&Event::new(THEME_CHANGED, widget));
            }
        }
    }

    /// Pixels per printer's point, used to convert distances with units
    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    pub fn set_pixels_per_point(&mut self, scaling: f32) {
        self.pixels_per_point = scaling;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn pack(&mut self, id: WidgetId, options: PackOptions) -> Result<()> {
        self.widgets.set_placement(id, Some(Placement::Pack(options)))
    }

    pub fn grid(&mut self, id: WidgetId, options: GridOptions) -> Result<()> {
        self.widgets.set_placement(id, Some(Placement::Grid(options)))
    }

    /// Update grid options in place, gridding the widget first if needed
    pub fn grid_configure<F>(&mut self, id: WidgetId, update: F) -> Result<()>
    where
        F: FnOnce(&mut GridOptions),
    {
        let placement = self.widgets.placement_mut(id)?;
        if !matches!(placement, Some(Placement::Grid(_))) {
            *placement = Some(Placement::Grid(GridOptions::new(0, 0)));
        }
        if let Some(Placement::Grid(options)) = placement {
            update(options);
        }
        Ok(())
    }

    pub fn place(&mut self, id: WidgetId, options: PlaceOptions) -> Result<()> {
        self.widgets.set_placement(id, Some(Placement::Place(options)))
    }

    /// Unmanage the widget, whichever manager placed it
    pub fn forget(&mut self, id: WidgetId) -> Result<()> {
        self.widgets.set_placement(id, None)
    }

    pub fn placement(&self, id: WidgetId) -> Option<&Placement> {
        self.widgets.get(id).and_then(WidgetNode::placement)
    }

    pub fn grid_rowconfigure(&mut self, id: WidgetId, row: u32, weight: u32) -> Result<()> {
        self.widgets.set_row_weight(id, row, weight)
    }

    pub fn grid_columnconfigure(&mut self, id: WidgetId, column: u32, weight: u32) -> Result<()> {
        self.widgets.set_column_weight(id, column, weight)
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}
