//! Event dispatch system
//!
//! Widget events and per-widget handler tables. Handlers receive a mutable
//! context (the host that owns the dispatcher) so they can write attributes
//! and schedule work while an event is being delivered.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::widget::WidgetId;

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the themed text widgets
pub mod event_types {
    use super::EventType;

    pub const FOCUS_IN: EventType = 1;
    pub const FOCUS_OUT: EventType = 2;
    pub const POINTER_ENTER: EventType = 3;
    pub const POINTER_LEAVE: EventType = 4;
    pub const BUTTON_PRESS: EventType = 5;
    pub const BUTTON_RELEASE: EventType = 6;

    /// Virtual event broadcast after the active theme changed
    pub const THEME_CHANGED: EventType = 20;

    /// Delivered to a widget right before it is removed from the tree
    pub const DESTROY: EventType = 30;

    /// Human readable name, used in logs
    pub fn name(event_type: EventType) -> &'static str {
        match event_type {
            FOCUS_IN => "focus-in",
            FOCUS_OUT => "focus-out",
            POINTER_ENTER => "enter",
            POINTER_LEAVE => "leave",
            BUTTON_PRESS => "button-press",
            BUTTON_RELEASE => "button-release",
            THEME_CHANGED => "theme-changed",
            DESTROY => "destroy",
            _ => "unknown",
        }
    }
}

/// Primary pointer button number
pub const PRIMARY_BUTTON: u8 = 1;

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Widget the event originated at
    pub target: WidgetId,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Button { button: u8 },
    None,
}

impl Event {
    /// Create an event without payload
    pub fn new(event_type: EventType, target: WidgetId) -> Self {
        Self {
            event_type,
            target,
            data: EventData::None,
        }
    }

    /// Create a button press/release event
    pub fn button(event_type: EventType, target: WidgetId, button: u8) -> Self {
        Self {
            event_type,
            target,
            data: EventData::Button { button },
        }
    }

    /// Button number for button events
    pub fn button_number(&self) -> Option<u8> {
        match self.data {
            EventData::Button { button } => Some(button),
            EventData::None => None,
        }
    }

    /// True for a press or release of the primary button
    pub fn is_primary_button(&self) -> bool {
        self.button_number() == Some(PRIMARY_BUTTON)
    }
}

new_key_type! {
    /// Handle of a single registered handler, used to unbind it
    pub struct BindingId;
}

/// Event handler function type
pub type EventHandler<C> = Rc<dyn Fn(&mut C, &Event)>;

struct Binding<C> {
    widget: WidgetId,
    event_type: EventType,
    handler: EventHandler<C>,
}

/// Dispatches events to registered handlers
///
/// Bindings are additive: registering a second handler for the same widget
/// and event type keeps the first one.
pub struct EventDispatcher<C> {
    bindings: SlotMap<BindingId, Binding<C>>,
    table: FxHashMap<(WidgetId, EventType), SmallVec<[BindingId; 2]>>,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            bindings: SlotMap::with_key(),
            table: FxHashMap::default(),
        }
    }

    /// Register an event handler for a widget and event type
    pub fn register<F>(&mut self, widget: WidgetId, event_type: EventType, handler: F) -> BindingId
    where
        F: Fn(&mut C, &Event) + 'static,
    {
        let id = self.bindings.insert(Binding {
            widget,
            event_type,
            handler: Rc::new(handler),
        });
        self.table.entry((widget, event_type)).or_default().push(id);
        id
    }

    /// Remove a single handler. Returns false if it was already gone.
    pub fn unregister(&mut self, id: BindingId) -> bool {
        let Some(binding) = self.bindings.remove(id) else {
            return false;
        };
        let key = (binding.widget, binding.event_type);
        if let Some(ids) = self.table.get_mut(&key) {
            ids.retain(|b| *b != id);
            if ids.is_empty() {
                self.table.remove(&key);
            }
        }
        true
    }

    /// Drop every handler bound on `widget`
    pub fn unregister_widget(&mut self, widget: WidgetId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, b| b.widget != widget);
        self.table.retain(|(w, _), _| *w != widget);
        let removed = before - self.bindings.len();
        if removed > 0 {
            tracing::trace!(?widget, removed, "widget bindings dropped");
        }
        removed
    }

    /// Handlers bound for `(widget, event_type)`, in registration order
    ///
    /// The handlers are cloned out so the caller can invoke them while
    /// handing out a mutable context that owns this dispatcher.
    pub fn handlers(&self, widget: WidgetId, event_type: EventType) -> SmallVec<[EventHandler<C>; 4]> {
        self.table
            .get(&(widget, event_type))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.bindings.get(*id))
                    .map(|b| Rc::clone(&b.handler))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of handlers bound for `(widget, event_type)`
    pub fn count(&self, widget: WidgetId, event_type: EventType) -> usize {
        self.table.get(&(widget, event_type)).map_or(0, |ids| ids.len())
    }

    /// Whether the binding is still registered
    pub fn contains(&self, id: BindingId) -> bool {
        self.bindings.contains_key(id)
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Dispatch an event to the handlers bound on its target
    pub fn dispatch(&self, ctx: &mut C, event: &Event) {
        for handler in self.handlers(event.target, event.event_type) {
            handler(ctx, event);
        }
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
