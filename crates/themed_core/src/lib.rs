//! Themed Text Core
//!
//! Foundational primitives shared by the themed text crates:
//!
//! - **Widget handles**: generational, non-owning [`WidgetId`]s into a widget arena
//! - **Event Dispatch**: per-widget handler tables with explicit unbinding
//! - **Idle Scheduling**: cancellable tasks run at the next idle point of the loop
//! - **Interaction States**: state flag sets and `"hover !focus"` style state specs
//! - **Units**: screen distances and padding specs
//!
//! # Example
//!
//! ```rust
//! use themed_core::{StateFlags, StateSpec};
//!
//! let spec = StateSpec::parse("hover !focus").unwrap();
//!
//! assert!(spec.matches(StateFlags::HOVER));
//! assert!(!spec.matches(StateFlags::HOVER | StateFlags::FOCUS));
//! ```

pub mod error;
pub mod events;
pub mod geometry;
pub mod idle;
pub mod state;
pub mod units;
pub mod widget;

pub use error::{ParseError, StateError, WidgetError};
pub use events::{
    event_types, BindingId, Event, EventData, EventDispatcher, EventHandler, EventType,
    PRIMARY_BUTTON,
};
pub use geometry::{Fill, GridOptions, PackOptions, PlaceOptions, Placement, Side, Sticky};
pub use idle::{IdleQueue, IdleTask, TaskId};
pub use state::{StateFlags, StateSpec};
pub use units::{Padding, ScreenDistance, Unit};
pub use widget::{WidgetId, WidgetNode, WidgetTree};
