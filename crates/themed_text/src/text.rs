//! Themed text wrapper
//!
//! [`ThemedText`] pairs a plain `Text` widget with a [`ThemedTextFrame`] drawn
//! around it. Attribute calls go to the text widget; geometry calls go to the
//! frame, since the frame is what sits in the parent.

use std::fmt;

use themed_core::{GridOptions, PackOptions, PlaceOptions, Placement, Sticky, WidgetId};

use crate::frame::{FrameOptions, ThemedTextFrame};
use crate::geometry::Geometry;
use crate::host::Host;
use crate::Result;

/// Widget class of the content widget
pub const TEXT_CLASS: &str = "Text";

/// Construction options for [`ThemedText`]
///
/// Frame options configure the surrounding container; everything else is
/// passed to the text widget as attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextOptions {
    pub frame: FrameOptions,
    pub attributes: Vec<(String, String)>,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.frame = self.frame.style(style);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.frame = self.frame.class(class);
        self
    }

    pub fn relief(mut self, relief: impl Into<String>) -> Self {
        self.frame = self.frame.relief(relief);
        self
    }

    pub fn padding(mut self, padding: impl Into<String>) -> Self {
        self.frame = self.frame.padding(padding);
        self
    }

    pub fn borderwidth(mut self, borderwidth: impl Into<String>) -> Self {
        self.frame = self.frame.borderwidth(borderwidth);
        self
    }

    /// Text widget attribute, e.g. `("wrap", "none")`
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// A text widget styled as a themed entry field
#[derive(Clone, Debug)]
pub struct ThemedText {
    frame: ThemedTextFrame,
    text: WidgetId,
}

impl ThemedText {
    pub fn new(host: &mut Host, parent: WidgetId, options: TextOptions) -> Result<Self> {
        let frame = ThemedTextFrame::new(host, parent, options.frame)?;
        let text = host.create_widget(frame.id(), TEXT_CLASS)?;
        host.configure(text, options.attributes)?;

        host.grid_columnconfigure(frame.id(), 1, 1)?;
        host.grid_rowconfigure(frame.id(), 1, 1)?;
        host.grid(text, GridOptions::new(1, 1).sticky(Sticky::NSEW))?;

        frame.bind_text(host, text, None)?;
        Ok(Self { frame, text })
    }

    /// The surrounding container
    pub fn frame(&self) -> &ThemedTextFrame {
        &self.frame
    }

    /// The text widget
    pub fn id(&self) -> WidgetId {
        self.text
    }

    /// Write text widget attributes
    pub fn configure<I, K, V>(&self, host: &mut Host, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        host.configure(self.text, attributes)
    }

    pub fn cget<'h>(&self, host: &'h Host, name: &str) -> Option<&'h str> {
        host.cget(self.text, name)
    }

    pub fn update_style(&self, host: &mut Host) {
        self.frame.update_style(host);
    }

    /// Destroy the container, and with it the text widget
    pub fn destroy(self, host: &mut Host) {
        host.destroy(self.frame.id());
    }
}

impl Geometry for ThemedText {
    fn pack(&self, host: &mut Host, options: PackOptions) -> Result<()> {
        self.frame.pack(host, options)
    }

    fn grid(&self, host: &mut Host, options: GridOptions) -> Result<()> {
        self.frame.grid(host, options)
    }

    fn place(&self, host: &mut Host, options: PlaceOptions) -> Result<()> {
        self.frame.place(host, options)
    }

    fn forget(&self, host: &mut Host) -> Result<()> {
        self.frame.forget(host)
    }

    fn placement<'h>(&self, host: &'h Host) -> Option<&'h Placement> {
        self.frame.placement(host)
    }
}

impl fmt::Display for ThemedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.frame, f)
    }
}
