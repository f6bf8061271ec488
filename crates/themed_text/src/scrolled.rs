//! Themed text with scrollbars
//!
//! [`ScrolledText`] is a [`ThemedText`] with a vertical scrollbar beside the
//! text and, optionally, a horizontal one below it. Both live inside the
//! frame and are bound without state penetration: pointing at or focusing a
//! scrollbar restyles the field but never makes the text look hovered or
//! focused.

use std::fmt;

use themed_core::{GridOptions, PackOptions, PlaceOptions, Placement, Sticky, WidgetId};
use tracing::debug;

use crate::frame::ThemedTextFrame;
use crate::geometry::Geometry;
use crate::host::Host;
use crate::text::{TextOptions, ThemedText};
use crate::Result;

/// Widget class of both scrollbars
pub const SCROLLBAR_CLASS: &str = "Scrollbar";

/// Construction options for [`ScrolledText`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrolledTextOptions {
    pub text: TextOptions,
    /// Add a horizontal scrollbar below the text
    pub horizontal: bool,
}

impl ScrolledTextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }
}

/// A themed text with a vertical and an optional horizontal scrollbar
#[derive(Clone, Debug)]
pub struct ScrolledText {
    text: ThemedText,
    vertical: WidgetId,
    horizontal: Option<WidgetId>,
}

impl ScrolledText {
    pub fn new(host: &mut Host, parent: WidgetId, options: ScrolledTextOptions) -> Result<Self> {
        let text = ThemedText::new(host, parent, options.text)?;

        let vertical = Self::scrollbar(host, &text, "vertical")?;
        host.grid(vertical, GridOptions::new(1, 2).sticky(Sticky::NS))?;

        let horizontal = if options.horizontal {
            let scrollbar = Self::scrollbar(host, &text, "horizontal")?;
            host.grid(scrollbar, GridOptions::new(2, 1).sticky(Sticky::EW))?;
            Some(scrollbar)
        } else {
            None
        };

        debug!(path = %text, horizontal = options.horizontal, "scrolled text created");
        Ok(Self {
            text,
            vertical,
            horizontal,
        })
    }

    /// Create a scrollbar in the frame, wire it to the text and bind it
    fn scrollbar(host: &mut Host, text: &ThemedText, orient: &str) -> Result<WidgetId> {
        let frame = text.frame();
        let scrollbar = host.create_widget(frame.id(), SCROLLBAR_CLASS)?;
        let (view, command) = match orient {
            "horizontal" => ("xview", "xscrollcommand"),
            _ => ("yview", "yscrollcommand"),
        };
        let text_path = host.path(text.id()).to_string();
        let scrollbar_path = host.path(scrollbar).to_string();
        host.configure(
            scrollbar,
            [
                ("orient", orient.to_string()),
                ("command", format!("{text_path} {view}")),
            ],
        )?;
        host.configure(text.id(), [(command, format!("{scrollbar_path} set"))])?;
        frame.bind_widget(host, scrollbar, false)?;
        Ok(scrollbar)
    }

    /// The wrapped themed text
    pub fn text(&self) -> &ThemedText {
        &self.text
    }

    pub fn frame(&self) -> &ThemedTextFrame {
        self.text.frame()
    }

    /// The text widget
    pub fn id(&self) -> WidgetId {
        self.text.id()
    }

    pub fn vertical_scrollbar(&self) -> WidgetId {
        self.vertical
    }

    pub fn horizontal_scrollbar(&self) -> Option<WidgetId> {
        self.horizontal
    }

    /// Write text widget attributes
    pub fn configure<I, K, V>(&self, host: &mut Host, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.text.configure(host, attributes)
    }

    pub fn cget<'h>(&self, host: &'h Host, name: &str) -> Option<&'h str> {
        self.text.cget(host, name)
    }

    pub fn update_style(&self, host: &mut Host) {
        self.text.update_style(host);
    }

    /// Destroy the frame with the text and scrollbars in it
    pub fn destroy(self, host: &mut Host) {
        self.text.destroy(host);
    }
}

impl Geometry for ScrolledText {
    fn pack(&self, host: &mut Host, options: PackOptions) -> Result<()> {
        self.text.pack(host, options)
    }

    fn grid(&self, host: &mut Host, options: GridOptions) -> Result<()> {
        self.text.grid(host, options)
    }

    fn place(&self, host: &mut Host, options: PlaceOptions) -> Result<()> {
        self.text.place(host, options)
    }

    fn forget(&self, host: &mut Host) -> Result<()> {
        self.text.forget(host)
    }

    fn placement<'h>(&self, host: &'h Host) -> Option<&'h Placement> {
        self.text.placement(host)
    }
}

impl fmt::Display for ScrolledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text, f)
    }
}
