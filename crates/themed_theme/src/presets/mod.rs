//! Built-in theme presets.

use std::fmt::{Display, Formatter};

use themed_core::StateSpec;

use crate::engine::{StyleEngine, ROOT_THEME};
use crate::theme::{StateMapEntry, Theme};

/// Style name the themed text widgets use by default
pub const THEMED_TEXT_STYLE: &str = "ThemedText.TEntry";

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Root theme: neutral grey entry look.
    Default,
    /// Light field with a subtle hover tint.
    Light,
    /// Dark field with distinct hover and focus tints.
    Dark,
}

impl ThemePreset {
    /// Stable preset id, also the theme name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => ROOT_THEME,
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    /// Full preset list, root first.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 3] = [ThemePreset::Default, ThemePreset::Light, ThemePreset::Dark];
        &PRESETS
    }

    /// Look a preset up by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }

    /// Install (or refresh) this preset's theme in `engine`.
    pub fn install(self, engine: &mut StyleEngine) {
        if !engine.has_theme(self.id()) {
            // Parent is the root theme, which always exists.
            let _ = engine.theme_create(self.id(), None);
        }
        if let Some(theme) = engine.theme_mut(self.id()) {
            match self {
                Self::Default => default_theme(theme),
                Self::Light => field_theme(theme, &LIGHT),
                Self::Dark => field_theme(theme, &DARK),
            }
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn entry(spec: &str, value: &str) -> StateMapEntry {
    // Preset specs are literals using known state names.
    StateMapEntry::new(StateSpec::parse(spec).unwrap_or_default(), value)
}

fn default_theme(theme: &mut Theme) {
    theme
        .configure(
            ".",
            [
                ("background", "#d9d9d9"),
                ("foreground", "#000000"),
                ("font", "TkDefaultFont"),
                ("borderwidth", "1"),
            ],
        )
        .configure(
            "TEntry",
            [
                ("fieldbackground", "#ffffff"),
                ("padding", "1"),
                ("selectbackground", "#c3c3c3"),
                ("selectforeground", "#000000"),
                ("insertwidth", "1"),
            ],
        )
        .map(
            "TEntry",
            "fieldbackground",
            [entry("readonly", "#d9d9d9"), entry("disabled", "#d9d9d9")],
        )
        .map("TEntry", "foreground", [entry("disabled", "#a3a3a3")]);
}

/// Colors of a field-style preset
struct FieldPalette {
    field: &'static str,
    field_hover: &'static str,
    field_focus: Option<&'static str>,
    text: &'static str,
    text_pressed: &'static str,
    select: &'static str,
    select_text: &'static str,
    border: &'static str,
}

const LIGHT: FieldPalette = FieldPalette {
    field: "#fdfdfd",
    field_hover: "#f9f9f9",
    field_focus: None,
    text: "#1c1c1c",
    text_pressed: "#000000",
    select: "#0560b6",
    select_text: "#ffffff",
    border: "#e5e5e5",
};

const DARK: FieldPalette = FieldPalette {
    field: "#292929",
    field_hover: "#2f2f2f",
    field_focus: Some("#1c1c1c"),
    text: "#fafafa",
    text_pressed: "#ffffff",
    select: "#2f60d8",
    select_text: "#ffffff",
    border: "#3a3a3a",
};

fn field_theme(theme: &mut Theme, palette: &FieldPalette) {
    let mut field_map = vec![entry("hover !focus", palette.field_hover)];
    if let Some(focus) = palette.field_focus {
        field_map.push(entry("focus", focus));
    }

    theme
        .configure(
            ".",
            [
                ("background", palette.field),
                ("foreground", palette.text),
                ("bordercolor", palette.border),
            ],
        )
        .configure(
            "TEntry",
            [
                ("fieldbackground", palette.field),
                ("foreground", palette.text),
                ("selectbackground", palette.select),
                ("selectforeground", palette.select_text),
                ("padding", "2"),
            ],
        )
        .configure(
            THEMED_TEXT_STYLE,
            [
                ("fieldbackground", palette.field),
                ("textpadding", "5"),
                ("font", "TkTextFont"),
            ],
        )
        .map(THEMED_TEXT_STYLE, "fieldbackground", field_map)
        .map(
            THEMED_TEXT_STYLE,
            "foreground",
            [entry("pressed", palette.text_pressed)],
        );
}
