//! Geometry placement records
//!
//! The three placement styles a widget can be managed by inside its parent.
//! Only the options are recorded; computing actual layout is the toolkit's job.

/// Sides a gridded widget sticks to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sticky {
    bits: u8,
}

impl Sticky {
    pub const NONE: Sticky = Sticky { bits: 0 };
    pub const N: Sticky = Sticky { bits: 0b0001 };
    pub const S: Sticky = Sticky { bits: 0b0010 };
    pub const E: Sticky = Sticky { bits: 0b0100 };
    pub const W: Sticky = Sticky { bits: 0b1000 };
    pub const NS: Sticky = Sticky { bits: 0b0011 };
    pub const EW: Sticky = Sticky { bits: 0b1100 };
    pub const NSEW: Sticky = Sticky { bits: 0b1111 };

    /// Parse a sticky string such as `"nsew"` or `"ns"`; unknown letters are skipped
    pub fn parse(spec: &str) -> Self {
        let bits = spec.chars().fold(0, |bits, c| match c.to_ascii_lowercase() {
            'n' => bits | Self::N.bits,
            's' => bits | Self::S.bits,
            'e' => bits | Self::E.bits,
            'w' => bits | Self::W.bits,
            _ => bits,
        });
        Self { bits }
    }

    pub const fn contains(&self, other: Sticky) -> bool {
        self.bits & other.bits == other.bits
    }
}

impl std::fmt::Display for Sticky {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (flag, c) in [(Self::N, 'n'), (Self::S, 's'), (Self::E, 'e'), (Self::W, 'w')] {
            if self.contains(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Options for grid placement
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridOptions {
    pub row: u32,
    pub column: u32,
    pub rowspan: u32,
    pub columnspan: u32,
    pub sticky: Sticky,
    /// External padding (left, right) in pixels
    pub padx: (f32, f32),
    /// External padding (top, bottom) in pixels
    pub pady: (f32, f32),
}

impl GridOptions {
    pub fn new(row: u32, column: u32) -> Self {
        Self {
            row,
            column,
            rowspan: 1,
            columnspan: 1,
            ..Default::default()
        }
    }

    pub fn sticky(mut self, sticky: Sticky) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn padx(mut self, left: f32, right: f32) -> Self {
        self.padx = (left, right);
        self
    }

    pub fn pady(mut self, top: f32, bottom: f32) -> Self {
        self.pady = (top, bottom);
        self
    }
}

/// Side a packed widget is placed against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// Fill mode for packed widgets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fill {
    #[default]
    None,
    X,
    Y,
    Both,
}

/// Options for pack placement
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackOptions {
    pub side: Side,
    pub fill: Fill,
    pub expand: bool,
    pub padx: (f32, f32),
    pub pady: (f32, f32),
}

impl PackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn padx(mut self, left: f32, right: f32) -> Self {
        self.padx = (left, right);
        self
    }

    pub fn pady(mut self, top: f32, bottom: f32) -> Self {
        self.pady = (top, bottom);
        self
    }
}

/// Options for absolute/relative placement
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaceOptions {
    pub x: f32,
    pub y: f32,
    pub relx: f32,
    pub rely: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub relwidth: Option<f32>,
    pub relheight: Option<f32>,
}

impl PlaceOptions {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn relative(relx: f32, rely: f32) -> Self {
        Self {
            relx,
            rely,
            ..Default::default()
        }
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn relsize(mut self, relwidth: f32, relheight: f32) -> Self {
        self.relwidth = Some(relwidth);
        self.relheight = Some(relheight);
        self
    }
}

/// How a widget is managed inside its parent
#[derive(Clone, Debug, PartialEq)]
pub enum Placement {
    Pack(PackOptions),
    Grid(GridOptions),
    Place(PlaceOptions),
}

impl Placement {
    /// Name of the geometry manager
    pub fn manager(&self) -> &'static str {
        match self {
            Placement::Pack(_) => "pack",
            Placement::Grid(_) => "grid",
            Placement::Place(_) => "place",
        }
    }

    pub fn as_grid(&self) -> Option<&GridOptions> {
        match self {
            Placement::Grid(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_pack(&self) -> Option<&PackOptions> {
        match self {
            Placement::Pack(options) => Some(options),
            _ => None,
        }
    }
}
