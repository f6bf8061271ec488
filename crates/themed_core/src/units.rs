//! Screen distances and padding specs
//!
//! Distances are numbers with an optional unit suffix:
//! - unitless - pixels
//! - `c` - centimeters
//! - `m` - millimeters
//! - `i` - inches
//! - `p` - printer's points (1/72 inch)
//!
//! A padding spec lists one to four distances: `left top right bottom`.
//! Missing values repeat the ones given (`"5"` pads all sides, `"5 2"` pads
//! left/right by 5 and top/bottom by 2, `"5 2 8"` uses 2 for the bottom).

use std::fmt;

use nom::{
    character::complete::{multispace0, one_of},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::float,
    sequence::{delimited, pair},
    IResult,
};

use crate::error::ParseError;

/// Unit of a screen distance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Pixels,
    Centimeters,
    Millimeters,
    Inches,
    Points,
}

impl Unit {
    fn from_suffix(c: char) -> Self {
        match c {
            'c' => Unit::Centimeters,
            'm' => Unit::Millimeters,
            'i' => Unit::Inches,
            'p' => Unit::Points,
            _ => Unit::Pixels,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Unit::Pixels => "",
            Unit::Centimeters => "c",
            Unit::Millimeters => "m",
            Unit::Inches => "i",
            Unit::Points => "p",
        }
    }

    /// Points per unit, `None` for pixels
    fn points(self) -> Option<f32> {
        match self {
            Unit::Pixels => None,
            Unit::Centimeters => Some(72.0 / 2.54),
            Unit::Millimeters => Some(72.0 / 25.4),
            Unit::Inches => Some(72.0),
            Unit::Points => Some(1.0),
        }
    }
}

/// A length on screen
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenDistance {
    pub value: f32,
    pub unit: Unit,
}

impl ScreenDistance {
    pub const ZERO: ScreenDistance = ScreenDistance {
        value: 0.0,
        unit: Unit::Pixels,
    };

    pub const fn pixels(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Pixels,
        }
    }

    /// Parse a single distance such as `"7p"` or `"12"`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        all_consuming(delimited(multispace0, distance, multispace0))(input)
            .map(|(_, d)| d)
            .map_err(|_| ParseError::Distance(input.to_string()))
    }

    /// Convert to pixels given the display scaling in pixels per point
    pub fn to_pixels(&self, pixels_per_point: f32) -> f32 {
        match self.unit.points() {
            Some(points) => self.value * points * pixels_per_point,
            None => self.value,
        }
    }
}

impl fmt::Display for ScreenDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

fn distance(input: &str) -> IResult<&str, ScreenDistance> {
    let (input, (value, unit)) = pair(float, opt(one_of("cmip")))(input)?;
    Ok((
        input,
        ScreenDistance {
            value,
            unit: unit.map(Unit::from_suffix).unwrap_or_default(),
        },
    ))
}

fn distance_list(input: &str) -> IResult<&str, Vec<ScreenDistance>> {
    all_consuming(many1(delimited(multispace0, distance, multispace0)))(input)
}

/// Padding on four sides
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub left: ScreenDistance,
    pub top: ScreenDistance,
    pub right: ScreenDistance,
    pub bottom: ScreenDistance,
}

impl Padding {
    pub fn uniform(distance: ScreenDistance) -> Self {
        Self {
            left: distance,
            top: distance,
            right: distance,
            bottom: distance,
        }
    }

    /// Parse a padding spec; `Ok(None)` for an empty spec
    pub fn parse(spec: &str) -> Result<Option<Self>, ParseError> {
        if spec.trim().is_empty() {
            return Ok(None);
        }
        let (_, values) =
            distance_list(spec).map_err(|_| ParseError::Distance(spec.trim().to_string()))?;

        let padding = match values.as_slice() {
            [all] => Self::uniform(*all),
            [horizontal, vertical] => Self {
                left: *horizontal,
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
            },
            [left, top, right] => Self {
                left: *left,
                top: *top,
                right: *right,
                bottom: *top,
            },
            [left, top, right, bottom] => Self {
                left: *left,
                top: *top,
                right: *right,
                bottom: *bottom,
            },
            _ => return Err(ParseError::TooManyValues(values.len())),
        };
        Ok(Some(padding))
    }

    /// Horizontal padding as (left, right)
    pub fn to_padx(&self) -> (ScreenDistance, ScreenDistance) {
        (self.left, self.right)
    }

    /// Vertical padding as (top, bottom)
    pub fn to_pady(&self) -> (ScreenDistance, ScreenDistance) {
        (self.top, self.bottom)
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.top, self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distance_units() {
        assert_eq!(ScreenDistance::parse("12").unwrap(), ScreenDistance::pixels(12.0));
        assert_eq!(
            ScreenDistance::parse(" 7p ").unwrap(),
            ScreenDistance {
                value: 7.0,
                unit: Unit::Points
            }
        );
        assert_eq!(ScreenDistance::parse("1.5m").unwrap().unit, Unit::Millimeters);
        assert!(ScreenDistance::parse("7px").is_err());
        assert!(ScreenDistance::parse("").is_err());
    }

    #[test]
    fn test_to_pixels() {
        let scaling = 96.0 / 72.0;
        assert_eq!(ScreenDistance::pixels(5.0).to_pixels(scaling), 5.0);
        let inch = ScreenDistance::parse("1i").unwrap();
        assert!((inch.to_pixels(scaling) - 96.0).abs() < 1e-3);
        let points = ScreenDistance::parse("72p").unwrap();
        assert!((points.to_pixels(scaling) - 96.0).abs() < 1e-3);
    }

    #[test]
    fn test_padding_expansion() {
        let px = ScreenDistance::pixels;

        assert_eq!(Padding::parse("5").unwrap(), Some(Padding::uniform(px(5.0))));

        let two = Padding::parse("5 2").unwrap().unwrap();
        assert_eq!(two.to_padx(), (px(5.0), px(5.0)));
        assert_eq!(two.to_pady(), (px(2.0), px(2.0)));

        let three = Padding::parse("1 2 3").unwrap().unwrap();
        assert_eq!(three.to_padx(), (px(1.0), px(3.0)));
        assert_eq!(three.to_pady(), (px(2.0), px(2.0)));

        let four = Padding::parse("1 2 3 4").unwrap().unwrap();
        assert_eq!(four.to_padx(), (px(1.0), px(3.0)));
        assert_eq!(four.to_pady(), (px(2.0), px(4.0)));
    }

    #[test]
    fn test_padding_empty_and_invalid() {
        assert_eq!(Padding::parse("").unwrap(), None);
        assert_eq!(Padding::parse("   ").unwrap(), None);
        assert_eq!(
            Padding::parse("1 2 3 4 5"),
            Err(ParseError::TooManyValues(5))
        );
        assert_eq!(
            Padding::parse("wide"),
            Err(ParseError::Distance("wide".to_string()))
        );
    }

    #[test]
    fn test_padding_display() {
        let padding = Padding::parse("7p 2").unwrap().unwrap();
        assert_eq!(padding.to_string(), "7p 2 7p 2");
    }
}
