// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared style records: sizes, indents, title and background attributes.

use kurbo::Point;
use tds_scene::{Fill, Font, Stroke};

/// Placeholder shown instead of an empty string (braille blank).
pub const BLANK: &str = "\u{2800}";

/// T-shirt size used to scale decorations such as slider ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleSize {
    /// `xxs`.
    #[default]
    Xxs,
    /// `xs`.
    Xs,
    /// `s`.
    S,
    /// `m`.
    M,
    /// `l`.
    L,
    /// `xl`.
    Xl,
    /// `xxl`.
    Xxl,
}

/// Translate a [`StyleSize`] into a multiplier relative to `base`.
pub fn style_size_number(size: StyleSize, base: f64) -> f64 {
    match size {
        StyleSize::Xxs => base,
        StyleSize::Xs => base + 0.2,
        StyleSize::S => base + 0.4,
        StyleSize::M => base + 1.0,
        StyleSize::L => base + 1.2,
        StyleSize::Xl => base + 1.4,
        StyleSize::Xxl => base + 1.6,
    }
}

/// Spacing on the four sides of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indents {
    /// Left spacing.
    pub left: f64,
    /// Top spacing.
    pub top: f64,
    /// Right spacing.
    pub right: f64,
    /// Bottom spacing.
    pub bottom: f64,
}

impl Indents {
    /// Indents in left, top, right, bottom order.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Attributes of a single line of text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitleStyle {
    /// The string.
    pub value: String,
    /// Font.
    pub font: Font,
    /// Text color.
    pub fill: Fill,
    /// Top-left corner of the text box.
    pub position: Point,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            value: String::new(),
            font: Font::default(),
            fill: Fill::color("black"),
            position: Point::ZERO,
        }
    }
}

impl TitleStyle {
    /// Default style with the given value.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            ..Self::default()
        }
    }

    /// Move the text box.
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

/// Attributes of a backing rectangle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundStyle {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Fill paint.
    pub fill: Fill,
    /// Stroke paint.
    pub stroke: Stroke,
    /// Corner radius.
    pub radius: f64,
    /// Top-left corner.
    pub position: Point,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 20.0,
            fill: Fill::color("#F5F5F5"),
            stroke: Stroke::color("#D2D2D2").with_width(1.0),
            radius: 4.0,
            position: Point::ZERO,
        }
    }
}

impl BackgroundStyle {
    /// Rectangle of the given size at the origin, other attributes default.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Move the rectangle.
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

/// Fill and stroke applied together to a backing rectangle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paint {
    /// Fill paint.
    pub fill: Fill,
    /// Stroke paint.
    pub stroke: Stroke,
}

impl Paint {
    /// Pair a fill with a stroke.
    pub fn new(fill: Fill, stroke: Stroke) -> Self {
        Self { fill, stroke }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_size_steps() {
        assert_eq!(style_size_number(StyleSize::Xxs, 1.0), 1.0);
        assert!((style_size_number(StyleSize::Xs, 1.0) - 1.2).abs() < 1e-12);
        assert!((style_size_number(StyleSize::S, 1.0) - 1.4).abs() < 1e-12);
        assert_eq!(style_size_number(StyleSize::M, 1.0), 2.0);
        assert!((style_size_number(StyleSize::L, 0.5) - 1.7).abs() < 1e-12);
        assert!((style_size_number(StyleSize::Xl, 1.0) - 2.4).abs() < 1e-12);
        assert!((style_size_number(StyleSize::Xxl, 2.0) - 3.6).abs() < 1e-12);
    }
}
