// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement used to derive the bounds of text nodes.

use kurbo::Size;

use crate::types::Font;

/// Measures a single line of text.
///
/// Hosts with real font shaping implement this and pass it to
/// [`Tree::with_measure`](crate::Tree::with_measure).
pub trait TextMeasure: core::fmt::Debug {
    /// Size of the box enclosing `text` rendered with `font`.
    fn measure(&self, text: &str, font: &Font) -> Size;
}

/// Monospace approximation: every character advances by a fixed fraction of the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Horizontal advance per character, as a fraction of the font size.
    pub advance: f64,
    /// Line height, as a fraction of the font size.
    pub line_height: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, font: &Font) -> Size {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Character counts of UI strings are far below f64 precision."
        )]
        let chars = text.chars().count() as f64;
        Size::new(
            chars * font.size * self.advance,
            font.size * self.line_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menlo_twelve_metrics() {
        let m = FixedAdvance::default();
        let s = m.measure("abcd", &Font::default());
        assert!((s.width - 28.8).abs() < 1e-9, "4 chars at 7.2px each");
        assert!((s.height - 14.4).abs() < 1e-9, "line height is 1.2em");
    }

    #[test]
    fn empty_text_has_line_height() {
        let s = FixedAdvance::default().measure("", &Font::default());
        assert_eq!(s.width, 0.0);
        assert!(s.height > 0.0, "empty text still occupies a line");
    }
}
