// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Separator line between logical groups of list items.

use kurbo::{Line, Point};
use tds_scene::{LocalNode, NodeId, NodeKind, Shape, Stroke, Style};

use crate::context::Context;

/// Attributes of a separator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeparatorAttr {
    /// Start point.
    pub start: Point,
    /// Length of a horizontal separator.
    pub length: f64,
    /// Line paint.
    pub stroke: Stroke,
    /// End point; when set the line is drawn to it and `length` is ignored.
    pub end: Option<Point>,
}

impl Default for SeparatorAttr {
    fn default() -> Self {
        Self {
            start: Point::ZERO,
            length: 100.0,
            stroke: Stroke::color("#D2D2D2").with_width(1.0),
            end: None,
        }
    }
}

impl SeparatorAttr {
    /// The segment this separator draws.
    pub fn line(&self) -> Line {
        let end = self
            .end
            .unwrap_or(Point::new(self.start.x + self.length, self.start.y));
        Line::new(self.start, end)
    }
}

/// A straight line, usually horizontal.
#[derive(Clone, Debug)]
pub struct Separator {
    node: NodeId,
}

impl Separator {
    /// Insert a separator line on top of `parent`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &SeparatorAttr) -> Self {
        let local = LocalNode::shape(NodeKind::Separator, Shape::Line(attr.line())).with_style(
            Style {
                fill: None,
                stroke: Some(attr.stroke.clone()),
            },
        );
        Self {
            node: ctx.scene.insert(parent, local),
        }
    }

    /// The line node.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_unless_end_given() {
        let attr = SeparatorAttr {
            start: Point::new(2.0, 3.0),
            length: 10.0,
            ..SeparatorAttr::default()
        };
        assert_eq!(attr.line(), Line::new((2.0, 3.0), (12.0, 3.0)));
        let slanted = SeparatorAttr {
            end: Some(Point::new(5.0, 9.0)),
            ..attr
        };
        assert_eq!(slanted.line(), Line::new((2.0, 3.0), (5.0, 9.0)));

        let mut ctx = Context::new();
        let s = Separator::new(&mut ctx, None, &slanted);
        assert_eq!(ctx.scene.kind(s.node()), Some(NodeKind::Separator));
    }
}
