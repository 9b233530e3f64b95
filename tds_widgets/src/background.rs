// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backing rectangle.

use kurbo::Rect;
use tds_scene::{LocalNode, NodeId, NodeKind, Shape, Style, Tree};

use crate::context::{Context, WidgetId};
use crate::style::{BackgroundStyle, Paint};

/// A filled and stroked rounded rectangle.
#[derive(Clone, Debug)]
pub struct Background {
    id: WidgetId,
    node: NodeId,
}

impl Background {
    /// Insert a rectangle described by `style` on top of `parent`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, style: &BackgroundStyle) -> Self {
        Self::with_kind(ctx, parent, style, NodeKind::Background)
    }

    /// Like [`Background::new`] with a custom role tag.
    pub fn with_kind(
        ctx: &mut Context,
        parent: Option<NodeId>,
        style: &BackgroundStyle,
        kind: NodeKind,
    ) -> Self {
        let rect = Rect::from_origin_size(style.position, (style.width, style.height));
        let local = LocalNode::shape(
            kind,
            Shape::Rect {
                rect,
                radius: style.radius,
            },
        )
        .with_style(Style {
            fill: Some(style.fill.clone()),
            stroke: Some(style.stroke.clone()),
        });
        let node = ctx.scene.insert(parent, local);
        Self {
            id: ctx.next_id(),
            node,
        }
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The rectangle node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Current rectangle.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        tree.bbox(self.node).unwrap_or(Rect::ZERO)
    }

    /// Apply a fill and stroke pair.
    pub fn paint(&self, tree: &mut Tree, paint: &Paint) {
        tree.set_fill(self.node, paint.fill.clone());
        tree.set_stroke(self.node, paint.stroke.clone());
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use tds_scene::{Fill, Stroke};

    use super::*;

    #[test]
    fn rect_from_style() {
        let mut ctx = Context::new();
        let bg = Background::new(
            &mut ctx,
            None,
            &BackgroundStyle::sized(30.0, 12.0).at(Point::new(1.0, 2.0)),
        );
        assert_eq!(bg.bbox(&ctx.scene), Rect::new(1.0, 2.0, 31.0, 14.0));
        bg.paint(
            &mut ctx.scene,
            &Paint::new(Fill::color("#D0D0D0"), Stroke::color("#000000")),
        );
        let style = ctx.scene.style(bg.node()).unwrap();
        assert_eq!(style.fill.as_ref().unwrap().color, "#D0D0D0");
    }
}
