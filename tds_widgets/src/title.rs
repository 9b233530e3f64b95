// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single line of text.

use kurbo::{Point, Rect};
use tds_scene::{LocalNode, NodeId, NodeKind, Shape, Style, TextShape, Tree};

use crate::context::{Context, WidgetId};
use crate::style::TitleStyle;

/// A text node.
#[derive(Clone, Debug)]
pub struct Title {
    id: WidgetId,
    node: NodeId,
}

impl Title {
    /// Insert a text node described by `style` on top of `parent`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, style: &TitleStyle) -> Self {
        Self::with_kind(ctx, parent, style, NodeKind::Title)
    }

    /// Like [`Title::new`] with a custom role tag.
    pub fn with_kind(
        ctx: &mut Context,
        parent: Option<NodeId>,
        style: &TitleStyle,
        kind: NodeKind,
    ) -> Self {
        let shape = Shape::Text(TextShape {
            origin: style.position,
            value: style.value.clone(),
            font: style.font.clone(),
        });
        let local = LocalNode::shape(kind, shape).with_style(Style {
            fill: Some(style.fill.clone()),
            stroke: None,
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

    /// The text node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Current string.
    pub fn value<'a>(&self, tree: &'a Tree) -> &'a str {
        tree.text(self.node).unwrap_or_default()
    }

    /// Replace the string; the top-left corner stays in place.
    pub fn set_value(&self, tree: &mut Tree, value: &str) {
        tree.set_text(self.node, value);
    }

    /// Box of the rendered text.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        tree.bbox(self.node).unwrap_or(Rect::ZERO)
    }

    /// Top-left corner of the text box.
    pub fn topleft(&self, tree: &Tree) -> Point {
        self.bbox(tree).origin()
    }
}
