// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Short tags stacked on the left or right side of a diagram item.
//!
//! Each [`Mark`] is a small label whose backing rectangle is floored to the
//! grid. Marks on one side overlap each other and the item by one grid step,
//! so a row of marks reads as a single strip tucked behind the item.

use kurbo::{Point, Rect, Vec2};
use tds_scene::{Fill, NodeId, NodeKind, Stroke, Tree};

use crate::context::Context;
use crate::geometry::{GRID_STEP, floor_to_grid};
use crate::label::{BackgroundRule, Label, LabelAttr};
use crate::style::{BackgroundStyle, Indents, TitleStyle};

/// Figure space used to pad the sign towards the item.
pub const EMPTY_SIGN: &str = "\u{2007}";

/// Delay between the placement hints of consecutive marks, in milliseconds.
const STAGGER_MS: u64 = 50;

/// Side of the item a mark is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkSide {
    /// Stacked outwards from the left edge.
    Left,
    /// Stacked outwards from the right edge.
    Right,
}

/// Appearance of a mark.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkStyle {
    /// The two or three characters shown.
    pub sign: String,
    /// Side of the item.
    pub side: MarkSide,
    /// Text color.
    pub sign_color: String,
    /// Fill of the backing rectangle.
    pub back_color: String,
    /// Stroke of the backing rectangle.
    pub stroke_color: String,
}

impl MarkStyle {
    /// Black sign on a white tag with a grey outline.
    pub fn new(sign: &str, side: MarkSide) -> Self {
        Self {
            sign: sign.to_owned(),
            side,
            sign_color: "#000000".to_owned(),
            back_color: "#FFFFFF".to_owned(),
            stroke_color: "#999999".to_owned(),
        }
    }
}

/// Displayed text for `sign` on `side`: the pad faces the item.
fn padded(sign: &str, side: MarkSide) -> String {
    match side {
        MarkSide::Left => format!("{sign}{EMPTY_SIGN}"),
        MarkSide::Right => format!("{EMPTY_SIGN}{sign}"),
    }
}

/// Label attributes for a mark.
pub fn mark_label_attr(style: &MarkStyle) -> LabelAttr {
    LabelAttr {
        title: TitleStyle {
            fill: Fill::color(&style.sign_color),
            ..TitleStyle::with_value(&padded(&style.sign, style.side))
        },
        background_rule: vec![BackgroundRule::Indent],
        background: Some(BackgroundStyle {
            width: 1.0,
            height: 1.0,
            fill: Fill::color(&style.back_color),
            stroke: Stroke::color(&style.stroke_color),
            radius: 4.0,
            position: Point::ZERO,
        }),
        indents: Indents::new(GRID_STEP, 2.0, GRID_STEP, 2.0),
        position: None,
    }
}

/// A single tag.
#[derive(Clone, Debug)]
pub struct Mark {
    label: Label,
    sign: String,
    side: MarkSide,
    width: f64,
}

impl Mark {
    /// Build a hidden mark on top of `parent`; it shows once placed.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, style: &MarkStyle) -> Self {
        let label = Label::with_kind(ctx, parent, &mark_label_attr(style), NodeKind::Mark);
        if let Some(bg) = label.background() {
            let w = bg.bbox(&ctx.scene).width();
            ctx.scene.set_width(bg.node(), floor_to_grid(w, GRID_STEP));
        }
        ctx.scene
            .translate(label.title().node(), Vec2::new(-GRID_STEP * 0.25, 0.0));
        label.hide(&mut ctx.scene);
        let width = label.bbox(&ctx.scene).width();
        Self {
            label,
            sign: style.sign.clone(),
            side: style.side,
            width,
        }
    }

    /// The mark group.
    pub fn group(&self) -> NodeId {
        self.label.group()
    }

    /// The sign without padding.
    pub fn sign(&self) -> &str {
        &self.sign
    }

    /// Side of the item.
    pub fn side(&self) -> MarkSide {
        self.side
    }

    /// Width taken when the mark was built.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current bounding box.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        self.label.bbox(tree)
    }
}

/// The marks of one item, per side, in stacking order.
#[derive(Clone, Debug, Default)]
pub struct Marks {
    left: Vec<Mark>,
    right: Vec<Mark>,
}

impl Marks {
    /// No marks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks on `side`, nearest to the item first.
    pub fn side(&self, side: MarkSide) -> &[Mark] {
        match side {
            MarkSide::Left => &self.left,
            MarkSide::Right => &self.right,
        }
    }

    fn storage(&mut self, side: MarkSide) -> &mut Vec<Mark> {
        match side {
            MarkSide::Left => &mut self.left,
            MarkSide::Right => &mut self.right,
        }
    }

    /// Total number of marks.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// Whether there are no marks.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Append a mark at the outer end of its side.
    pub fn add(&mut self, ctx: &mut Context, parent: NodeId, style: &MarkStyle) {
        let mark = Mark::new(ctx, Some(parent), style);
        self.storage(style.side).push(mark);
    }

    /// Insert a mark at `index` on its side; indices past the end append.
    pub fn put(&mut self, ctx: &mut Context, parent: NodeId, style: &MarkStyle, index: usize) {
        let mark = Mark::new(ctx, Some(parent), style);
        let storage = self.storage(style.side);
        let index = index.min(storage.len());
        storage.insert(index, mark);
    }

    /// Whether `sign` is attached on `side`.
    pub fn has_mark(&self, sign: &str, side: MarkSide) -> bool {
        self.side(side).iter().any(|m| m.sign == sign)
    }

    /// Remove the first mark showing `sign` on `side` and close the gap.
    ///
    /// Returns whether a mark was removed.
    pub fn remove(&mut self, tree: &mut Tree, sign: &str, side: MarkSide) -> bool {
        let storage = self.storage(side);
        let Some(index) = storage.iter().position(|m| m.sign == sign) else {
            return false;
        };
        let removed = storage.remove(index);
        tree.remove(removed.group());
        let shift = match side {
            MarkSide::Left => removed.width - GRID_STEP,
            MarkSide::Right => GRID_STEP - removed.width,
        };
        for mark in &storage[index..] {
            mark.label.translate(tree, Vec2::new(shift, 0.0));
        }
        true
    }

    /// Lay out the marks of `side` against `base`, the item's body box, and
    /// show them behind the item.
    ///
    /// Returns one `(mark, delay)` hint per mark for hosts that animate
    /// placement.
    pub fn set_position(&self, tree: &mut Tree, side: MarkSide, base: Rect) -> Vec<(NodeId, u64)> {
        let mut hints = Vec::new();
        let mut edge = match side {
            MarkSide::Left => base.x0,
            MarkSide::Right => base.x1,
        };
        for (i, mark) in (0_u64..).zip(self.side(side)) {
            let x = match side {
                MarkSide::Left => edge - mark.width + GRID_STEP,
                MarkSide::Right => edge - GRID_STEP,
            };
            mark.label.move_to(tree, Point::new(x, base.y0));
            mark.label.show(tree);
            tree.back(mark.group());
            edge = match side {
                MarkSide::Left => x,
                MarkSide::Right => x + mark.width,
            };
            hints.push((mark.group(), STAGGER_MS * i));
        }
        hints
    }
}

#[cfg(test)]
mod tests {
    use tds_scene::LocalNode;

    use super::*;

    fn setup(ctx: &mut Context) -> (NodeId, Rect) {
        let owner = ctx.scene.insert(None, LocalNode::group(NodeKind::MItem));
        (owner, Rect::new(36.0, 18.0, 72.0, 36.4))
    }

    #[test]
    fn width_is_floored_to_grid() {
        let mut ctx = Context::new();
        let m = Mark::new(&mut ctx, None, &MarkStyle::new("A", MarkSide::Left));
        // "A" plus pad is 14.4 wide, plus two grid indents is 32.4.
        assert_eq!(m.width(), 27.0);
        assert_eq!(m.sign(), "A");
        assert!(!ctx.scene.is_visible(m.group()), "hidden until placed");
    }

    #[test]
    fn sides_stack_outwards() {
        let mut ctx = Context::new();
        let (owner, base) = setup(&mut ctx);
        let mut marks = Marks::new();
        marks.add(&mut ctx, owner, &MarkStyle::new("A", MarkSide::Left));
        marks.add(&mut ctx, owner, &MarkStyle::new("B", MarkSide::Left));
        marks.add(&mut ctx, owner, &MarkStyle::new("C", MarkSide::Right));
        marks.add(&mut ctx, owner, &MarkStyle::new("D", MarkSide::Right));

        let hints = marks.set_position(&mut ctx.scene, MarkSide::Left, base);
        marks.set_position(&mut ctx.scene, MarkSide::Right, base);
        let left: Vec<f64> = marks
            .side(MarkSide::Left)
            .iter()
            .map(|m| m.bbox(&ctx.scene).x0)
            .collect();
        let right: Vec<f64> = marks
            .side(MarkSide::Right)
            .iter()
            .map(|m| m.bbox(&ctx.scene).x0)
            .collect();
        assert_eq!(left, vec![18.0, 0.0]);
        assert_eq!(right, vec![63.0, 81.0]);
        assert_eq!(hints.iter().map(|h| h.1).collect::<Vec<_>>(), vec![0, 50]);
        assert!(
            marks
                .side(MarkSide::Left)
                .iter()
                .all(|m| m.bbox(&ctx.scene).y0 == base.y0)
        );
        assert_eq!(marks.len(), 4);
    }

    #[test]
    fn remove_closes_the_gap() {
        let mut ctx = Context::new();
        let (owner, base) = setup(&mut ctx);
        let mut marks = Marks::new();
        marks.add(&mut ctx, owner, &MarkStyle::new("A", MarkSide::Left));
        marks.add(&mut ctx, owner, &MarkStyle::new("B", MarkSide::Left));
        marks.set_position(&mut ctx.scene, MarkSide::Left, base);

        assert!(marks.has_mark("A", MarkSide::Left));
        assert!(!marks.has_mark("A", MarkSide::Right));
        assert!(marks.remove(&mut ctx.scene, "A", MarkSide::Left));
        assert!(!marks.remove(&mut ctx.scene, "A", MarkSide::Left), "already gone");
        let b = &marks.side(MarkSide::Left)[0];
        assert_eq!(b.bbox(&ctx.scene).x0, 18.0, "B took A's place");
        assert_eq!(ctx.scene.children_of(owner).len(), 1);
    }

    #[test]
    fn put_inserts_at_index() {
        let mut ctx = Context::new();
        let (owner, _) = setup(&mut ctx);
        let mut marks = Marks::new();
        marks.add(&mut ctx, owner, &MarkStyle::new("A", MarkSide::Right));
        marks.put(&mut ctx, owner, &MarkStyle::new("B", MarkSide::Right), 0);
        marks.put(&mut ctx, owner, &MarkStyle::new("C", MarkSide::Right), 99);
        let signs: Vec<&str> = marks.side(MarkSide::Right).iter().map(Mark::sign).collect();
        assert_eq!(signs, vec!["B", "A", "C"]);
    }
}
