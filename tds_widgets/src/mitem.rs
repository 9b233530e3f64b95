// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable diagram item that snaps to a grid and to its neighbours.
//!
//! ## Grid
//!
//! The item's `width_factor` is its grid quantum. On construction the body
//! width is rounded up to a multiple of it and the item is moved to the grid
//! cell below and to the left of where it was asked to be. After every drag
//! the top-left corner lands on the grid again.
//!
//! ## Snapping
//!
//! While dragging, the item compares its [anchors](crate::geometry::anchors)
//! with those of its *friends*: other items sharing its parent, plus the items
//! held by jails sharing its parent. Friends whose centers are close enough
//! are tried nearest first; if any anchor pair is closer than
//! `width_factor * SNAP_FACTOR` the item is *snapped* and follows the pointer
//! on the grid, otherwise it follows the pointer freely.
//!
//! ## Landing
//!
//! When a drag ends with the item's center over the visible body of a jail,
//! the item is moved into that jail.

use kurbo::{Point, Rect, Vec2};
use tds_scene::{Fill, NodeId, NodeKind, Stroke, Tree};

use crate::context::{Context, WidgetId};
use crate::error::{Error, Result};
use crate::event::{Emitter, MItemEvent};
use crate::geometry::{
    AnchorsMap, GRID_STEP, SNAP_FACTOR, anchors, anchors_within, ceil_to_grid, diagonal, dist_p,
    floor_point_to_grid, is_point_in_circle, point_in_rect,
};
use crate::label::{BackgroundRule, Label, LabelAttr};
use crate::marks::{MarkSide, MarkStyle, Marks};
use crate::style::{BackgroundStyle, Indents, Paint, TitleStyle};

/// Share of the summed diagonals within which a friend is a snap candidate.
const CANDIDATE_REACH: f64 = 0.75;

/// Label attributes of a diagram item showing `value` at `position`.
pub fn mitem_label_attr(value: &str, position: Point) -> LabelAttr {
    LabelAttr {
        title: TitleStyle {
            fill: Fill::color("#000000"),
            ..TitleStyle::with_value(value)
        },
        background_rule: vec![BackgroundRule::Centered, BackgroundRule::Indent],
        background: Some(BackgroundStyle {
            width: 5.0,
            height: 36.0,
            fill: Fill::color("white"),
            stroke: Stroke::color("#999999").with_width(1.0),
            radius: 4.0,
            position: Point::ZERO,
        }),
        indents: Indents::new(4.0, 2.0, 2.0, 2.0),
        position: Some(position),
    }
}

/// Attributes of a diagram item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MItemAttr {
    /// The label; it must have a background.
    pub label: LabelAttr,
    /// Grid quantum for width and position.
    pub width_factor: f64,
    /// Body paint while hovered.
    pub highlight: Paint,
    /// Body paint while selected.
    pub select: Paint,
    /// Marks attached at construction.
    pub marks: Vec<MarkStyle>,
}

impl Default for MItemAttr {
    fn default() -> Self {
        Self::new("", Point::ZERO)
    }
}

impl MItemAttr {
    /// Default item showing `value` at `position`.
    pub fn new(value: &str, position: Point) -> Self {
        Self {
            label: mitem_label_attr(value, position),
            width_factor: GRID_STEP,
            highlight: Paint::new(Fill::color("white"), Stroke::color("#000000")),
            select: Paint::new(Fill::color("#D0D0D0"), Stroke::color("#000000")),
            marks: Vec::new(),
        }
    }

    /// Attach a mark at construction.
    pub fn with_mark(mut self, mark: MarkStyle) -> Self {
        self.marks.push(mark);
        self
    }
}

/// A diagram item.
#[derive(Debug)]
pub struct MItem {
    label: Label,
    width_factor: f64,
    normal: Paint,
    highlight: Paint,
    select: Paint,
    selected: bool,
    snaped: bool,
    dragging: bool,
    home: Option<(NodeId, Point)>,
    friends: Vec<NodeId>,
    marks: Marks,
    events: Emitter<MItemEvent>,
}

impl MItem {
    /// Build an item on top of `parent`, corrected to its grid.
    ///
    /// Fails when the label has no background or the grid quantum is not
    /// positive.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &MItemAttr) -> Result<Self> {
        if attr.width_factor.is_nan() || attr.width_factor <= 0.0 {
            return Err(Error::configuration(
                "width_factor",
                format!("grid quantum must be positive, got {}", attr.width_factor),
            ));
        }
        let bg_style = attr
            .label
            .background
            .as_ref()
            .filter(|_| !attr.label.background_rule.contains(&BackgroundRule::None))
            .ok_or_else(|| Error::configuration("background", "a diagram item needs a background"))?;
        let normal = Paint::new(bg_style.fill.clone(), bg_style.stroke.clone());

        let label = Label::with_kind(ctx, parent, &attr.label, NodeKind::MItem);
        let mut item = Self {
            label,
            width_factor: attr.width_factor,
            normal,
            highlight: attr.highlight.clone(),
            select: attr.select.clone(),
            selected: false,
            snaped: false,
            dragging: false,
            home: None,
            friends: Vec::new(),
            marks: Marks::new(),
            events: Emitter::new(),
        };
        item.correct_width(&mut ctx.scene);
        let origin = item.background_bbox(&ctx.scene).origin();
        item.move_to(&mut ctx.scene, floor_point_to_grid(origin, item.width_factor));
        ctx.scene.set_draggable(item.group(), true);

        let group = item.group();
        for mark in &attr.marks {
            item.marks.add(ctx, group, mark);
        }
        if !item.marks.is_empty() {
            item.place_marks(&mut ctx.scene, MarkSide::Left);
            item.place_marks(&mut ctx.scene, MarkSide::Right);
        }
        Ok(item)
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.label.id()
    }

    /// The item group.
    pub fn group(&self) -> NodeId {
        self.label.group()
    }

    /// The label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Grid quantum.
    pub fn width_factor(&self) -> f64 {
        self.width_factor
    }

    /// Whether the item is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the current drag is snapped to a neighbour.
    pub fn is_snapped(&self) -> bool {
        self.snaped
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Friends captured at the start of the current drag.
    pub fn friends(&self) -> &[NodeId] {
        &self.friends
    }

    /// Attached marks.
    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<MItemEvent> {
        &mut self.events
    }

    /// Bounding box of the item, marks included.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        self.label.bbox(tree)
    }

    /// Bounding box of the body.
    pub fn background_bbox(&self, tree: &Tree) -> Rect {
        self.label.body_bbox(tree)
    }

    /// Anchor points of the current bounding box.
    pub fn anchors(&self, tree: &Tree) -> AnchorsMap {
        anchors(self.bbox(tree))
    }

    /// Move the item so its bounding box starts at `p`.
    pub fn move_to(&self, tree: &mut Tree, p: Point) {
        self.label.move_to(tree, p);
    }

    /// Center the item horizontally on `cx`.
    pub fn set_cx(&self, tree: &mut Tree, cx: f64) {
        self.label.set_cx(tree, cx);
    }

    /// Center the item vertically on `cy`.
    pub fn set_cy(&self, tree: &mut Tree, cy: f64) {
        self.label.set_cy(tree, cy);
    }

    /// Shift the item.
    pub fn translate(&self, tree: &mut Tree, delta: Vec2) {
        self.label.translate(tree, delta);
    }

    /// Displayed string.
    pub fn title_string<'a>(&self, tree: &'a Tree) -> &'a str {
        self.label.value(tree)
    }

    /// Replace the displayed string; the body is realigned and its width
    /// corrected to the grid again.
    pub fn set_title_string(&mut self, tree: &mut Tree, value: &str) {
        self.label.set_value(tree, value);
        self.correct_width(tree);
    }

    /// Round the body width up to a multiple of the grid quantum.
    fn correct_width(&self, tree: &mut Tree) {
        if let Some(bg) = self.label.background() {
            let w = bg.bbox(tree).width();
            tree.set_width(bg.node(), ceil_to_grid(w, self.width_factor));
        }
    }

    fn paint(&self, tree: &mut Tree, paint: &Paint) {
        if let Some(bg) = self.label.background() {
            bg.paint(tree, paint);
        }
    }

    /// Pointer entered the item.
    pub fn mouse_enter(&self, tree: &mut Tree) {
        if !self.selected {
            self.paint(tree, &self.highlight);
        }
    }

    /// Pointer left the item.
    pub fn mouse_leave(&self, tree: &mut Tree) {
        if !self.selected {
            self.paint(tree, &self.normal);
        }
    }

    /// Pointer pressed on the item.
    pub fn mouse_down(&mut self, tree: &mut Tree) {
        self.select_handler(tree);
    }

    /// Select the item if it is not selected yet and announce it.
    pub fn select_handler(&mut self, tree: &mut Tree) {
        if self.selected {
            return;
        }
        self.select(tree, Some(true));
        self.events.emit(MItemEvent::DirectSelect { item: self.group() });
    }

    /// Set the selection, or toggle it with `None`.
    pub fn select(&mut self, tree: &mut Tree, state: Option<bool>) {
        self.selected = state.unwrap_or(!self.selected);
        if self.selected {
            self.paint(tree, &self.select);
        } else {
            self.paint(tree, &self.normal);
        }
    }

    /// Start a drag: leave any jail for the root, stop receiving pointer
    /// events and capture the friends to snap against.
    pub fn drag_start(&mut self, tree: &mut Tree) {
        let group = self.group();
        let parent = tree.parent_of(group);
        if let Some(parent) = parent
            && tree.kind(parent) == Some(NodeKind::MItemJail)
        {
            self.events.emit(MItemEvent::LeaveJail {
                item: group,
                jail: parent,
            });
        }
        self.home = parent.map(|p| (p, self.bbox(tree).origin()));
        let root = tree.root();
        tree.reparent(group, root);
        tree.set_pickable(group, false);
        self.friends = friends_of(tree, group);
        self.dragging = true;
        tracing::trace!(
            target: "tds_widgets::mitem",
            id = %self.id(),
            friends = self.friends.len(),
            "drag started"
        );
    }

    /// Decide whether the item is snapped to one of its friends.
    ///
    /// Candidates are friends whose centers lie within three quarters of the
    /// summed diagonals, tried nearest first. Snapping brings the item to the
    /// front.
    pub fn snap_handler(&mut self, tree: &mut Tree) -> bool {
        let own = self.bbox(tree);
        let center = own.center();
        let own_diagonal = diagonal(own);
        let own_anchors = anchors(own);

        let mut candidates: Vec<(f64, Rect)> = self
            .friends
            .iter()
            .filter(|f| tree.is_rendered(**f))
            .filter_map(|f| tree.bbox(*f))
            .filter(|b| {
                is_point_in_circle(
                    b.center(),
                    center,
                    (diagonal(*b) + own_diagonal) * CANDIDATE_REACH,
                )
            })
            .map(|b| (dist_p(b.center(), center), b))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let threshold = self.width_factor * SNAP_FACTOR;
        let snaped = candidates
            .iter()
            .any(|(_, b)| anchors_within(&own_anchors, &anchors(*b), threshold));
        if snaped {
            tree.front(self.group());
        }
        if snaped != self.snaped {
            tracing::debug!(target: "tds_widgets::mitem", id = %self.id(), snaped, "snap changed");
        }
        self.snaped = snaped;
        snaped
    }

    /// Follow a drag whose box would start at `proposed.origin()`.
    pub fn drag_move(&mut self, tree: &mut Tree, proposed: Rect) {
        self.snap_handler(tree);
        let p = if self.snaped {
            floor_point_to_grid(proposed.origin(), self.width_factor)
        } else {
            proposed.origin()
        };
        self.move_to(tree, p);
    }

    /// Follow a drag keeping the item centered on the pointer.
    pub fn drag_move_centered(&mut self, tree: &mut Tree, pointer: Point) {
        self.snap_handler(tree);
        let size = self.bbox(tree).size();
        let center = if self.snaped {
            floor_point_to_grid(pointer, self.width_factor)
        } else {
            pointer
        };
        self.move_to(tree, center - Vec2::new(size.width / 2.0, size.height / 2.0));
    }

    /// The jail under the item's center, if its body is showing there.
    pub fn check_landing(&self, tree: &Tree) -> Option<NodeId> {
        let group = self.group();
        let container = tree.parent_of(group)?;
        let center = self.bbox(tree).center();
        let top = *tree.stack_at_point(container, center, Some(group)).last()?;
        if tree.kind(top) != Some(NodeKind::MItemJail) {
            return None;
        }
        let body = tree.first_child_of_kind(top, NodeKind::JailBody)?;
        if !tree.is_visible(body) {
            return None;
        }
        point_in_rect(tree.bbox(body)?, center).then_some(top)
    }

    /// Finish a drag: land in a jail if one is under the center, then put
    /// the item back on the grid.
    ///
    /// Returns the jail the item landed in.
    pub fn drag_end(&mut self, tree: &mut Tree) -> Option<NodeId> {
        let group = self.group();
        let landing = self.check_landing(tree);
        if let Some(jail) = landing {
            tree.reparent(group, jail);
            tracing::debug!(target: "tds_widgets::mitem", id = %self.id(), ?jail, "landed in jail");
        }
        let origin = self.bbox(tree).origin();
        self.move_to(tree, floor_point_to_grid(origin, self.width_factor));
        self.finish_drag(tree);
        landing
    }

    /// Abandon a drag: the item goes back to the parent and position it had
    /// when the drag started, without landing anywhere.
    pub fn drag_cancel(&mut self, tree: &mut Tree) {
        if let Some((parent, origin)) = self.home {
            tree.reparent(self.group(), parent);
            self.move_to(tree, origin);
        }
        tracing::debug!(target: "tds_widgets::mitem", id = %self.id(), "drag cancelled");
        self.finish_drag(tree);
    }

    fn finish_drag(&mut self, tree: &mut Tree) {
        self.snaped = false;
        self.dragging = false;
        self.home = None;
        self.friends.clear();
        tree.set_pickable(self.group(), true);
    }

    /// Attach a mark at the outer end of its side.
    ///
    /// Returns placement hints for the side, see [`Marks::set_position`].
    pub fn add_mark(&mut self, ctx: &mut Context, style: &MarkStyle) -> Vec<(NodeId, u64)> {
        let group = self.group();
        self.marks.add(ctx, group, style);
        self.place_marks(&mut ctx.scene, style.side)
    }

    /// Attach a mark at `index` on its side.
    pub fn put_mark(
        &mut self,
        ctx: &mut Context,
        style: &MarkStyle,
        index: usize,
    ) -> Vec<(NodeId, u64)> {
        let group = self.group();
        self.marks.put(ctx, group, style, index);
        self.place_marks(&mut ctx.scene, style.side)
    }

    /// Detach the mark showing `sign` on `side`.
    pub fn remove_mark(&mut self, tree: &mut Tree, sign: &str, side: MarkSide) -> bool {
        self.marks.remove(tree, sign, side)
    }

    /// Whether `sign` is attached on `side`.
    pub fn has_mark(&self, sign: &str, side: MarkSide) -> bool {
        self.marks.has_mark(sign, side)
    }

    /// Lay out the marks of `side` against the body.
    pub fn place_marks(&self, tree: &mut Tree, side: MarkSide) -> Vec<(NodeId, u64)> {
        let base = self.background_bbox(tree);
        self.marks.set_position(tree, side, base)
    }
}

/// Items sharing `group`'s parent, plus the items of jails sharing it.
fn friends_of(tree: &Tree, group: NodeId) -> Vec<NodeId> {
    let Some(parent) = tree.parent_of(group) else {
        return Vec::new();
    };
    let mut friends = Vec::new();
    for &child in tree.children_of(parent) {
        if child == group {
            continue;
        }
        match tree.kind(child) {
            Some(NodeKind::MItem) => friends.push(child),
            Some(NodeKind::MItemJail) => {
                friends.extend(tree.children_of_kind(child, NodeKind::MItem));
            }
            _ => {}
        }
    }
    friends
}
