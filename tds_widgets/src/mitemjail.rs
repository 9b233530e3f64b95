// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resizable, collapsible container of diagram items.
//!
//! A jail is a header text block over a dashed body. Items dropped on the
//! body become children of the jail group. The pin at the body's
//! bottom-right corner resizes the body, but never below the extent of the
//! items inside; the dots zone left of the header collapses the body and its
//! items and expands them again.

use kurbo::{Circle, Point, Rect, Size, Vec2};
use tds_scene::{Fill, LocalNode, NodeId, NodeKind, Shape, Stroke, Style, Tree};

use crate::background::Background;
use crate::context::{Context, WidgetId};
use crate::event::{Emitter, JailEvent};
use crate::geometry::{GRID_STEP, floor_point_to_grid, point_in_rect};
use crate::style::{BLANK, BackgroundStyle, TitleStyle};
use crate::textarea::{Textarea, TextareaAttr};

/// Horizontal offset of the dots zone from the jail position.
const DOTS_DX: f64 = -18.0;

/// Paint of the jail parts in one visual state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JailStyle {
    /// Fill of the header body.
    pub header_fill: Fill,
    /// Stroke of the header body.
    pub header_stroke: Stroke,
    /// Stroke of the jail body.
    pub body_stroke: Stroke,
    /// Stroke of the resize pin.
    pub pin_stroke: Stroke,
}

/// Paint per visual state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JailStyles {
    /// Neither hovered nor selected.
    pub normal: JailStyle,
    /// Hovered.
    pub highlite: JailStyle,
    /// Selected.
    pub select: JailStyle,
}

impl Default for JailStyles {
    fn default() -> Self {
        Self {
            normal: JailStyle {
                header_fill: Fill::color("white"),
                header_stroke: Stroke::color("#D2D2D2").with_width(1.0).with_opacity(1.0),
                body_stroke: Stroke::color("#D2D2D2")
                    .with_width(1.0)
                    .with_dasharray("5 5")
                    .with_opacity(1.0),
                pin_stroke: Stroke::color("#D2D2D2").with_width(1.0).with_opacity(1.0),
            },
            highlite: JailStyle {
                header_fill: Fill::color("white"),
                header_stroke: Stroke::color("black").with_opacity(0.2),
                body_stroke: Stroke::color("black").with_opacity(0.5),
                pin_stroke: Stroke::color("black").with_opacity(0.5),
            },
            select: JailStyle {
                header_fill: Fill::color("#D2D2D2"),
                header_stroke: Stroke::color("black").with_opacity(1.0),
                body_stroke: Stroke::color("black").with_opacity(1.0),
                pin_stroke: Stroke::color("black").with_opacity(1.0),
            },
        }
    }
}

/// Attributes of the resize pin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinAttr {
    /// Radius.
    pub radius: f64,
    /// Fill paint.
    pub fill: Fill,
    /// Stroke paint.
    pub stroke: Stroke,
}

impl Default for PinAttr {
    fn default() -> Self {
        Self {
            radius: 9.0,
            fill: Fill::color("#FFFFFF"),
            stroke: Stroke::color("#999999").with_width(1.0),
        }
    }
}

/// Attributes of a jail.
///
/// Header, body and dots positions are relative to `position`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JailAttr {
    /// Header text block.
    pub header: TextareaAttr,
    /// Body rectangle.
    pub body: BackgroundStyle,
    /// Resize pin.
    pub pin: PinAttr,
    /// Collapse zone.
    pub dots: BackgroundStyle,
    /// Smallest body size the pin may produce.
    pub min_size: Size,
    /// Top-left corner of the header.
    pub position: Point,
    /// Paint per visual state.
    pub styles: JailStyles,
}

impl Default for JailAttr {
    fn default() -> Self {
        mitemjail_attr_def(BLANK, Point::ZERO)
    }
}

/// Default jail with header text `title` at `position`.
pub fn mitemjail_attr_def(title: &str, position: Point) -> JailAttr {
    JailAttr {
        header: TextareaAttr {
            body: BackgroundStyle {
                width: 288.0,
                height: 36.0,
                fill: Fill::color("white"),
                stroke: Stroke::color("#D2D2D2").with_width(1.0),
                radius: 6.0,
                position: Point::ZERO,
            },
            rows_title_style: TitleStyle::with_value(BLANK).at(Point::new(8.0, 4.0)),
            header_title_style: None,
            data: title.to_owned(),
            row_len: None,
            max_rows: Some(2),
            position: None,
            direct_edit: false,
        },
        body: BackgroundStyle {
            width: 324.0,
            height: 144.0,
            fill: Fill::color("#F1F1F1"),
            stroke: Stroke::color("#D2D2D2")
                .with_width(1.0)
                .with_dasharray("5 5"),
            radius: 4.0,
            position: Point::new(0.0, 36.0),
        },
        pin: PinAttr::default(),
        dots: BackgroundStyle {
            width: 27.0,
            height: 36.0,
            fill: Fill::color("#F1F1F1"),
            stroke: Stroke::color("#D2D2D2").with_width(1.0),
            radius: 6.0,
            position: Point::ZERO,
        },
        min_size: Size::new(279.0, 44.0),
        position,
        styles: JailStyles::default(),
    }
}

/// Farthest extent of the items inside a jail, bounded below by the
/// minimum body size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaxXY {
    /// Rightmost item edge.
    pub x: f64,
    /// Bottom item edge.
    pub y: f64,
    /// Body width reaching `x`.
    pub body_width: f64,
    /// Body height reaching `y`.
    pub body_height: f64,
}

/// Which paint a jail shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Look {
    Normal,
    Highlite,
    Select,
}

/// A container of diagram items.
#[derive(Debug)]
pub struct MItemJail {
    id: WidgetId,
    group: NodeId,
    header: Textarea,
    body: Background,
    dots: Background,
    pin: NodeId,
    min_size: Size,
    styles: JailStyles,
    limit: Option<MaxXY>,
    in_change_size: bool,
    collapsed: bool,
    before_collapse_size: Size,
    selected: bool,
    events: Emitter<JailEvent>,
}

impl MItemJail {
    /// Build a jail on top of `parent` and put it on the grid.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &JailAttr) -> Self {
        let group = ctx.scene.insert(parent, LocalNode::group(NodeKind::MItemJail));
        let offset = attr.position.to_vec2();

        let dots_style = attr
            .dots
            .clone()
            .at(attr.dots.position + offset + Vec2::new(DOTS_DX, 0.0));
        let dots = Background::with_kind(ctx, Some(group), &dots_style, NodeKind::JailDots);
        let body_style = attr.body.clone().at(attr.body.position + offset);
        let body = Background::with_kind(ctx, Some(group), &body_style, NodeKind::JailBody);
        let header_attr = TextareaAttr {
            position: Some(attr.position),
            ..attr.header.clone()
        };
        let header = Textarea::with_kind(ctx, Some(group), &header_attr, NodeKind::JailHeader);

        let corner = body.bbox(&ctx.scene);
        let pin = ctx.scene.insert(
            Some(group),
            LocalNode::shape(
                NodeKind::JailPin,
                Shape::Circle(Circle::new((corner.x1, corner.y1), attr.pin.radius)),
            )
            .with_style(Style {
                fill: Some(attr.pin.fill.clone()),
                stroke: Some(attr.pin.stroke.clone()),
            }),
        );
        ctx.scene.set_draggable(pin, true);
        ctx.scene.set_draggable(group, true);

        let jail = Self {
            id: ctx.next_id(),
            group,
            header,
            body,
            dots,
            pin,
            min_size: attr.min_size,
            styles: attr.styles.clone(),
            limit: None,
            in_change_size: false,
            collapsed: false,
            before_collapse_size: Size::ZERO,
            selected: false,
            events: Emitter::new(),
        };
        jail.drag_end_handler(&mut ctx.scene);
        jail
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The jail group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Header text block.
    pub fn header(&self) -> &Textarea {
        &self.header
    }

    /// Header text block, for editing.
    pub fn header_mut(&mut self) -> &mut Textarea {
        &mut self.header
    }

    /// Body rectangle.
    pub fn body(&self) -> &Background {
        &self.body
    }

    /// Collapse zone.
    pub fn dots(&self) -> &Background {
        &self.dots
    }

    /// Resize pin node.
    pub fn pin(&self) -> NodeId {
        self.pin
    }

    /// Whether the body is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Whether the pin is being dragged.
    pub fn in_change_size(&self) -> bool {
        self.in_change_size
    }

    /// Whether the jail is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<JailEvent> {
        &mut self.events
    }

    /// Bounding box of the visible parts.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        tree.bbox(self.group).unwrap_or(Rect::ZERO)
    }

    /// Items inside the jail, in paint order.
    pub fn items(&self, tree: &Tree) -> Vec<NodeId> {
        tree.children_of_kind(self.group, NodeKind::MItem).collect()
    }

    /// Extent needed to hold every item, never below the minimum size.
    pub fn max_xy(&self, tree: &Tree) -> MaxXY {
        let cb = self.body.bbox(tree);
        let floor_x = cb.x0 + self.min_size.width;
        let floor_y = cb.y0 + self.min_size.height;
        let (x, y) = self
            .items(tree)
            .into_iter()
            .filter_map(|i| tree.bbox(i))
            .fold((floor_x, floor_y), |(x, y), b| (x.max(b.x1), y.max(b.y1)));
        MaxXY {
            x,
            y,
            body_width: x - cb.x0,
            body_height: y - cb.y0,
        }
    }

    /// Move an item into the jail and announce it.
    ///
    /// Returns `false` when the item cannot be moved there.
    pub fn add(&mut self, tree: &mut Tree, item: NodeId) -> bool {
        if !tree.reparent(item, self.group) {
            return false;
        }
        if tree.kind(item) == Some(NodeKind::MItem) {
            self.events.emit(JailEvent::HasNewMItem {
                jail: self.group,
                item,
            });
        }
        true
    }

    /// Pin drag started: freeze the current item extent as the resize limit.
    pub fn pin_drag_start(&mut self, tree: &Tree) {
        self.limit = Some(self.max_xy(tree));
        self.in_change_size = true;
    }

    /// Pin dragged to `corner`: resize the body so its bottom-right corner
    /// follows, clamped to the limit.
    pub fn pin_move_handler(&mut self, tree: &mut Tree, corner: Point) {
        if self.collapsed {
            return;
        }
        let limit = self.limit.unwrap_or_else(|| self.max_xy(tree));
        let corner = Point::new(corner.x.max(limit.x), corner.y.max(limit.y));
        let cb = self.body.bbox(tree);
        tree.set_size(
            self.body.node(),
            Size::new(corner.x - cb.x0, corner.y - cb.y0),
        );
        tree.set_center(self.pin, corner);
    }

    /// Pin released.
    pub fn pin_drag_end(&mut self) {
        self.in_change_size = false;
        self.limit = None;
    }

    /// Fit the body to the items plus one grid step.
    pub fn autosize(&mut self, tree: &mut Tree) {
        if self.collapsed {
            return;
        }
        let m = self.max_xy(tree);
        tree.set_center(self.pin, Point::new(m.x + GRID_STEP, m.y + GRID_STEP));
        tree.set_size(
            self.body.node(),
            Size::new(m.body_width + GRID_STEP, m.body_height + GRID_STEP),
        );
        tracing::trace!(target: "tds_widgets::mitemjail", id = %self.id, width = m.body_width + GRID_STEP, "autosized");
    }

    /// Collapse the body and its items, or expand them again.
    ///
    /// Expanding restores the body size from before the collapse. Ignored
    /// while the pin is being dragged.
    pub fn hide_handler(&mut self, tree: &mut Tree) {
        if self.in_change_size {
            return;
        }
        if self.collapsed {
            for item in self.items(tree) {
                tree.show(item);
            }
            let hb = self.header.body().bbox(tree);
            tree.show(self.body.node());
            tree.set_size(self.body.node(), self.before_collapse_size);
            tree.move_to(self.body.node(), Point::new(hb.x0, hb.y1));
            let cb = self.body.bbox(tree);
            tree.show(self.pin);
            tree.set_center(self.pin, Point::new(cb.x1, cb.y1));
            tree.set_draggable(self.pin, true);
            tree.front(self.pin);
            self.collapsed = false;
        } else {
            self.before_collapse_size = self.body.bbox(tree).size();
            for item in self.items(tree) {
                tree.hide(item);
            }
            tree.hide(self.body.node());
            tree.set_draggable(self.pin, false);
            tree.hide(self.pin);
            self.collapsed = true;
        }
        tracing::debug!(target: "tds_widgets::mitemjail", id = %self.id, collapsed = self.collapsed, "collapse toggled");
    }

    /// Pointer pressed on the dots zone.
    pub fn dots_mouse_down(&mut self, tree: &mut Tree) {
        if !self.in_change_size {
            self.hide_handler(tree);
        }
    }

    /// Pointer pressed at `point`; selects the jail unless the press is in
    /// the dots zone.
    pub fn mouse_down(&mut self, tree: &mut Tree, point: Point) {
        if point_in_rect(self.dots.bbox(tree), point) || self.selected {
            return;
        }
        self.selected = true;
        self.accept_style(tree, Look::Select);
        self.events
            .emit(JailEvent::DirectSelect { jail: self.group });
    }

    /// Pointer entered the jail.
    pub fn mouse_enter(&self, tree: &mut Tree) {
        if !self.selected {
            self.accept_style(tree, Look::Highlite);
        }
    }

    /// Pointer left the jail.
    pub fn mouse_leave(&self, tree: &mut Tree) {
        if !self.selected {
            self.accept_style(tree, Look::Normal);
        }
    }

    /// Set the selection, or toggle it with `None`.
    pub fn select(&mut self, tree: &mut Tree, state: Option<bool>) {
        self.selected = state.unwrap_or(!self.selected);
        let look = if self.selected {
            Look::Select
        } else {
            Look::Normal
        };
        self.accept_style(tree, look);
    }

    fn accept_style(&self, tree: &mut Tree, look: Look) {
        let s = match look {
            Look::Normal => &self.styles.normal,
            Look::Highlite => &self.styles.highlite,
            Look::Select => &self.styles.select,
        };
        let header = self.header.body().node();
        tree.set_stroke(header, s.header_stroke.clone());
        tree.set_fill(header, s.header_fill.clone());
        tree.set_stroke(self.body.node(), s.body_stroke.clone());
        tree.set_stroke(self.pin, s.pin_stroke.clone());
    }

    /// Follow a drag whose box would start at `proposed.origin()`.
    pub fn drag_move(&self, tree: &mut Tree, proposed: Rect) {
        tree.move_to(self.group, proposed.origin());
    }

    /// Put the jail back on the grid.
    pub fn drag_end_handler(&self, tree: &mut Tree) {
        if let Some(b) = tree.bbox(self.group) {
            tree.move_to(self.group, floor_point_to_grid(b.origin(), GRID_STEP));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::event::WidgetEvent;
    use crate::mitem::{MItem, MItemAttr};

    fn jail(ctx: &mut Context) -> MItemJail {
        MItemJail::new(ctx, None, &mitemjail_attr_def("Inbox", Point::new(90.0, 90.0)))
    }

    fn item_in(ctx: &mut Context, jail: &MItemJail, at: Point) -> NodeId {
        MItem::new(ctx, Some(jail.group()), &MItemAttr::new("abc", at))
            .unwrap()
            .group()
    }

    #[test]
    fn layout_follows_position() {
        let mut ctx = Context::new();
        let j = jail(&mut ctx);
        assert_eq!(j.body().bbox(&ctx.scene), Rect::new(90.0, 126.0, 414.0, 270.0));
        assert_eq!(j.header().body().bbox(&ctx.scene), Rect::new(90.0, 90.0, 378.0, 126.0));
        assert_eq!(j.dots().bbox(&ctx.scene).origin(), Point::new(72.0, 90.0));
        assert_eq!(
            ctx.scene.bbox(j.pin()).map(|b| b.center()),
            Some(Point::new(414.0, 270.0))
        );
        assert_eq!(j.header().rows()[0].value(&ctx.scene), "Inbox");
        assert_eq!(
            ctx.scene.first_child_of_kind(j.group(), NodeKind::JailBody),
            Some(j.body().node())
        );
    }

    #[test]
    fn max_xy_grows_with_items_and_keeps_min_size() {
        let mut ctx = Context::new();
        let j = jail(&mut ctx);
        let empty = j.max_xy(&ctx.scene);
        assert_eq!(empty.body_width, 279.0);
        assert_eq!(empty.body_height, 44.0);
        assert_eq!(empty.x, 90.0 + 279.0);

        item_in(&mut ctx, &j, Point::new(99.0, 135.0));
        let one = j.max_xy(&ctx.scene);
        assert_eq!(one, empty, "small item stays inside the minimum");

        item_in(&mut ctx, &j, Point::new(400.0, 300.0));
        let two = j.max_xy(&ctx.scene);
        assert!(two.x >= one.x && two.y >= one.y);
        assert!(two.x > one.x && two.y > one.y);
        assert!((two.body_width - (two.x - 90.0)).abs() < 1e-9);
        assert_eq!(j.items(&ctx.scene).len(), 2);
    }

    #[test]
    fn pin_resize_is_clamped_to_items() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        j.pin_drag_start(&ctx.scene);
        assert!(j.in_change_size());
        j.pin_move_handler(&mut ctx.scene, Point::new(100.0, 130.0));
        let body = j.body().bbox(&ctx.scene);
        assert_eq!(body.size(), Size::new(279.0, 44.0));
        assert_eq!(
            ctx.scene.bbox(j.pin()).map(|b| b.center()),
            Some(Point::new(369.0, 170.0))
        );

        j.pin_move_handler(&mut ctx.scene, Point::new(500.0, 400.0));
        assert_eq!(j.body().bbox(&ctx.scene).size(), Size::new(410.0, 274.0));
        j.pin_drag_end();
        assert!(!j.in_change_size());
    }

    #[test]
    fn autosize_adds_one_grid_step() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        item_in(&mut ctx, &j, Point::new(400.0, 300.0));
        let m = j.max_xy(&ctx.scene);
        j.autosize(&mut ctx.scene);
        let body = j.body().bbox(&ctx.scene);
        assert!((body.width() - (m.body_width + GRID_STEP)).abs() < 1e-9);
        assert!((body.height() - (m.body_height + GRID_STEP)).abs() < 1e-9);
        let pin = ctx.scene.bbox(j.pin()).unwrap().center();
        assert!((pin - Point::new(m.x + GRID_STEP, m.y + GRID_STEP)).hypot() < 1e-9);
    }

    #[test]
    fn collapse_round_trip_restores_body_size() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        let item = item_in(&mut ctx, &j, Point::new(99.0, 135.0));
        j.pin_drag_start(&ctx.scene);
        j.pin_move_handler(&mut ctx.scene, Point::new(500.5, 333.5));
        j.pin_drag_end();
        let before = j.body().bbox(&ctx.scene).size();

        j.dots_mouse_down(&mut ctx.scene);
        assert!(j.is_collapsed());
        assert!(!ctx.scene.is_visible(j.body().node()));
        assert!(!ctx.scene.is_visible(j.pin()));
        assert!(!ctx.scene.is_visible(item));
        assert!(!ctx.scene.is_draggable(j.pin()));

        j.autosize(&mut ctx.scene);
        j.pin_move_handler(&mut ctx.scene, Point::new(900.0, 900.0));

        j.hide_handler(&mut ctx.scene);
        assert!(!j.is_collapsed());
        assert_eq!(j.body().bbox(&ctx.scene).size(), before);
        assert!(ctx.scene.is_visible(item));
        let body = j.body().bbox(&ctx.scene);
        assert_eq!(ctx.scene.bbox(j.pin()).map(|b| b.center()), Some(Point::new(body.x1, body.y1)));
        assert_eq!(ctx.scene.children_of(j.group()).last(), Some(&j.pin()));
    }

    #[test]
    fn collapse_is_blocked_while_resizing() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        j.pin_drag_start(&ctx.scene);
        j.dots_mouse_down(&mut ctx.scene);
        j.hide_handler(&mut ctx.scene);
        assert!(!j.is_collapsed());
    }

    #[test]
    fn selection_skips_the_dots_zone() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        j.events_mut().connect(move |e| s.borrow_mut().push(e.clone()));
        let header = j.header().body().node();
        let header_fill = |ctx: &Context| ctx.scene.style(header).unwrap().fill.clone().unwrap().color;

        j.mouse_enter(&mut ctx.scene);
        assert_eq!(
            ctx.scene.style(j.body().node()).unwrap().stroke.as_ref().unwrap().opacity,
            Some(0.5)
        );
        j.mouse_down(&mut ctx.scene, Point::new(75.0, 95.0));
        assert!(!j.is_selected(), "dots press does not select");
        j.mouse_down(&mut ctx.scene, Point::new(200.0, 200.0));
        j.mouse_down(&mut ctx.scene, Point::new(200.0, 200.0));
        assert!(j.is_selected());
        assert_eq!(header_fill(&ctx), "#D2D2D2");
        j.mouse_leave(&mut ctx.scene);
        assert_eq!(header_fill(&ctx), "#D2D2D2");
        assert_eq!(*seen.borrow(), vec![JailEvent::DirectSelect { jail: j.group() }]);

        j.select(&mut ctx.scene, Some(false));
        assert_eq!(header_fill(&ctx), "white");
    }

    #[test]
    fn add_announces_new_items() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        j.events_mut().connect(move |e| s.borrow_mut().push(e.name()));
        let item = MItem::new(&mut ctx, None, &MItemAttr::new("x", Point::ZERO))
            .unwrap()
            .group();
        assert!(j.add(&mut ctx.scene, item));
        assert_eq!(ctx.scene.parent_of(item), Some(j.group()));
        assert_eq!(*seen.borrow(), vec!["tds-mitemjail-hasnewmitem"]);
        assert!(!j.add(&mut ctx.scene, j.group()), "a jail cannot hold itself");
    }

    #[test]
    fn dropped_item_lands_inside() {
        let mut ctx = Context::new();
        let j = jail(&mut ctx);
        let mut m = MItem::new(&mut ctx, None, &MItemAttr::new("abc", Point::ZERO)).unwrap();
        m.drag_start(&mut ctx.scene);
        let size = m.bbox(&ctx.scene).size();
        m.drag_move(&mut ctx.scene, Rect::from_origin_size((200.0, 200.0), size));
        assert_eq!(m.drag_end(&mut ctx.scene), Some(j.group()));
        assert_eq!(ctx.scene.parent_of(m.group()), Some(j.group()));
        assert_eq!(m.bbox(&ctx.scene).origin(), Point::new(198.0, 198.0));
    }

    #[test]
    fn collapsed_body_rejects_landing() {
        let mut ctx = Context::new();
        let mut j = jail(&mut ctx);
        j.hide_handler(&mut ctx.scene);
        let mut m = MItem::new(&mut ctx, None, &MItemAttr::new("abc", Point::ZERO)).unwrap();
        m.drag_start(&mut ctx.scene);
        let size = m.bbox(&ctx.scene).size();
        m.drag_move(&mut ctx.scene, Rect::from_origin_size((200.0, 95.0), size));
        assert_eq!(m.drag_end(&mut ctx.scene), None);
    }

    #[test]
    fn drag_end_snaps_container_to_grid() {
        let mut ctx = Context::new();
        let j = jail(&mut ctx);
        let size = j.bbox(&ctx.scene).size();
        j.drag_move(&mut ctx.scene, Rect::from_origin_size((100.0, 50.0), size));
        j.drag_end_handler(&mut ctx.scene);
        assert_eq!(j.bbox(&ctx.scene).origin(), Point::new(99.0, 45.0));
    }
}
