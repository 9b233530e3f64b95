// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner of the diagram items and jails of one scene.
//!
//! The board keeps every [`MItem`] and [`MItemJail`] keyed by its group node
//! and turns raw pointer input into the widgets' handlers: hit testing picks
//! the target, a [`DragState`] produces proposed boxes, and a finished item
//! drag that lands on a jail is handed to [`MItemJail::add`].
//!
//! An item is lifted out of its parent on the first pointer move, so a plain
//! click selects it without leaving its jail.

use hashbrown::HashMap;
use kurbo::Point;
use tds_event_state::drag::{DragState, PointerId};
use tds_event_state::press::DoubleClick;
use tds_scene::{NodeId, NodeKind, QueryFilter, Tree};

use crate::context::Context;
use crate::error::Result;
use crate::mitem::{MItem, MItemAttr};
use crate::mitemjail::{JailAttr, MItemJail, mitemjail_attr_def};

/// What a pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardTarget {
    /// A diagram item.
    MItem(NodeId),
    /// The header or body of a jail.
    Jail(NodeId),
    /// The collapse zone of a jail.
    JailDots(NodeId),
    /// The resize pin of a jail.
    JailPin(NodeId),
}

impl BoardTarget {
    /// Group node of the item or jail the target belongs to.
    pub fn owner(self) -> NodeId {
        match self {
            Self::MItem(id) | Self::Jail(id) | Self::JailDots(id) | Self::JailPin(id) => id,
        }
    }
}

/// Diagram items and jails with their pointer routing.
#[derive(Debug, Default)]
pub struct Board {
    mitems: HashMap<NodeId, MItem>,
    jails: HashMap<NodeId, MItemJail>,
    drag: DragState<BoardTarget>,
    pin_clicks: DoubleClick<NodeId>,
    hovered: Option<BoardTarget>,
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default item showing `value` at `position` on the root.
    pub fn add_mitem(&mut self, ctx: &mut Context, value: &str, position: Point) -> Result<NodeId> {
        self.add_mitem_with(ctx, &MItemAttr::new(value, position))
    }

    /// Create an item on the root.
    pub fn add_mitem_with(&mut self, ctx: &mut Context, attr: &MItemAttr) -> Result<NodeId> {
        let item = MItem::new(ctx, None, attr)?;
        let id = item.group();
        self.mitems.insert(id, item);
        Ok(id)
    }

    /// Create an item and put it into `jail`.
    ///
    /// The item stays on the root when `jail` is not a jail of this board.
    pub fn add_mitem_in(
        &mut self,
        ctx: &mut Context,
        jail: NodeId,
        attr: &MItemAttr,
    ) -> Result<NodeId> {
        let id = self.add_mitem_with(ctx, attr)?;
        if let Some(j) = self.jails.get_mut(&jail) {
            j.add(&mut ctx.scene, id);
        }
        Ok(id)
    }

    /// Create a default jail titled `title` at `position`.
    pub fn add_jail(&mut self, ctx: &mut Context, title: &str, position: Point) -> NodeId {
        self.add_jail_with(ctx, &mitemjail_attr_def(title, position))
    }

    /// Create a jail on the root.
    pub fn add_jail_with(&mut self, ctx: &mut Context, attr: &JailAttr) -> NodeId {
        let jail = MItemJail::new(ctx, None, attr);
        let id = jail.group();
        self.jails.insert(id, jail);
        id
    }

    /// Item by group node.
    pub fn mitem(&self, id: NodeId) -> Option<&MItem> {
        self.mitems.get(&id)
    }

    /// Item by group node, for handlers and event wiring.
    pub fn mitem_mut(&mut self, id: NodeId) -> Option<&mut MItem> {
        self.mitems.get_mut(&id)
    }

    /// Jail by group node.
    pub fn jail(&self, id: NodeId) -> Option<&MItemJail> {
        self.jails.get(&id)
    }

    /// Jail by group node, for handlers and event wiring.
    pub fn jail_mut(&mut self, id: NodeId) -> Option<&mut MItemJail> {
        self.jails.get_mut(&id)
    }

    /// All items, in no particular order.
    pub fn mitems(&self) -> impl Iterator<Item = &MItem> {
        self.mitems.values()
    }

    /// All jails, in no particular order.
    pub fn jails(&self) -> impl Iterator<Item = &MItemJail> {
        self.jails.values()
    }

    /// The jail holding `item`, if any.
    pub fn jail_of(&self, tree: &Tree, item: NodeId) -> Option<NodeId> {
        tree.parent_of(item)
            .filter(|p| self.jails.contains_key(p))
    }

    /// Group nodes of the selected items.
    pub fn selected_mitems(&self) -> Vec<NodeId> {
        self.mitems
            .iter()
            .filter(|(_, m)| m.is_selected())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Delete an item from the board and the scene.
    pub fn remove_mitem(&mut self, tree: &mut Tree, id: NodeId) -> Option<MItem> {
        let item = self.mitems.remove(&id)?;
        self.forget(id);
        tree.remove(id);
        Some(item)
    }

    /// Delete a jail together with the items inside it.
    pub fn remove_jail(&mut self, tree: &mut Tree, id: NodeId) -> Option<MItemJail> {
        let jail = self.jails.remove(&id)?;
        for item in jail.items(tree) {
            self.mitems.remove(&item);
            self.forget(item);
        }
        self.forget(id);
        tree.remove(id);
        Some(jail)
    }

    fn forget(&mut self, id: NodeId) {
        if self.hovered.is_some_and(|h| h.owner() == id) {
            self.hovered = None;
        }
    }

    /// Clear the selection of every item and jail.
    pub fn deselect_all(&mut self, tree: &mut Tree) {
        for item in self.mitems.values_mut() {
            item.select(tree, Some(false));
        }
        for jail in self.jails.values_mut() {
            jail.select(tree, Some(false));
        }
    }

    /// What is under `point`.
    pub fn hit(&self, tree: &Tree, point: Point) -> Option<BoardTarget> {
        let hit = tree.hit_test_point(point, QueryFilter::new().visible().pickable())?;
        for &node in hit.path.iter().rev() {
            let target = match tree.kind(node) {
                Some(NodeKind::JailDots) => tree.parent_of(node).map(BoardTarget::JailDots),
                Some(NodeKind::JailPin) => tree.parent_of(node).map(BoardTarget::JailPin),
                Some(NodeKind::MItem) if self.mitems.contains_key(&node) => {
                    Some(BoardTarget::MItem(node))
                }
                Some(NodeKind::MItemJail) if self.jails.contains_key(&node) => {
                    Some(BoardTarget::Jail(node))
                }
                _ => None,
            };
            if target.is_some() {
                return target;
            }
        }
        None
    }

    /// Pointer pressed at `at`.
    ///
    /// Items and jails are selected and a drag is armed; a press on the dots
    /// collapses or expands the jail; a double click on a pin autosizes the
    /// jail. Returns what was pressed.
    pub fn pointer_down(
        &mut self,
        tree: &mut Tree,
        pointer: Option<PointerId>,
        at: Point,
        timestamp: u64,
    ) -> Option<BoardTarget> {
        let target = self.hit(tree, at)?;
        match target {
            BoardTarget::MItem(id) => {
                if let Some(item) = self.mitems.get_mut(&id) {
                    item.mouse_down(tree);
                    self.drag.on_start(pointer, target, item.bbox(tree), at);
                }
            }
            BoardTarget::Jail(id) => {
                if let Some(jail) = self.jails.get_mut(&id) {
                    jail.mouse_down(tree, at);
                    self.drag.on_start(pointer, target, jail.bbox(tree), at);
                }
            }
            BoardTarget::JailDots(id) => {
                if let Some(jail) = self.jails.get_mut(&id) {
                    jail.dots_mouse_down(tree);
                }
            }
            BoardTarget::JailPin(id) => {
                if let Some(jail) = self.jails.get_mut(&id) {
                    if self.pin_clicks.on_click(id, at, timestamp) {
                        jail.autosize(tree);
                    } else if let Some(pin_box) = tree.bbox(jail.pin()) {
                        jail.pin_drag_start(tree);
                        self.drag.on_start(pointer, target, pin_box, at);
                    }
                }
            }
        }
        Some(target)
    }

    /// Pointer moved to `at`.
    ///
    /// Feeds an armed drag, or updates hover state when nothing is dragged.
    /// Returns whether a drag consumed the move.
    pub fn pointer_move(&mut self, tree: &mut Tree, pointer: Option<PointerId>, at: Point) -> bool {
        let Some(step) = self.drag.on_move(pointer, at) else {
            self.hover(tree, at);
            return false;
        };
        match step.target {
            BoardTarget::MItem(id) => {
                if let Some(item) = self.mitems.get_mut(&id) {
                    if !item.is_dragging() {
                        item.drag_start(tree);
                    }
                    item.drag_move(tree, step.proposed);
                }
            }
            BoardTarget::Jail(id) => {
                if let Some(jail) = self.jails.get(&id) {
                    jail.drag_move(tree, step.proposed);
                }
            }
            BoardTarget::JailPin(id) => {
                if let Some(jail) = self.jails.get_mut(&id) {
                    jail.pin_move_handler(tree, step.proposed.center());
                }
            }
            BoardTarget::JailDots(_) => {}
        }
        true
    }

    /// Pointer released at `at`.
    ///
    /// Returns the jail a dragged item landed in.
    pub fn pointer_up(
        &mut self,
        tree: &mut Tree,
        pointer: Option<PointerId>,
        at: Point,
    ) -> Option<NodeId> {
        let end = self.drag.on_end(pointer, at)?;
        self.finish(tree, end.target)
    }

    /// Abandon the drag of `pointer`.
    ///
    /// Nothing lands: items go back where they were picked up, jails return
    /// to their start position and a resized body gets its size back.
    pub fn pointer_cancel(&mut self, tree: &mut Tree, pointer: Option<PointerId>) {
        let Some(drag) = self.drag.cancel(pointer) else {
            return;
        };
        match drag.target {
            BoardTarget::MItem(id) => {
                if let Some(item) = self.mitems.get_mut(&id)
                    && item.is_dragging()
                {
                    item.drag_cancel(tree);
                }
            }
            BoardTarget::Jail(id) => {
                if let Some(jail) = self.jails.get(&id) {
                    jail.drag_move(tree, drag.start_box);
                }
            }
            BoardTarget::JailPin(id) => {
                if let Some(jail) = self.jails.get_mut(&id) {
                    jail.pin_move_handler(tree, drag.start_box.center());
                    jail.pin_drag_end();
                }
            }
            BoardTarget::JailDots(_) => {}
        }
    }

    fn finish(&mut self, tree: &mut Tree, target: BoardTarget) -> Option<NodeId> {
        match target {
            BoardTarget::MItem(id) => {
                let item = self.mitems.get_mut(&id)?;
                if !item.is_dragging() {
                    return None;
                }
                let landed = item.drag_end(tree)?;
                if let Some(jail) = self.jails.get_mut(&landed) {
                    jail.add(tree, id);
                }
                Some(landed)
            }
            BoardTarget::Jail(id) => {
                if let Some(jail) = self.jails.get(&id) {
                    jail.drag_end_handler(tree);
                }
                None
            }
            BoardTarget::JailPin(id) => {
                if let Some(jail) = self.jails.get_mut(&id) {
                    jail.pin_drag_end();
                }
                None
            }
            BoardTarget::JailDots(_) => None,
        }
    }

    /// Update hover state for a pointer at `at`, restyling the item or jail
    /// that was left and the one that was entered.
    pub fn hover(&mut self, tree: &mut Tree, at: Point) {
        let now = self.hit(tree, at);
        let before = self.hovered.map(BoardTarget::owner);
        let after = now.map(BoardTarget::owner);
        if before == after {
            self.hovered = now;
            return;
        }
        if let Some(old) = before {
            if let Some(item) = self.mitems.get(&old) {
                item.mouse_leave(tree);
            } else if let Some(jail) = self.jails.get(&old) {
                jail.mouse_leave(tree);
            }
        }
        if let Some(new) = after {
            if let Some(item) = self.mitems.get(&new) {
                item.mouse_enter(tree);
            } else if let Some(jail) = self.jails.get(&new) {
                jail.mouse_enter(tree);
            }
        }
        self.hovered = now;
    }

    /// What the pointer was last over.
    pub fn hovered(&self) -> Option<BoardTarget> {
        self.hovered
    }
}
