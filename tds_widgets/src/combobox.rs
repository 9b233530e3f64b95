// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsible single-select built on a [`List`].
//!
//! While closed only the current selection is shown, lifted to the slot of
//! the first row. Opening puts it back into the list at its own position.

use kurbo::{Point, Rect, Vec2};
use tds_scene::{LocalNode, NodeId, NodeKind, Tree};

use crate::context::{Context, WidgetId};
use crate::error::{Error, Result};
use crate::event::{ComboboxEvent, Emitter};
use crate::list::{List, ListAttr};
use crate::list_item::Condition;
use crate::style::TitleStyle;
use crate::title::Title;

/// Whether the list is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComboboxState {
    /// The list is shown.
    Opened,
    /// Only the current selection is shown.
    Closed,
}

/// Attributes of a combobox.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboboxAttr {
    /// The list of choices.
    pub list: ListAttr,
    /// Index of the initially selected row; required.
    pub selection: Option<usize>,
    /// Optional caption.
    pub title: Option<TitleStyle>,
    /// Open when the pointer enters.
    pub autoshow: bool,
    /// Close when the pointer leaves.
    pub autohide: bool,
}

/// A combobox.
#[derive(Debug)]
pub struct Combobox {
    id: WidgetId,
    group: NodeId,
    title: Option<Title>,
    list: List,
    current: usize,
    state: ComboboxState,
    pdy: f64,
    autoshow: bool,
    autohide: bool,
    events: Emitter<ComboboxEvent>,
}

impl Combobox {
    /// Build a combobox on top of `parent`. It always starts closed.
    ///
    /// Fails when the selection is missing or out of range.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &ComboboxAttr) -> Result<Self> {
        let current = attr
            .selection
            .ok_or_else(|| Error::configuration("selection", "a combobox needs a selection"))?;
        if current >= attr.list.items.len() {
            return Err(Error::configuration(
                "selection",
                format!(
                    "index {current} is out of range for {} items",
                    attr.list.items.len()
                ),
            ));
        }

        let group = ctx.scene.insert(parent, LocalNode::group(NodeKind::Combobox));
        let list = List::new(ctx, Some(group), &attr.list)?;
        let mut combobox = Self {
            id: ctx.next_id(),
            group,
            title: None,
            list,
            current,
            state: ComboboxState::Opened,
            pdy: 0.0,
            autoshow: attr.autoshow,
            autohide: attr.autohide,
            events: Emitter::new(),
        };
        combobox.initial_set(&mut ctx.scene);
        combobox.title = attr
            .title
            .as_ref()
            .map(|style| Title::new(ctx, Some(group), style));
        Ok(combobox)
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The combobox group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Optional caption.
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// The list of choices.
    pub fn list(&self) -> &List {
        &self.list
    }

    /// Index of the current selection.
    pub fn selection(&self) -> usize {
        self.current
    }

    /// Current state.
    pub fn state(&self) -> ComboboxState {
        self.state
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<ComboboxEvent> {
        &mut self.events
    }

    fn current_group(&self) -> Option<NodeId> {
        self.list.item(self.current).map(|i| i.group())
    }

    fn slot(&self, tree: &Tree) -> Rect {
        self.list
            .item(0)
            .map_or(Rect::ZERO, |i| i.background_bbox(tree))
    }

    /// Lift the selection into the slot of the first row and hide the list.
    pub fn initial_set(&mut self, tree: &mut Tree) {
        let slot = self.slot(tree);
        if let Some(cs) = self.list.item(self.current) {
            tree.reparent(cs.group(), self.group);
            tree.front(cs.group());
            let dy = cs.background_bbox(tree).y0 - slot.y0;
            cs.dmove(tree, Vec2::new(0.0, -dy));
            self.pdy = dy;
        }
        self.list.hide(tree);
        self.state = ComboboxState::Closed;
    }

    /// Flip between opened and closed.
    pub fn switch_state(&mut self, tree: &mut Tree) {
        self.state = match self.state {
            ComboboxState::Closed => ComboboxState::Opened,
            ComboboxState::Opened => ComboboxState::Closed,
        };
        self.check_state(tree);
    }

    /// Bring the scene in line with the current state.
    pub fn check_state(&mut self, tree: &mut Tree) {
        match self.state {
            ComboboxState::Closed => self.hide_list(tree),
            ComboboxState::Opened => self.show_list(tree),
        }
    }

    /// Lift the selection into the first slot and hide the rest.
    pub fn hide_list(&mut self, tree: &mut Tree) {
        let slot = self.slot(tree);
        if let Some(cs) = self.list.item(self.current) {
            tree.reparent(cs.group(), self.group);
            tree.front(cs.group());
            self.pdy = cs.background_bbox(tree).y0 - slot.y0;
            cs.move_background_to(tree, slot.origin());
        }
        self.list.hide(tree);
        for item in self.list.items_mut() {
            item.set_condition(tree, Condition::Normal);
        }
        tracing::debug!(target: "tds_widgets::combobox", id = %self.id, selection = self.current, "closed");
        self.events.emit(ComboboxEvent::HideList);
    }

    /// Show the list with the selection back in its row, highlighted.
    pub fn show_list(&mut self, tree: &mut Tree) {
        self.list.show(tree);
        let list_group = self.list.group();
        let pdy = self.pdy;
        if let Some(cs) = self.list.item_mut(self.current) {
            tree.reparent(cs.group(), list_group);
            tree.front(cs.group());
            cs.set_condition(tree, Condition::Highlight);
            cs.dmove(tree, Vec2::new(0.0, pdy));
        }
        tracing::debug!(target: "tds_widgets::combobox", id = %self.id, "opened");
        self.events.emit(ComboboxEvent::ShowList);
    }

    /// Press on row `index`: opens a closed combobox, or selects the row and
    /// closes an open one.
    pub fn item_mouse_down(&mut self, tree: &mut Tree, index: usize) {
        if !self.list.mouse_down(tree, index) {
            return;
        }
        match self.state {
            ComboboxState::Closed => self.switch_state(tree),
            ComboboxState::Opened => {
                self.current = index;
                self.switch_state(tree);
                self.events.emit(ComboboxEvent::ItemSelected { index });
            }
        }
    }

    /// Pointer entered row `index`; the selection is kept on top so strokes
    /// do not overlap.
    pub fn item_mouse_enter(&mut self, tree: &mut Tree, index: usize) {
        if let Some(item) = self.list.item_mut(index) {
            item.mouse_enter(tree);
        }
        if let Some(cs) = self.current_group() {
            tree.front(cs);
        }
    }

    /// Pointer left row `index`.
    pub fn item_mouse_leave(&mut self, tree: &mut Tree, index: usize) {
        if let Some(item) = self.list.item_mut(index) {
            item.mouse_leave(tree);
        }
    }

    /// Pointer entered the combobox.
    pub fn mouse_enter(&mut self, tree: &mut Tree) {
        if self.autoshow && self.state == ComboboxState::Closed {
            self.switch_state(tree);
        }
    }

    /// Pointer left the combobox.
    pub fn mouse_leave(&mut self, tree: &mut Tree) {
        if self.autohide && self.state == ComboboxState::Opened {
            self.switch_state(tree);
        }
    }

    /// Bounding box of the visible parts.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        tree.bbox(self.group).unwrap_or(Rect::ZERO)
    }

    /// Move the combobox so its bounding box starts at `p`.
    pub fn move_to(&self, tree: &mut Tree, p: Point) {
        tree.move_to(self.group, p);
    }
}
