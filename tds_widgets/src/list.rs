// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical list of rows with optional separators.

use kurbo::{Point, Rect};
use tds_scene::{Fill, LocalNode, NodeId, NodeKind, Stroke, Tree};

use crate::background::Background;
use crate::context::{Context, WidgetId};
use crate::error::Result;
use crate::event::{Emitter, ListEvent};
use crate::label::{BackgroundRule, LabelAttr};
use crate::list_item::{
    Condition, IconStyle, ItemKind, ItemPartsBehavior, ItemState, ListItem, ListItemAttr,
};
use crate::separator::{Separator, SeparatorAttr};
use crate::style::{BLANK, BackgroundStyle, Indents, TitleStyle};
use crate::title::Title;

/// Spacing between rows and around row decorations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubItemIndents {
    /// Added below every row.
    pub item: f64,
    /// Added above and below every separator.
    pub separator: f64,
    /// Right gap of icons.
    pub item_icon: f64,
    /// Right gap of shortcuts.
    pub item_shortcut: f64,
}

impl Default for SubItemIndents {
    fn default() -> Self {
        Self {
            item: 0.0,
            separator: 4.0,
            item_icon: 8.0,
            item_shortcut: 8.0,
        }
    }
}

/// One row of a list.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItemSpec {
    /// Row kind.
    pub kind: ItemKind,
    /// Title string.
    pub value: String,
    /// Initial state.
    pub state: ItemState,
    /// Initial condition.
    pub condition: Condition,
    /// Icon of icon and group rows.
    pub icon: Option<IconStyle>,
    /// Shortcut of shortcut rows.
    pub shortcut: Option<TitleStyle>,
    /// Nested list of group rows.
    pub list: Option<ListAttr>,
}

impl ListItemSpec {
    /// A plain title row.
    pub fn general(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            ..Self::default()
        }
    }
}

/// A separator placed before the row with index `order`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeparatorSpec {
    /// Index of the row the separator precedes.
    pub order: usize,
    /// Line attributes; `start` is relative to the list position.
    pub value: SeparatorAttr,
}

/// Attributes of a list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListAttr {
    /// Top-left corner of the body.
    pub position: Point,
    /// Body rectangle.
    pub body: BackgroundStyle,
    /// Fit the body height to the rows.
    pub auto_height: bool,
    /// Padding inside the body.
    pub indents: Indents,
    /// Row and separator spacing.
    pub sub_item_indents: SubItemIndents,
    /// Width of every row.
    pub item_width: f64,
    /// Template of every row label; value and position are overwritten.
    pub items_style: LabelAttr,
    /// Optional caption.
    pub title_style: Option<TitleStyle>,
    /// Style table shared by the rows.
    pub items_behavior: Option<ItemPartsBehavior>,
    /// Rows, top to bottom.
    pub items: Vec<ListItemSpec>,
    /// Separators.
    pub separators: Vec<SeparatorSpec>,
}

impl Default for ListAttr {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            body: BackgroundStyle {
                width: 120.0,
                height: 20.0,
                fill: Fill::color("#FFFFFF"),
                stroke: Stroke::color("#D2D2D2").with_width(1.0),
                radius: 4.0,
                position: Point::ZERO,
            },
            auto_height: true,
            indents: Indents::new(4.0, 4.0, 4.0, 4.0),
            sub_item_indents: SubItemIndents::default(),
            item_width: 112.0,
            items_style: LabelAttr {
                title: TitleStyle::with_value(BLANK),
                background_rule: vec![BackgroundRule::Indent],
                background: Some(BackgroundStyle {
                    fill: Fill::color("#FFFFFF"),
                    stroke: Stroke::color("#FFFFFF").with_width(1.0),
                    radius: 2.0,
                    ..BackgroundStyle::sized(112.0, 20.0)
                }),
                indents: Indents::new(6.0, 3.0, 6.0, 3.0),
                position: None,
            },
            title_style: None,
            items_behavior: None,
            items: Vec::new(),
            separators: Vec::new(),
        }
    }
}

/// A list of rows over a body rectangle.
#[derive(Debug)]
pub struct List {
    id: WidgetId,
    group: NodeId,
    title: Option<Title>,
    body: Background,
    items: Vec<ListItem>,
    separators: Vec<Separator>,
    events: Emitter<ListEvent>,
}

impl List {
    /// Lay out a list on top of `parent`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &ListAttr) -> Result<Self> {
        let group = ctx.scene.insert(parent, LocalNode::group(NodeKind::List));
        let title = attr
            .title_style
            .as_ref()
            .map(|style| Title::new(ctx, Some(group), style));
        let body = Background::new(ctx, Some(group), &attr.body.clone().at(attr.position));

        let pos = attr.position;
        let sub = attr.sub_item_indents;
        let mut sum = attr.indents.top;
        let mut items = Vec::with_capacity(attr.items.len());
        let mut separators = Vec::new();

        for (n, spec) in attr.items.iter().enumerate() {
            if let Some(sep) = attr.separators.iter().find(|s| s.order == n) {
                let mut line = sep.value.clone();
                line.start.y = sum + sub.separator + pos.y;
                line.start.x += pos.x;
                if let Some(end) = &mut line.end {
                    end.y = line.start.y;
                    end.x += pos.x;
                }
                separators.push(Separator::new(ctx, Some(group), &line));
                sum += sub.separator * 2.0;
            }

            let mut label = attr.items_style.clone();
            label.title.value.clone_from(&spec.value);
            label.position = Some(Point::new(attr.indents.left + pos.x, sum + pos.y));
            let supp_indent = match spec.kind {
                ItemKind::Shortcut => sub.item_shortcut,
                ItemKind::Icon | ItemKind::Group => sub.item_icon,
                ItemKind::General => 0.0,
            };
            let item_attr = ListItemAttr {
                label,
                kind: spec.kind,
                width: attr.item_width,
                supp_indent,
                icon: spec.icon.clone(),
                shortcut: spec.shortcut.clone(),
                behavior: attr.items_behavior.clone(),
                condition: spec.condition,
                state: spec.state,
            };
            let item = match (&spec.list, spec.kind) {
                (Some(nested), ItemKind::Group) => {
                    ListItem::grouped(ctx, Some(group), &item_attr, nested)?
                }
                _ => ListItem::new(ctx, Some(group), &item_attr)?,
            };

            let indents = item.label().indents();
            sum += item.label().title().bbox(&ctx.scene).height()
                + indents.top
                + indents.bottom
                + sub.item;
            items.push(item);
        }

        if attr.auto_height {
            ctx.scene
                .set_height(body.node(), attr.indents.bottom + sum);
        }
        tracing::trace!(
            target: "tds_widgets::list",
            items = items.len(),
            separators = separators.len(),
            height = attr.indents.bottom + sum,
            "list laid out"
        );

        Ok(Self {
            id: ctx.next_id(),
            group,
            title,
            body,
            items,
            separators,
            events: Emitter::new(),
        })
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The list group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Optional caption.
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Body rectangle.
    pub fn body(&self) -> &Background {
        &self.body
    }

    /// Rows, top to bottom.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Mutable rows.
    pub fn items_mut(&mut self) -> &mut [ListItem] {
        &mut self.items
    }

    /// Row at `index`.
    pub fn item(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    /// Mutable row at `index`.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut ListItem> {
        self.items.get_mut(index)
    }

    /// Separators in creation order.
    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    /// Index of the row whose group is `node` or contains it.
    pub fn index_of(&self, tree: &Tree, node: NodeId) -> Option<usize> {
        self.items
            .iter()
            .position(|i| tree.is_ancestor_or_self(i.group(), node))
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<ListEvent> {
        &mut self.events
    }

    /// Press on row `index`; fires `tds-list-mousedown` unless the row is inactive.
    pub fn mouse_down(&mut self, tree: &mut Tree, index: usize) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        if !item.mouse_down(tree) {
            return false;
        }
        let node = item.group();
        self.events.emit(ListEvent::MouseDown { index, item: node });
        true
    }

    /// Bounding box of the visible parts.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        tree.bbox(self.group).unwrap_or(Rect::ZERO)
    }

    /// Move the list so its bounding box starts at `p`.
    pub fn move_to(&self, tree: &mut Tree, p: Point) {
        tree.move_to(self.group, p);
    }

    /// Show the list.
    pub fn show(&self, tree: &mut Tree) {
        tree.show(self.group);
    }

    /// Hide the list.
    pub fn hide(&self, tree: &mut Tree) {
        tree.hide(self.group);
    }

    /// Whether the list group is visible.
    pub fn is_visible(&self, tree: &Tree) -> bool {
        tree.is_visible(self.group)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn three_with_separator() -> ListAttr {
        ListAttr {
            position: Point::new(10.0, 20.0),
            items: vec![
                ListItemSpec::general("One"),
                ListItemSpec::general("Two"),
                ListItemSpec::general("Three"),
            ],
            separators: vec![SeparatorSpec {
                order: 1,
                value: SeparatorAttr {
                    start: Point::new(4.0, 0.0),
                    length: 112.0,
                    ..SeparatorAttr::default()
                },
            }],
            ..ListAttr::default()
        }
    }

    #[test]
    fn auto_height_follows_layout_formula() {
        let mut ctx = Context::new();
        let attr = three_with_separator();
        let list = List::new(&mut ctx, None, &attr).unwrap();
        let row = 14.4 + 3.0 + 3.0;
        let expected = 4.0 + 3.0 * row + 2.0 * 4.0 + 4.0;
        let body = list.body().bbox(&ctx.scene);
        assert!(
            (body.height() - expected).abs() < 1e-9,
            "body {} expected {expected}",
            body.height()
        );
        assert_eq!(body.origin(), Point::new(10.0, 20.0));
    }

    #[test]
    fn rows_and_separator_positions() {
        let mut ctx = Context::new();
        let list = List::new(&mut ctx, None, &three_with_separator()).unwrap();
        let row = 14.4 + 6.0;
        let first = list.item(0).unwrap().background_bbox(&ctx.scene);
        assert!((first.x0 - 14.0).abs() < 1e-9);
        assert!((first.y0 - 24.0).abs() < 1e-9);

        let sep = list.separators()[0].node();
        let line = ctx.scene.bbox(sep).unwrap();
        assert!((line.y0 - (20.0 + 4.0 + row + 4.0)).abs() < 1e-9);
        assert!((line.x0 - 14.0).abs() < 1e-9);

        let second = list.item(1).unwrap().background_bbox(&ctx.scene);
        assert!((second.y0 - (20.0 + 4.0 + row + 8.0)).abs() < 1e-9);
        assert_eq!(list.item(2).unwrap().value(&ctx.scene), "Three");
    }

    #[test]
    fn mouse_down_reports_index() {
        let mut ctx = Context::new();
        let mut attr = three_with_separator();
        attr.items[2].state = ItemState::Inactive;
        let mut list = List::new(&mut ctx, None, &attr).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        list.events_mut().connect(move |e| {
            let ListEvent::MouseDown { index, .. } = e;
            s.borrow_mut().push(*index);
        });
        assert!(list.mouse_down(&mut ctx.scene, 1));
        assert!(!list.mouse_down(&mut ctx.scene, 2), "inactive row");
        assert!(!list.mouse_down(&mut ctx.scene, 7));
        assert_eq!(*seen.borrow(), vec![1]);

        let title = list.item(1).unwrap().label().title().node();
        assert_eq!(list.index_of(&ctx.scene, title), Some(1));
    }
}
