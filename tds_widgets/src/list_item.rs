// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior-driven list rows.
//!
//! A row is a label (background + title) with an optional supplementary item
//! on its right (an icon path or a shortcut title) and a transparent
//! foreground rectangle on top that receives pointer events. Styling is looked
//! up per [`ItemPart`] and [`Condition`] in an [`ItemPartsBehavior`] table;
//! entries missing from a custom table fall back to the built-in defaults.

use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect, Vec2};
use tds_scene::{Fill, LocalNode, NodeId, NodeKind, Shape, Stroke, Style, Tree};

use crate::context::{Context, WidgetId};
use crate::error::{Error, Result};
use crate::label::{Label, LabelAttr};
use crate::list::{List, ListAttr};
use crate::style::TitleStyle;
use crate::title::Title;

/// Default gap between the supplementary item and the right edge of the row.
pub const SUPP_INDENT: f64 = 15.0;

/// Offset of a nested list above its parent row.
const SUB_LIST_LIFT: f64 = 5.0;

/// What the row shows to the right of its title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Title only.
    #[default]
    General,
    /// Title and an icon path.
    Icon,
    /// Title and a secondary shortcut title.
    Shortcut,
    /// Title, optional icon, and a nested list shown on hover.
    Group,
}

/// Transient interaction state of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// Idle.
    #[default]
    Normal,
    /// Pointer over the row.
    MouseEnter,
    /// Pointer pressed on the row.
    OnClick,
    /// Displayed as disabled.
    Inactive,
    /// Marked as current, e.g. the selected entry of a combobox.
    Highlight,
}

/// Persistent availability of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemState {
    /// Reacts to the pointer.
    #[default]
    Active,
    /// Ignores hover and click.
    Inactive,
}

/// Styled part of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemPart {
    /// Backing rectangle.
    Background,
    /// Main title.
    Title,
    /// Icon or shortcut.
    SuppItem,
}

/// Paint applied to a part; `None` leaves the current paint in place.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartStyle {
    /// Fill paint.
    pub fill: Option<Fill>,
    /// Stroke paint.
    pub stroke: Option<Stroke>,
}

impl PartStyle {
    fn fill(color: &str) -> Self {
        Self {
            fill: Some(Fill::color(color)),
            stroke: None,
        }
    }

    fn boxed(fill: &str, stroke: &str) -> Self {
        Self {
            fill: Some(Fill::color(fill)),
            stroke: Some(Stroke::color(stroke).with_width(1.0)),
        }
    }
}

/// Style lookup table keyed by part and condition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPartsBehavior {
    entries: HashMap<(ItemPart, Condition), PartStyle>,
}

impl ItemPartsBehavior {
    /// An empty table; every lookup falls back to [`ItemPartsBehavior::builtin`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let mut t = Self::new();
        for part in ALL_PARTS {
            for condition in ALL_CONDITIONS {
                t.insert(part, condition, builtin_entry(part, condition));
            }
        }
        t
    }

    /// Set the style of one part under one condition.
    pub fn insert(&mut self, part: ItemPart, condition: Condition, style: PartStyle) {
        self.entries.insert((part, condition), style);
    }

    /// Builder form of [`ItemPartsBehavior::insert`].
    pub fn with(mut self, part: ItemPart, condition: Condition, style: PartStyle) -> Self {
        self.insert(part, condition, style);
        self
    }

    /// The entry stored in this table, without fallback.
    pub fn get(&self, part: ItemPart, condition: Condition) -> Option<&PartStyle> {
        self.entries.get(&(part, condition))
    }

    /// The entry for `part` and `condition`, falling back to the built-in table.
    pub fn resolve(&self, part: ItemPart, condition: Condition) -> PartStyle {
        self.get(part, condition)
            .cloned()
            .unwrap_or_else(|| builtin_entry(part, condition))
    }
}

const ALL_PARTS: [ItemPart; 3] = [ItemPart::Background, ItemPart::Title, ItemPart::SuppItem];

const ALL_CONDITIONS: [Condition; 5] = [
    Condition::Normal,
    Condition::MouseEnter,
    Condition::OnClick,
    Condition::Inactive,
    Condition::Highlight,
];

/// One entry of the built-in table.
fn builtin_entry(part: ItemPart, condition: Condition) -> PartStyle {
    match (part, condition) {
        (ItemPart::Background, Condition::Normal | Condition::Inactive) => {
            PartStyle::boxed("#FFFFFF", "#FFFFFF")
        }
        (ItemPart::Background, Condition::MouseEnter) => PartStyle::boxed("#F1F1F1", "#F1F1F1"),
        (ItemPart::Background, Condition::OnClick) => PartStyle::boxed("#D0D0D0", "#D0D0D0"),
        (ItemPart::Background, Condition::Highlight) => PartStyle::boxed("#E6E6E6", "#999999"),
        (ItemPart::Title, Condition::Inactive) => PartStyle::fill("#999999"),
        (ItemPart::Title, _) => PartStyle::fill("#000000"),
        (ItemPart::SuppItem, Condition::Inactive) => PartStyle::fill("#BBBBBB"),
        (ItemPart::SuppItem, _) => PartStyle::fill("#555555"),
    }
}

/// Icon drawn as an SVG path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconStyle {
    /// SVG path data.
    pub d: String,
    /// Fill paint.
    pub fill: Fill,
    /// Stroke paint.
    pub stroke: Stroke,
}

/// Attributes of a single row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItemAttr {
    /// Title, background and their alignment.
    pub label: LabelAttr,
    /// What is shown next to the title.
    pub kind: ItemKind,
    /// Width of the row background.
    pub width: f64,
    /// Gap between the supplementary item and the right edge.
    pub supp_indent: f64,
    /// Icon for [`ItemKind::Icon`] and [`ItemKind::Group`].
    pub icon: Option<IconStyle>,
    /// Shortcut title for [`ItemKind::Shortcut`].
    pub shortcut: Option<TitleStyle>,
    /// Custom style table.
    pub behavior: Option<ItemPartsBehavior>,
    /// Initial condition.
    pub condition: Condition,
    /// Initial state.
    pub state: ItemState,
}

impl Default for ListItemAttr {
    fn default() -> Self {
        Self {
            label: LabelAttr::default(),
            kind: ItemKind::General,
            width: 100.0,
            supp_indent: SUPP_INDENT,
            icon: None,
            shortcut: None,
            behavior: None,
            condition: Condition::Normal,
            state: ItemState::Active,
        }
    }
}

/// A list row.
#[derive(Debug)]
pub struct ListItem {
    label: Label,
    kind: ItemKind,
    foreground: NodeId,
    supp_item: Option<NodeId>,
    behavior: ItemPartsBehavior,
    condition: Condition,
    state: ItemState,
    sub_list: Option<Box<List>>,
}

impl ListItem {
    /// Build a row on top of `parent`.
    ///
    /// Fails when an icon path cannot be parsed or the kind requires a
    /// supplementary item that is missing.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &ListItemAttr) -> Result<Self> {
        let label = Label::with_kind(ctx, parent, &attr.label, NodeKind::ListItem);
        let group = label.group();
        let origin = label.bbox(&ctx.scene).origin();

        let supp_item = match attr.kind {
            ItemKind::General => None,
            ItemKind::Icon => {
                let icon = attr
                    .icon
                    .as_ref()
                    .ok_or_else(|| Error::configuration("icon", "icon rows need an icon"))?;
                Some(insert_icon(ctx, group, icon)?)
            }
            ItemKind::Group => match &attr.icon {
                Some(icon) => Some(insert_icon(ctx, group, icon)?),
                None => None,
            },
            ItemKind::Shortcut => {
                let style = attr.shortcut.as_ref().ok_or_else(|| {
                    Error::configuration("shortcut", "shortcut rows need a shortcut title")
                })?;
                Some(Title::new(ctx, Some(group), style).node())
            }
        };
        if let Some(supp) = supp_item {
            let w = ctx.scene.bbox(supp).map_or(0.0, |b| b.width());
            ctx.scene.move_to(
                supp,
                Point::new(
                    origin.x + attr.width - w - attr.supp_indent,
                    origin.y + attr.label.indents.top,
                ),
            );
        }

        if let Some(bg) = label.background() {
            ctx.scene.set_width(bg.node(), attr.width);
        }

        let cover = label.body_bbox(&ctx.scene);
        let foreground = ctx.scene.insert(
            Some(group),
            LocalNode::shape(
                NodeKind::Foreground,
                Shape::Rect {
                    rect: cover,
                    radius: 0.0,
                },
            )
            .with_style(Style {
                fill: Some(Fill::color("#FFFFFF").with_opacity(0.0)),
                stroke: None,
            }),
        );

        let item = Self {
            label,
            kind: attr.kind,
            foreground,
            supp_item,
            behavior: attr.behavior.clone().unwrap_or_default(),
            condition: attr.condition,
            state: attr.state,
            sub_list: None,
        };
        item.apply_behavior(&mut ctx.scene);
        Ok(item)
    }

    /// Build a [`ItemKind::Group`] row that owns a nested list shown on hover.
    pub fn grouped(
        ctx: &mut Context,
        parent: Option<NodeId>,
        attr: &ListItemAttr,
        list: &ListAttr,
    ) -> Result<Self> {
        let attr = ListItemAttr {
            kind: ItemKind::Group,
            ..attr.clone()
        };
        let mut item = Self::new(ctx, parent, &attr)?;
        let sub = List::new(ctx, Some(item.group()), list)?;
        sub.hide(&mut ctx.scene);
        item.sub_list = Some(Box::new(sub));
        Ok(item)
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.label.id()
    }

    /// The row group.
    pub fn group(&self) -> NodeId {
        self.label.group()
    }

    /// The underlying label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Row kind.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The transparent pointer target on top of the row.
    pub fn foreground(&self) -> NodeId {
        self.foreground
    }

    /// The icon or shortcut node.
    pub fn supp_item(&self) -> Option<NodeId> {
        self.supp_item
    }

    /// The nested list of a [`ItemKind::Group`] row.
    pub fn sub_list(&self) -> Option<&List> {
        self.sub_list.as_deref()
    }

    /// Mutable access to the nested list.
    pub fn sub_list_mut(&mut self) -> Option<&mut List> {
        self.sub_list.as_deref_mut()
    }

    /// Current condition.
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Current state.
    pub fn state(&self) -> ItemState {
        self.state
    }

    /// Title string.
    pub fn value<'a>(&self, tree: &'a Tree) -> &'a str {
        self.label.value(tree)
    }

    /// Box of the row background.
    pub fn background_bbox(&self, tree: &Tree) -> Rect {
        self.label.body_bbox(tree)
    }

    /// Set the condition and restyle. Programmatic changes are stored even for
    /// inactive rows; they take effect once the row is active again.
    pub fn set_condition(&mut self, tree: &mut Tree, condition: Condition) {
        self.condition = condition;
        self.apply_behavior(tree);
    }

    /// Set the state and restyle.
    pub fn set_state(&mut self, tree: &mut Tree, state: ItemState) {
        self.state = state;
        self.apply_behavior(tree);
    }

    /// The condition used for styling: inactive rows always look inactive.
    pub fn effective_condition(&self) -> Condition {
        match self.state {
            ItemState::Inactive => Condition::Inactive,
            ItemState::Active => self.condition,
        }
    }

    /// Restyle every part from the behavior table.
    pub fn apply_behavior(&self, tree: &mut Tree) {
        let condition = self.effective_condition();
        let parts = [
            (ItemPart::Background, self.label.background().map(|b| b.node())),
            (ItemPart::Title, Some(self.label.title().node())),
            (ItemPart::SuppItem, self.supp_item),
        ];
        for (part, node) in parts {
            let Some(node) = node else { continue };
            let style = self.behavior.resolve(part, condition);
            if let Some(fill) = style.fill {
                tree.set_fill(node, fill);
            }
            if let Some(stroke) = style.stroke {
                tree.set_stroke(node, stroke);
            }
        }
    }

    /// Pointer entered the row.
    pub fn mouse_enter(&mut self, tree: &mut Tree) {
        if self.state == ItemState::Inactive {
            return;
        }
        let bbox = self.label.bbox(tree);
        if let Some(sub) = &self.sub_list {
            self.condition = Condition::Highlight;
            sub.show(tree);
            sub.move_to(tree, Point::new(bbox.x1, bbox.y0 - SUB_LIST_LIFT));
        } else {
            self.condition = Condition::MouseEnter;
        }
        self.apply_behavior(tree);
    }

    /// Pointer left the row.
    pub fn mouse_leave(&mut self, tree: &mut Tree) {
        if self.state == ItemState::Inactive {
            return;
        }
        self.condition = Condition::Normal;
        self.apply_behavior(tree);
        if let Some(sub) = &self.sub_list {
            sub.hide(tree);
        }
    }

    /// Pointer pressed on the row. Returns `false` for inactive rows.
    pub fn mouse_down(&mut self, tree: &mut Tree) -> bool {
        if self.state == ItemState::Inactive {
            return false;
        }
        self.condition = Condition::OnClick;
        self.apply_behavior(tree);
        true
    }

    /// Shift the whole row.
    pub fn dmove(&self, tree: &mut Tree, delta: Vec2) {
        self.label.translate(tree, delta);
    }

    /// Move the row so its background starts at `p`.
    pub fn move_background_to(&self, tree: &mut Tree, p: Point) {
        let at = self.background_bbox(tree).origin();
        self.dmove(tree, p - at);
    }
}

fn insert_icon(ctx: &mut Context, parent: NodeId, icon: &IconStyle) -> Result<NodeId> {
    let path =
        BezPath::from_svg(&icon.d).map_err(|e| Error::configuration("icon", e.to_string()))?;
    let local = LocalNode::shape(NodeKind::Plain, Shape::Path(path)).with_style(Style {
        fill: Some(icon.fill.clone()),
        stroke: Some(icon.stroke.clone()),
    });
    Ok(ctx.scene.insert(Some(parent), local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::BackgroundRule;
    use crate::style::{BackgroundStyle, Indents};

    fn attr(kind: ItemKind) -> ListItemAttr {
        ListItemAttr {
            label: LabelAttr {
                title: TitleStyle::with_value("Open"),
                background_rule: vec![BackgroundRule::Indent],
                background: Some(BackgroundStyle::sized(10.0, 10.0)),
                indents: Indents::new(6.0, 3.0, 6.0, 3.0),
                position: Some(Point::new(20.0, 40.0)),
            },
            kind,
            width: 120.0,
            ..ListItemAttr::default()
        }
    }

    fn bg_fill(ctx: &Context, item: &ListItem) -> String {
        let node = item.label().background().unwrap().node();
        ctx.scene.style(node).unwrap().fill.clone().unwrap().color
    }

    #[test]
    fn background_takes_item_width_and_foreground_covers_it() {
        let mut ctx = Context::new();
        let item = ListItem::new(&mut ctx, None, &attr(ItemKind::General)).unwrap();
        let bg = item.background_bbox(&ctx.scene);
        assert_eq!(bg.origin(), Point::new(20.0, 40.0));
        assert_eq!(bg.width(), 120.0, "background stretched to the row width");
        assert_eq!(ctx.scene.bbox(item.foreground()), Some(bg));
        assert_eq!(
            ctx.scene.children_of(item.group()).last(),
            Some(&item.foreground()),
            "foreground is painted last"
        );
    }

    #[test]
    fn shortcut_sits_at_right_edge() {
        let mut ctx = Context::new();
        let mut a = attr(ItemKind::Shortcut);
        a.shortcut = Some(TitleStyle::with_value("^O"));
        let item = ListItem::new(&mut ctx, None, &a).unwrap();
        let sb = ctx.scene.bbox(item.supp_item().unwrap()).unwrap();
        assert!((sb.x1 - (20.0 + 120.0 - SUPP_INDENT)).abs() < 1e-9);
        assert!((sb.y0 - 43.0).abs() < 1e-9);
    }

    #[test]
    fn missing_or_bad_icon_is_rejected() {
        let mut ctx = Context::new();
        assert!(matches!(
            ListItem::new(&mut ctx, None, &attr(ItemKind::Icon)),
            Err(Error::Configuration { field: "icon", .. })
        ));
        let mut a = attr(ItemKind::Icon);
        a.icon = Some(IconStyle {
            d: "M 0 0 Q".into(),
            fill: Fill::default(),
            stroke: Stroke::default(),
        });
        assert!(ListItem::new(&mut ctx, None, &a).is_err(), "truncated path data");
        a.icon = Some(IconStyle {
            d: "M 0 0 L 6 0 L 6 6 Z".into(),
            fill: Fill::default(),
            stroke: Stroke::default(),
        });
        let item = ListItem::new(&mut ctx, None, &a).unwrap();
        let ib = ctx.scene.bbox(item.supp_item().unwrap()).unwrap();
        assert!((ib.x1 - (140.0 - SUPP_INDENT)).abs() < 1e-9);
    }

    #[test]
    fn conditions_restyle_and_inactive_suppresses_hover() {
        let mut ctx = Context::new();
        let mut item = ListItem::new(&mut ctx, None, &attr(ItemKind::General)).unwrap();
        assert_eq!(bg_fill(&ctx, &item), "#FFFFFF");
        item.mouse_enter(&mut ctx.scene);
        assert_eq!(item.condition(), Condition::MouseEnter);
        assert_eq!(bg_fill(&ctx, &item), "#F1F1F1");
        assert!(item.mouse_down(&mut ctx.scene));
        assert_eq!(bg_fill(&ctx, &item), "#D0D0D0");
        item.mouse_leave(&mut ctx.scene);
        assert_eq!(item.condition(), Condition::Normal);

        item.set_state(&mut ctx.scene, ItemState::Inactive);
        item.mouse_enter(&mut ctx.scene);
        assert_eq!(item.condition(), Condition::Normal, "hover ignored");
        assert!(!item.mouse_down(&mut ctx.scene));
        let title = ctx.scene.style(item.label().title().node()).unwrap();
        assert_eq!(title.fill.as_ref().unwrap().color, "#999999");
    }

    #[test]
    fn empty_table_resolves_every_builtin_entry() {
        let empty = ItemPartsBehavior::new();
        let builtin = ItemPartsBehavior::builtin();
        for part in ALL_PARTS {
            for condition in ALL_CONDITIONS {
                assert_eq!(
                    Some(&empty.resolve(part, condition)),
                    builtin.get(part, condition),
                    "{part:?} {condition:?}"
                );
            }
        }
        assert_eq!(
            empty.resolve(ItemPart::Background, Condition::Highlight).stroke,
            Some(Stroke::color("#999999").with_width(1.0))
        );
    }

    #[test]
    fn custom_table_falls_back_entry_by_entry() {
        let behavior = ItemPartsBehavior::new().with(
            ItemPart::Background,
            Condition::MouseEnter,
            PartStyle::fill("#FF0000"),
        );
        let mut ctx = Context::new();
        let mut a = attr(ItemKind::General);
        a.behavior = Some(behavior);
        let mut item = ListItem::new(&mut ctx, None, &a).unwrap();
        assert_eq!(bg_fill(&ctx, &item), "#FFFFFF", "normal comes from the built-in table");
        item.mouse_enter(&mut ctx.scene);
        assert_eq!(bg_fill(&ctx, &item), "#FF0000");
    }

    #[test]
    fn grouped_row_shows_nested_list_on_hover() {
        let mut ctx = Context::new();
        let mut sub = ListAttr::default();
        sub.items.push(crate::list::ListItemSpec::general("Nested"));
        let mut item =
            ListItem::grouped(&mut ctx, None, &attr(ItemKind::General), &sub).unwrap();
        let row = item.label().bbox(&ctx.scene);
        let list_group = item.sub_list().unwrap().group();
        assert!(!ctx.scene.is_visible(list_group));

        item.mouse_enter(&mut ctx.scene);
        assert_eq!(item.condition(), Condition::Highlight);
        let lb = ctx.scene.bbox(list_group).unwrap();
        assert!((lb.x0 - row.x1).abs() < 1e-9);
        assert!((lb.y0 - (row.y0 - SUB_LIST_LIFT)).abs() < 1e-9);

        item.mouse_leave(&mut ctx.scene);
        assert!(!ctx.scene.is_visible(list_group));
    }
}
