// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text with an optional backing rectangle aligned by rules.

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use tds_scene::{LocalNode, NodeId, NodeKind, Tree};

use crate::background::Background;
use crate::context::{Context, WidgetId};
use crate::style::{BackgroundStyle, Indents, TitleStyle};
use crate::title::Title;

/// How the background is aligned to the title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackgroundRule {
    /// The label has no background.
    None,
    /// Coordinates are taken from the attributes as given.
    Direct,
    /// The background wraps the title with static indents.
    Indent,
    /// The background is centered on the title.
    Centered,
}

/// Attributes of a label.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelAttr {
    /// Text.
    pub title: TitleStyle,
    /// Alignment rules applied in order.
    pub background_rule: Vec<BackgroundRule>,
    /// Backing rectangle; ignored when the rules contain [`BackgroundRule::None`].
    pub background: Option<BackgroundStyle>,
    /// Indents used by [`BackgroundRule::Indent`].
    pub indents: Indents,
    /// Top-left corner of the whole label.
    pub position: Option<Point>,
}

impl Default for LabelAttr {
    fn default() -> Self {
        Self {
            title: TitleStyle::default(),
            background_rule: vec![BackgroundRule::None],
            background: None,
            indents: Indents::default(),
            position: None,
        }
    }
}

/// A title over an optional background, grouped.
#[derive(Clone, Debug)]
pub struct Label {
    id: WidgetId,
    group: NodeId,
    title: Title,
    background: Option<Background>,
    rules: SmallVec<[BackgroundRule; 2]>,
    indents: Indents,
}

impl Label {
    /// Build a label group on top of `parent`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &LabelAttr) -> Self {
        Self::with_kind(ctx, parent, attr, NodeKind::Label)
    }

    /// Like [`Label::new`] with a custom role tag on the group.
    pub fn with_kind(
        ctx: &mut Context,
        parent: Option<NodeId>,
        attr: &LabelAttr,
        kind: NodeKind,
    ) -> Self {
        let group = ctx.scene.insert(parent, LocalNode::group(kind));
        let rules: SmallVec<[BackgroundRule; 2]> = if attr.background_rule.is_empty() {
            SmallVec::from_slice(&[BackgroundRule::None])
        } else {
            SmallVec::from_slice(&attr.background_rule)
        };

        let background = match &attr.background {
            Some(style) if !rules.contains(&BackgroundRule::None) => {
                Some(Background::new(ctx, Some(group), style))
            }
            _ => None,
        };
        let title = Title::new(ctx, Some(group), &attr.title);

        let label = Self {
            id: ctx.next_id(),
            group,
            title,
            background,
            rules,
            indents: attr.indents,
        };
        label.align(&mut ctx.scene);
        if let Some(p) = attr.position {
            label.move_to(&mut ctx.scene, p);
        }
        label
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The label group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// The title.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// The background, if the label has one.
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// The current alignment rules.
    pub fn rules(&self) -> &[BackgroundRule] {
        &self.rules
    }

    /// The current indents.
    pub fn indents(&self) -> Indents {
        self.indents
    }

    /// Current string of the title.
    pub fn value<'a>(&self, tree: &'a Tree) -> &'a str {
        self.title.value(tree)
    }

    /// Replace the title string and realign the background.
    pub fn set_value(&mut self, tree: &mut Tree, value: &str) {
        self.title.set_value(tree, value);
        self.align(tree);
    }

    /// Store new rules and indents and realign the background.
    pub fn apply_rules(&mut self, tree: &mut Tree, rules: &[BackgroundRule], indents: Indents) {
        self.rules = SmallVec::from_slice(rules);
        self.indents = indents;
        self.align(tree);
    }

    fn align(&self, tree: &mut Tree) {
        let Some(bg) = &self.background else {
            return;
        };
        for rule in &self.rules {
            match rule {
                BackgroundRule::Centered => {
                    let c = self.title.bbox(tree).center();
                    tree.set_center(bg.node(), c);
                }
                BackgroundRule::Indent => {
                    let tb = self.title.bbox(tree);
                    let i = self.indents;
                    tree.set_size(
                        bg.node(),
                        Size::new(tb.width() + i.left + i.right, tb.height() + i.top + i.bottom),
                    );
                    tree.move_to(bg.node(), Point::new(tb.x0 - i.left, tb.y0 - i.top));
                }
                BackgroundRule::None | BackgroundRule::Direct => {}
            }
        }
    }

    /// Bounding box of the whole label.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        tree.bbox(self.group).unwrap_or(Rect::ZERO)
    }

    /// Bounding box of the background, or of the title without one.
    pub fn body_bbox(&self, tree: &Tree) -> Rect {
        match &self.background {
            Some(bg) => bg.bbox(tree),
            None => self.title.bbox(tree),
        }
    }

    /// Move the label so its bounding box starts at `p`.
    pub fn move_to(&self, tree: &mut Tree, p: Point) {
        tree.move_to(self.group, p);
    }

    /// Shift the label.
    pub fn translate(&self, tree: &mut Tree, delta: Vec2) {
        tree.translate(self.group, delta);
    }

    /// Center the label horizontally on `cx`.
    pub fn set_cx(&self, tree: &mut Tree, cx: f64) {
        tree.set_cx(self.group, cx);
    }

    /// Center the label vertically on `cy`.
    pub fn set_cy(&self, tree: &mut Tree, cy: f64) {
        tree.set_cy(self.group, cy);
    }

    /// Show the label.
    pub fn show(&self, tree: &mut Tree) {
        tree.show(self.group);
    }

    /// Hide the label.
    pub fn hide(&self, tree: &mut Tree) {
        tree.hide(self.group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(rules: Vec<BackgroundRule>) -> LabelAttr {
        LabelAttr {
            title: TitleStyle::with_value("abcd").at(Point::new(10.0, 10.0)),
            background_rule: rules,
            background: Some(BackgroundStyle::sized(5.0, 5.0)),
            indents: Indents::new(4.0, 2.0, 4.0, 2.0),
            position: None,
        }
    }

    #[test]
    fn indent_rule_wraps_title() {
        let mut ctx = Context::new();
        let l = Label::new(&mut ctx, None, &attr(vec![BackgroundRule::Indent]));
        let tb = l.title().bbox(&ctx.scene);
        let bb = l.background().unwrap().bbox(&ctx.scene);
        assert!((bb.x0 - (tb.x0 - 4.0)).abs() < 1e-9);
        assert!((bb.y0 - (tb.y0 - 2.0)).abs() < 1e-9);
        assert!((bb.width() - (tb.width() + 8.0)).abs() < 1e-9);
        assert!((bb.height() - (tb.height() + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn centered_rule_keeps_size() {
        let mut ctx = Context::new();
        let l = Label::new(&mut ctx, None, &attr(vec![BackgroundRule::Centered]));
        let tb = l.title().bbox(&ctx.scene);
        let bb = l.background().unwrap().bbox(&ctx.scene);
        assert_eq!(bb.size(), Size::new(5.0, 5.0));
        assert!((bb.center() - tb.center()).hypot() < 1e-9);
    }

    #[test]
    fn none_rule_drops_background() {
        let mut ctx = Context::new();
        let l = Label::new(&mut ctx, None, &attr(vec![BackgroundRule::None]));
        assert!(l.background().is_none());
        assert_eq!(ctx.scene.children_of(l.group()).len(), 1);
    }

    #[test]
    fn set_value_realigns_and_position_moves_group() {
        let mut ctx = Context::new();
        let mut a = attr(vec![BackgroundRule::Indent]);
        a.position = Some(Point::new(100.0, 50.0));
        let mut l = Label::new(&mut ctx, None, &a);
        assert_eq!(l.bbox(&ctx.scene).origin(), Point::new(100.0, 50.0));
        let w = l.body_bbox(&ctx.scene).width();
        l.set_value(&mut ctx.scene, "abcdefgh");
        assert!((l.body_bbox(&ctx.scene).width() - (w + 4.0 * 7.2)).abs() < 1e-9);
        assert_eq!(l.value(&ctx.scene), "abcdefgh");
    }
}
