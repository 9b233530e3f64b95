// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, geometry updates, styling, queries.

use alloc::{boxed::Box, string::String, vec, vec::Vec};
use kurbo::{Line, Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::damage::Damage;
use crate::text::{FixedAdvance, TextMeasure};
use crate::types::{Fill, Font, LocalNode, NodeFlags, NodeId, NodeKind, Shape, Stroke, Style};
use crate::util::{leaf_bounds, shape_contains, translate_shape};

/// Retained scene tree.
///
/// A tree always has a root group (the drawing surface). Leaf shapes keep
/// their geometry in root coordinates, and groups derive their bounding box
/// from their visible children, so moving a group translates every
/// descendant leaf and reparenting never changes where a node is drawn.
///
/// Mutations apply immediately and record coarse damage that the host
/// drains with [`Tree::take_damage`] before repainting.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use tds_scene::{LocalNode, NodeKind, Shape, Tree};
///
/// let mut tree = Tree::new();
/// let group = tree.insert(None, LocalNode::group(NodeKind::Label));
/// tree.insert(
///     Some(group),
///     LocalNode::shape(
///         NodeKind::Background,
///         Shape::Rect { rect: Rect::new(0.0, 0.0, 40.0, 20.0), radius: 4.0 },
///     ),
/// );
///
/// tree.move_to(group, Point::new(10.0, 10.0));
/// assert_eq!(tree.bbox(group), Some(Rect::new(10.0, 10.0, 50.0, 30.0)));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    measure: Box<dyn TextMeasure>,
    damage: Damage,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root", &self.root)
            .field("measure", &self.measure)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
#[derive(Clone, Copy, Debug)]
pub struct QueryFilter {
    /// Bitfield of required node flags. Only nodes containing all these flags will be included.
    pub required_flags: NodeFlags,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            required_flags: NodeFlags::empty(),
        }
    }
}

impl QueryFilter {
    /// Create a new empty filter (includes all nodes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter to only visible nodes.
    pub fn visible(mut self) -> Self {
        self.required_flags |= NodeFlags::VISIBLE;
        self
    }

    /// Filter to only pickable nodes.
    pub fn pickable(mut self) -> Self {
        self.required_flags |= NodeFlags::PICKABLE;
        self
    }

    /// Filter to only draggable nodes.
    pub fn draggable(mut self) -> Self {
        self.required_flags |= NodeFlags::DRAGGABLE;
        self
    }

    /// Check if a node's flags satisfy this filter.
    pub fn matches(&self, node_flags: NodeFlags) -> bool {
        node_flags.contains(self.required_flags)
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: SmallVec::new(),
            local,
        }
    }
}

impl Tree {
    /// Create a new tree measuring text with [`FixedAdvance`].
    pub fn new() -> Self {
        Self::with_measure(Box::new(FixedAdvance::default()))
    }

    /// Create a new tree with a host-provided text measurer.
    pub fn with_measure(measure: Box<dyn TextMeasure>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            measure,
            damage: Damage::default(),
        };
        tree.root = tree.alloc(LocalNode::default());
        tree
    }

    /// The root group (drawing surface).
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The text measurer used for text bounds.
    pub fn measure(&self) -> &dyn TextMeasure {
        &*self.measure
    }

    /// Measure `text` with `font` without inserting a node.
    pub fn measure_text(&self, text: &str, font: &Font) -> Size {
        self.measure.measure(text, font)
    }

    fn alloc(&mut self, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Insert a new node on top of `parent`'s children (or of the root if `None`
    /// or stale).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let parent = parent
            .filter(|p| self.is_alive(*p))
            .unwrap_or(self.root);
        let id = self.alloc(local);
        self.link_parent(id, parent);
        if let Some(b) = self.bbox(id) {
            self.damage.push(b);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        if let Some(b) = self.bbox(id) {
            self.damage.push(b);
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` on top of `new_parent`'s children.
    ///
    /// Geometry is kept, so the node is drawn where it was. Returns `false`
    /// (and does nothing) for stale ids, the root, or when `new_parent` lies
    /// inside the subtree of `id`.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> bool {
        if !self.is_alive(id) || !self.is_alive(new_parent) || id == self.root {
            return false;
        }
        if self.is_ancestor_or_self(id, new_parent) {
            return false;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.link_parent(id, new_parent);
        true
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent_of(c);
        }
        false
    }

    // --- geometry ---

    /// Root-space bounding box of a live node.
    ///
    /// Groups report the union of their visible children; a group without
    /// visible children has no box.
    pub fn bbox(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        if node.local.shape.is_group() {
            node.children
                .iter()
                .filter(|c| self.is_visible(**c))
                .filter_map(|c| self.bbox(*c))
                .reduce(|acc, r| acc.union(r))
        } else {
            leaf_bounds(&node.local.shape, &*self.measure)
        }
    }

    /// Shift a node and all its descendants by `delta`.
    pub fn translate(&mut self, id: NodeId, delta: Vec2) {
        if !self.is_alive(id) || delta == Vec2::ZERO {
            return;
        }
        let before = self.bbox(id);
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let node = self.node_mut(n);
            translate_shape(&mut node.local.shape, delta);
            stack.extend(node.children.iter().copied());
        }
        self.push_damage(before, id);
    }

    /// Move a node so that the top-left corner of its bounding box lands on `p`.
    pub fn move_to(&mut self, id: NodeId, p: Point) {
        if let Some(b) = self.bbox(id) {
            self.translate(id, p - b.origin());
        }
    }

    /// Move a node so that the center of its bounding box lands on `c`.
    pub fn set_center(&mut self, id: NodeId, c: Point) {
        if let Some(b) = self.bbox(id) {
            self.translate(id, c - b.center());
        }
    }

    /// Move a node horizontally so that its center x is `cx`.
    pub fn set_cx(&mut self, id: NodeId, cx: f64) {
        if let Some(b) = self.bbox(id) {
            self.translate(id, Vec2::new(cx - b.center().x, 0.0));
        }
    }

    /// Move a node vertically so that its center y is `cy`.
    pub fn set_cy(&mut self, id: NodeId, cy: f64) {
        if let Some(b) = self.bbox(id) {
            self.translate(id, Vec2::new(0.0, cy - b.center().y));
        }
    }

    /// Set the horizontal position of the bounding box's left edge.
    pub fn set_x(&mut self, id: NodeId, x: f64) {
        if let Some(b) = self.bbox(id) {
            self.translate(id, Vec2::new(x - b.x0, 0.0));
        }
    }

    /// Set the vertical position of the bounding box's top edge.
    pub fn set_y(&mut self, id: NodeId, y: f64) {
        if let Some(b) = self.bbox(id) {
            self.translate(id, Vec2::new(0.0, y - b.y0));
        }
    }

    /// Resize a rectangle (keeping its top-left corner) or a circle (keeping its center).
    ///
    /// Other shapes are left untouched.
    pub fn set_width(&mut self, id: NodeId, width: f64) {
        let width = width.max(0.0);
        self.edit_shape(id, |shape| match shape {
            Shape::Rect { rect, .. } => rect.x1 = rect.x0 + width,
            Shape::Circle(c) => c.radius = width / 2.0,
            _ => {}
        });
    }

    /// Resize a rectangle (keeping its top-left corner) or a circle (keeping its center).
    pub fn set_height(&mut self, id: NodeId, height: f64) {
        let height = height.max(0.0);
        self.edit_shape(id, |shape| match shape {
            Shape::Rect { rect, .. } => rect.y1 = rect.y0 + height,
            Shape::Circle(c) => c.radius = height / 2.0,
            _ => {}
        });
    }

    /// Resize a rectangle keeping its top-left corner.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        self.set_width(id, size.width);
        self.set_height(id, size.height);
    }

    /// Set the corner radius of a rectangle or the radius of a circle.
    pub fn set_radius(&mut self, id: NodeId, radius: f64) {
        self.edit_shape(id, |shape| match shape {
            Shape::Rect { radius: r, .. } => *r = radius,
            Shape::Circle(c) => c.radius = radius,
            _ => {}
        });
    }

    /// Replace the segment of a line node.
    pub fn set_line(&mut self, id: NodeId, line: Line) {
        self.edit_shape(id, |shape| {
            if let Shape::Line(l) = shape {
                *l = line;
            }
        });
    }

    /// Replace the string of a text node; its origin is kept.
    pub fn set_text(&mut self, id: NodeId, value: &str) {
        self.edit_shape(id, |shape| {
            if let Shape::Text(t) = shape {
                t.value = String::from(value);
            }
        });
    }

    /// String of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node_opt(id)?.local.shape {
            Shape::Text(t) => Some(&t.value),
            _ => None,
        }
    }

    /// Replace the whole shape of a node.
    pub fn set_shape(&mut self, id: NodeId, shape: Shape) {
        self.edit_shape(id, |s| *s = shape);
    }

    /// The shape of a live node.
    pub fn shape(&self, id: NodeId) -> Option<&Shape> {
        self.node_opt(id).map(|n| &n.local.shape)
    }

    fn edit_shape(&mut self, id: NodeId, f: impl FnOnce(&mut Shape)) {
        if !self.is_alive(id) {
            return;
        }
        let before = self.bbox(id);
        f(&mut self.node_mut(id).local.shape);
        self.push_damage(before, id);
    }

    fn push_damage(&mut self, before: Option<Rect>, id: NodeId) {
        let after = self.bbox(id);
        if before != after {
            if let Some(b) = before {
                self.damage.push(b);
            }
            if let Some(a) = after {
                self.damage.push(a);
            }
        }
    }

    /// Drain the damage accumulated since the last call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    // --- styling ---

    /// Paint attributes of a live node.
    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.node_opt(id).map(|n| &n.local.style)
    }

    /// Replace the paint attributes.
    pub fn set_style(&mut self, id: NodeId, style: Style) {
        self.restyle(id, |s| *s = style);
    }

    /// Replace the fill.
    pub fn set_fill(&mut self, id: NodeId, fill: Fill) {
        self.restyle(id, |s| s.fill = Some(fill));
    }

    /// Replace the stroke.
    pub fn set_stroke(&mut self, id: NodeId, stroke: Stroke) {
        self.restyle(id, |s| s.stroke = Some(stroke));
    }

    fn restyle(&mut self, id: NodeId, f: impl FnOnce(&mut Style)) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        let before = node.local.style.clone();
        f(&mut node.local.style);
        if node.local.style != before
            && let Some(b) = self.bbox(id)
        {
            self.damage.push(b);
        }
    }

    // --- flags ---

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        let before = self.bbox(id);
        if let Some(n) = self.node_opt_mut(id)
            && n.local.flags != flags
        {
            let visibility_changed =
                (n.local.flags ^ flags).contains(NodeFlags::VISIBLE);
            n.local.flags = flags;
            if visibility_changed && let Some(b) = before {
                self.damage.push(b);
            }
        }
    }

    fn toggle_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) {
        if let Some(mut flags) = self.flags(id) {
            flags.set(flag, on);
            self.set_flags(id, flags);
        }
    }

    /// Make a node visible.
    pub fn show(&mut self, id: NodeId) {
        self.toggle_flag(id, NodeFlags::VISIBLE, true);
    }

    /// Hide a node; hidden nodes are skipped by painting, bounding boxes of
    /// their parents and hit testing.
    pub fn hide(&mut self, id: NodeId) {
        self.toggle_flag(id, NodeFlags::VISIBLE, false);
    }

    /// Whether the node's own visibility flag is set.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::VISIBLE))
    }

    /// Whether the node and all of its ancestors are visible.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if !self.is_visible(c) {
                return false;
            }
            current = self.parent_of(c);
        }
        true
    }

    /// Toggle whether the node receives pointer events.
    pub fn set_pickable(&mut self, id: NodeId, on: bool) {
        self.toggle_flag(id, NodeFlags::PICKABLE, on);
    }

    /// Toggle whether the host may start drag gestures on the node.
    pub fn set_draggable(&mut self, id: NodeId, on: bool) {
        self.toggle_flag(id, NodeFlags::DRAGGABLE, on);
    }

    /// Whether drag gestures are enabled for the node.
    pub fn is_draggable(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::DRAGGABLE))
    }

    // --- z-order ---

    /// Paint the node above all its siblings.
    pub fn front(&mut self, id: NodeId) {
        self.restack(id, |children, pos| {
            let c = children.remove(pos);
            children.push(c);
        });
    }

    /// Paint the node below all its siblings.
    pub fn back(&mut self, id: NodeId) {
        self.restack(id, |children, pos| {
            let c = children.remove(pos);
            children.insert(0, c);
        });
    }

    /// Swap the node with the sibling painted just above it.
    pub fn forward(&mut self, id: NodeId) {
        self.restack(id, |children, pos| {
            if pos + 1 < children.len() {
                children.swap(pos, pos + 1);
            }
        });
    }

    /// Swap the node with the sibling painted just below it.
    pub fn backward(&mut self, id: NodeId) {
        self.restack(id, |children, pos| {
            if pos > 0 {
                children.swap(pos - 1, pos);
            }
        });
    }

    fn restack(&mut self, id: NodeId, f: impl FnOnce(&mut SmallVec<[NodeId; 4]>, usize)) {
        let Some(parent) = self.parent_of(id) else {
            return;
        };
        let before = self.bbox(id);
        let children = &mut self.node_mut(parent).children;
        if let Some(pos) = children.iter().position(|c| *c == id) {
            f(children, pos);
            if let Some(b) = before {
                self.damage.push(b);
            }
        }
    }

    /// Position of the node among its siblings (0 is painted first).
    pub fn z_position(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent_of(id)?;
        self.node(parent).children.iter().position(|c| *c == id)
    }

    // --- queries ---

    /// Hit test a root-space point and return the topmost leaf containing it.
    ///
    /// Hidden subtrees are skipped. When the filter asks for pickable nodes,
    /// subtrees under a non-pickable node are skipped as well. Among
    /// candidates, the one painted last (later sibling, deeper node) wins.
    pub fn hit_test_point(&self, point: Point, filter: QueryFilter) -> Option<Hit> {
        fn walk(
            tree: &Tree,
            id: NodeId,
            point: Point,
            filter: QueryFilter,
            path: &mut Vec<NodeId>,
            best: &mut Option<Vec<NodeId>>,
        ) {
            let node = tree.node(id);
            if filter.required_flags.contains(NodeFlags::PICKABLE)
                && !node.local.flags.contains(NodeFlags::PICKABLE)
            {
                return;
            }
            path.push(id);
            if filter.matches(node.local.flags)
                && shape_contains(&node.local.shape, point, &*tree.measure)
            {
                *best = Some(path.clone());
            }
            for &child in &node.children {
                if tree.is_visible(child) {
                    walk(tree, child, point, filter, path, best);
                }
            }
            path.pop();
        }

        let mut best = None;
        let mut path = Vec::new();
        walk(self, self.root, point, filter, &mut path, &mut best);
        best.and_then(|path| {
            let node = *path.last()?;
            Some(Hit { node, path })
        })
    }

    /// Direct children of `container` whose bounding box contains `point`
    /// (edges included), bottom to top in paint order.
    ///
    /// Hidden children and `exclude` are skipped; the last element, if any,
    /// is the topmost one.
    pub fn stack_at_point(
        &self,
        container: NodeId,
        point: Point,
        exclude: Option<NodeId>,
    ) -> Vec<NodeId> {
        self.children_of(container)
            .iter()
            .copied()
            .filter(|c| Some(*c) != exclude && self.is_visible(*c))
            .filter(|c| {
                self.bbox(*c).is_some_and(|b| {
                    point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
                })
            })
            .collect()
    }

    // --- structure ---

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Role tag of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.local.kind)
    }

    /// Returns the parent of a node if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in paint order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Children of `id` carrying the given role tag, in paint order.
    pub fn children_of_kind(&self, id: NodeId, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.children_of(id)
            .iter()
            .copied()
            .filter(move |c| self.kind(*c) == Some(kind))
    }

    /// First child of `id` carrying the given role tag.
    pub fn first_child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children_of_kind(id, kind).next()
    }

    /// Nearest strict ancestor of `id` carrying the given role tag.
    pub fn ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.parent_of(id);
        while let Some(c) = current {
            if self.kind(c) == Some(kind) {
                return Some(c);
            }
            current = self.parent_of(c);
        }
        None
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextShape;
    use kurbo::Circle;

    fn rect_node(r: Rect) -> LocalNode {
        LocalNode::shape(NodeKind::Plain, Shape::Rect { rect: r, radius: 0.0 })
    }

    #[test]
    fn insert_and_hit_test() {
        let mut tree = Tree::new();
        let _a = tree.insert(None, rect_node(Rect::new(10.0, 10.0, 60.0, 60.0)));
        let b = tree.insert(None, rect_node(Rect::new(40.0, 40.0, 120.0, 120.0)));

        let hit = tree
            .hit_test_point(
                Point::new(50.0, 50.0),
                QueryFilter::new().visible().pickable(),
            )
            .unwrap();
        assert_eq!(hit.node, b, "later sibling is painted on top");
        assert_eq!(hit.path.first().copied(), Some(tree.root()));
        assert_eq!(hit.path.last().copied(), Some(b));
    }

    #[test]
    fn unpickable_group_hides_its_leaves_from_picking() {
        let mut tree = Tree::new();
        let below = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 50.0, 50.0)));
        let g = tree.insert(None, LocalNode::group(NodeKind::MItem));
        let leaf = tree.insert(Some(g), rect_node(Rect::new(0.0, 0.0, 50.0, 50.0)));
        let pickable = QueryFilter::new().visible().pickable();

        assert_eq!(tree.hit_test_point(Point::new(5.0, 5.0), pickable).unwrap().node, leaf);
        tree.set_pickable(g, false);
        assert_eq!(
            tree.hit_test_point(Point::new(5.0, 5.0), pickable).unwrap().node,
            below,
            "leaves of an unpickable group are skipped"
        );
        assert_eq!(
            tree.hit_test_point(Point::new(5.0, 5.0), QueryFilter::new().visible())
                .unwrap()
                .node,
            leaf,
            "only pickable queries prune"
        );
        tree.set_pickable(g, true);
        assert_eq!(tree.hit_test_point(Point::new(5.0, 5.0), pickable).unwrap().node, leaf);
    }

    #[test]
    fn front_changes_hit_winner() {
        let mut tree = Tree::new();
        let a = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 50.0, 50.0)));
        let b = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 50.0, 50.0)));
        tree.front(a);
        let hit = tree.hit_test_point(Point::new(5.0, 5.0), QueryFilter::new()).unwrap();
        assert_eq!(hit.node, a, "front() must lift the node above its sibling");
        tree.backward(a);
        assert_eq!(tree.z_position(a), Some(0));
        tree.forward(a);
        assert_eq!(tree.z_position(a), Some(1));
        tree.back(a);
        assert_eq!(tree.z_position(b), Some(1));
    }

    #[test]
    fn group_bbox_skips_hidden_children() {
        let mut tree = Tree::new();
        let g = tree.insert(None, LocalNode::group(NodeKind::Label));
        let a = tree.insert(Some(g), rect_node(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _b = tree.insert(Some(g), rect_node(Rect::new(20.0, 20.0, 30.0, 30.0)));
        assert_eq!(tree.bbox(g), Some(Rect::new(0.0, 0.0, 30.0, 30.0)));
        tree.hide(a);
        assert_eq!(tree.bbox(g), Some(Rect::new(20.0, 20.0, 30.0, 30.0)));
        tree.show(a);
        assert!(tree.is_visible(a));
    }

    #[test]
    fn empty_group_has_no_box() {
        let mut tree = Tree::new();
        let g = tree.insert(None, LocalNode::group(NodeKind::Plain));
        assert_eq!(tree.bbox(g), None);
        tree.move_to(g, Point::new(5.0, 5.0));
        assert_eq!(tree.bbox(g), None, "moving an empty group is a no-op");
    }

    #[test]
    fn move_group_translates_descendants() {
        let mut tree = Tree::new();
        let g = tree.insert(None, LocalNode::group(NodeKind::Plain));
        let r = tree.insert(Some(g), rect_node(Rect::new(3.0, 4.0, 13.0, 14.0)));
        let c = tree.insert(
            Some(g),
            LocalNode::shape(NodeKind::Plain, Shape::Circle(Circle::new((20.0, 20.0), 5.0))),
        );
        tree.move_to(g, Point::new(0.0, 0.0));
        assert_eq!(tree.bbox(r), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(tree.bbox(c), Some(Rect::new(12.0, 11.0, 22.0, 21.0)));
    }

    #[test]
    fn text_bounds_follow_value() {
        let mut tree = Tree::new();
        let t = tree.insert(
            None,
            LocalNode::shape(
                NodeKind::Title,
                Shape::Text(TextShape {
                    origin: Point::new(0.0, 0.0),
                    value: String::from("ab"),
                    font: Font::default(),
                }),
            ),
        );
        let w1 = tree.bbox(t).unwrap().width();
        tree.set_text(t, "abcd");
        let w2 = tree.bbox(t).unwrap().width();
        assert!((w2 - 2.0 * w1).abs() < 1e-9, "width scales with char count");
        assert_eq!(tree.text(t), Some("abcd"));
    }

    #[test]
    fn reparent_keeps_geometry_and_rejects_cycles() {
        let mut tree = Tree::new();
        let g1 = tree.insert(None, LocalNode::group(NodeKind::MItemJail));
        let g2 = tree.insert(Some(g1), LocalNode::group(NodeKind::MItem));
        let r = tree.insert(Some(g2), rect_node(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!tree.reparent(g1, g2), "cannot move a node under its descendant");
        assert!(tree.reparent(g2, tree.root()));
        assert_eq!(tree.parent_of(g2), Some(tree.root()));
        assert_eq!(tree.bbox(r), Some(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert_eq!(tree.children_of_kind(tree.root(), NodeKind::MItem).count(), 1);
    }

    #[test]
    fn stack_at_point_orders_bottom_to_top() {
        let mut tree = Tree::new();
        let a = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let b = tree.insert(None, rect_node(Rect::new(50.0, 50.0, 150.0, 150.0)));
        let c = tree.insert(None, rect_node(Rect::new(60.0, 60.0, 70.0, 70.0)));
        let stack = tree.stack_at_point(tree.root(), Point::new(60.0, 60.0), Some(c));
        assert_eq!(stack, vec![a, b]);
        tree.hide(b);
        let stack = tree.stack_at_point(tree.root(), Point::new(60.0, 60.0), None);
        assert_eq!(stack, vec![a, c]);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let a = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(tree.is_alive(a));
        tree.remove(a);
        assert!(!tree.is_alive(a));
        let b = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        tree.remove(tree.root());
        assert!(tree.is_alive(tree.root()), "root is never removed");
    }

    #[test]
    fn mutations_record_damage() {
        let mut tree = Tree::new();
        let a = tree.insert(None, rect_node(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = tree.take_damage();
        tree.translate(a, Vec2::new(50.0, 0.0));
        let dmg = tree.take_damage();
        assert_eq!(dmg.union_rect(), Some(Rect::new(0.0, 0.0, 60.0, 10.0)));
        assert!(tree.take_damage().is_empty(), "damage is drained");
    }

    #[test]
    fn resize_rect_and_circle() {
        let mut tree = Tree::new();
        let r = tree.insert(None, rect_node(Rect::new(10.0, 10.0, 20.0, 20.0)));
        tree.set_size(r, Size::new(30.0, 40.0));
        assert_eq!(tree.bbox(r), Some(Rect::new(10.0, 10.0, 40.0, 50.0)));
        let c = tree.insert(
            None,
            LocalNode::shape(NodeKind::JailPin, Shape::Circle(Circle::new((0.0, 0.0), 9.0))),
        );
        tree.set_width(c, 10.0);
        assert_eq!(tree.bbox(c), Some(Rect::new(-5.0, -5.0, 5.0, 5.0)));
    }
}
