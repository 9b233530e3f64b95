// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TDS Scene: a Kurbo-native retained scene tree for vector widgets.
//!
//! The scene tree is the drawing surface widgets compose into. It holds a
//! hierarchy of groups and leaf shapes (rectangles, circles, lines, paths and
//! single-line text), each tagged with a [`NodeKind`] role so containers can
//! tell their children apart without knowing concrete widget types.
//!
//! - Leaf geometry is stored in root (surface) coordinates.
//! - A group's bounding box is the union of its visible children, so moving a
//!   group moves everything inside it and reparenting never changes where a
//!   node is drawn.
//! - Children are painted in order; z-order operations reorder siblings.
//! - Mutations record coarse damage which the host drains before repainting.
//!
//! ## Not a renderer
//!
//! This crate does not rasterize and does not deliver input events. A host
//! paints the tree by walking [`Tree::children_of`] from [`Tree::root`] and
//! feeds pointer positions back through [`Tree::hit_test_point`].
//!
//! ## Text
//!
//! Text bounds come from a [`TextMeasure`]. The default [`FixedAdvance`]
//! approximates a monospace font; hosts with shaping plug in their own.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, geometry, styles and damage.
//! - [`LocalNode`]: per-node data (kind, shape, style, flags).
//! - [`NodeFlags`]: visibility, picking and drag controls.
//! - [`NodeId`]: generational handle of a node.
//! - [`QueryFilter`]: restricts hit test results.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tds_scene::{LocalNode, NodeKind, QueryFilter, Shape, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.insert(
//!     None,
//!     LocalNode::shape(
//!         NodeKind::JailBody,
//!         Shape::Rect { rect: Rect::new(0.0, 0.0, 100.0, 50.0), radius: 0.0 },
//!     ),
//! );
//! let hit = tree
//!     .hit_test_point(Point::new(10.0, 10.0), QueryFilter::new().visible().pickable())
//!     .unwrap();
//! assert_eq!(hit.node, body);
//! assert_eq!(tree.kind(hit.node), Some(NodeKind::JailBody));
//! ```

#![no_std]

extern crate alloc;

mod damage;
mod text;
mod tree;
mod types;
mod util;

pub use damage::Damage;
pub use text::{FixedAdvance, TextMeasure};
pub use tree::{Hit, QueryFilter, Tree};
pub use types::{
    Fill, Font, FontWeight, LocalNode, NodeFlags, NodeId, NodeKind, Shape, Stroke, Style,
    TextShape,
};
