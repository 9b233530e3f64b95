// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary types accumulated by tree mutations.

use kurbo::Rect;

/// A batched set of repaint regions drained with [`crate::Tree::take_damage`].
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Root-space rectangles that should be repainted.
    pub dirty_rects: alloc::vec::Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Whether nothing was damaged.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    pub(crate) fn push(&mut self, r: Rect) {
        if r.width() > 0.0 || r.height() > 0.0 {
            self.dirty_rects.push(r);
        }
    }
}
