// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget construction context: the scene tree plus an injected id source.

use std::fmt;

use tds_scene::Tree;

/// Identifier of a widget instance.
///
/// Widget ids are independent of scene [`NodeId`](tds_scene::NodeId)s and are
/// allocated by the [`IdSource`] held in the [`Context`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetId(u64);

impl WidgetId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:08x}", self.0)
    }
}

/// Allocates widget ids.
pub trait IdSource: fmt::Debug {
    /// Produce an id not returned before by this source.
    fn next_id(&mut self) -> WidgetId;
}

/// Monotonic id source starting at 1.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    last: u64,
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> WidgetId {
        self.last += 1;
        WidgetId(self.last)
    }
}

/// Everything widgets need at construction time.
///
/// Handlers that only touch geometry take `&mut Tree` (the `scene` field);
/// constructors take the whole context so they can allocate ids.
#[derive(Debug)]
pub struct Context {
    /// The scene tree widgets compose into.
    pub scene: Tree,
    ids: Box<dyn IdSource>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A fresh scene with [`SequentialIds`].
    pub fn new() -> Self {
        Self::with_scene(Tree::new())
    }

    /// Wrap an existing scene with [`SequentialIds`].
    pub fn with_scene(scene: Tree) -> Self {
        Self {
            scene,
            ids: Box::new(SequentialIds::default()),
        }
    }

    /// Replace the id source.
    pub fn with_ids(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Allocate the next widget id.
    pub fn next_id(&mut self) -> WidgetId {
        self.ids.next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(u64);

    impl IdSource for Fixed {
        fn next_id(&mut self) -> WidgetId {
            self.0 += 10;
            WidgetId::new(self.0)
        }
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let mut a = Context::new();
        let mut b = Context::new();
        let ids_a: Vec<_> = (0..3).map(|_| a.next_id()).collect();
        let ids_b: Vec<_> = (0..3).map(|_| b.next_id()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(ids_a[0].get(), 1);
        assert_eq!(ids_a[2].to_string(), "T00000003");
    }

    #[test]
    fn injected_source_is_used() {
        let mut ctx = Context::new().with_ids(Box::new(Fixed(0)));
        assert_eq!(ctx.next_id(), WidgetId::new(10));
        assert_eq!(ctx.next_id(), WidgetId::new(20));
    }
}
