// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture helper producing proposed boxes.
//!
//! A drag is a start/move/end sequence. At start the caller records the
//! target's current bounding box; every move then yields the box the target
//! would occupy if it followed the pointer exactly. Widgets decide what to do
//! with that proposal (snap it, clamp it, ignore it).
//!
//! ## Usage
//!
//! ```
//! use tds_event_state::drag::DragState;
//! use kurbo::{Point, Rect};
//!
//! let mut drag: DragState<u32> = DragState::new();
//! drag.on_start(None, 7, Rect::new(10.0, 10.0, 50.0, 30.0), Point::new(20.0, 20.0));
//!
//! let step = drag.on_move(None, Point::new(25.0, 22.0)).unwrap();
//! assert_eq!(step.target, 7);
//! assert_eq!(step.proposed, Rect::new(15.0, 12.0, 55.0, 32.0));
//!
//! let end = drag.on_end(None, Point::new(25.0, 22.0)).unwrap();
//! assert!(end.moved);
//! ```

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;
use kurbo::{Point, Rect, Vec2};

/// Pointer identifier for tracking concurrent drags.
pub type PointerId = NonZeroU64;

const PRIMARY: PointerId = NonZeroU64::MIN;

/// State for an active drag.
#[derive(Clone, Debug)]
pub struct Drag<K> {
    /// Dragged element.
    pub target: K,
    /// Bounding box of the target when the drag started.
    pub start_box: Rect,
    /// Pointer position when the drag started.
    pub start_position: Point,
    /// Last pointer position seen.
    pub last_position: Point,
}

impl<K> Drag<K> {
    /// Pointer displacement since the drag started.
    pub fn delta(&self) -> Vec2 {
        self.last_position - self.start_position
    }

    /// Box the target would occupy if it followed the pointer exactly.
    pub fn proposed(&self) -> Rect {
        self.start_box + self.delta()
    }
}

/// One step of a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragMove<K> {
    /// Dragged element.
    pub target: K,
    /// `start_box` shifted by the pointer displacement.
    pub proposed: Rect,
    /// Current pointer position.
    pub pointer: Point,
}

/// Result of releasing a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEnd<K> {
    /// Dragged element.
    pub target: K,
    /// Final proposed box.
    pub proposed: Rect,
    /// Final pointer position.
    pub pointer: Point,
    /// Whether the pointer moved at all during the drag.
    pub moved: bool,
}

/// Drag gesture state machine, one drag per pointer.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    drags: BTreeMap<PointerId, Drag<K>>,
}

impl<K: Clone> DragState<K> {
    /// Create an idle drag state.
    pub fn new() -> Self {
        Self {
            drags: BTreeMap::new(),
        }
    }

    /// Begin dragging `target`, whose bounding box is currently `target_box`.
    ///
    /// A drag already active for the pointer is replaced.
    pub fn on_start(&mut self, pointer_id: Option<PointerId>, target: K, target_box: Rect, at: Point) {
        let pointer_id = pointer_id.unwrap_or(PRIMARY);
        self.drags.insert(
            pointer_id,
            Drag {
                target,
                start_box: target_box,
                start_position: at,
                last_position: at,
            },
        );
    }

    /// Track pointer movement; returns `None` when no drag is active for the pointer.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, at: Point) -> Option<DragMove<K>> {
        let drag = self.drags.get_mut(&pointer_id.unwrap_or(PRIMARY))?;
        drag.last_position = at;
        Some(DragMove {
            target: drag.target.clone(),
            proposed: drag.proposed(),
            pointer: at,
        })
    }

    /// Finish the drag for the pointer.
    pub fn on_end(&mut self, pointer_id: Option<PointerId>, at: Point) -> Option<DragEnd<K>> {
        let mut drag = self.drags.remove(&pointer_id.unwrap_or(PRIMARY))?;
        drag.last_position = at;
        Some(DragEnd {
            moved: drag.delta() != Vec2::ZERO,
            proposed: drag.proposed(),
            target: drag.target,
            pointer: at,
        })
    }

    /// Abandon the drag for the pointer, returning its state if one was active.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> Option<Drag<K>> {
        self.drags.remove(&pointer_id.unwrap_or(PRIMARY))
    }

    /// Whether a drag is active for the pointer.
    pub fn is_dragging(&self, pointer_id: Option<PointerId>) -> bool {
        self.drags.contains_key(&pointer_id.unwrap_or(PRIMARY))
    }

    /// Active drag for the pointer.
    pub fn get(&self, pointer_id: Option<PointerId>) -> Option<&Drag<K>> {
        self.drags.get(&pointer_id.unwrap_or(PRIMARY))
    }

    /// Drop every active drag.
    pub fn clear(&mut self) {
        self.drags.clear();
    }
}

impl<K: Clone> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposed_box_follows_pointer() {
        let mut drag: DragState<u32> = DragState::new();
        drag.on_start(None, 1, Rect::new(0.0, 0.0, 10.0, 10.0), Point::new(5.0, 5.0));
        let step = drag.on_move(None, Point::new(8.0, 1.0)).unwrap();
        assert_eq!(step.proposed, Rect::new(3.0, -4.0, 13.0, 6.0));
        assert_eq!(step.pointer, Point::new(8.0, 1.0));
        let step = drag.on_move(None, Point::new(5.0, 5.0)).unwrap();
        assert_eq!(step.proposed, Rect::new(0.0, 0.0, 10.0, 10.0), "back to start");
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut drag: DragState<u32> = DragState::new();
        assert!(drag.on_move(None, Point::new(1.0, 1.0)).is_none());
        assert!(drag.on_end(None, Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn end_reports_whether_pointer_moved() {
        let mut drag: DragState<u32> = DragState::new();
        drag.on_start(None, 1, Rect::new(0.0, 0.0, 10.0, 10.0), Point::new(5.0, 5.0));
        let end = drag.on_end(None, Point::new(5.0, 5.0)).unwrap();
        assert!(!end.moved);
        assert!(!drag.is_dragging(None));
    }

    #[test]
    fn cancel_drops_drag() {
        let mut drag: DragState<u32> = DragState::new();
        drag.on_start(None, 3, Rect::ZERO, Point::ZERO);
        assert!(drag.is_dragging(None));
        let cancelled = drag.cancel(None).unwrap();
        assert_eq!(cancelled.target, 3);
        assert!(drag.on_move(None, Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn pointers_drag_independently() {
        let mut drag: DragState<u32> = DragState::new();
        let p2 = NonZeroU64::new(2).unwrap();
        drag.on_start(None, 1, Rect::new(0.0, 0.0, 1.0, 1.0), Point::ZERO);
        drag.on_start(Some(p2), 2, Rect::new(10.0, 10.0, 11.0, 11.0), Point::ZERO);
        let a = drag.on_move(None, Point::new(1.0, 0.0)).unwrap();
        let b = drag.on_move(Some(p2), Point::new(0.0, 1.0)).unwrap();
        assert_eq!(a.proposed, Rect::new(1.0, 0.0, 2.0, 1.0));
        assert_eq!(b.proposed, Rect::new(10.0, 11.0, 11.0, 12.0));
        drag.clear();
        assert!(!drag.is_dragging(Some(p2)));
    }
}
