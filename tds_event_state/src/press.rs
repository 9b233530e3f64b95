// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long press and double click recognition.
//!
//! Both recognizers are driven by host timestamps (milliseconds) rather than
//! timers: the host calls [`LongPress::poll`] from its frame loop and passes
//! event times to [`DoubleClick::on_click`].
//!
//! ```
//! use tds_event_state::press::{DoubleClick, LongPress};
//! use kurbo::Point;
//!
//! let mut hold: LongPress<u32> = LongPress::new();
//! hold.on_down(9, Point::new(0.0, 0.0), 100);
//! assert_eq!(hold.poll(500), None);
//! assert_eq!(hold.poll(1100), Some(9));
//! assert_eq!(hold.poll(1200), None, "fires once");
//!
//! let mut dbl: DoubleClick<u32> = DoubleClick::new();
//! assert!(!dbl.on_click(4, Point::new(1.0, 1.0), 0));
//! assert!(dbl.on_click(4, Point::new(2.0, 1.0), 300));
//! ```

use kurbo::Point;

/// Hold duration of a long press, in milliseconds.
pub const LONG_PRESS_MS: u64 = 1000;

/// Maximum interval between the clicks of a double click, in milliseconds.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Maximum pointer travel tolerated by both recognizers.
pub const PRESS_SLOP: f64 = 4.0;

#[derive(Clone, Debug)]
struct Held<K> {
    target: K,
    position: Point,
    time: u64,
    fired: bool,
}

/// Recognizes a press held in place for a minimum duration.
#[derive(Clone, Debug)]
pub struct LongPress<K> {
    held: Option<Held<K>>,
    /// Hold duration in milliseconds.
    pub duration: u64,
    /// Pointer travel beyond which the press is abandoned.
    pub slop: f64,
}

impl<K: Clone> LongPress<K> {
    /// Recognizer with a [`LONG_PRESS_MS`] hold and [`PRESS_SLOP`] travel.
    pub fn new() -> Self {
        Self::with_duration(LONG_PRESS_MS)
    }

    /// Recognizer with a custom hold duration.
    pub fn with_duration(duration: u64) -> Self {
        Self {
            held: None,
            duration,
            slop: PRESS_SLOP,
        }
    }

    /// Pointer pressed on `target`.
    pub fn on_down(&mut self, target: K, at: Point, timestamp: u64) {
        self.held = Some(Held {
            target,
            position: at,
            time: timestamp,
            fired: false,
        });
    }

    /// Pointer moved; travelling beyond the slop abandons the press.
    pub fn on_move(&mut self, at: Point) {
        if self
            .held
            .as_ref()
            .is_some_and(|h| h.position.distance(at) > self.slop)
        {
            self.held = None;
        }
    }

    /// Pointer released; returns whether the long press had already fired.
    pub fn on_up(&mut self) -> bool {
        self.held.take().is_some_and(|h| h.fired)
    }

    /// Returns the target once, the first time `now` is past the hold duration.
    pub fn poll(&mut self, now: u64) -> Option<K> {
        let held = self.held.as_mut()?;
        if held.fired || now.saturating_sub(held.time) < self.duration {
            return None;
        }
        held.fired = true;
        Some(held.target.clone())
    }

    /// Whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.held.is_some()
    }
}

impl<K: Clone> Default for LongPress<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Recognizes two clicks on the same target close in time and space.
#[derive(Clone, Debug)]
pub struct DoubleClick<K> {
    last: Option<(K, Point, u64)>,
    /// Maximum interval in milliseconds.
    pub interval: u64,
    /// Maximum distance between the two clicks.
    pub slop: f64,
}

impl<K: PartialEq> DoubleClick<K> {
    /// Recognizer with [`DOUBLE_CLICK_MS`] and [`PRESS_SLOP`].
    pub fn new() -> Self {
        Self {
            last: None,
            interval: DOUBLE_CLICK_MS,
            slop: PRESS_SLOP,
        }
    }

    /// Record a click; returns `true` when it completes a double click.
    ///
    /// A completed double click resets the recognizer, so a third click starts over.
    pub fn on_click(&mut self, target: K, at: Point, timestamp: u64) -> bool {
        let is_double = self.last.as_ref().is_some_and(|(t, p, time)| {
            *t == target
                && p.distance(at) <= self.slop
                && timestamp.saturating_sub(*time) <= self.interval
        });
        self.last = if is_double {
            None
        } else {
            Some((target, at, timestamp))
        };
        is_double
    }

    /// Forget the pending first click.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl<K: PartialEq> Default for DoubleClick<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_press_fires_after_duration() {
        let mut lp: LongPress<u32> = LongPress::new();
        lp.on_down(1, Point::ZERO, 0);
        assert_eq!(lp.poll(999), None);
        assert_eq!(lp.poll(1000), Some(1));
        assert!(lp.on_up(), "release after firing reports the long press");
    }

    #[test]
    fn long_press_cancelled_by_travel() {
        let mut lp: LongPress<u32> = LongPress::new();
        lp.on_down(1, Point::ZERO, 0);
        lp.on_move(Point::new(3.0, 0.0));
        assert!(lp.is_pressed(), "small travel is tolerated");
        lp.on_move(Point::new(10.0, 0.0));
        assert!(!lp.is_pressed());
        assert_eq!(lp.poll(5000), None);
    }

    #[test]
    fn early_release_does_not_fire() {
        let mut lp: LongPress<u32> = LongPress::new();
        lp.on_down(1, Point::ZERO, 0);
        assert!(!lp.on_up());
        assert_eq!(lp.poll(2000), None);
    }

    #[test]
    fn double_click_requires_same_target_and_timing() {
        let mut dc: DoubleClick<u32> = DoubleClick::new();
        assert!(!dc.on_click(1, Point::ZERO, 0));
        assert!(!dc.on_click(2, Point::ZERO, 100), "different target");
        assert!(!dc.on_click(2, Point::ZERO, 700), "too slow");
        assert!(dc.on_click(2, Point::new(1.0, 1.0), 900));
        assert!(!dc.on_click(2, Point::new(1.0, 1.0), 950), "third click starts over");
    }

    #[test]
    fn double_click_rejects_travel() {
        let mut dc: DoubleClick<u32> = DoubleClick::new();
        dc.on_click(1, Point::ZERO, 0);
        assert!(!dc.on_click(1, Point::new(20.0, 0.0), 100));
    }
}
