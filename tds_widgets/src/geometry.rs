// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure numeric helpers shared by the widgets: distances, containment,
//! range scaling, rounding and grid quantization.

use kurbo::{Point, Rect};

/// Default grid quantum for diagram items and jails.
pub const GRID_STEP: f64 = 9.0;

/// Snap radius multiplier: anchors closer than `width_factor * SNAP_FACTOR` snap.
pub const SNAP_FACTOR: f64 = 2.0;

/// Values closer than this to a grid line count as on the line.
const GRID_EPSILON: f64 = 1e-9;

/// Eight boundary points of a box, in the order: left-mid, left-top,
/// top-mid, top-right, right-mid, right-bottom, bottom-mid, bottom-left.
pub type AnchorsMap = [Point; 8];

/// Euclidean distance between two points.
pub fn dist_p(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Whether `p` lies inside (or on) the circle of radius `r` around `center`.
pub fn is_point_in_circle(p: Point, center: Point, r: f64) -> bool {
    dist_p(p, center) <= r
}

/// Whether `p` lies inside `rect`, edges included.
pub fn point_in_rect(rect: Rect, p: Point) -> bool {
    let r = rect.abs();
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Scale `v` from `[v_min, v_max]` to `[0, 1]`.
///
/// Values outside the range map below 0 or above 1. With `digits` the result
/// is rounded to that many decimals.
pub fn v_to_01(v: f64, v_min: f64, v_max: f64, digits: Option<u32>) -> f64 {
    let k = (v - v_min) / (v_max - v_min);
    match digits {
        Some(d) => {
            let scale = 10_f64.powi(i32::try_from(d).unwrap_or(i32::MAX));
            round_half_up(k * scale) / scale
        }
        None => k,
    }
}

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Round `n` to the nearest multiple of `x`.
pub fn rnd_x(n: f64, x: f64) -> f64 {
    round_half_up(n / x) * x
}

/// Largest multiple of `step` not greater than `v`.
pub fn floor_to_grid(v: f64, step: f64) -> f64 {
    let q = v / step;
    let r = q.round();
    if (q - r).abs() < GRID_EPSILON {
        r * step
    } else {
        q.floor() * step
    }
}

/// Smallest multiple of `step` not less than `v`.
pub fn ceil_to_grid(v: f64, step: f64) -> f64 {
    let q = v / step;
    let r = q.round();
    if (q - r).abs() < GRID_EPSILON {
        r * step
    } else {
        q.ceil() * step
    }
}

/// Floor both coordinates of `p` to the grid.
pub fn floor_point_to_grid(p: Point, step: f64) -> Point {
    Point::new(floor_to_grid(p.x, step), floor_to_grid(p.y, step))
}

/// Anchor points of `rect`.
pub fn anchors(rect: Rect) -> AnchorsMap {
    let r = rect.abs();
    let cx = r.x0 + r.width() / 2.0;
    let cy = r.y0 + r.height() / 2.0;
    [
        Point::new(r.x0, cy),
        Point::new(r.x0, r.y0),
        Point::new(cx, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, cy),
        Point::new(r.x1, r.y1),
        Point::new(cx, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

/// Length of the diagonal of `rect`.
pub fn diagonal(rect: Rect) -> f64 {
    dist_p(rect.origin(), Point::new(rect.x1, rect.y1))
}

/// Whether any anchor of `a` is closer than `threshold` to any anchor of `b`.
pub fn anchors_within(a: &AnchorsMap, b: &AnchorsMap, threshold: f64) -> bool {
    b.iter()
        .any(|pb| a.iter().any(|pa| dist_p(*pa, *pb) < threshold))
}
