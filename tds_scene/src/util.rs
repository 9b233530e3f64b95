// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Line, Point, Rect, Shape as _, Vec2};

use crate::text::TextMeasure;
use crate::types::Shape;

/// Bounds of a leaf shape; `None` for groups.
pub(crate) fn leaf_bounds(shape: &Shape, measure: &dyn TextMeasure) -> Option<Rect> {
    match shape {
        Shape::Group => None,
        Shape::Rect { rect, .. } => Some(rect.abs()),
        Shape::Circle(c) => Some(c.bounding_box()),
        Shape::Line(l) => Some(l.bounding_box()),
        Shape::Path(p) => Some(p.bounding_box()),
        Shape::Text(t) => Some(Rect::from_origin_size(
            t.origin,
            measure.measure(&t.value, &t.font),
        )),
    }
}

/// Shift a leaf shape by `v`.
pub(crate) fn translate_shape(shape: &mut Shape, v: Vec2) {
    match shape {
        Shape::Group => {}
        Shape::Rect { rect, .. } => *rect = *rect + v,
        Shape::Circle(c) => c.center += v,
        Shape::Line(l) => *l = Line::new(l.p0 + v, l.p1 + v),
        Shape::Path(p) => p.apply_affine(Affine::translate(v)),
        Shape::Text(t) => t.origin += v,
    }
}

/// Precise containment where cheap, bounding box otherwise.
pub(crate) fn shape_contains(shape: &Shape, point: Point, measure: &dyn TextMeasure) -> bool {
    match shape {
        Shape::Group => false,
        Shape::Circle(c) => c.contains(point),
        other => leaf_bounds(other, measure).is_some_and(|b| b.contains(point)),
    }
}
