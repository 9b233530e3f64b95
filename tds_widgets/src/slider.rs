// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value slider with a ruler, a filler, a draggable pin and optional ticks.
//!
//! Moving the pin runs a fixed pipeline:
//!
//! 1. pin coordinate to raw value ([`raw_value`]),
//! 2. raw value reduced to the step series ([`in_line_value`]),
//! 3. reduced value back to a coordinate ([`coordinate`]),
//! 4. pin and filler moved to that coordinate,
//! 5. payload updated (notifying only on change) and the value box refreshed.
//!
//! Setting the value programmatically starts at step 2.

use kurbo::{Circle, Line, Point, Rect};
use tds_scene::{Fill, LocalNode, NodeId, NodeKind, Shape, Stroke, Style, Tree};

use crate::background::Background;
use crate::context::{Context, WidgetId};
use crate::error::{Error, Result};
use crate::event::{Emitter, SliderEvent};
use crate::geometry::{round_half_up, v_to_01};
use crate::label::{BackgroundRule, Label, LabelAttr};
use crate::style::{BackgroundStyle, Indents, StyleSize, TitleStyle, style_size_number};
use crate::textbox::{InputType, Key, Textbox, TextboxAttr};

/// Positions closer than this are treated as the same tick.
const TICK_EPSILON: f64 = 1e-9;

/// Range, quantization and current value of a slider.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderPayload {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Distance between reachable values, counted from `min`.
    pub step: f64,
    /// Decimals shown in the value box.
    pub precision: usize,
    /// Current value.
    pub value: Option<f64>,
}

impl Default for SliderPayload {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            precision: 0,
            value: Some(0.0),
        }
    }
}

/// Direction of the ruler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Values grow to the right.
    #[default]
    Horizontal,
    /// Values grow upwards.
    Vertical,
}

/// Slider behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SliderType {
    /// Continuous value picked with the pin.
    #[default]
    General,
    /// Switch between 0 and 1 by clicking the pin.
    TwoState,
}

/// Side of the ruler a tick extends to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickDirection {
    /// Above a horizontal ruler, left of a vertical one.
    Up,
    /// Below a horizontal ruler, right of a vertical one.
    #[default]
    Down,
    /// Both sides, centered on the ruler.
    Both,
}

/// Tick rank, coarsest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Main ticks.
    Main,
    /// Ticks between main ticks.
    Half,
    /// Finest ticks.
    Subhalf,
}

impl TickKind {
    /// Length of the tick relative to the ruler thickness.
    pub fn length_factor(self) -> f64 {
        match self {
            Self::Main => 2.5,
            Self::Half => 2.0,
            Self::Subhalf => 1.5,
        }
    }
}

/// One tick series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    /// Value distance between ticks.
    pub step: f64,
    /// Side of the ruler.
    pub side: TickDirection,
    /// Length scale.
    pub size: StyleSize,
    /// Base of the length scale.
    pub size_base: f64,
    /// Line paint.
    pub stroke: Stroke,
}

impl Tick {
    /// Ticks every `step` with default styling.
    pub fn new(step: f64) -> Self {
        Self {
            step,
            side: TickDirection::Down,
            size: StyleSize::Xxs,
            size_base: 1.0,
            stroke: Stroke::color("#999999").with_width(1.0),
        }
    }

    /// Change the side.
    pub fn on(mut self, side: TickDirection) -> Self {
        self.side = side;
        self
    }
}

/// Up to three tick series.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderTicks {
    /// Main series.
    pub main: Option<Tick>,
    /// Half series.
    pub half: Option<Tick>,
    /// Subhalf series.
    pub subhalf: Option<Tick>,
}

impl SliderTicks {
    fn get(&self, kind: TickKind) -> Option<&Tick> {
        match kind {
            TickKind::Main => self.main.as_ref(),
            TickKind::Half => self.half.as_ref(),
            TickKind::Subhalf => self.subhalf.as_ref(),
        }
    }
}

/// Tick coordinates along the ruler, per kind, without duplicates of coarser kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickPositions {
    /// Main tick coordinates.
    pub main: Vec<f64>,
    /// Half tick coordinates.
    pub half: Vec<f64>,
    /// Subhalf tick coordinates.
    pub subhalf: Vec<f64>,
}

impl TickPositions {
    /// Coordinates of one kind.
    pub fn get(&self, kind: TickKind) -> &[f64] {
        match kind {
            TickKind::Main => &self.main,
            TickKind::Half => &self.half,
            TickKind::Subhalf => &self.subhalf,
        }
    }
}

/// Geometry of the pin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinShape {
    /// Circle of the given radius.
    Circle(f64),
    /// SVG path data.
    Path(String),
}

/// Attributes of the pin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinStyle {
    /// Geometry.
    pub shape: PinShape,
    /// Fill paint.
    pub fill: Fill,
    /// Stroke paint.
    pub stroke: Stroke,
}

impl Default for PinStyle {
    fn default() -> Self {
        Self {
            shape: PinShape::Circle(10.0),
            fill: Fill::color("#FFBB00"),
            stroke: Stroke::color("black").with_width(1.0),
        }
    }
}

/// Attributes of a slider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderAttr {
    /// Caption.
    pub title: LabelAttr,
    /// Range and initial value.
    pub payload: SliderPayload,
    /// Track rectangle.
    pub ruler: BackgroundStyle,
    /// Rectangle filling the track up to the pin; its position is taken from the ruler.
    pub filler: BackgroundStyle,
    /// Handle.
    pub pin: PinStyle,
    /// Editable display of the value; unused by two-state sliders.
    pub value_box: TextboxAttr,
    /// Ruler direction.
    pub orientation: Orientation,
    /// Behavior.
    pub slider_type: SliderType,
    /// Tick series.
    pub ticks: Option<SliderTicks>,
}

impl Default for SliderAttr {
    fn default() -> Self {
        Self {
            title: LabelAttr {
                title: TitleStyle::with_value("slider:"),
                ..LabelAttr::default()
            },
            payload: SliderPayload::default(),
            ruler: BackgroundStyle {
                width: 120.0,
                height: 10.0,
                fill: Fill::color("#E6E6E6"),
                stroke: Stroke::color("#D2D2D2").with_width(1.0),
                radius: 5.0,
                position: Point::new(0.0, 30.0),
            },
            filler: BackgroundStyle {
                width: 0.0,
                height: 10.0,
                fill: Fill::color("#00A1F1"),
                stroke: Stroke::color("black").with_width(1.0),
                radius: 4.0,
                position: Point::new(0.0, 30.0),
            },
            pin: PinStyle::default(),
            value_box: TextboxAttr {
                label: LabelAttr {
                    title: TitleStyle::with_value("0").at(Point::new(140.0, 28.0)),
                    background_rule: vec![BackgroundRule::Indent],
                    background: Some(BackgroundStyle::default()),
                    indents: Indents::new(5.0, 3.0, 5.0, 3.0),
                    position: None,
                },
                input_type: InputType::Number,
            },
            orientation: Orientation::Horizontal,
            slider_type: SliderType::General,
            ticks: None,
        }
    }
}

/// Value at pin coordinate `c` along `ruler`, before quantization.
///
/// Vertical rulers grow upwards: the bottom edge maps to `min`.
pub fn raw_value(c: f64, ruler: Rect, orientation: Orientation, p: &SliderPayload) -> f64 {
    let k = match orientation {
        Orientation::Horizontal => v_to_01(c, ruler.x0, ruler.x1, None),
        Orientation::Vertical => v_to_01(c, ruler.y1, ruler.y0, None),
    };
    p.min + k * (p.max - p.min)
}

/// `v` reduced to the nearest value of the step series, clamped to the range.
pub fn in_line_value(v: f64, p: &SliderPayload) -> f64 {
    let r = round_half_up((v - p.min) / p.step) * p.step + p.min;
    r.clamp(p.min, p.max)
}

/// Pin coordinate of value `v`, clamped to the ruler.
pub fn coordinate(v: f64, ruler: Rect, orientation: Orientation, p: &SliderPayload) -> f64 {
    let k = v_to_01(v, p.min, p.max, None);
    match orientation {
        Orientation::Horizontal => (ruler.x0 + k * ruler.width()).clamp(ruler.x0, ruler.x1),
        Orientation::Vertical => (ruler.y1 - k * ruler.height()).clamp(ruler.y0, ruler.y1),
    }
}

/// Evenly spaced tick coordinates of every configured series.
///
/// A series with a non-positive step, or a step larger than the range, has no ticks.
pub fn tick_positions(
    ruler: Rect,
    orientation: Orientation,
    p: &SliderPayload,
    ticks: &SliderTicks,
) -> TickPositions {
    let mut res = TickPositions::default();
    for kind in [TickKind::Main, TickKind::Half, TickKind::Subhalf] {
        let Some(tick) = ticks.get(kind) else { continue };
        if tick.step <= 0.0 {
            continue;
        }
        let count = ((p.max - p.min) / tick.step).floor();
        if !count.is_finite() || count < 1.0 {
            continue;
        }
        let len = match orientation {
            Orientation::Horizontal => ruler.width() / count,
            Orientation::Vertical => ruler.height() / count,
        };
        let mut at = Vec::new();
        let mut i = 0.0;
        while i <= count {
            let r = match orientation {
                Orientation::Horizontal => ruler.x0 + len * i,
                Orientation::Vertical => ruler.y1 - len * i,
            };
            let taken = |v: &[f64]| v.iter().any(|x| (x - r).abs() < TICK_EPSILON);
            let duplicate = match kind {
                TickKind::Main => false,
                TickKind::Half => taken(&res.main),
                TickKind::Subhalf => taken(&res.main) || taken(&res.half),
            };
            if !duplicate {
                at.push(r);
            }
            i += 1.0;
        }
        match kind {
            TickKind::Main => res.main = at,
            TickKind::Half => res.half = at,
            TickKind::Subhalf => res.subhalf = at,
        }
    }
    res
}

/// The segment drawn for a tick of `kind` at coordinate `at`.
pub fn tick_line(
    kind: TickKind,
    tick: &Tick,
    ruler: Rect,
    orientation: Orientation,
    at: f64,
) -> Line {
    let mut factor = kind.length_factor() * style_size_number(tick.size, tick.size_base);
    if tick.side == TickDirection::Both {
        factor *= 2.0;
    }
    let c = ruler.center();
    match orientation {
        Orientation::Horizontal => {
            let len = ruler.height() * factor;
            let top = match tick.side {
                TickDirection::Down => c.y,
                TickDirection::Up => c.y - len,
                TickDirection::Both => c.y - len / 2.0,
            };
            Line::new((at, top), (at, top + len))
        }
        Orientation::Vertical => {
            let len = ruler.width() * factor;
            let left = match tick.side {
                TickDirection::Down => c.x,
                TickDirection::Up => c.x - len,
                TickDirection::Both => c.x - len / 2.0,
            };
            Line::new((left, at), (left + len, at))
        }
    }
}

/// A slider.
#[derive(Debug)]
pub struct Slider {
    id: WidgetId,
    group: NodeId,
    title: Label,
    payload: SliderPayload,
    ruler: Background,
    filler: Background,
    pin: NodeId,
    value_box: Option<Textbox>,
    ticks_group: NodeId,
    ticks: Option<SliderTicks>,
    orientation: Orientation,
    slider_type: SliderType,
    events: Emitter<SliderEvent>,
}

impl Slider {
    /// Build a slider on top of `parent` and move the pin to the initial value.
    ///
    /// Fails with [`Error::InvalidRange`] unless `min < max` with both bounds
    /// finite, and with a
    /// configuration error for a non-positive step or an unparsable pin path.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &SliderAttr) -> Result<Self> {
        let p = attr.payload;
        if !(p.min.is_finite() && p.max.is_finite() && p.min < p.max) {
            return Err(Error::invalid_range(p.min, p.max));
        }
        if !(p.step > 0.0 && p.step.is_finite()) {
            return Err(Error::configuration("step", format!("{} is not a positive step", p.step)));
        }

        let pin_shape = match &attr.pin.shape {
            PinShape::Circle(r) => Shape::Circle(Circle::new(Point::ZERO, *r)),
            PinShape::Path(d) => Shape::Path(
                kurbo::BezPath::from_svg(d)
                    .map_err(|e| Error::configuration("pin", e.to_string()))?,
            ),
        };

        let group = ctx.scene.insert(parent, LocalNode::group(NodeKind::Slider));
        let ticks_group = ctx
            .scene
            .insert(Some(group), LocalNode::group(NodeKind::SliderTicks));
        let title = Label::new(ctx, Some(group), &attr.title);
        let ruler = Background::new(ctx, Some(group), &attr.ruler);
        let filler = Background::new(
            ctx,
            Some(group),
            &attr.filler.clone().at(attr.ruler.position),
        );
        let pin = ctx.scene.insert(
            Some(group),
            LocalNode::shape(NodeKind::Plain, pin_shape).with_style(Style {
                fill: Some(attr.pin.fill.clone()),
                stroke: Some(attr.pin.stroke.clone()),
            }),
        );
        ctx.scene.set_draggable(pin, attr.slider_type == SliderType::General);
        let value_box = match attr.slider_type {
            SliderType::General => Some(Textbox::new(ctx, Some(group), &attr.value_box)),
            SliderType::TwoState => None,
        };

        let mut slider = Self {
            id: ctx.next_id(),
            group,
            title,
            payload: p,
            ruler,
            filler,
            pin,
            value_box,
            ticks_group,
            ticks: attr.ticks.clone(),
            orientation: attr.orientation,
            slider_type: attr.slider_type,
            events: Emitter::new(),
        };
        slider.set_value(&mut ctx.scene, p.value.unwrap_or(p.min));
        slider.draw_ticks(&mut ctx.scene);
        Ok(slider)
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The slider group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Caption.
    pub fn title(&self) -> &Label {
        &self.title
    }

    /// The pin node.
    pub fn pin(&self) -> NodeId {
        self.pin
    }

    /// The filler rectangle.
    pub fn filler(&self) -> &Background {
        &self.filler
    }

    /// The value box of a general slider.
    pub fn value_box(&self) -> Option<&Textbox> {
        self.value_box.as_ref()
    }

    /// Mutable value box, e.g. to open an edit session.
    pub fn value_box_mut(&mut self) -> Option<&mut Textbox> {
        self.value_box.as_mut()
    }

    /// The group holding the tick lines.
    pub fn ticks_group(&self) -> NodeId {
        self.ticks_group
    }

    /// Ruler direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Behavior.
    pub fn slider_type(&self) -> SliderType {
        self.slider_type
    }

    /// Range and value.
    pub fn payload(&self) -> &SliderPayload {
        &self.payload
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.payload.value.unwrap_or(self.payload.min)
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<SliderEvent> {
        &mut self.events
    }

    /// Ruler rectangle.
    pub fn ruler_bbox(&self, tree: &Tree) -> Rect {
        self.ruler.bbox(tree)
    }

    /// Set the value: quantize, move the pin, update payload and value box.
    pub fn set_value(&mut self, tree: &mut Tree, v: f64) {
        let ruler = self.ruler_bbox(tree);
        let rv = in_line_value(v, &self.payload);
        let c = coordinate(rv, ruler, self.orientation, &self.payload);
        self.set_pin_to_coordinate(tree, c, ruler);
        self.set_payload_value(rv);
        self.set_value_box_value(tree, rv);
    }

    /// The host is about to drag the pin; any open value edit is dismissed.
    pub fn drag_start(&mut self, tree: &mut Tree) {
        if let Some(vb) = &mut self.value_box {
            vb.reset(tree);
        }
    }

    /// The pin was dragged to `pin_box`; runs the full pipeline.
    pub fn drag_move(&mut self, tree: &mut Tree, pin_box: Rect) {
        if self.slider_type == SliderType::TwoState {
            return;
        }
        let ruler = self.ruler_bbox(tree);
        let center = pin_box.center();
        let c = match self.orientation {
            Orientation::Horizontal => center.x,
            Orientation::Vertical => center.y,
        };
        let r = in_line_value(raw_value(c, ruler, self.orientation, &self.payload), &self.payload);
        let c = coordinate(r, ruler, self.orientation, &self.payload);
        self.set_pin_to_coordinate(tree, c, ruler);
        self.set_payload_value(r);
        self.set_value_box_value(tree, r);
    }

    /// Click on the pin; toggles two-state sliders between 0 and 1.
    pub fn click(&mut self, tree: &mut Tree) {
        if self.slider_type == SliderType::TwoState {
            let next = if self.value() == 1.0 { 0.0 } else { 1.0 };
            self.set_value(tree, next);
        }
    }

    /// Key pressed in the value box edit session; a committed number becomes
    /// the slider value. Returns whether the value box committed.
    pub fn value_box_key(&mut self, tree: &mut Tree, key: Key, input: &str) -> bool {
        let Some(vb) = &mut self.value_box else {
            return false;
        };
        if !vb.key(tree, key, input) {
            return false;
        }
        let committed = vb.value(tree).trim().parse::<f64>();
        match committed {
            Ok(v) if v.is_finite() => self.set_value(tree, v),
            _ => {
                let v = self.value();
                self.set_value_box_value(tree, v);
            }
        }
        true
    }

    fn set_pin_to_coordinate(&self, tree: &mut Tree, c: f64, ruler: Rect) {
        match self.orientation {
            Orientation::Horizontal => {
                tree.set_cx(self.pin, c);
                tree.set_cy(self.pin, ruler.center().y);
            }
            Orientation::Vertical => {
                tree.set_cy(self.pin, c);
                tree.set_cx(self.pin, ruler.center().x);
            }
        }
        self.set_filler(tree, ruler);
    }

    fn set_filler(&self, tree: &mut Tree, ruler: Rect) {
        let Some(pin) = tree.bbox(self.pin).map(|b| b.center()) else {
            return;
        };
        match self.orientation {
            Orientation::Horizontal => tree.set_width(self.filler.node(), pin.x - ruler.x0),
            Orientation::Vertical => {
                let node = self.filler.node();
                tree.set_width(node, ruler.width());
                tree.move_to(node, Point::new(pin.x - ruler.width() / 2.0, pin.y));
                tree.set_height(node, ruler.y1 - pin.y);
            }
        }
    }

    fn set_payload_value(&mut self, v: f64) {
        if self.payload.value != Some(v) {
            self.payload.value = Some(v);
            tracing::debug!(target: "tds_widgets::slider", id = %self.id, value = v, "value changed");
            self.events.emit(SliderEvent::ValueChanged {
                slider: self.id,
                value: v,
            });
        }
    }

    fn set_value_box_value(&mut self, tree: &mut Tree, v: f64) {
        let precision = self.payload.precision;
        if let Some(vb) = &mut self.value_box {
            vb.set_value(tree, &format!("{v:.precision$}"));
        }
    }

    /// Rebuild the tick lines from the current ruler.
    pub fn draw_ticks(&self, tree: &mut Tree) {
        for child in tree.children_of(self.ticks_group).to_vec() {
            tree.remove(child);
        }
        let Some(ticks) = &self.ticks else { return };
        let ruler = self.ruler_bbox(tree);
        let positions = tick_positions(ruler, self.orientation, &self.payload, ticks);
        for kind in [TickKind::Main, TickKind::Half, TickKind::Subhalf] {
            let Some(tick) = ticks.get(kind) else { continue };
            for &at in positions.get(kind) {
                let line = tick_line(kind, tick, ruler, self.orientation, at);
                tree.insert(
                    Some(self.ticks_group),
                    LocalNode::shape(NodeKind::Plain, Shape::Line(line)).with_style(Style {
                        fill: None,
                        stroke: Some(tick.stroke.clone()),
                    }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn payload(min: f64, max: f64, step: f64) -> SliderPayload {
        SliderPayload {
            min,
            max,
            step,
            precision: 0,
            value: Some(min),
        }
    }

    fn attr(p: SliderPayload) -> SliderAttr {
        SliderAttr {
            payload: p,
            ruler: BackgroundStyle {
                width: 100.0,
                height: 10.0,
                position: Point::new(0.0, 30.0),
                ..BackgroundStyle::default()
            },
            ..SliderAttr::default()
        }
    }

    #[test]
    fn in_line_value_is_idempotent_and_bounded() {
        let p = payload(-20.0, 130.0, 2.5);
        let mut v = -60.0;
        while v <= 180.0 {
            let once = in_line_value(v, &p);
            assert_eq!(in_line_value(once, &p), once, "not idempotent at {v}");
            assert!((p.min..=p.max).contains(&once), "{once} out of range for {v}");
            v += 0.7;
        }
    }

    #[test]
    fn coordinate_inverts_raw_value() {
        let ruler = Rect::new(10.0, 20.0, 250.0, 30.0);
        let p = payload(25.0, 750.0, 1.0);
        for c in [10.0, 11.5, 100.0, 249.9, 250.0] {
            let back = coordinate(raw_value(c, ruler, Orientation::Horizontal, &p), ruler, Orientation::Horizontal, &p);
            assert!((back - c).abs() < 1e-9, "horizontal {c} -> {back}");
        }
        let ruler = Rect::new(0.0, 0.0, 10.0, 200.0);
        for c in [0.0, 50.0, 199.0] {
            let back = coordinate(raw_value(c, ruler, Orientation::Vertical, &p), ruler, Orientation::Vertical, &p);
            assert!((back - c).abs() < 1e-9, "vertical {c} -> {back}");
        }
        assert_eq!(
            raw_value(200.0, ruler, Orientation::Vertical, &p),
            25.0,
            "bottom edge is the minimum"
        );
        assert_eq!(coordinate(9_999.0, ruler, Orientation::Vertical, &p), 0.0);
    }

    #[test]
    fn drag_to_53_lands_on_50() {
        let mut ctx = Context::new();
        let mut s = Slider::new(&mut ctx, None, &attr(payload(0.0, 100.0, 10.0))).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        s.events_mut().connect(move |e| {
            let SliderEvent::ValueChanged { value, .. } = e;
            log.borrow_mut().push(*value);
        });

        let ruler = s.ruler_bbox(&ctx.scene);
        let c = coordinate(53.0, ruler, Orientation::Horizontal, s.payload());
        s.drag_move(&mut ctx.scene, Rect::from_center_size((c, 35.0), (20.0, 20.0)));
        assert_eq!(s.value(), 50.0);
        assert_eq!(s.value_box().unwrap().value(&ctx.scene), "50");
        let pin = ctx.scene.bbox(s.pin()).unwrap().center();
        assert!((pin.x - 50.0).abs() < 1e-9);
        assert!((pin.y - 35.0).abs() < 1e-9);
        let filler = s.filler().bbox(&ctx.scene);
        assert!((filler.width() - 50.0).abs() < 1e-9);

        s.drag_move(&mut ctx.scene, Rect::from_center_size((51.0, 35.0), (20.0, 20.0)));
        assert_eq!(*seen.borrow(), vec![50.0], "unchanged value is not re-announced");
    }

    #[test]
    fn precision_formats_value_box() {
        let mut ctx = Context::new();
        let mut p = payload(0.0, 1.0, 0.25);
        p.precision = 2;
        let mut s = Slider::new(&mut ctx, None, &attr(p)).unwrap();
        s.set_value(&mut ctx.scene, 0.6);
        assert_eq!(s.value(), 0.5);
        assert_eq!(s.value_box().unwrap().value(&ctx.scene), "0.50");
    }

    #[test]
    fn value_box_commit_sets_value() {
        let mut ctx = Context::new();
        let mut s = Slider::new(&mut ctx, None, &attr(payload(0.0, 100.0, 10.0))).unwrap();
        s.value_box_mut().unwrap().begin_edit(&mut ctx.scene);
        assert!(s.value_box_key(&mut ctx.scene, Key::Enter, "77"));
        assert_eq!(s.value(), 80.0);
        assert_eq!(s.value_box().unwrap().value(&ctx.scene), "80");

        s.value_box_mut().unwrap().begin_edit(&mut ctx.scene);
        s.value_box_key(&mut ctx.scene, Key::Enter, "abc");
        assert_eq!(s.value(), 80.0);
        assert_eq!(s.value_box().unwrap().value(&ctx.scene), "80", "garbage is reverted");

        s.value_box_mut().unwrap().begin_edit(&mut ctx.scene);
        s.value_box_key(&mut ctx.scene, Key::Enter, "80.0");
        assert_eq!(s.value(), 80.0);
        assert_eq!(
            s.value_box().unwrap().value(&ctx.scene),
            "80",
            "same value is reformatted"
        );

        s.value_box_mut().unwrap().begin_edit(&mut ctx.scene);
        s.value_box_key(&mut ctx.scene, Key::Enter, "NaN");
        assert_eq!(s.value(), 80.0);
        assert_eq!(s.value_box().unwrap().value(&ctx.scene), "80");
    }

    #[test]
    fn two_state_toggles_on_click() {
        let mut ctx = Context::new();
        let mut a = attr(payload(0.0, 1.0, 1.0));
        a.slider_type = SliderType::TwoState;
        let mut s = Slider::new(&mut ctx, None, &a).unwrap();
        assert!(s.value_box().is_none());
        s.click(&mut ctx.scene);
        assert_eq!(s.value(), 1.0);
        s.click(&mut ctx.scene);
        assert_eq!(s.value(), 0.0);
        s.drag_move(&mut ctx.scene, Rect::from_center_size((90.0, 35.0), (20.0, 20.0)));
        assert_eq!(s.value(), 0.0, "ruler mapping is ignored");
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        let mut ctx = Context::new();
        assert_eq!(
            Slider::new(&mut ctx, None, &attr(payload(5.0, 5.0, 1.0))).unwrap_err(),
            Error::InvalidRange { min: 5.0, max: 5.0 }
        );
        assert_eq!(
            Slider::new(&mut ctx, None, &attr(payload(100.0, 0.0, 1.0))).unwrap_err(),
            Error::InvalidRange { min: 100.0, max: 0.0 },
            "inverted range"
        );
        assert!(matches!(
            Slider::new(&mut ctx, None, &attr(payload(f64::NAN, 10.0, 1.0))),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            Slider::new(&mut ctx, None, &attr(payload(0.0, f64::INFINITY, 1.0))),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            Slider::new(&mut ctx, None, &attr(payload(0.0, 5.0, 0.0))),
            Err(Error::Configuration { field: "step", .. })
        ));
    }

    #[test]
    fn ticks_skip_coarser_positions() {
        let ruler = Rect::new(0.0, 0.0, 100.0, 10.0);
        let ticks = SliderTicks {
            main: Some(Tick::new(50.0)),
            half: Some(Tick::new(25.0)),
            subhalf: Some(Tick::new(10.0)),
        };
        let pos = tick_positions(ruler, Orientation::Horizontal, &payload(0.0, 100.0, 1.0), &ticks);
        assert_eq!(pos.main, vec![0.0, 50.0, 100.0]);
        assert_eq!(pos.half, vec![25.0, 75.0]);
        assert_eq!(pos.subhalf.len(), 11 - 3, "0, 50 and 100 are already main ticks");

        let line = tick_line(TickKind::Main, &Tick::new(50.0), ruler, Orientation::Horizontal, 50.0);
        assert_eq!(line, Line::new((50.0, 5.0), (50.0, 30.0)));
        let both = tick_line(
            TickKind::Half,
            &Tick::new(25.0).on(TickDirection::Both),
            ruler,
            Orientation::Horizontal,
            25.0,
        );
        assert_eq!(both, Line::new((25.0, -15.0), (25.0, 25.0)));
    }

    #[test]
    fn slider_draws_tick_lines() {
        let mut ctx = Context::new();
        let mut a = attr(payload(0.0, 100.0, 1.0));
        a.ticks = Some(SliderTicks {
            main: Some(Tick::new(50.0)),
            half: Some(Tick::new(25.0)),
            subhalf: None,
        });
        let s = Slider::new(&mut ctx, None, &a).unwrap();
        assert_eq!(ctx.scene.children_of(s.ticks_group()).len(), 5);
        s.draw_ticks(&mut ctx.scene);
        assert_eq!(ctx.scene.children_of(s.ticks_group()).len(), 5, "redraw replaces");
    }

    #[test]
    fn vertical_filler_runs_from_pin_to_bottom() {
        let mut ctx = Context::new();
        let mut a = attr(payload(0.0, 100.0, 10.0));
        a.orientation = Orientation::Vertical;
        a.ruler = BackgroundStyle {
            width: 10.0,
            height: 200.0,
            position: Point::new(0.0, 0.0),
            ..BackgroundStyle::default()
        };
        let mut s = Slider::new(&mut ctx, None, &a).unwrap();
        s.set_value(&mut ctx.scene, 30.0);
        let pin = ctx.scene.bbox(s.pin()).unwrap().center();
        assert!((pin.y - 140.0).abs() < 1e-9);
        assert!((pin.x - 5.0).abs() < 1e-9);
        let filler = s.filler().bbox(&ctx.scene);
        assert!((filler.y0 - 140.0).abs() < 1e-9);
        assert!((filler.height() - 60.0).abs() < 1e-9);
    }
}
