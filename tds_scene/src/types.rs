// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, kinds, shapes and styles.

use alloc::string::String;
use kurbo::{BezPath, Circle, Line, Point, Rect};

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility, picking and drag participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (painted, counted in its parent's bounding box).
        const VISIBLE   = 0b0000_0001;
        /// Node receives pointer events.
        const PICKABLE  = 0b0000_0010;
        /// Node accepts drag gestures from the host.
        const DRAGGABLE = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Role of a node inside the widget toolkit.
///
/// Containers switch on this tag to tell diagram items, jails and separators
/// apart from other children instead of testing concrete widget types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Untagged node (plain shape or helper group).
    #[default]
    Plain,
    /// Label group (title plus optional background).
    Label,
    /// Text node of a label or list.
    Title,
    /// Backing rectangle of a label.
    Background,
    /// Separator line inside a list.
    Separator,
    /// Row of a list.
    ListItem,
    /// Transparent overlay of a list row receiving pointer events.
    Foreground,
    /// Vertical list group.
    List,
    /// Combobox group.
    Combobox,
    /// Slider group.
    Slider,
    /// Group holding slider tick lines.
    SliderTicks,
    /// Inline-editable label.
    Textbox,
    /// Multi-row text area group.
    Textarea,
    /// Single wrapped row of a text area.
    TextareaRow,
    /// Draggable, grid-snapping diagram item.
    MItem,
    /// Small tag attached to the side of a diagram item.
    Mark,
    /// Resizable container of diagram items.
    MItemJail,
    /// Body rectangle of a jail.
    JailBody,
    /// Header text area of a jail.
    JailHeader,
    /// Collapse toggle of a jail.
    JailDots,
    /// Resize handle of a jail.
    JailPin,
}

/// Font weight of a text node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    /// `normal`.
    #[default]
    Normal,
    /// `bold`.
    Bold,
    /// `bolder`.
    Bolder,
    /// `lighter`.
    Lighter,
    /// Numeric weight (100..=900).
    Numeric(u16),
    /// `inherit`.
    Inherit,
}

/// Font description used to measure and paint text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    /// Font family name.
    pub family: String,
    /// Font size in logical pixels.
    pub size: f64,
    /// Font weight.
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: String::from("Menlo"),
            size: 12.0,
            weight: FontWeight::Normal,
        }
    }
}

/// Fill paint.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fill {
    /// CSS-like color string.
    pub color: String,
    /// Optional opacity in `0.0..=1.0`.
    pub opacity: Option<f64>,
}

impl Fill {
    /// Opaque fill of the given color.
    pub fn color(color: &str) -> Self {
        Self {
            color: String::from(color),
            opacity: None,
        }
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Stroke paint.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// CSS-like color string.
    pub color: String,
    /// Stroke width.
    pub width: Option<f64>,
    /// Optional opacity in `0.0..=1.0`.
    pub opacity: Option<f64>,
    /// Dash pattern such as `"5 5"`.
    pub dasharray: Option<String>,
}

impl Stroke {
    /// Stroke of the given color with default width.
    pub fn color(color: &str) -> Self {
        Self {
            color: String::from(color),
            ..Self::default()
        }
    }

    /// Set the width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the dash pattern.
    pub fn with_dasharray(mut self, dasharray: &str) -> Self {
        self.dasharray = Some(String::from(dasharray));
        self
    }
}

/// Paint attributes of a node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Fill, if any.
    pub fill: Option<Fill>,
    /// Stroke, if any.
    pub stroke: Option<Stroke>,
}

/// Text content of a node, positioned by the top-left corner of its box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    /// Top-left corner of the text box.
    pub origin: Point,
    /// The string.
    pub value: String,
    /// Font used for measuring and painting.
    pub font: Font,
}

/// Geometry carried by a node. All coordinates are in root space.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// No own geometry; bounds derive from visible children.
    Group,
    /// Rectangle with corner radius.
    Rect {
        /// Outline.
        rect: Rect,
        /// Corner radius.
        radius: f64,
    },
    /// Circle.
    Circle(Circle),
    /// Straight line segment.
    Line(Line),
    /// Arbitrary path.
    Path(BezPath),
    /// Single line of text.
    Text(TextShape),
}

impl Shape {
    /// Whether the shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Widget role tag.
    pub kind: NodeKind,
    /// Own geometry.
    pub shape: Shape,
    /// Paint attributes.
    pub style: Style,
    /// Visibility, picking and drag flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            kind: NodeKind::Plain,
            shape: Shape::Group,
            style: Style::default(),
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// A group node with the given role.
    pub fn group(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A node with the given role and shape.
    pub fn shape(kind: NodeKind, shape: Shape) -> Self {
        Self {
            kind,
            shape,
            ..Self::default()
        }
    }

    /// Set the paint attributes.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
}
