// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label whose text is edited in place through a host input overlay.
//!
//! The textbox does not embed an input element itself. [`Textbox::begin_edit`]
//! hides the label and returns an [`EditRequest`] describing where the host
//! should place its native input; the host then reports the outcome through
//! [`Textbox::key`] or [`Textbox::blur`].

use kurbo::{Point, Rect, Vec2};
use tds_event_state::press::{DoubleClick, LongPress};
use tds_scene::{NodeId, NodeKind, Tree};

use crate::context::{Context, WidgetId};
use crate::event::{Emitter, TextboxEvent};
use crate::label::{Label, LabelAttr};
use crate::style::BLANK;

/// Margin of the input overlay around the title.
const EDIT_MARGIN: f64 = 3.0;

/// Extra size of the input overlay over the label.
const EDIT_GROWTH: f64 = 20.0;

/// Kind of native input requested from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputType {
    /// Free text.
    #[default]
    Text,
    /// Numeric input.
    Number,
}

/// Keys the edit session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Commit the input.
    Enter,
    /// Dismiss the input.
    Escape,
    /// Anything else.
    Other,
}

/// Where and how the host should show its input overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct EditRequest {
    /// Overlay rectangle in root coordinates.
    pub rect: Rect,
    /// Initial input value.
    pub value: String,
    /// Input kind.
    pub input_type: InputType,
}

/// Attributes of a textbox.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextboxAttr {
    /// The displayed label.
    pub label: LabelAttr,
    /// Input kind.
    pub input_type: InputType,
}

/// An editable label.
#[derive(Debug)]
pub struct Textbox {
    label: Label,
    input_type: InputType,
    editing: bool,
    long_press: LongPress<()>,
    double_click: DoubleClick<()>,
    events: Emitter<TextboxEvent>,
}

impl Textbox {
    /// Build a textbox on top of `parent`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &TextboxAttr) -> Self {
        Self {
            label: Label::with_kind(ctx, parent, &attr.label, NodeKind::Textbox),
            input_type: attr.input_type,
            editing: false,
            long_press: LongPress::new(),
            double_click: DoubleClick::new(),
            events: Emitter::new(),
        }
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.label.id()
    }

    /// The textbox group.
    pub fn group(&self) -> NodeId {
        self.label.group()
    }

    /// The displayed label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Input kind.
    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    /// Whether an edit session is open.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<TextboxEvent> {
        &mut self.events
    }

    /// Displayed string.
    pub fn value<'a>(&self, tree: &'a Tree) -> &'a str {
        self.label.value(tree)
    }

    /// Replace the displayed string without an edit session.
    pub fn set_value(&mut self, tree: &mut Tree, value: &str) {
        self.label.set_value(tree, value);
    }

    /// Open an edit session: hide the label and describe the input overlay.
    pub fn begin_edit(&mut self, tree: &mut Tree) -> EditRequest {
        let title = self.label.title().bbox(tree);
        let size = self.label.bbox(tree).size();
        let rect = Rect::from_origin_size(
            Point::new(title.x0 - EDIT_MARGIN, title.y0 - EDIT_MARGIN),
            (size.width + EDIT_GROWTH, size.height + EDIT_GROWTH),
        );
        let value = match self.label.value(tree) {
            BLANK => String::new(),
            v => v.to_owned(),
        };
        self.label.hide(tree);
        self.editing = true;
        tracing::debug!(target: "tds_widgets::textbox", id = %self.id(), "edit session opened");
        self.events
            .emit(TextboxEvent::ChangingStart { textbox: self.id() });
        EditRequest {
            rect,
            value,
            input_type: self.input_type,
        }
    }

    /// Key pressed in the overlay. Returns `true` when the value was committed.
    pub fn key(&mut self, tree: &mut Tree, key: Key, input: &str) -> bool {
        match key {
            Key::Enter => self.commit(tree, input),
            Key::Escape => {
                self.reset(tree);
                false
            }
            Key::Other => false,
        }
    }

    /// Take `input` as the new value and close the session.
    ///
    /// An empty input becomes the blank placeholder for text and `0` for numbers.
    pub fn commit(&mut self, tree: &mut Tree, input: &str) -> bool {
        if !self.editing {
            return false;
        }
        let value = match (input.is_empty(), self.input_type) {
            (false, _) => input,
            (true, InputType::Text) => BLANK,
            (true, InputType::Number) => "0",
        };
        self.label.set_value(tree, value);
        self.reset(tree);
        tracing::debug!(target: "tds_widgets::textbox", id = %self.id(), value, "edit committed");
        self.events.emit(TextboxEvent::ChangingEnd {
            textbox: self.id(),
            value: value.to_owned(),
        });
        true
    }

    /// The overlay lost focus; close the session without committing.
    pub fn blur(&mut self, tree: &mut Tree) {
        self.reset(tree);
    }

    /// Close any session and show the label again.
    pub fn reset(&mut self, tree: &mut Tree) {
        self.editing = false;
        self.label.show(tree);
    }

    /// Click at `at`; the second click of a double click opens a session.
    pub fn click(&mut self, tree: &mut Tree, at: Point, timestamp: u64) -> Option<EditRequest> {
        self.double_click
            .on_click((), at, timestamp)
            .then(|| self.begin_edit(tree))
    }

    /// Touch started; hold it in place to open a session.
    pub fn touch_start(&mut self, at: Point, timestamp: u64) {
        self.long_press.on_down((), at, timestamp);
    }

    /// Touch moved; any travel beyond the slop abandons the long press.
    pub fn touch_move(&mut self, at: Point) {
        self.long_press.on_move(at);
    }

    /// Touch released.
    pub fn touch_end(&mut self) {
        self.long_press.on_up();
    }

    /// Host clock tick; opens a session once a touch has been held long enough.
    pub fn poll(&mut self, tree: &mut Tree, now: u64) -> Option<EditRequest> {
        self.long_press
            .poll(now)
            .map(|()| self.begin_edit(tree))
    }

    /// Bounding box of the label.
    pub fn bbox(&self, tree: &Tree) -> Rect {
        self.label.bbox(tree)
    }

    /// Shift the textbox.
    pub fn translate(&self, tree: &mut Tree, delta: Vec2) {
        self.label.translate(tree, delta);
    }

    /// Center the textbox on `c`.
    pub fn set_center(&self, tree: &mut Tree, c: Point) {
        tree.set_center(self.label.group(), c);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::label::BackgroundRule;
    use crate::style::{BackgroundStyle, Indents, TitleStyle};

    fn textbox(ctx: &mut Context, value: &str, input_type: InputType) -> Textbox {
        Textbox::new(
            ctx,
            None,
            &TextboxAttr {
                label: LabelAttr {
                    title: TitleStyle::with_value(value).at(Point::new(10.0, 10.0)),
                    background_rule: vec![BackgroundRule::Indent],
                    background: Some(BackgroundStyle::default()),
                    indents: Indents::new(5.0, 3.0, 5.0, 3.0),
                    position: None,
                },
                input_type,
            },
        )
    }

    #[test]
    fn begin_edit_hides_label_and_describes_overlay() {
        let mut ctx = Context::new();
        let mut tb = textbox(&mut ctx, BLANK, InputType::Text);
        let label = tb.bbox(&ctx.scene);
        let req = tb.begin_edit(&mut ctx.scene);
        assert_eq!(req.value, "", "placeholder is not handed to the input");
        assert_eq!(req.rect.origin(), Point::new(7.0, 7.0));
        assert!((req.rect.width() - (label.width() + 20.0)).abs() < 1e-9);
        assert!((req.rect.height() - (label.height() + 20.0)).abs() < 1e-9);
        assert!(!ctx.scene.is_visible(tb.group()));
        assert!(tb.is_editing());
    }

    #[test]
    fn enter_commits_and_empty_input_falls_back() {
        let mut ctx = Context::new();
        let mut text = textbox(&mut ctx, "abc", InputType::Text);
        let ends = Rc::new(RefCell::new(Vec::new()));
        let e = Rc::clone(&ends);
        text.events_mut().connect(move |ev| {
            if let TextboxEvent::ChangingEnd { value, .. } = ev {
                e.borrow_mut().push(value.clone());
            }
        });

        text.begin_edit(&mut ctx.scene);
        assert!(text.key(&mut ctx.scene, Key::Enter, "hello"));
        assert_eq!(text.value(&ctx.scene), "hello");
        assert!(ctx.scene.is_visible(text.group()));

        text.begin_edit(&mut ctx.scene);
        assert!(text.key(&mut ctx.scene, Key::Enter, ""));
        assert_eq!(text.value(&ctx.scene), BLANK);
        assert_eq!(*ends.borrow(), vec!["hello".to_owned(), BLANK.to_owned()]);

        let mut number = textbox(&mut ctx, "5", InputType::Number);
        number.begin_edit(&mut ctx.scene);
        number.key(&mut ctx.scene, Key::Enter, "");
        assert_eq!(number.value(&ctx.scene), "0");
    }

    #[test]
    fn escape_and_blur_dismiss_without_commit() {
        let mut ctx = Context::new();
        let mut tb = textbox(&mut ctx, "keep", InputType::Text);
        tb.begin_edit(&mut ctx.scene);
        assert!(!tb.key(&mut ctx.scene, Key::Escape, "lost"));
        assert_eq!(tb.value(&ctx.scene), "keep");
        assert!(!tb.is_editing());
        assert!(!tb.commit(&mut ctx.scene, "late"), "no open session");

        tb.begin_edit(&mut ctx.scene);
        tb.blur(&mut ctx.scene);
        assert!(ctx.scene.is_visible(tb.group()));
        assert_eq!(tb.value(&ctx.scene), "keep");
    }

    #[test]
    fn double_click_and_long_press_open_sessions() {
        let mut ctx = Context::new();
        let mut tb = textbox(&mut ctx, "x", InputType::Text);
        let p = Point::new(12.0, 12.0);
        assert!(tb.click(&mut ctx.scene, p, 0).is_none());
        assert!(tb.click(&mut ctx.scene, p, 300).is_some());
        tb.reset(&mut ctx.scene);

        tb.touch_start(p, 1_000);
        assert!(tb.poll(&mut ctx.scene, 1_500).is_none());
        assert!(tb.poll(&mut ctx.scene, 2_000).is_some());
        assert!(tb.poll(&mut ctx.scene, 2_500).is_none(), "fires once");
        tb.touch_end();
        tb.reset(&mut ctx.scene);

        tb.touch_start(p, 5_000);
        tb.touch_move(Point::new(40.0, 12.0));
        assert!(tb.poll(&mut ctx.scene, 7_000).is_none(), "moved away");
    }
}
