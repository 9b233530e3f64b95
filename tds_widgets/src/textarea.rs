// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-row text block with greedy word wrap and in-place editing.

use kurbo::{Point, Rect};
use tds_scene::{Fill, LocalNode, NodeId, NodeKind, Stroke, Tree};

use crate::background::Background;
use crate::context::{Context, WidgetId};
use crate::event::{Emitter, TextareaEvent};
use crate::style::{BLANK, BackgroundStyle, TitleStyle};
use crate::textbox::{EditRequest, InputType, Key};
use crate::title::Title;

/// Share of the body width usable by a row.
const ROW_FILL: f64 = 0.97;

/// Share of the body height usable by rows.
const ROWS_FILL: f64 = 0.7;

/// Offset of the input overlay from the body corner.
const EDIT_OFFSET: f64 = 3.0;

/// Extra size of the input overlay over the body.
const EDIT_GROWTH: f64 = 20.0;

const ELLIPSIS: &str = "...";

/// Attributes of a textarea.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextareaAttr {
    /// Body rectangle.
    pub body: BackgroundStyle,
    /// Row style; its position is relative to the body corner.
    pub rows_title_style: TitleStyle,
    /// Caption; its position is relative to the body corner.
    pub header_title_style: Option<TitleStyle>,
    /// Initial text.
    pub data: String,
    /// Characters per row; derived from the body width when unset.
    pub row_len: Option<usize>,
    /// Row budget; derived from the body height when unset.
    pub max_rows: Option<usize>,
    /// Offset applied to the body position.
    pub position: Option<Point>,
    /// Open an edit session on a single click.
    pub direct_edit: bool,
}

impl Default for TextareaAttr {
    fn default() -> Self {
        Self {
            body: BackgroundStyle {
                width: 236.0,
                height: 80.0,
                fill: Fill::color("#D2D2D2"),
                stroke: Stroke::color("#999999").with_width(1.0),
                radius: 6.0,
                position: Point::ZERO,
            },
            rows_title_style: TitleStyle::with_value(BLANK).at(Point::new(10.0, 10.0)),
            header_title_style: Some(
                TitleStyle::with_value("textArea:").at(Point::new(0.0, -15.0)),
            ),
            data: BLANK.to_owned(),
            row_len: None,
            max_rows: None,
            position: None,
            direct_edit: true,
        }
    }
}

/// Split `text` into rows of at most `width` characters.
///
/// Words are packed greedily and separated by single spaces; words longer
/// than `width` are cut. Newlines always start a new row.
pub fn wordwrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_chars = 0;
        for word in line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            loop {
                let gap = usize::from(row_chars > 0);
                if row_chars + gap + word.len() <= width {
                    if gap == 1 {
                        row.push(' ');
                    }
                    row.extend(word.iter());
                    row_chars += gap + word.len();
                    break;
                }
                if row_chars > 0 {
                    rows.push(core::mem::take(&mut row));
                    row_chars = 0;
                    continue;
                }
                let rest = word.split_off(width);
                rows.push(word.iter().collect());
                word = rest;
            }
        }
        rows.push(row);
    }
    rows
}

/// A text block over a body rectangle.
#[derive(Debug)]
pub struct Textarea {
    id: WidgetId,
    group: NodeId,
    body: Background,
    header: Option<Title>,
    rows: Vec<Title>,
    row_style: TitleStyle,
    row_len: usize,
    max_rows: usize,
    value: String,
    editing: bool,
    direct_edit: bool,
    events: Emitter<TextareaEvent>,
}

impl Textarea {
    /// Build a textarea on top of `parent` and fill it with `attr.data`.
    pub fn new(ctx: &mut Context, parent: Option<NodeId>, attr: &TextareaAttr) -> Self {
        Self::with_kind(ctx, parent, attr, NodeKind::Textarea)
    }

    /// Like [`Textarea::new`] with a custom role tag on the group.
    pub fn with_kind(
        ctx: &mut Context,
        parent: Option<NodeId>,
        attr: &TextareaAttr,
        kind: NodeKind,
    ) -> Self {
        let group = ctx.scene.insert(parent, LocalNode::group(kind));
        let mut body_style = attr.body.clone();
        if let Some(p) = attr.position {
            body_style.position += p.to_vec2();
        }
        let body = Background::new(ctx, Some(group), &body_style);
        let header = attr.header_title_style.as_ref().map(|style| {
            let at = style.position + body_style.position.to_vec2();
            Title::new(ctx, Some(group), &style.clone().at(at))
        });

        let probe = if attr.rows_title_style.value.is_empty() {
            BLANK
        } else {
            attr.rows_title_style.value.as_str()
        };
        let cell = ctx.scene.measure_text(probe, &attr.rows_title_style.font);
        let row_len = attr
            .row_len
            .unwrap_or_else(|| fit(body_style.width, cell.width, ROW_FILL));
        let max_rows = attr
            .max_rows
            .unwrap_or_else(|| fit(body_style.height, cell.height, ROWS_FILL));

        let mut textarea = Self {
            id: ctx.next_id(),
            group,
            body,
            header,
            rows: Vec::new(),
            row_style: attr.rows_title_style.clone(),
            row_len: row_len.max(1),
            max_rows: max_rows.max(1),
            value: String::new(),
            editing: false,
            direct_edit: attr.direct_edit,
            events: Emitter::new(),
        };
        textarea.fill_rows(ctx, &attr.data);
        textarea
    }

    /// Widget id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The textarea group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Body rectangle.
    pub fn body(&self) -> &Background {
        &self.body
    }

    /// Caption.
    pub fn header(&self) -> Option<&Title> {
        self.header.as_ref()
    }

    /// Displayed rows, top to bottom.
    pub fn rows(&self) -> &[Title] {
        &self.rows
    }

    /// Characters per row.
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Row budget.
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// The raw text last filled in.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether an edit session is open.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Event emitter.
    pub fn events_mut(&mut self) -> &mut Emitter<TextareaEvent> {
        &mut self.events
    }

    /// Wrap `data` into rows below the existing ones, ellipsizing the last
    /// row when the budget runs out.
    pub fn fill_rows(&mut self, ctx: &mut Context, data: &str) {
        data.clone_into(&mut self.value);
        let body = self.body.bbox(&ctx.scene);
        let wrapped = wordwrap(data, self.row_len);
        let overflow = wrapped.len() > self.max_rows;
        for text in wrapped.into_iter().take(self.max_rows) {
            let style = TitleStyle {
                value: text,
                ..self.row_style.clone()
            };
            let row = Title::with_kind(ctx, Some(self.group), &style, NodeKind::TextareaRow);
            let y = match self.rows.last() {
                Some(prev) => prev.bbox(&ctx.scene).y1,
                None => body.y0 + self.row_style.position.y,
            };
            ctx.scene
                .move_to(row.node(), Point::new(body.x0 + self.row_style.position.x, y));
            self.rows.push(row);
        }
        if overflow && let Some(last) = self.rows.last() {
            let kept: Vec<char> = last.value(&ctx.scene).chars().collect();
            let cut = kept.len().saturating_sub(ELLIPSIS.len());
            let mut text: String = kept[..cut].iter().collect();
            text.push_str(ELLIPSIS);
            last.set_value(&mut ctx.scene, &text);
        }
        tracing::trace!(
            target: "tds_widgets::textarea",
            id = %self.id,
            rows = self.rows.len(),
            overflow,
            "rows filled"
        );
    }

    /// Remove every row.
    pub fn clear_rows(&mut self, tree: &mut Tree) {
        for row in self.rows.drain(..) {
            tree.remove(row.node());
        }
    }

    /// The displayed rows joined by spaces, with runs of whitespace collapsed.
    pub fn collect_string(&self, tree: &Tree) -> String {
        let joined = self
            .rows
            .iter()
            .map(|r| r.value(tree))
            .collect::<Vec<_>>()
            .join(" ");
        let mut out = String::with_capacity(joined.len());
        let mut run = String::new();
        for ch in joined.chars() {
            if ch.is_whitespace() {
                run.push(ch);
                continue;
            }
            flush_whitespace(&mut out, &mut run);
            out.push(ch);
        }
        flush_whitespace(&mut out, &mut run);
        out
    }

    /// Open an edit session: hide the body and describe the input overlay.
    pub fn begin_edit(&mut self, tree: &mut Tree) -> EditRequest {
        let body = self.body.bbox(tree);
        let rect = Rect::from_origin_size(
            Point::new(body.x0 + EDIT_OFFSET, body.y0 + EDIT_OFFSET),
            (body.width() + EDIT_GROWTH, body.height() + EDIT_GROWTH),
        );
        let value = if self.value == BLANK {
            String::new()
        } else {
            self.value.clone()
        };
        tree.hide(self.body.node());
        self.editing = true;
        tracing::debug!(target: "tds_widgets::textarea", id = %self.id, "edit session opened");
        EditRequest {
            rect,
            value,
            input_type: InputType::Text,
        }
    }

    /// Click on the textarea; opens a session when direct editing is enabled.
    pub fn click(&mut self, tree: &mut Tree) -> Option<EditRequest> {
        self.direct_edit.then(|| self.begin_edit(tree))
    }

    /// Key pressed in the overlay. Returns `true` when the text was committed.
    pub fn key(&mut self, ctx: &mut Context, key: Key, input: &str) -> bool {
        match key {
            Key::Enter => self.commit(ctx, input),
            Key::Escape => {
                self.reset(&mut ctx.scene);
                false
            }
            Key::Other => false,
        }
    }

    /// Replace the rows with `input` (blank placeholder when empty) and close
    /// the session.
    pub fn commit(&mut self, ctx: &mut Context, input: &str) -> bool {
        if !self.editing {
            return false;
        }
        self.clear_rows(&mut ctx.scene);
        let value = if input.is_empty() { BLANK } else { input };
        self.fill_rows(ctx, value);
        self.reset(&mut ctx.scene);
        self.events.emit(TextareaEvent::ValueChanged {
            textarea: self.id,
            value: value.to_owned(),
        });
        true
    }

    /// The overlay lost focus; close the session without committing.
    pub fn blur(&mut self, tree: &mut Tree) {
        self.reset(tree);
    }

    /// Close any session and show the body again.
    pub fn reset(&mut self, tree: &mut Tree) {
        self.editing = false;
        tree.show(self.body.node());
    }
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    if run.chars().nth(1).is_some() {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

/// Number of `cell`s fitting in `extent` scaled by `share`.
fn fit(extent: f64, cell: f64, share: f64) -> usize {
    if cell <= 0.0 {
        return 1;
    }
    let n = (extent / cell * share).floor();
    if n.is_finite() && n >= 1.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "n is a small positive whole number"
        )]
        let n = n as usize;
        n
    } else {
        1
    }
}
