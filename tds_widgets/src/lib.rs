// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TDS Widgets: vector widgets composed on a [`tds_scene`] tree.
//!
//! Every widget owns a group node in the scene and a handful of leaves under
//! it. Widgets never paint; they mutate geometry and styles in the tree and
//! report user-visible changes through a per-widget [`Emitter`].
//!
//! - Primitives: [`Background`], [`Title`], [`Separator`].
//! - Composites: [`Label`], [`ListItem`], [`List`], [`Combobox`].
//! - Inputs: [`Slider`], [`Textbox`], [`Textarea`].
//! - Diagram items: [`MItem`] snaps to its neighbours on a grid of
//!   [`GRID_STEP`] and lands in an [`MItemJail`]; [`Board`] routes pointer
//!   input to both.
//!
//! Constructors take a [`Context`], which carries the scene tree and the
//! source of [`WidgetId`]s. Handlers take the tree directly.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use tds_widgets::{Board, Context};
//!
//! let mut ctx = Context::new();
//! let mut board = Board::new();
//! let jail = board.add_jail(&mut ctx, "Inbox", Point::new(90.0, 90.0));
//! let item = board.add_mitem(&mut ctx, "abc", Point::ZERO).unwrap();
//!
//! let tree = &mut ctx.scene;
//! board.pointer_down(tree, None, Point::new(10.0, 9.0), 0);
//! board.pointer_move(tree, None, Point::new(210.0, 209.0));
//! assert_eq!(board.pointer_up(tree, None, Point::new(210.0, 209.0)), Some(jail));
//! assert_eq!(board.jail_of(tree, item), Some(jail));
//! ```

pub mod background;
pub mod board;
pub mod combobox;
pub mod context;
pub mod error;
pub mod event;
pub mod geometry;
pub mod label;
pub mod list;
pub mod list_item;
pub mod marks;
pub mod mitem;
pub mod mitemjail;
pub mod separator;
pub mod slider;
pub mod style;
pub mod textarea;
pub mod textbox;
pub mod title;

pub use background::Background;
pub use board::{Board, BoardTarget};
pub use combobox::{Combobox, ComboboxAttr};
pub use context::{Context, IdSource, SequentialIds, WidgetId};
pub use error::{Error, Result};
pub use event::{Emitter, WidgetEvent};
pub use geometry::{GRID_STEP, SNAP_FACTOR};
pub use label::{Label, LabelAttr};
pub use list::{List, ListAttr};
pub use list_item::{ListItem, ListItemAttr};
pub use marks::{MarkSide, MarkStyle};
pub use mitem::{MItem, MItemAttr};
pub use mitemjail::{JailAttr, MItemJail};
pub use separator::{Separator, SeparatorAttr};
pub use slider::{Slider, SliderAttr};
pub use textarea::{Textarea, TextareaAttr};
pub use textbox::{Textbox, TextboxAttr};
pub use title::Title;
