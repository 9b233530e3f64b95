// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed per-widget event emitters.
//!
//! Every widget owns an [`Emitter`] for its own event enum. Observers
//! register closures with [`Emitter::connect`]; the widget calls
//! [`Emitter::emit`] synchronously from its handlers. Event enums expose the
//! stable `tds-*` name through [`WidgetEvent::name`].

use std::fmt;

use tds_scene::NodeId;

use crate::context::WidgetId;

/// An event that carries a stable integration name.
pub trait WidgetEvent: fmt::Debug {
    /// The `tds-*` name of the event.
    fn name(&self) -> &'static str;
}

/// Handle returned by [`Emitter::connect`], used to disconnect a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

type Slot<E> = Box<dyn FnMut(&E)>;

/// Synchronous observer list for events of type `E`.
pub struct Emitter<E> {
    slots: Vec<(ConnectionId, Slot<E>)>,
    next: u64,
    blocked: bool,
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("connections", &self.slots.len())
            .field("blocked", &self.blocked)
            .finish_non_exhaustive()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next: 0,
            blocked: false,
        }
    }
}

impl<E: WidgetEvent> Emitter<E> {
    /// Create an emitter with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slot invoked for every emitted event.
    pub fn connect(&mut self, slot: impl FnMut(&E) + 'static) -> ConnectionId {
        let id = ConnectionId(self.next);
        self.next += 1;
        self.slots.push((id, Box::new(slot)));
        id
    }

    /// Remove a slot; returns whether it was connected.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(c, _)| *c != id);
        self.slots.len() != before
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.len()
    }

    /// Suppress emission while `blocked` is set.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Whether emission is suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Invoke every connected slot with `event`, in connection order.
    pub fn emit(&mut self, event: E) {
        if self.blocked {
            tracing::trace!(target: "tds_widgets::event", name = event.name(), "emitter blocked, skipping emit");
            return;
        }
        tracing::trace!(
            target: "tds_widgets::event",
            name = event.name(),
            connection_count = self.slots.len(),
            "emitting event"
        );
        for (_, slot) in &mut self.slots {
            slot(&event);
        }
    }
}

/// Events of a diagram item.
#[derive(Clone, Debug, PartialEq)]
pub enum MItemEvent {
    /// The item became selected through a pointer press.
    DirectSelect {
        /// The item's group node.
        item: NodeId,
    },
    /// A drag started while the item was inside a jail.
    LeaveJail {
        /// The item's group node.
        item: NodeId,
        /// The jail the item was lifted from.
        jail: NodeId,
    },
}

impl WidgetEvent for MItemEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::DirectSelect { .. } => "tds-mitem-directSelect",
            Self::LeaveJail { .. } => "tds-mitem-leavejail",
        }
    }
}

/// Events of a diagram item container.
#[derive(Clone, Debug, PartialEq)]
pub enum JailEvent {
    /// The jail became selected through a pointer press.
    DirectSelect {
        /// The jail's group node.
        jail: NodeId,
    },
    /// A diagram item was added to the jail.
    HasNewMItem {
        /// The jail's group node.
        jail: NodeId,
        /// The added item's group node.
        item: NodeId,
    },
}

impl WidgetEvent for JailEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::DirectSelect { .. } => "tds-mitemjail-directSelect",
            Self::HasNewMItem { .. } => "tds-mitemjail-hasnewmitem",
        }
    }
}

/// Events of a combobox.
#[derive(Clone, Debug, PartialEq)]
pub enum ComboboxEvent {
    /// The backing list was shown.
    ShowList,
    /// The backing list was hidden.
    HideList,
    /// A list item was picked as the current selection.
    ItemSelected {
        /// Index of the item in the list.
        index: usize,
    },
}

impl WidgetEvent for ComboboxEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ShowList => "tds-combobox-showlist",
            Self::HideList => "tds-combobox-hidelist",
            Self::ItemSelected { .. } => "tds-combobox-itemselected",
        }
    }
}

/// Events of a list.
#[derive(Clone, Debug, PartialEq)]
pub enum ListEvent {
    /// A pointer was pressed on an item.
    MouseDown {
        /// Index of the item.
        index: usize,
        /// The item's group node.
        item: NodeId,
    },
}

impl WidgetEvent for ListEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::MouseDown { .. } => "tds-list-mousedown",
        }
    }
}

/// Events of a slider.
#[derive(Clone, Debug, PartialEq)]
pub enum SliderEvent {
    /// The payload value changed.
    ValueChanged {
        /// The slider.
        slider: WidgetId,
        /// New quantized value.
        value: f64,
    },
}

impl WidgetEvent for SliderEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ValueChanged { .. } => "tds-slider-valueChanged",
        }
    }
}

/// Events of an inline-editable label.
#[derive(Clone, Debug, PartialEq)]
pub enum TextboxEvent {
    /// An edit session started.
    ChangingStart {
        /// The textbox.
        textbox: WidgetId,
    },
    /// An edit session committed a new value.
    ChangingEnd {
        /// The textbox.
        textbox: WidgetId,
        /// The committed value.
        value: String,
    },
}

impl WidgetEvent for TextboxEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ChangingStart { .. } => "tds-textbox-changingStart",
            Self::ChangingEnd { .. } => "tds-textbox-changingEnd",
        }
    }
}

/// Events of a multi-row text area.
#[derive(Clone, Debug, PartialEq)]
pub enum TextareaEvent {
    /// The text was replaced through an edit session.
    ValueChanged {
        /// The text area.
        textarea: WidgetId,
        /// The new raw value.
        value: String,
    },
}

impl WidgetEvent for TextareaEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ValueChanged { .. } => "tds-textarea-valuechanged",
        }
    }
}
