// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TDS Event State: pointer gesture state machines for widgets.
//!
//! This crate contains small, focused state machines that turn raw pointer
//! events into widget-level gestures. They are independent of the scene tree
//! and generic over the target key type.
//!
//! ## Modules
//!
//! - [`drag`]: start/move/end drags yielding the box a target would occupy
//!   if it followed the pointer.
//! - [`press`]: long press (polled with host timestamps) and double click.
//!
//! ## Design
//!
//! Each helper is deliberately small and composable: the host calls the state
//! machine from its event handlers and acts on the returned value. Nothing
//! here schedules timers or dispatches events.

#![no_std]

extern crate alloc;

pub mod drag;
pub mod press;
