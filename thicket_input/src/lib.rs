// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Input: motion input handlers for the Thicket selection pipeline.
//!
//! ## Overview
//!
//! This crate turns classified gestures into selection operations. The two
//! handlers are pure interpreters — they hold no gesture state of their own
//! beyond the mouse handler's tap-disambiguation flags — and are selected
//! per event by the gesture router according to the originating tool:
//!
//! - [`TouchInputHandler`] — taps toggle and long-presses grow: a
//!   long-press on an unselected item selects it and can hand off to the
//!   gesture-selection helper for finger-drag range selection.
//! - [`MouseInputHandler`] — single taps focus or toggle, double taps
//!   activate, shift-taps extend the range, and right clicks produce
//!   context menus.
//!
//! Both consume the same capability seams, all implemented by the host:
//! [`ItemDetailsLookup`] (screen coordinate → item), [`FocusDelegate`], and
//! the outcome listeners in [`listeners`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod details;
pub mod focus;
mod handler;
pub mod listeners;
pub mod mouse;
pub mod touch;

pub use details::{ItemDetails, ItemDetailsLookup};
pub use focus::{FocusDelegate, NoopFocusDelegate};
pub use listeners::{
    ContextClickListener, DragInitiatedListener, ItemActivatedListener, NoopContextClickListener,
    NoopDragInitiatedListener, NoopItemActivatedListener,
};
pub use mouse::MouseInputHandler;
pub use touch::TouchInputHandler;
