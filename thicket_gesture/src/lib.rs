// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Gesture: drag and band selection helpers.
//!
//! ## Overview
//!
//! Two helpers drive continuous selection gestures against the tracker's
//! provisional protocol:
//!
//! - [`GestureSelectionHelper`](drag::GestureSelectionHelper) — finger-drag
//!   range selection. Armed by the touch input handler's long-press, it
//!   extends the provisional range to the item under the pointer on every
//!   move, merges on lift, and discards on cancel.
//! - [`BandSelectionHelper`](band::BandSelectionHelper) — mouse rubber-band
//!   selection. Anchors a rectangle at the first permitted primary-button
//!   drag, recomputes the covered key set from visible item bounds on every
//!   extension, merges on release.
//!
//! Both hold the shared
//! [`OperationMonitor`](thicket_events::OperationMonitor) while live, which
//! is how each refuses to start while the other is mid-gesture, and both
//! feed an [`AutoScroller`](autoscroll::AutoScroller) so a drag near the
//! viewport edge keeps the list moving.
//! [`PointerDragInterceptor`](interceptor::PointerDragInterceptor) sits in
//! front of the band helper and peels off drags that belong to the host's
//! drag-and-drop machinery.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod autoscroll;
pub mod band;
pub mod drag;
pub mod interceptor;

pub use autoscroll::{AutoScroller, EdgeAutoScroller, NoopAutoScroller, ScrollHost};
pub use band::{BandHost, BandPredicate, BandSelectionHelper, EmptyArea, NonDraggableArea};
pub use drag::{GestureSelectionHelper, ListDelegate};
pub use interceptor::PointerDragInterceptor;
