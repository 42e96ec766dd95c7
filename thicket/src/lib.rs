// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket: multi-pointer selection tracking for scrollable lists.
//!
//! ## Overview
//!
//! Thicket lets a user select one or more items in a scrollable list with
//! touch gestures, mouse band selection, and click/long-press, while keeping
//! one canonical selection consistent across asynchronous data updates. It
//! is UI-toolkit agnostic: the host translates its native pointer events
//! into [`PointerEvent`]s and implements a handful of capability traits
//! ([`KeyProvider`], [`ItemDetailsLookup`], and optionally the layout and
//! feedback surfaces for drags and bands); everything between those seams —
//! tool-type routing, event filtering, the range/provisional selection
//! engine, drag and band helpers, and synchronized gesture interruption —
//! lives in the member crates and is wired here by [`TrackerBuilder`].
//!
//! The pipeline, end to end: raw pointer events → tool-type routers and
//! event filters → the motion input handler (or gesture/band helper) for
//! the originating device class → mutations on the [`SelectionTracker`] →
//! fan-out to [`SelectionObserver`]s → the host's adapter re-binds affected
//! rows.
//!
//! ## Example
//!
//! A minimal host: a five-row list where every row selects on tap, and a
//! toy recognizer that classifies every lift as a tap (real hosts plug in
//! their platform's recognizer).
//!
//! ```
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use thicket::gesture_event::{GestureDetector, GestureListener, GestureRouter};
//! use thicket::{
//!     AccessScope, ItemDetails, ItemDetailsLookup, KeyProvider, PointerAction, PointerEvent,
//!     ToolType, TrackerBuilder,
//! };
//!
//! const LABELS: &[&str] = &["a", "b", "c", "d", "e"];
//!
//! // Five rows, each 10 units tall; the whole row is a selection hot-spot.
//! struct Rows;
//!
//! impl KeyProvider<&'static str> for Rows {
//!     fn has_access(&self, _scope: AccessScope) -> bool {
//!         true
//!     }
//!     fn key_at(&self, position: usize) -> Option<&'static str> {
//!         LABELS.get(position).copied()
//!     }
//!     fn position_of(&self, key: &&'static str) -> Option<usize> {
//!         LABELS.iter().position(|l| l == key)
//!     }
//! }
//!
//! impl ItemDetailsLookup<&'static str> for Rows {
//!     fn item_details(&self, event: &PointerEvent) -> Option<ItemDetails<&'static str>> {
//!         let position = (event.position.y / 10.0) as usize;
//!         LABELS.get(position).map(|label| ItemDetails {
//!             position,
//!             key: Some(*label),
//!             in_selection_hotspot: true,
//!             in_drag_region: false,
//!         })
//!     }
//! }
//!
//! struct TapOnLift(Rc<GestureRouter>);
//!
//! impl GestureDetector for TapOnLift {
//!     fn handle(&self, event: &PointerEvent) -> bool {
//!         event.is_up() && self.0.on_single_tap_up(event)
//!     }
//! }
//!
//! let rows = Rc::new(Rows);
//! let pipeline = TrackerBuilder::new("demo", rows.clone(), rows)
//!     .build(|router| Rc::new(TapOnLift(router)));
//!
//! // Tap the second row.
//! let at = Point::new(2.0, 15.0);
//! pipeline.dispatch(&PointerEvent::new(PointerAction::Down, ToolType::Finger, at));
//! pipeline.dispatch(&PointerEvent::new(PointerAction::Up, ToolType::Finger, at));
//! assert!(pipeline.tracker().is_selected(&"b"));
//! ```
//!
//! ## Crates
//!
//! - [`thicket_selection`] — selection state, tracker, range/provisional
//!   engine, observers, persistence.
//! - [`thicket_events`] — pointer event model, routing, filters, reset
//!   manager, operation monitor.
//! - [`thicket_input`] — touch and mouse motion input handlers.
//! - [`thicket_gesture`] — drag and band selection helpers, auto-scroll.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;

pub use builder::{SelectionPipeline, TrackerBuilder};

pub use kurbo;

pub use thicket_events::{
    Buttons, EventDispatcher, EventHandler, Modifiers, OperationMonitor, PointerAction,
    PointerEvent, ResetManager, Resettable, ToolType,
};
/// Classified-gesture plumbing: the recognizer seam and its router.
pub use thicket_events::gesture as gesture_event;
pub use thicket_gesture::{
    AutoScroller, BandHost, BandPredicate, EdgeAutoScroller, EmptyArea, ListDelegate,
    NonDraggableArea, ScrollHost,
};
pub use thicket_input::{
    ContextClickListener, DragInitiatedListener, FocusDelegate, ItemActivatedListener, ItemDetails,
    ItemDetailsLookup,
};
pub use thicket_selection::{
    AccessScope, InstanceState, KeyProvider, SelectAnything, SelectSingleAnything, Selection,
    SelectionObserver, SelectionPredicate, SelectionTracker,
};
pub use thicket_selection::bridge::{ItemChangeNotifier, SELECTION_CHANGED_MARKER};
