// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Selection: canonical selection state for scrollable lists.
//!
//! ## Overview
//!
//! This crate owns the data half of the Thicket selection pipeline:
//!
//! - [`Selection`] — the value type exchanged with observers: a committed
//!   key set plus the provisional overlay an in-progress gesture paints
//!   ahead of its commit.
//! - [`SelectionTracker`] — one per list view; applies predicate-gated
//!   mutations, owns the range anchor and the provisional protocol, and
//!   fans out notifications to [`SelectionObserver`]s.
//! - [`SelectionPredicate`] — the host's policy for which state changes are
//!   legal; rejection is a silent no-op, never an error.
//! - [`KeyProvider`] — the host's mapping between adapter positions and
//!   stable item keys.
//! - [`InstanceState`](storage::InstanceState) — the serde-ready snapshot
//!   for persisted selection.
//! - [`install_bridge`](bridge::install_bridge) — translates per-item
//!   selection transitions into row-change notifications for the rendering
//!   layer.
//!
//! Keys are opaque to this crate: any `Clone + Eq + Hash + Debug` type the
//! host's key provider hands out. The tracker stores clones and never
//! invents keys.
//!
//! ## Provisional selection
//!
//! While a drag or band gesture is live, helpers paint an overlay through
//! the provisional protocol. The overlay is additive: committed keys are
//! unaffected, each update supersedes the last, and the gesture ends in
//! exactly one of [`SelectionTracker::merge_provisional_selection`]
//! (commit) or [`SelectionTracker::clear_provisional_selection`] (discard).
//! A discarded overlay leaves no trace in the committed selection.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bridge;
pub mod key_provider;
pub mod observer;
pub mod predicate;
mod range;
pub mod selection;
pub mod storage;
pub mod tracker;

pub use key_provider::{AccessScope, KeyProvider};
pub use observer::SelectionObserver;
pub use predicate::{SelectAnything, SelectSingleAnything, SelectionPredicate};
pub use selection::Selection;
pub use storage::InstanceState;
pub use tracker::SelectionTracker;
