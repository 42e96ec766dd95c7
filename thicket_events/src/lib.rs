// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Events: pointer event model, tool-type routing, and interruption
//! plumbing for the Thicket selection pipeline.
//!
//! ## Overview
//!
//! Pointer input reaches the selection pipeline as a stream of
//! [`PointerEvent`]s. This crate owns everything between that stream and the
//! components that interpret it:
//!
//! - [`EventDispatcher`](handler::EventDispatcher) reproduces the
//!   scrollable-view dispatch contract: handlers observe events in the
//!   intercept phase until one claims the gesture and receives the rest of
//!   it exclusively.
//! - [`EventRouter`](router::EventRouter) demultiplexes events by the
//!   originating pointer's [`ToolType`] (finger, stylus, mouse, …) to
//!   independently registered handlers, honoring the platform's
//!   disallow-intercept override: once a child claims the stream, nothing is
//!   routed until a fresh press-down.
//! - [`GestureRouter`](gesture::GestureRouter) does the same demultiplexing
//!   for *classified* gestures (tap, double tap, long-press) produced by a
//!   host-supplied [`GestureDetector`](gesture::GestureDetector);
//!   [`GestureAdapter`](gesture::GestureAdapter) feeds the detector from the
//!   raw stream and aborts it with a synthetic cancel on interruption.
//! - [`DisallowInterceptFilter`](filters::DisallowInterceptFilter) and
//!   [`EventBackstop`](filters::EventBackstop) adapt the awkward corners of
//!   platform touch semantics (interception, the post-long-press lift) into
//!   the handler contract.
//! - [`ResetManager`](reset::ResetManager) coordinates synchronized
//!   interruption: every stateful participant implements
//!   [`Resettable`](reset::Resettable), and a reset pass returns all of them
//!   to a clean state before a new gesture is routed.
//! - [`OperationMonitor`](monitor::OperationMonitor) is the shared
//!   operation-in-progress counter that keeps drag selection and band
//!   selection from running concurrently.
//!
//! Everything here is single-threaded and cooperative: handlers take `&self`
//! and keep transient state in `Cell`/`RefCell`, so a reset pass can safely
//! reach components lower on the call stack. There is no locking and nothing
//! blocks.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod filters;
pub mod gesture;
pub mod handler;
pub mod monitor;
pub mod registry;
pub mod reset;
pub mod router;

pub use event::{Buttons, Modifiers, PointerAction, PointerEvent, ToolType};
pub use handler::{EventDispatcher, EventHandler};
pub use monitor::OperationMonitor;
pub use reset::{ResetManager, Resettable};
