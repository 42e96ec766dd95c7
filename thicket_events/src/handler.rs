// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event handler contract and the dispatcher that drives it.
//!
//! Handlers participate in a two-phase protocol modeled on scrollable-view
//! touch dispatch:
//!
//! 1. **Intercept phase**: every handler sees each event via
//!    [`EventHandler::on_intercept`] until one returns `true`, claiming the
//!    gesture.
//! 2. **Exclusive phase**: the claiming handler alone receives
//!    [`EventHandler::on_event`] — starting with the claiming event itself —
//!    until the pointer lifts or the gesture is cancelled.
//!
//! A child component that wants exclusive control of the pointer stream (a
//! nested scroller, say) raises *disallow intercept*; the dispatcher fans that
//! out to every handler via [`EventHandler::on_disallow_intercept`]. Handlers
//! honoring the flag suppress themselves until a fresh press-down arrives.
//!
//! Handlers take `&self` and keep their transient state in `Cell`/`RefCell`:
//! the whole pipeline is single-threaded and cooperative, and reset passes may
//! legitimately touch a handler that is lower on the call stack.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use kurbo::Point;
use smallvec::SmallVec;

use crate::event::{PointerAction, PointerEvent, ToolType};

/// A participant in pointer-event dispatch.
pub trait EventHandler {
    /// Observe `event` during the intercept phase. Return `true` to claim the
    /// rest of the gesture for this handler.
    fn on_intercept(&self, event: &PointerEvent) -> bool;

    /// Handle `event` after this handler has claimed the gesture.
    fn on_event(&self, event: &PointerEvent) {
        let _ = event;
    }

    /// A child has requested that interception be disallowed (or released;
    /// handlers in this crate latch only on `true`).
    fn on_disallow_intercept(&self, disallow: bool) {
        let _ = disallow;
    }
}

/// A handler that never intercepts and never reacts. Registry default.
#[derive(Debug, Default)]
pub struct NoopEventHandler;

impl EventHandler for NoopEventHandler {
    fn on_intercept(&self, _event: &PointerEvent) -> bool {
        false
    }
}

/// Drives an ordered list of [`EventHandler`]s through the two-phase
/// dispatch protocol.
///
/// The dispatcher stands in for the host view's listener plumbing: hosts call
/// [`EventDispatcher::dispatch`] with each translated pointer event and
/// [`EventDispatcher::set_disallow_intercept`] when a nested scrolling child
/// claims the stream. Handlers are attached and detached explicitly; there is
/// no implicit cleanup.
/// The handler currently owning a gesture, plus the tool that started it
/// (needed to synthesize a routable cancel if the gesture is stolen).
#[derive(Copy, Clone, Debug)]
struct ActiveClaim {
    index: usize,
    tool: ToolType,
}

pub struct EventDispatcher {
    handlers: RefCell<SmallVec<[Rc<dyn EventHandler>; 4]>>,
    active: Cell<Option<ActiveClaim>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no handlers attached.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(SmallVec::new()),
            active: Cell::new(None),
        }
    }

    /// Attach `handler` after all currently attached handlers.
    ///
    /// Attachment order is visible: earlier handlers get the first chance to
    /// claim a gesture.
    pub fn add_handler(&self, handler: Rc<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Detach a previously attached handler (identity comparison). Any
    /// in-flight gesture claim is dropped.
    pub fn remove_handler(&self, handler: &Rc<dyn EventHandler>) {
        self.handlers
            .borrow_mut()
            .retain(|h| !Rc::ptr_eq(h, handler));
        self.active.set(None);
    }

    /// Dispatch one pointer event. Returns `true` if a handler owned it.
    pub fn dispatch(&self, event: &PointerEvent) -> bool {
        let terminal = event.is_up() || event.is_cancel();

        if let Some(claim) = self.active.get() {
            let handler = self.handlers.borrow().get(claim.index).cloned();
            if terminal {
                self.active.set(None);
            }
            if let Some(handler) = handler {
                handler.on_event(event);
                return true;
            }
            return false;
        }

        // Snapshot so a handler reacting to the event can attach/detach
        // without invalidating the iteration.
        let snapshot: SmallVec<[Rc<dyn EventHandler>; 4]> =
            self.handlers.borrow().iter().cloned().collect();
        for (index, handler) in snapshot.iter().enumerate() {
            if handler.on_intercept(event) && !event.is_cancel() {
                if !terminal {
                    self.active.set(Some(ActiveClaim {
                        index,
                        tool: event.tool,
                    }));
                }
                // The claiming event is also the first exclusively
                // delivered one.
                handler.on_event(event);
                return true;
            }
        }
        false
    }

    /// Fan a disallow-intercept request out to every attached handler.
    ///
    /// Raising the flag voids any in-flight claim: the claiming handler is
    /// sent a synthetic cancel (carrying the claiming tool, so routers can
    /// still route it) before the latches go up, mirroring the platform's
    /// behavior when a nested scrolling child steals the stream.
    pub fn set_disallow_intercept(&self, disallow: bool) {
        if disallow {
            if let Some(claim) = self.active.take() {
                let handler = self.handlers.borrow().get(claim.index).cloned();
                if let Some(handler) = handler {
                    let cancel =
                        PointerEvent::new(PointerAction::Cancel, claim.tool, Point::ZERO);
                    handler.on_event(&cancel);
                }
            }
        }
        let snapshot: SmallVec<[Rc<dyn EventHandler>; 4]> =
            self.handlers.borrow().iter().cloned().collect();
        for handler in &snapshot {
            handler.on_disallow_intercept(disallow);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.borrow().len())
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}
