// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tool-type event router.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use crate::event::{PointerEvent, ToolType};
use crate::handler::{EventHandler, NoopEventHandler};
use crate::registry::ToolHandlerRegistry;
use crate::reset::Resettable;

/// Routes pointer events to the handler registered for the originating
/// pointer's [`ToolType`], with a no-op fallback for unregistered tools.
///
/// The router owns the *disallow intercept* latch for its delegates: once a
/// child raises the flag, nothing is routed until a fresh press-down arrives.
/// A move or a lift does not clear the latch; only the start of a new gesture
/// does.
pub struct EventRouter {
    delegates: RefCell<ToolHandlerRegistry<Rc<dyn EventHandler>>>,
    disallow_intercept: Cell<bool>,
}

impl EventRouter {
    /// Create a router with no registered delegates.
    pub fn new() -> Self {
        Self {
            delegates: RefCell::new(ToolHandlerRegistry::new(Rc::new(NoopEventHandler))),
            disallow_intercept: Cell::new(false),
        }
    }

    /// Register `delegate` for events originating from `tool`.
    ///
    /// # Panics
    ///
    /// Panics if a delegate was already registered for `tool`.
    pub fn set(&self, tool: ToolType, delegate: Rc<dyn EventHandler>) {
        self.delegates.borrow_mut().set(tool, delegate);
    }

    fn delegate_for(&self, event: &PointerEvent) -> Rc<dyn EventHandler> {
        // Clone out of the registry so the borrow does not span the
        // delegate call (delegates may re-enter the router via a reset).
        self.delegates.borrow().get(event.tool).clone()
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for EventRouter {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if self.disallow_intercept.get() && event.is_down() {
            self.disallow_intercept.set(false);
        }
        if self.disallow_intercept.get() {
            return false;
        }
        self.delegate_for(event).on_intercept(event)
    }

    fn on_event(&self, event: &PointerEvent) {
        if !self.disallow_intercept.get() {
            self.delegate_for(event).on_event(event);
        }
    }

    fn on_disallow_intercept(&self, disallow: bool) {
        // Latch on raise only; release happens via press-down or reset.
        if disallow {
            self.disallow_intercept.set(true);
        }
    }
}

impl Resettable for EventRouter {
    fn is_reset_required(&self) -> bool {
        self.disallow_intercept.get()
    }

    fn reset(&self) {
        self.disallow_intercept.set(false);
    }
}

impl core::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventRouter")
            .field("disallow_intercept", &self.disallow_intercept.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerAction;
    use alloc::vec::Vec;
    use kurbo::Point;

    struct Probe {
        seen: RefCell<Vec<PointerAction>>,
        claim: bool,
    }

    impl Probe {
        fn new(claim: bool) -> Rc<Self> {
            Rc::new(Self {
                seen: RefCell::new(Vec::new()),
                claim,
            })
        }
    }

    impl EventHandler for Probe {
        fn on_intercept(&self, event: &PointerEvent) -> bool {
            self.seen.borrow_mut().push(event.action);
            self.claim
        }
    }

    fn ev(action: PointerAction, tool: ToolType) -> PointerEvent {
        PointerEvent::new(action, tool, Point::ZERO)
    }

    #[test]
    fn routes_by_tool_type() {
        let router = EventRouter::new();
        let finger = Probe::new(false);
        let mouse = Probe::new(false);
        router.set(ToolType::Finger, finger.clone());
        router.set(ToolType::Mouse, mouse.clone());

        router.on_intercept(&ev(PointerAction::Down, ToolType::Finger));
        router.on_intercept(&ev(PointerAction::Down, ToolType::Mouse));
        router.on_intercept(&ev(PointerAction::Down, ToolType::Stylus)); // falls to no-op

        assert_eq!(*finger.seen.borrow(), [PointerAction::Down]);
        assert_eq!(*mouse.seen.borrow(), [PointerAction::Down]);
    }

    #[test]
    fn delegate_claim_propagates() {
        let router = EventRouter::new();
        router.set(ToolType::Finger, Probe::new(true));
        assert!(router.on_intercept(&ev(PointerAction::Move, ToolType::Finger)));
        assert!(!router.on_intercept(&ev(PointerAction::Move, ToolType::Mouse)));
    }

    #[test]
    fn disallow_suppresses_until_fresh_press_down() {
        let router = EventRouter::new();
        let finger = Probe::new(true);
        router.set(ToolType::Finger, finger.clone());

        router.on_disallow_intercept(true);
        assert!(router.is_reset_required());

        // Moves and lifts stay suppressed and never clear the latch.
        assert!(!router.on_intercept(&ev(PointerAction::Move, ToolType::Finger)));
        assert!(!router.on_intercept(&ev(PointerAction::Up, ToolType::Finger)));
        assert!(finger.seen.borrow().is_empty());

        // Raising with `false` does not release the latch either.
        router.on_disallow_intercept(false);
        assert!(!router.on_intercept(&ev(PointerAction::Move, ToolType::Finger)));

        // A fresh press-down clears it and routes again.
        assert!(router.on_intercept(&ev(PointerAction::Down, ToolType::Finger)));
        assert_eq!(*finger.seen.borrow(), [PointerAction::Down]);
        assert!(!router.is_reset_required());
    }

    #[test]
    fn reset_clears_the_latch() {
        let router = EventRouter::new();
        router.on_disallow_intercept(true);
        router.reset();
        assert!(!router.is_reset_required());
    }

    #[test]
    fn suppressed_router_drops_exclusive_events_too() {
        let router = EventRouter::new();
        let finger = Probe::new(false);
        router.set(ToolType::Finger, finger.clone());
        router.on_disallow_intercept(true);
        router.on_event(&ev(PointerAction::Move, ToolType::Finger));
        assert!(finger.seen.borrow().is_empty());
    }
}
