// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event filters that adapt platform touch semantics into the handler
//! contract.
//!
//! [`DisallowInterceptFilter`] gives a single wrapped delegate the same
//! disallow-intercept protection an [`EventRouter`](crate::router::EventRouter)
//! gives its registry. [`EventBackstop`] absorbs the stray lift event that
//! trails a completed long-press, so tap handlers downstream do not interpret
//! it as a click.

use alloc::rc::Rc;
use core::cell::Cell;

use crate::event::PointerEvent;
use crate::handler::EventHandler;
use crate::reset::Resettable;

/// Wraps one [`EventHandler`], suppressing it while disallow-intercept is
/// latched. The latch clears on a fresh press-down or a reset, never on a
/// move or lift.
pub struct DisallowInterceptFilter {
    delegate: Rc<dyn EventHandler>,
    disallow_intercept: Cell<bool>,
}

impl DisallowInterceptFilter {
    /// Wrap `delegate`.
    pub fn new(delegate: Rc<dyn EventHandler>) -> Self {
        Self {
            delegate,
            disallow_intercept: Cell::new(false),
        }
    }
}

impl EventHandler for DisallowInterceptFilter {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if self.disallow_intercept.get() && event.is_down() {
            self.disallow_intercept.set(false);
        }
        if self.disallow_intercept.get() {
            return false;
        }
        self.delegate.on_intercept(event)
    }

    fn on_event(&self, event: &PointerEvent) {
        if !self.disallow_intercept.get() {
            self.delegate.on_event(event);
        }
    }

    fn on_disallow_intercept(&self, disallow: bool) {
        if disallow {
            self.disallow_intercept.set(true);
        }
    }
}

impl Resettable for DisallowInterceptFilter {
    fn is_reset_required(&self) -> bool {
        self.disallow_intercept.get()
    }

    fn reset(&self) {
        self.disallow_intercept.set(false);
    }
}

impl core::fmt::Debug for DisallowInterceptFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisallowInterceptFilter")
            .field("disallow_intercept", &self.disallow_intercept.get())
            .finish_non_exhaustive()
    }
}

/// Swallows the lift event that follows a fired long-press.
///
/// Once a long-press has been delivered, the eventual pointer lift belongs to
/// that long-press, not to whatever tap recognizer sits behind this filter.
/// The touch input handler reports the long-press via
/// [`EventBackstop::on_long_press`]; the backstop then claims the next lift
/// and resets itself.
///
/// The backstop cannot honor disallow-intercept on its own; wrap it in a
/// [`DisallowInterceptFilter`].
#[derive(Debug, Default)]
pub struct EventBackstop {
    long_press_fired: Cell<bool>,
}

impl EventBackstop {
    /// Create a backstop with no long-press pending.
    pub fn new() -> Self {
        Self {
            long_press_fired: Cell::new(false),
        }
    }

    /// Record that a long-press was delivered for the in-flight gesture.
    pub fn on_long_press(&self) {
        self.long_press_fired.set(true);
    }
}

impl EventHandler for EventBackstop {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if event.is_up() && self.long_press_fired.get() {
            self.long_press_fired.set(false);
            return true;
        }
        // A press-down that arrives with the latch still set means the lift
        // never reached us; self-heal rather than eat the coming tap.
        if event.is_down() && self.is_reset_required() {
            self.reset();
        }
        false
    }

    /// # Panics
    ///
    /// Always. Wrap the backstop in a [`DisallowInterceptFilter`]; it has no
    /// disallow semantics of its own.
    fn on_disallow_intercept(&self, _disallow: bool) {
        panic!("EventBackstop cannot honor disallow-intercept; wrap it in a DisallowInterceptFilter");
    }
}

impl Resettable for EventBackstop {
    fn is_reset_required(&self) -> bool {
        self.long_press_fired.get()
    }

    fn reset(&self) {
        self.long_press_fired.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PointerAction, ToolType};
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Point;

    fn ev(action: PointerAction) -> PointerEvent {
        PointerEvent::new(action, ToolType::Finger, Point::ZERO)
    }

    struct Probe {
        seen: RefCell<Vec<PointerAction>>,
    }

    impl EventHandler for Probe {
        fn on_intercept(&self, event: &PointerEvent) -> bool {
            self.seen.borrow_mut().push(event.action);
            false
        }
    }

    #[test]
    fn filter_suppresses_delegate_until_press_down() {
        let probe = Rc::new(Probe {
            seen: RefCell::new(Vec::new()),
        });
        let filter = DisallowInterceptFilter::new(probe.clone());

        filter.on_disallow_intercept(true);
        filter.on_intercept(&ev(PointerAction::Move));
        filter.on_intercept(&ev(PointerAction::Up));
        assert!(probe.seen.borrow().is_empty());
        assert!(filter.is_reset_required());

        filter.on_intercept(&ev(PointerAction::Down));
        assert_eq!(*probe.seen.borrow(), [PointerAction::Down]);
        assert!(!filter.is_reset_required());
    }

    #[test]
    fn filter_reset_releases_latch() {
        let probe = Rc::new(Probe {
            seen: RefCell::new(Vec::new()),
        });
        let filter = DisallowInterceptFilter::new(probe.clone());
        filter.on_disallow_intercept(true);
        filter.reset();
        filter.on_intercept(&ev(PointerAction::Move));
        assert_eq!(*probe.seen.borrow(), [PointerAction::Move]);
    }

    #[test]
    fn backstop_swallows_lift_after_long_press() {
        let backstop = EventBackstop::new();
        assert!(!backstop.on_intercept(&ev(PointerAction::Down)));
        backstop.on_long_press();
        assert!(backstop.is_reset_required());

        // Moves pass through untouched.
        assert!(!backstop.on_intercept(&ev(PointerAction::Move)));
        // The lift is claimed, once.
        assert!(backstop.on_intercept(&ev(PointerAction::Up)));
        assert!(!backstop.is_reset_required());
        assert!(!backstop.on_intercept(&ev(PointerAction::Up)));
    }

    #[test]
    fn backstop_self_heals_on_press_down() {
        let backstop = EventBackstop::new();
        backstop.on_long_press();
        // The lift never arrived (gesture was cancelled elsewhere); a new
        // press clears the stale latch instead of eating the next tap.
        assert!(!backstop.on_intercept(&ev(PointerAction::Down)));
        assert!(!backstop.is_reset_required());
        assert!(!backstop.on_intercept(&ev(PointerAction::Up)));
    }

    #[test]
    #[should_panic(expected = "wrap it in a DisallowInterceptFilter")]
    fn backstop_rejects_disallow_intercept() {
        EventBackstop::new().on_disallow_intercept(true);
    }
}
