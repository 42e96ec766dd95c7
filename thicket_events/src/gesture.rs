// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classified-gesture routing.
//!
//! Raw pointer events are turned into classified gestures (tap, double tap,
//! long-press) by a [`GestureDetector`] — a capability the host supplies;
//! this crate deliberately contains no tap-timing or slop logic. The detector
//! reports classifications to a [`GestureListener`]. [`GestureRouter`] is the
//! listener given to the detector: it forwards each classification to the
//! listener registered for the originating tool type.
//!
//! [`GestureAdapter`] is the raw-event side of the same bargain: an
//! [`EventHandler`] that feeds the detector from the intercept stream,
//! honors disallow-intercept, and aborts the detector with a synthetic
//! cancel whenever the pipeline is reset.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use crate::event::{PointerEvent, ToolType};
use crate::handler::EventHandler;
use crate::registry::ToolHandlerRegistry;
use crate::reset::Resettable;

/// Receiver of classified gestures.
///
/// All methods default to "not handled" so implementations only override the
/// classifications they care about.
pub trait GestureListener {
    /// Initial press of a gesture. Return `true` to consume.
    fn on_down(&self, event: &PointerEvent) -> bool {
        let _ = event;
        false
    }

    /// A lift that completes a single tap (may still become a double tap).
    fn on_single_tap_up(&self, event: &PointerEvent) -> bool {
        let _ = event;
        false
    }

    /// A single tap confirmed not to be the first half of a double tap.
    fn on_single_tap_confirmed(&self, event: &PointerEvent) -> bool {
        let _ = event;
        false
    }

    /// The press of the second tap of a double tap.
    fn on_double_tap(&self, event: &PointerEvent) -> bool {
        let _ = event;
        false
    }

    /// Any event (down/move/up) within an in-flight double tap.
    fn on_double_tap_event(&self, event: &PointerEvent) -> bool {
        let _ = event;
        false
    }

    /// A press held past the long-press threshold.
    fn on_long_press(&self, event: &PointerEvent) {
        let _ = event;
    }
}

/// A listener that ignores every classification. Registry default.
#[derive(Debug, Default)]
pub struct NoopGestureListener;

impl GestureListener for NoopGestureListener {}

/// Routes classified gestures to the listener registered for the event's
/// tool type.
pub struct GestureRouter {
    delegates: RefCell<ToolHandlerRegistry<Rc<dyn GestureListener>>>,
}

impl GestureRouter {
    /// Create a router with no registered listeners.
    pub fn new() -> Self {
        Self {
            delegates: RefCell::new(ToolHandlerRegistry::new(Rc::new(NoopGestureListener))),
        }
    }

    /// Register `listener` for gestures originating from `tool`.
    ///
    /// # Panics
    ///
    /// Panics if a listener was already registered for `tool`.
    pub fn register(&self, tool: ToolType, listener: Rc<dyn GestureListener>) {
        self.delegates.borrow_mut().set(tool, listener);
    }

    fn delegate_for(&self, event: &PointerEvent) -> Rc<dyn GestureListener> {
        self.delegates.borrow().get(event.tool).clone()
    }
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureListener for GestureRouter {
    fn on_down(&self, event: &PointerEvent) -> bool {
        self.delegate_for(event).on_down(event)
    }

    fn on_single_tap_up(&self, event: &PointerEvent) -> bool {
        self.delegate_for(event).on_single_tap_up(event)
    }

    fn on_single_tap_confirmed(&self, event: &PointerEvent) -> bool {
        self.delegate_for(event).on_single_tap_confirmed(event)
    }

    fn on_double_tap(&self, event: &PointerEvent) -> bool {
        self.delegate_for(event).on_double_tap(event)
    }

    fn on_double_tap_event(&self, event: &PointerEvent) -> bool {
        self.delegate_for(event).on_double_tap_event(event)
    }

    fn on_long_press(&self, event: &PointerEvent) {
        self.delegate_for(event).on_long_press(event);
    }
}

impl core::fmt::Debug for GestureRouter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureRouter").finish_non_exhaustive()
    }
}

/// The host-supplied gesture recognizer.
///
/// Implementations receive every raw pointer event reaching the
/// [`GestureAdapter`] and call back into their [`GestureListener`] (normally
/// a [`GestureRouter`]) with classifications.
///
/// `handle` may be re-entered with a synthetic cancel while one of its own
/// callbacks is still on the stack — a listener's reaction to a gesture can
/// trigger a pipeline reset. Implementations must tolerate that (keep state
/// in `Cell`s, or snapshot before calling out).
pub trait GestureDetector {
    /// Feed one raw event. Returns `true` if the detector consumed it.
    fn handle(&self, event: &PointerEvent) -> bool;
}

/// Bridges the raw intercept stream into a [`GestureDetector`].
///
/// Honors disallow-intercept with the press-down-clears-it latch, and sends
/// the detector a synthetic cancel whenever routing is cut off mid-gesture —
/// on a disallow raise and on every reset — so the detector never completes
/// a tap from a gesture the pipeline abandoned.
pub struct GestureAdapter {
    detector: Rc<dyn GestureDetector>,
    disallow_intercept: Cell<bool>,
}

impl GestureAdapter {
    /// Wrap `detector`.
    pub fn new(detector: Rc<dyn GestureDetector>) -> Self {
        Self {
            detector,
            disallow_intercept: Cell::new(false),
        }
    }

    fn send_cancel(&self) {
        self.detector.handle(&PointerEvent::cancel());
    }
}

impl EventHandler for GestureAdapter {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if self.disallow_intercept.get() && event.is_down() {
            self.disallow_intercept.set(false);
        }
        if self.disallow_intercept.get() {
            return false;
        }
        self.detector.handle(event)
    }

    fn on_disallow_intercept(&self, disallow: bool) {
        if disallow {
            self.disallow_intercept.set(true);
            self.send_cancel();
        }
    }
}

impl Resettable for GestureAdapter {
    fn is_reset_required(&self) -> bool {
        self.disallow_intercept.get()
    }

    /// Clears the latch and aborts whatever gesture the detector may have
    /// in flight, latched or not; detectors tolerate a spurious cancel.
    fn reset(&self) {
        self.disallow_intercept.set(false);
        self.send_cancel();
    }
}

impl core::fmt::Debug for GestureAdapter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureAdapter")
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

    fn ev(action: PointerAction, tool: ToolType) -> PointerEvent {
        PointerEvent::new(action, tool, Point::ZERO)
    }

    #[derive(Default)]
    struct TapProbe {
        taps: Cell<usize>,
        long_presses: Cell<usize>,
    }

    impl GestureListener for TapProbe {
        fn on_single_tap_up(&self, _event: &PointerEvent) -> bool {
            self.taps.set(self.taps.get() + 1);
            true
        }

        fn on_long_press(&self, _event: &PointerEvent) {
            self.long_presses.set(self.long_presses.get() + 1);
        }
    }

    #[test]
    fn router_routes_classifications_by_tool() {
        let router = GestureRouter::new();
        let touch = Rc::new(TapProbe::default());
        let mouse = Rc::new(TapProbe::default());
        router.register(ToolType::Finger, touch.clone());
        router.register(ToolType::Mouse, mouse.clone());

        assert!(router.on_single_tap_up(&ev(PointerAction::Up, ToolType::Finger)));
        router.on_long_press(&ev(PointerAction::Down, ToolType::Mouse));

        assert_eq!(touch.taps.get(), 1);
        assert_eq!(touch.long_presses.get(), 0);
        assert_eq!(mouse.long_presses.get(), 1);

        // Unregistered tools fall through to the no-op listener.
        assert!(!router.on_single_tap_up(&ev(PointerAction::Up, ToolType::Stylus)));
    }

    struct RecordingDetector {
        seen: RefCell<Vec<PointerAction>>,
    }

    impl RecordingDetector {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                seen: RefCell::new(Vec::new()),
            })
        }
    }

    impl GestureDetector for RecordingDetector {
        fn handle(&self, event: &PointerEvent) -> bool {
            self.seen.borrow_mut().push(event.action);
            false
        }
    }

    #[test]
    fn adapter_feeds_detector_until_disallowed() {
        let detector = RecordingDetector::new();
        let adapter = GestureAdapter::new(detector.clone());

        adapter.on_intercept(&ev(PointerAction::Down, ToolType::Finger));
        adapter.on_disallow_intercept(true);
        // The disallow raise cancels the in-flight gesture.
        assert_eq!(
            *detector.seen.borrow(),
            [PointerAction::Down, PointerAction::Cancel]
        );

        // Suppressed until a new press-down.
        adapter.on_intercept(&ev(PointerAction::Move, ToolType::Finger));
        assert_eq!(detector.seen.borrow().len(), 2);
        adapter.on_intercept(&ev(PointerAction::Down, ToolType::Finger));
        assert_eq!(detector.seen.borrow().len(), 3);
    }

    #[test]
    fn adapter_reset_sends_cancel_and_clears_latch() {
        let detector = RecordingDetector::new();
        let adapter = GestureAdapter::new(detector.clone());

        adapter.on_disallow_intercept(true);
        assert!(adapter.is_reset_required());
        adapter.reset();
        assert_eq!(
            *detector.seen.borrow(),
            [PointerAction::Cancel, PointerAction::Cancel]
        );
        assert!(!adapter.is_reset_required());
    }

    #[test]
    fn routing_alone_does_not_demand_a_reset() {
        let detector = RecordingDetector::new();
        let adapter = GestureAdapter::new(detector);
        adapter.on_intercept(&ev(PointerAction::Down, ToolType::Finger));
        assert!(!adapter.is_reset_required());
    }
}
