// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finger-drag range selection.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt::Debug;
use core::hash::Hash;
use kurbo::Point;

use thicket_events::monitor::OperationMonitor;
use thicket_events::reset::Resettable;
use thicket_events::{EventHandler, PointerEvent};
use thicket_selection::SelectionTracker;

use crate::autoscroll::AutoScroller;

/// The layout questions drag selection asks of the hosting list view.
pub trait ListDelegate {
    /// Current viewport height in view coordinates.
    fn height(&self) -> f64;

    /// The adapter position under `point`, if any item is there.
    fn item_under(&self, point: Point) -> Option<usize>;

    /// The position a drag at `point` should extend to: the item under the
    /// point, or the nearest end of the list when the pointer has glided
    /// past the first or last item.
    fn last_glided_position(&self, point: Point) -> usize;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DragState {
    /// No drag in flight.
    Idle,
    /// A long-press armed the helper; waiting for the first move.
    Started,
    /// Moves are extending the provisional range.
    Active,
}

/// Drives continuous finger-drag range selection, started by a long-press
/// on a selected item.
///
/// While a drag is live the helper extends the tracker's provisional range
/// to the item under the pointer and feeds the auto-scroller. A lift merges
/// the provisional selection; a cancel (or a reset pass) discards it. The
/// shared [`OperationMonitor`] is held from start to end so competing
/// operations — band selection, above all — refuse to begin, and a start is
/// refused symmetrically while the monitor is busy.
pub struct GestureSelectionHelper<K> {
    tracker: Rc<SelectionTracker<K>>,
    view: Rc<dyn ListDelegate>,
    scroller: Rc<dyn AutoScroller>,
    monitor: OperationMonitor,
    state: Cell<DragState>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> GestureSelectionHelper<K> {
    /// Create a helper.
    pub fn new(
        tracker: Rc<SelectionTracker<K>>,
        view: Rc<dyn ListDelegate>,
        scroller: Rc<dyn AutoScroller>,
        monitor: OperationMonitor,
    ) -> Self {
        Self {
            tracker,
            view,
            scroller,
            monitor,
            state: Cell::new(DragState::Idle),
        }
    }

    /// Arm the helper for the drag that began with a long-press. Refused —
    /// silently, this is raced by design — when another operation holds the
    /// monitor or no range anchor is set.
    pub fn start(&self) {
        if self.state.get() != DragState::Idle {
            return;
        }
        if self.monitor.is_started() {
            // A band sweep (or another drag) owns the pointer stream.
            return;
        }
        if !self.tracker.is_range_active() {
            // The long-press path anchors a range before starting us; no
            // anchor means the selection evaporated in between.
            return;
        }
        self.state.set(DragState::Started);
        self.monitor.start();
    }

    /// Whether a drag is in flight.
    pub fn is_active(&self) -> bool {
        self.state.get() != DragState::Idle
    }

    fn handle_move(&self, event: &PointerEvent) {
        self.state.set(DragState::Active);
        let position = self.view.last_glided_position(event.position);
        self.tracker.extend_provisional_range(position);
        self.scroller.scroll(event.position);
    }

    fn handle_up(&self) {
        self.tracker.merge_provisional_selection();
        self.end();
    }

    fn handle_cancel(&self) {
        self.tracker.clear_provisional_selection();
        self.end();
    }

    fn end(&self) {
        self.state.set(DragState::Idle);
        self.monitor.stop();
        self.scroller.reset();
    }
}

impl<K: Clone + Eq + Hash + Debug + 'static> EventHandler for GestureSelectionHelper<K> {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if event.is_mouse() {
            return false;
        }
        if self.is_active() {
            self.on_event(event);
        }
        // A terminating event handled above flips the helper idle, so the
        // lift is deliberately left unclaimed and continues down the chain
        // (the backstop wants it).
        self.is_active()
    }

    fn on_event(&self, event: &PointerEvent) {
        if !self.is_active() {
            return;
        }
        if event.is_move() {
            self.handle_move(event);
        } else if event.is_up() {
            self.handle_up();
        } else if event.is_cancel() {
            self.handle_cancel();
        }
    }
}

impl<K: Clone + Eq + Hash + Debug + 'static> Resettable for GestureSelectionHelper<K> {
    fn is_reset_required(&self) -> bool {
        self.is_active()
    }

    /// Drops the drag without merging. The tracker and the operation
    /// monitor reset their own state as fellow participants; the monitor is
    /// stopped here only when it was not already zeroed by its own reset.
    fn reset(&self) {
        if self.state.replace(DragState::Idle) != DragState::Idle && self.monitor.is_started() {
            self.monitor.stop();
        }
        self.scroller.reset();
    }
}

impl<K> Debug for GestureSelectionHelper<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureSelectionHelper")
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoscroll::NoopAutoScroller;
    use alloc::vec::Vec;
    use thicket_events::{PointerAction, ToolType};
    use thicket_selection::key_provider::AccessScope;
    use thicket_selection::{KeyProvider, SelectAnything};

    const KEYS: &[char] = &['A', 'B', 'C', 'D', 'E'];
    const ROW_HEIGHT: f64 = 10.0;

    struct FakeList;

    impl KeyProvider<char> for FakeList {
        fn has_access(&self, _scope: AccessScope) -> bool {
            true
        }
        fn key_at(&self, position: usize) -> Option<char> {
            KEYS.get(position).copied()
        }
        fn position_of(&self, key: &char) -> Option<usize> {
            KEYS.iter().position(|k| k == key)
        }
    }

    impl ListDelegate for FakeList {
        fn height(&self) -> f64 {
            KEYS.len() as f64 * ROW_HEIGHT
        }
        fn item_under(&self, point: Point) -> Option<usize> {
            let position = (point.y / ROW_HEIGHT) as usize;
            (point.y >= 0.0 && position < KEYS.len()).then_some(position)
        }
        fn last_glided_position(&self, point: Point) -> usize {
            self.item_under(point).unwrap_or(KEYS.len() - 1)
        }
    }

    fn helper() -> (
        Rc<GestureSelectionHelper<char>>,
        Rc<SelectionTracker<char>>,
        OperationMonitor,
    ) {
        let tracker = Rc::new(SelectionTracker::new(
            "test",
            Rc::new(FakeList),
            Rc::new(SelectAnything),
        ));
        let monitor = OperationMonitor::new();
        let helper = Rc::new(GestureSelectionHelper::new(
            tracker.clone(),
            Rc::new(FakeList),
            Rc::new(NoopAutoScroller),
            monitor.clone(),
        ));
        (helper, tracker, monitor)
    }

    fn move_to(row: usize) -> PointerEvent {
        PointerEvent::new(
            PointerAction::Move,
            ToolType::Finger,
            Point::new(10.0, row as f64 * ROW_HEIGHT + 1.0),
        )
    }

    fn up() -> PointerEvent {
        PointerEvent::new(PointerAction::Up, ToolType::Finger, Point::ZERO)
    }

    fn cancel() -> PointerEvent {
        PointerEvent::new(PointerAction::Cancel, ToolType::Finger, Point::ZERO)
    }

    fn selected(tracker: &SelectionTracker<char>) -> Vec<char> {
        let mut keys: Vec<char> = tracker.selection().iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Long-press selected position 1 and anchored a range there.
    fn armed() -> (
        Rc<GestureSelectionHelper<char>>,
        Rc<SelectionTracker<char>>,
        OperationMonitor,
    ) {
        let (helper, tracker, monitor) = helper();
        tracker.start_range(1);
        helper.start();
        (helper, tracker, monitor)
    }

    #[test]
    fn start_requires_a_range_anchor() {
        let (helper, _tracker, monitor) = helper();
        helper.start();
        assert!(!helper.is_active());
        assert!(!monitor.is_started());
    }

    #[test]
    fn start_holds_the_monitor() {
        let (helper, _, monitor) = armed();
        assert!(helper.is_active());
        assert!(monitor.is_started());
    }

    #[test]
    fn start_is_refused_while_the_monitor_is_busy() {
        let (helper, tracker, monitor) = helper();
        tracker.start_range(1);
        monitor.start(); // a band sweep is live
        helper.start();
        assert!(!helper.is_active());
        monitor.stop();
    }

    #[test]
    fn drag_extends_provisionally_and_merges_on_lift() {
        let (helper, tracker, monitor) = armed();
        helper.on_event(&move_to(3));
        assert_eq!(selected(&tracker), ['B', 'C', 'D']);
        // Only the anchor is committed so far.
        assert_eq!(tracker.selection().committed().count(), 1);

        helper.on_event(&up());
        assert_eq!(selected(&tracker), ['B', 'C', 'D']);
        assert_eq!(tracker.selection().committed().count(), 3);
        assert!(!helper.is_active());
        assert!(!monitor.is_started());
    }

    #[test]
    fn drag_shrinks_as_the_pointer_backs_up() {
        let (helper, tracker, _) = armed();
        helper.on_event(&move_to(4));
        helper.on_event(&move_to(2));
        assert_eq!(selected(&tracker), ['B', 'C']);
    }

    #[test]
    fn glide_past_the_end_selects_through_the_last_item() {
        let (helper, tracker, _) = armed();
        helper.on_event(&PointerEvent::new(
            PointerAction::Move,
            ToolType::Finger,
            Point::new(10.0, 999.0),
        ));
        assert_eq!(selected(&tracker), ['B', 'C', 'D', 'E']);
    }

    #[test]
    fn cancel_discards_the_provisional_range() {
        let (helper, tracker, monitor) = armed();
        helper.on_event(&move_to(3));
        helper.on_event(&cancel());
        assert_eq!(selected(&tracker), ['B']);
        assert!(!helper.is_active());
        assert!(!monitor.is_started());
    }

    #[test]
    fn mouse_events_are_ignored() {
        let (helper, _, _) = armed();
        let mouse_move = PointerEvent::new(PointerAction::Move, ToolType::Mouse, Point::ZERO);
        assert!(!helper.on_intercept(&mouse_move));
    }

    #[test]
    fn intercepts_touch_events_only_while_active() {
        let (helper, tracker, _) = helper();
        assert!(!helper.on_intercept(&move_to(1)));
        tracker.start_range(1);
        helper.start();
        assert!(helper.on_intercept(&move_to(1)));
    }

    #[test]
    fn reset_abandons_the_drag_and_releases_the_monitor() {
        let (helper, tracker, monitor) = armed();
        helper.on_event(&move_to(3));
        assert!(helper.is_reset_required());
        helper.reset();
        assert!(!helper.is_active());
        assert!(!monitor.is_started());
        // The overlay is the tracker's to clear (it is a fellow reset
        // participant); committed state is untouched either way.
        assert_eq!(tracker.selection().committed().count(), 1);
    }

    #[test]
    fn lift_through_intercept_merges_and_declines_the_claim() {
        // A long-press with no movement: the lift arrives in the intercept
        // phase, completes the gesture, and is left for the backstop.
        let (helper, tracker, monitor) = armed();
        assert!(!helper.on_intercept(&up()));
        assert!(!helper.is_active());
        assert!(!monitor.is_started());
        assert_eq!(selected(&tracker), ['B']);
    }

    #[test]
    fn second_start_while_active_is_ignored() {
        let (helper, _, monitor) = armed();
        helper.start();
        helper.on_event(&up());
        // A double start would have left the monitor unbalanced.
        assert!(!monitor.is_started());
    }
}
