// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse rubber-band selection.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt::Debug;
use core::hash::Hash;
use hashbrown::HashSet;
use kurbo::{Point, Rect};

use thicket_events::monitor::OperationMonitor;
use thicket_events::reset::Resettable;
use thicket_events::{EventHandler, PointerEvent};
use thicket_input::ItemDetailsLookup;
use thicket_selection::key_provider::AccessScope;
use thicket_selection::{KeyProvider, SelectionPredicate, SelectionTracker};

use crate::autoscroll::AutoScroller;

/// Decides where a band gesture may legally begin.
pub trait BandPredicate {
    /// Whether a band may start at `event`.
    fn can_initiate(&self, event: &PointerEvent) -> bool;
}

/// Permits band starts anywhere that is not an item's drag region, so band
/// selection and drag-and-drop can coexist. The usual default.
pub struct NonDraggableArea<K> {
    details: Rc<dyn ItemDetailsLookup<K>>,
}

impl<K> NonDraggableArea<K> {
    /// Create the predicate over the host's details lookup.
    pub fn new(details: Rc<dyn ItemDetailsLookup<K>>) -> Self {
        Self { details }
    }
}

impl<K> BandPredicate for NonDraggableArea<K> {
    fn can_initiate(&self, event: &PointerEvent) -> bool {
        match self.details.item_details(event) {
            Some(item) => !item.in_drag_region,
            None => true,
        }
    }
}

impl<K> Debug for NonDraggableArea<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NonDraggableArea").finish_non_exhaustive()
    }
}

/// Permits band starts only over empty area, for hosts where every item is
/// draggable.
pub struct EmptyArea<K> {
    details: Rc<dyn ItemDetailsLookup<K>>,
}

impl<K> EmptyArea<K> {
    /// Create the predicate over the host's details lookup.
    pub fn new(details: Rc<dyn ItemDetailsLookup<K>>) -> Self {
        Self { details }
    }
}

impl<K> BandPredicate for EmptyArea<K> {
    fn can_initiate(&self, event: &PointerEvent) -> bool {
        self.details.item_details(event).is_none()
    }
}

impl<K> Debug for EmptyArea<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EmptyArea").finish_non_exhaustive()
    }
}

/// The layout and feedback surface band selection runs against.
pub trait BandHost {
    /// Bounds of each currently materialized item, in view coordinates.
    fn visible_items(&self) -> Vec<(usize, Rect)>;

    /// Show (or resize) the visual band. Rendering is the host's business.
    fn show_band(&self, band: Rect) {
        let _ = band;
    }

    /// Hide the visual band.
    fn hide_band(&self) {}
}

/// Drives rectangular mouse band selection.
///
/// A band starts on a primary-button mouse drag the [`BandPredicate`]
/// permits, provided no competing operation holds the [`OperationMonitor`]
/// and the key provider has mapped access. Every extension intersects the
/// anchored rectangle with the visible item bounds and feeds the covered
/// key set through the tracker's provisional protocol; release merges,
/// interruption discards.
pub struct BandSelectionHelper<K> {
    tracker: Rc<SelectionTracker<K>>,
    key_provider: Rc<dyn KeyProvider<K>>,
    predicate: Rc<dyn SelectionPredicate<K>>,
    band_predicate: Rc<dyn BandPredicate>,
    host: Rc<dyn BandHost>,
    scroller: Rc<dyn AutoScroller>,
    monitor: OperationMonitor,
    origin: Cell<Option<Point>>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> BandSelectionHelper<K> {
    /// Create a helper.
    ///
    /// # Panics
    ///
    /// Panics if the key provider lacks mapped access; band selection maps
    /// positions to keys for items as they scroll into the band.
    pub fn new(
        tracker: Rc<SelectionTracker<K>>,
        key_provider: Rc<dyn KeyProvider<K>>,
        predicate: Rc<dyn SelectionPredicate<K>>,
        band_predicate: Rc<dyn BandPredicate>,
        host: Rc<dyn BandHost>,
        scroller: Rc<dyn AutoScroller>,
        monitor: OperationMonitor,
    ) -> Self {
        assert!(
            key_provider.has_access(AccessScope::Mapped),
            "band selection requires a mapped key provider"
        );
        Self {
            tracker,
            key_provider,
            predicate,
            band_predicate,
            host,
            scroller,
            monitor,
            origin: Cell::new(None),
        }
    }

    /// Whether a band is being swept right now.
    pub fn is_active(&self) -> bool {
        self.origin.get().is_some()
    }

    fn should_start(&self, event: &PointerEvent) -> bool {
        event.is_pointer_drag_event()
            && !self.is_active()
            && !self.monitor.is_started()
            && self.band_predicate.can_initiate(event)
    }

    fn start_band(&self, event: &PointerEvent) {
        self.monitor.start();
        self.origin.set(Some(event.position));
        self.resize_band(event.position);
    }

    fn resize_band(&self, point: Point) {
        let origin = self.origin.get().expect("resize_band requires an active band");
        let band = Rect::from_points(origin, point);
        self.host.show_band(band);

        let mut covered: HashSet<K> = HashSet::new();
        for (position, bounds) in self.host.visible_items() {
            if !intersects(band, bounds) {
                continue;
            }
            if !self.predicate.can_set_state_at_position(position, true) {
                continue;
            }
            if let Some(key) = self.key_provider.key_at(position) {
                covered.insert(key);
            }
        }
        self.tracker.set_provisional_selection(covered);
        self.scroller.scroll(point);
    }

    fn end_band(&self) {
        self.tracker.merge_provisional_selection();
        self.dismantle();
    }

    fn cancel_band(&self) {
        self.tracker.clear_provisional_selection();
        self.dismantle();
    }

    fn dismantle(&self) {
        self.origin.set(None);
        self.monitor.stop();
        self.scroller.reset();
        self.host.hide_band();
    }
}

fn intersects(a: Rect, b: Rect) -> bool {
    let overlap = a.intersect(b);
    overlap.width() > 0.0 && overlap.height() > 0.0
}

impl<K: Clone + Eq + Hash + Debug + 'static> EventHandler for BandSelectionHelper<K> {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if self.should_start(event) {
            self.start_band(event);
        }
        self.is_active()
    }

    fn on_event(&self, event: &PointerEvent) {
        if !self.is_active() {
            return;
        }
        if event.is_move() {
            self.resize_band(event.position);
        } else if event.is_up() {
            self.end_band();
        } else if event.is_cancel() {
            self.cancel_band();
        }
    }
}

impl<K: Clone + Eq + Hash + Debug + 'static> Resettable for BandSelectionHelper<K> {
    fn is_reset_required(&self) -> bool {
        self.is_active()
    }

    /// Drops the band without merging. The monitor is stopped only when it
    /// was not already zeroed by its own reset as a fellow participant.
    fn reset(&self) {
        if self.origin.replace(None).is_some() {
            self.tracker.clear_provisional_selection();
            if self.monitor.is_started() {
                self.monitor.stop();
            }
            self.scroller.reset();
            self.host.hide_band();
        }
    }
}

impl<K> Debug for BandSelectionHelper<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BandSelectionHelper")
            .field("origin", &self.origin.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoscroll::NoopAutoScroller;
    use core::cell::RefCell;
    use thicket_events::{Buttons, PointerAction, ToolType};
    use thicket_input::ItemDetails;
    use thicket_selection::SelectAnything;

    const KEYS: &[char] = &['A', 'B', 'C', 'D', 'E'];
    const ROW_HEIGHT: f64 = 10.0;

    /// Five full-width rows of height 10; rows 2.. have a drag handle on
    /// the right edge.
    struct FakeList;

    impl KeyProvider<char> for FakeList {
        fn has_access(&self, scope: AccessScope) -> bool {
            scope == AccessScope::Mapped
        }
        fn key_at(&self, position: usize) -> Option<char> {
            KEYS.get(position).copied()
        }
        fn position_of(&self, key: &char) -> Option<usize> {
            KEYS.iter().position(|k| k == key)
        }
    }

    impl ItemDetailsLookup<char> for FakeList {
        fn item_details(&self, event: &PointerEvent) -> Option<ItemDetails<char>> {
            let position = (event.position.y / ROW_HEIGHT) as usize;
            let key = KEYS.get(position).copied()?;
            Some(ItemDetails {
                position,
                key: Some(key),
                in_selection_hotspot: false,
                in_drag_region: event.position.x > 90.0,
            })
        }
    }

    #[derive(Default)]
    struct FakeBandHost {
        shown: RefCell<Vec<Rect>>,
        hides: Cell<usize>,
    }

    impl BandHost for FakeBandHost {
        fn visible_items(&self) -> Vec<(usize, Rect)> {
            (0..KEYS.len())
                .map(|i| {
                    let top = i as f64 * ROW_HEIGHT;
                    (i, Rect::new(0.0, top, 100.0, top + ROW_HEIGHT))
                })
                .collect()
        }
        fn show_band(&self, band: Rect) {
            self.shown.borrow_mut().push(band);
        }
        fn hide_band(&self) {
            self.hides.set(self.hides.get() + 1);
        }
    }

    struct Fixture {
        helper: Rc<BandSelectionHelper<char>>,
        tracker: Rc<SelectionTracker<char>>,
        monitor: OperationMonitor,
        host: Rc<FakeBandHost>,
    }

    fn fixture() -> Fixture {
        let list = Rc::new(FakeList);
        let tracker = Rc::new(SelectionTracker::new(
            "test",
            list.clone(),
            Rc::new(SelectAnything),
        ));
        let monitor = OperationMonitor::new();
        let host = Rc::new(FakeBandHost::default());
        let helper = Rc::new(BandSelectionHelper::new(
            tracker.clone(),
            list.clone(),
            Rc::new(SelectAnything),
            Rc::new(NonDraggableArea::new(list)),
            host.clone(),
            Rc::new(NoopAutoScroller),
            monitor.clone(),
        ));
        Fixture {
            helper,
            tracker,
            monitor,
            host,
        }
    }

    fn drag_at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerAction::Move, ToolType::Mouse, Point::new(x, y))
            .with_buttons(Buttons::PRIMARY)
    }

    fn up_at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerAction::Up, ToolType::Mouse, Point::new(x, y))
    }

    fn selected(tracker: &SelectionTracker<char>) -> Vec<char> {
        let mut keys: Vec<char> = tracker.selection().iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn band_start_claims_the_gesture_and_the_monitor() {
        let f = fixture();
        assert!(f.helper.on_intercept(&drag_at(50.0, 5.0)));
        assert!(f.helper.is_active());
        assert!(f.monitor.is_started());
    }

    #[test]
    fn band_sweep_covers_intersected_rows_provisionally() {
        let f = fixture();
        f.helper.on_intercept(&drag_at(20.0, 25.0));
        f.helper.on_event(&drag_at(60.0, 45.0));
        // Rows 2..=4 intersect the 25..45 sweep.
        assert_eq!(selected(&f.tracker), ['C', 'D', 'E']);
        assert_eq!(f.tracker.selection().committed().count(), 0);
    }

    #[test]
    fn release_merges_the_covered_set() {
        let f = fixture();
        f.helper.on_intercept(&drag_at(20.0, 25.0));
        f.helper.on_event(&drag_at(60.0, 45.0));
        f.helper.on_event(&up_at(60.0, 45.0));
        assert_eq!(selected(&f.tracker), ['C', 'D', 'E']);
        assert_eq!(f.tracker.selection().committed().count(), 3);
        assert!(!f.helper.is_active());
        assert!(!f.monitor.is_started());
        assert_eq!(f.host.hides.get(), 1);
    }

    #[test]
    fn shrinking_the_band_uncovers_rows() {
        let f = fixture();
        f.helper.on_intercept(&drag_at(20.0, 5.0));
        f.helper.on_event(&drag_at(60.0, 45.0));
        f.helper.on_event(&drag_at(60.0, 15.0));
        assert_eq!(selected(&f.tracker), ['A', 'B']);
    }

    #[test]
    fn band_preserves_prior_committed_selection() {
        let f = fixture();
        f.tracker.select('A');
        f.helper.on_intercept(&drag_at(20.0, 25.0));
        f.helper.on_event(&drag_at(60.0, 35.0));
        f.helper.on_event(&up_at(60.0, 35.0));
        assert_eq!(selected(&f.tracker), ['A', 'C', 'D']);
    }

    #[test]
    fn cancel_discards_the_sweep() {
        let f = fixture();
        f.tracker.select('A');
        f.helper.on_intercept(&drag_at(20.0, 25.0));
        f.helper.on_event(&drag_at(60.0, 45.0));
        f.helper
            .on_event(&PointerEvent::new(
                PointerAction::Cancel,
                ToolType::Mouse,
                Point::ZERO,
            ));
        assert_eq!(selected(&f.tracker), ['A']);
        assert!(!f.monitor.is_started());
    }

    #[test]
    fn band_refuses_to_start_while_the_monitor_is_busy() {
        let f = fixture();
        f.monitor.start(); // a finger drag owns the pointer stream
        assert!(!f.helper.on_intercept(&drag_at(50.0, 5.0)));
        assert!(!f.helper.is_active());
        f.monitor.stop();
    }

    #[test]
    fn band_refuses_to_start_in_a_drag_region() {
        let f = fixture();
        assert!(!f.helper.on_intercept(&drag_at(95.0, 25.0)));
        assert!(!f.helper.is_active());
    }

    #[test]
    fn plain_hover_does_not_start_a_band() {
        let f = fixture();
        let hover = PointerEvent::new(PointerAction::Move, ToolType::Mouse, Point::new(50.0, 5.0));
        assert!(!f.helper.on_intercept(&hover));
    }

    #[test]
    fn reset_discards_everything_without_merging() {
        let f = fixture();
        f.helper.on_intercept(&drag_at(50.0, 25.0));
        f.helper.on_event(&drag_at(50.0, 45.0));
        assert!(f.helper.is_reset_required());
        f.helper.reset();
        assert!(!f.helper.is_active());
        assert!(!f.tracker.has_selection());
        assert!(!f.monitor.is_started());
        assert_eq!(f.host.hides.get(), 1);
    }

    #[test]
    fn empty_area_predicate_rejects_items() {
        let list = Rc::new(FakeList);
        let predicate = EmptyArea::new(list as Rc<dyn ItemDetailsLookup<char>>);
        assert!(!predicate.can_initiate(&drag_at(50.0, 25.0)));
        assert!(predicate.can_initiate(&drag_at(50.0, 999.0)));
    }
}
