// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch-flavored gesture interpretation.

use alloc::rc::Rc;
use core::fmt::Debug;
use core::hash::Hash;

use thicket_events::gesture::GestureListener;
use thicket_events::PointerEvent;
use thicket_selection::{KeyProvider, SelectionPredicate, SelectionTracker};

use crate::details::ItemDetailsLookup;
use crate::focus::FocusDelegate;
use crate::handler::{HandlerCore, should_extend_range};
use crate::listeners::{DragInitiatedListener, ItemActivatedListener};

/// Interprets classified touch gestures into selection operations.
///
/// Single tap: over empty space clears the selection; with a selection
/// live, shift extends the range, a tap on a selected item deselects it,
/// and a tap on an unselected item selects it; with no selection, a tap in
/// the item's selection hot-spot selects, anything else activates.
///
/// Long-press branches are mutually exclusive, in priority order: range
/// extension (shift held), drag initiation (item already selected), then
/// select-and-maybe-start-gesture-selection (item not yet selected). The
/// last branch hands off to the gesture-selection helper via
/// `gesture_starter` when multi-select is enabled and a range is anchored,
/// which is what turns a long-press into a finger-drag range selection.
pub struct TouchInputHandler<K> {
    core: HandlerCore<K>,
    details: Rc<dyn ItemDetailsLookup<K>>,
    predicate: Rc<dyn SelectionPredicate<K>>,
    /// Starts the gesture-selection helper for a drag that began with this
    /// long-press.
    gesture_starter: Rc<dyn Fn()>,
    drag_listener: Rc<dyn DragInitiatedListener>,
    activation_listener: Rc<dyn ItemActivatedListener<K>>,
    /// Haptic feedback hook; fired for accepted long-press outcomes.
    haptics: Rc<dyn Fn()>,
    /// Tells the event backstop a long-press fired, so it can swallow the
    /// trailing lift.
    long_press_latch: Rc<dyn Fn()>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> TouchInputHandler<K> {
    /// Create a handler. All collaborators are required; pass the no-op
    /// listener types for outcomes the host does not care about.
    pub fn new(
        tracker: Rc<SelectionTracker<K>>,
        key_provider: Rc<dyn KeyProvider<K>>,
        details: Rc<dyn ItemDetailsLookup<K>>,
        predicate: Rc<dyn SelectionPredicate<K>>,
        focus: Rc<dyn FocusDelegate<K>>,
        gesture_starter: Rc<dyn Fn()>,
        drag_listener: Rc<dyn DragInitiatedListener>,
        activation_listener: Rc<dyn ItemActivatedListener<K>>,
        haptics: Rc<dyn Fn()>,
        long_press_latch: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            core: HandlerCore {
                tracker,
                key_provider,
                focus,
            },
            details,
            predicate,
            gesture_starter,
            drag_listener,
            activation_listener,
            haptics,
            long_press_latch,
        }
    }

    fn tracker(&self) -> &SelectionTracker<K> {
        &self.core.tracker
    }
}

impl<K: Clone + Eq + Hash + Debug + 'static> GestureListener for TouchInputHandler<K> {
    fn on_single_tap_up(&self, event: &PointerEvent) -> bool {
        let item = match self.details.item_details(event) {
            Some(item) if item.has_key() => item,
            // Empty space, or an item outside selection semantics.
            _ => return self.tracker().clear_selection(),
        };
        let key = item.key.clone().expect("checked by has_key");

        if self.tracker().has_selection() {
            if should_extend_range(&self.core, event) {
                self.core.extend_selection_range(&item);
            } else if self.tracker().is_selected(&key) {
                self.tracker().deselect(&key);
            } else {
                self.core.select_item(&item);
            }
            return true;
        }

        if item.in_selection_hotspot {
            return self.core.select_item(&item);
        }
        self.activation_listener.on_item_activated(&item, event)
    }

    fn on_double_tap_event(&self, event: &PointerEvent) -> bool {
        // The second tap of a rapid pair behaves like another single tap.
        event.is_up() && self.on_single_tap_up(event)
    }

    fn on_long_press(&self, event: &PointerEvent) {
        let item = match self.details.item_details(event) {
            Some(item) if item.has_key() => item,
            _ => return,
        };
        let key = item.key.clone().expect("checked by has_key");

        (self.long_press_latch)();

        if should_extend_range(&self.core, event) {
            self.core.extend_selection_range(&item);
            (self.haptics)();
        } else if self.tracker().is_selected(&key) {
            if self.drag_listener.on_drag_initiated(event) {
                (self.haptics)();
            }
        } else if self.predicate.can_set_state_for_key(&key, true) && self.core.select_item(&item)
        {
            if self.predicate.can_select_multiple() && self.tracker().is_range_active() {
                (self.gesture_starter)();
            }
            (self.haptics)();
        }
    }
}

impl<K> Debug for TouchInputHandler<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TouchInputHandler").finish_non_exhaustive()
    }
}
