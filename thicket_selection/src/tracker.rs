// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection tracker: canonical selection state plus the range and
//! provisional engines.
//!
//! One tracker exists per list view and lives as long as the view. All
//! methods take `&self`; state lives in interior cells so the tracker can be
//! shared (`Rc`) between input handlers, gesture helpers, and the reset
//! manager on the single UI thread. Mutations settle before observers are
//! notified, and the observer list is snapshotted per notification, so an
//! observer may call back into the tracker.
//!
//! ## Notification discipline
//!
//! - `on_item_state_changed` fires once per key per visible transition,
//!   including provisional overlay transitions.
//! - `on_selection_changed` fires once per mutating operation that changed
//!   anything — never once per key.
//! - `on_selection_cleared` fires only from [`SelectionTracker::clear_selection`]
//!   (and the reset path, which routes through it), at most once per clear.
//!
//! ## Provisional protocol
//!
//! Drag and band helpers paint an overlay with
//! [`SelectionTracker::set_provisional_selection`] /
//! [`SelectionTracker::extend_provisional_range`] while a gesture is live.
//! Each update supersedes the previous overlay and is re-validated against
//! the predicate, silently dropping disallowed keys. A completed gesture
//! calls [`SelectionTracker::merge_provisional_selection`] exactly once; a
//! cancelled one calls [`SelectionTracker::clear_provisional_selection`] and
//! the committed selection is untouched.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Debug;
use core::hash::Hash;
use hashbrown::HashSet;

use thicket_events::reset::Resettable;

use crate::key_provider::KeyProvider;
use crate::observer::SelectionObserver;
use crate::predicate::SelectionPredicate;
use crate::range::{Range, Span, positions};
use crate::selection::Selection;
use crate::storage::InstanceState;

struct RangeState<K> {
    range: Range,
    /// Keys committed before the range was anchored. A shrinking range
    /// releases only what it selected itself; these survive.
    preselected: HashSet<K>,
}

/// Tracks the canonical selection for one list view.
pub struct SelectionTracker<K> {
    selection_id: String,
    key_provider: Rc<dyn KeyProvider<K>>,
    predicate: Rc<dyn SelectionPredicate<K>>,
    selection: RefCell<Selection<K>>,
    range: RefCell<Option<RangeState<K>>>,
    observers: RefCell<Vec<Rc<dyn SelectionObserver<K>>>>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> SelectionTracker<K> {
    /// Create a tracker.
    ///
    /// `selection_id` distinguishes this tracker's persisted state from that
    /// of other lists in the same host.
    ///
    /// # Panics
    ///
    /// Panics if `selection_id` is empty.
    pub fn new(
        selection_id: &str,
        key_provider: Rc<dyn KeyProvider<K>>,
        predicate: Rc<dyn SelectionPredicate<K>>,
    ) -> Self {
        assert!(
            !selection_id.trim().is_empty(),
            "selection_id must be non-empty"
        );
        Self {
            selection_id: String::from(selection_id),
            key_provider,
            predicate,
            selection: RefCell::new(Selection::new()),
            range: RefCell::new(None),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// The id used to match persisted state to this tracker.
    pub fn selection_id(&self) -> &str {
        &self.selection_id
    }

    /// The predicate this tracker consults.
    pub fn predicate(&self) -> &Rc<dyn SelectionPredicate<K>> {
        &self.predicate
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&self, observer: Rc<dyn SelectionObserver<K>>) {
        self.observers.borrow_mut().push(observer);
    }

    /// Whether `key` is selected, committed or provisionally.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selection.borrow().contains(key)
    }

    /// Whether anything is selected.
    pub fn has_selection(&self) -> bool {
        !self.selection.borrow().is_empty()
    }

    /// A defensive copy of the current selection.
    pub fn selection(&self) -> Selection<K> {
        self.selection.borrow().clone()
    }

    /// Fill `out` with the current selection without allocating a new one.
    pub fn copy_selection(&self, out: &mut Selection<K>) {
        self.selection.borrow().copy_into(out);
    }

    /// Select `key`. Returns whether the selection changed.
    ///
    /// In single-select mode the previous selection is deselected first
    /// (with per-item notifications, but no cleared notification).
    pub fn select(&self, key: K) -> bool {
        if self.is_selected(&key) {
            return false;
        }
        if !self.predicate.can_set_state_for_key(&key, true) {
            return false;
        }
        let mut displaced: Vec<K> = Vec::new();
        if !self.predicate.can_select_multiple() && self.has_selection() {
            displaced = self.selection.borrow_mut().clear();
            *self.range.borrow_mut() = None;
        }
        self.selection.borrow_mut().add(key.clone());
        for k in &displaced {
            self.notify_item(k, false);
        }
        self.notify_item(&key, true);
        self.notify_changed();
        true
    }

    /// Deselect `key`. Returns whether the selection changed.
    pub fn deselect(&self, key: &K) -> bool {
        if !self.selection.borrow().committed.contains(key) {
            return false;
        }
        if !self.predicate.can_set_state_for_key(key, false) {
            return false;
        }
        self.selection.borrow_mut().remove(key);
        self.notify_item(key, false);
        self.notify_changed();
        if !self.has_selection() && self.is_range_active() {
            self.end_range();
        }
        true
    }

    /// Bulk-select or bulk-deselect `keys`, applying the predicate per key.
    /// Observers get per-item notifications plus a single
    /// `on_selection_changed` for the whole batch. Returns whether anything
    /// changed.
    pub fn set_items_selected<I>(&self, keys: I, selected: bool) -> bool
    where
        I: IntoIterator<Item = K>,
    {
        let accepted: Vec<K> = keys
            .into_iter()
            .filter(|k| self.predicate.can_set_state_for_key(k, selected))
            .collect();
        let mut changed: Vec<K> = Vec::new();
        {
            let mut selection = self.selection.borrow_mut();
            for key in accepted {
                let did = if selected {
                    selection.add(key.clone())
                } else {
                    selection.remove(&key)
                };
                if did {
                    changed.push(key);
                }
            }
        }
        for key in &changed {
            self.notify_item(key, selected);
        }
        if changed.is_empty() {
            return false;
        }
        self.notify_changed();
        true
    }

    /// Clear the committed selection and the provisional overlay, and close
    /// any active range. Returns whether anything was cleared.
    ///
    /// Idempotent: a second call returns `false` and fires nothing.
    pub fn clear_selection(&self) -> bool {
        *self.range.borrow_mut() = None;
        let cleared = self.selection.borrow_mut().clear();
        if cleared.is_empty() {
            return false;
        }
        for key in &cleared {
            self.notify_item(key, false);
        }
        self.notify_cleared();
        self.notify_changed();
        true
    }

    // --- range operations ------------------------------------------------

    /// Start a range at `position`: select the item there (if it is not
    /// already selected and the predicate allows) and anchor the range on
    /// it. A previously active range is discarded.
    ///
    /// # Panics
    ///
    /// Panics if the key provider has no key for `position`.
    pub fn start_range(&self, position: usize) {
        let key = self.expect_key(position);
        if self.is_selected(&key) || self.select(key) {
            self.anchor_range(position);
        }
    }

    /// Anchor a range at `position` without touching the selection. Input
    /// handlers call this after selecting an item themselves.
    ///
    /// # Panics
    ///
    /// Panics if nothing is selected; an anchor marks where an existing
    /// selection's range began.
    pub fn anchor_range(&self, position: usize) {
        assert!(
            self.has_selection(),
            "anchor_range requires an existing selection"
        );
        let preselected: HashSet<K> = self.selection.borrow().committed().cloned().collect();
        *self.range.borrow_mut() = Some(RangeState {
            range: Range::new(position),
            preselected,
        });
    }

    /// Whether a range is currently anchored.
    pub fn is_range_active(&self) -> bool {
        self.range.borrow().is_some()
    }

    /// Extend the active range to `position`, committing the delta: newly
    /// covered positions are selected, newly released positions are
    /// deselected unless they were selected before the range was anchored.
    ///
    /// # Panics
    ///
    /// Panics if no range is active, or if the key provider cannot resolve a
    /// position inside the range.
    pub fn extend_range(&self, position: usize) {
        let (delta, preselected) = {
            let mut range = self.range.borrow_mut();
            let state = range.as_mut().expect("extend_range requires an active range");
            (state.range.extend(position), state.preselected.clone())
        };
        let mut selected: Vec<K> = Vec::new();
        let mut deselected: Vec<K> = Vec::new();
        if let Some(span) = delta.select {
            selected = self.update_committed_span(span, true, &preselected);
        }
        if let Some(span) = delta.deselect {
            deselected = self.update_committed_span(span, false, &preselected);
        }
        for key in &selected {
            self.notify_item(key, true);
        }
        for key in &deselected {
            self.notify_item(key, false);
        }
        if !selected.is_empty() || !deselected.is_empty() {
            self.notify_changed();
        }
    }

    /// Extend the active range to `position` provisionally: the delta is
    /// painted on the overlay instead of the committed set.
    ///
    /// # Panics
    ///
    /// Panics if no range is active, or if the key provider cannot resolve a
    /// position inside the range.
    pub fn extend_provisional_range(&self, position: usize) {
        let delta = {
            let mut range = self.range.borrow_mut();
            let state = range
                .as_mut()
                .expect("extend_provisional_range requires an active range");
            state.range.extend(position)
        };
        let mut changed: Vec<(K, bool)> = Vec::new();
        if let Some(span) = delta.select {
            changed.extend(self.update_provisional_span(span, true));
        }
        if let Some(span) = delta.deselect {
            changed.extend(self.update_provisional_span(span, false));
        }
        for (key, selected) in &changed {
            self.notify_item(key, *selected);
        }
        if !changed.is_empty() {
            self.notify_changed();
        }
    }

    /// Close the active range, discarding any provisional overlay.
    pub fn end_range(&self) {
        *self.range.borrow_mut() = None;
        self.clear_provisional_selection();
    }

    // --- provisional protocol --------------------------------------------

    /// Replace the provisional overlay with `overlay`, re-validated against
    /// the predicate (disallowed keys are dropped silently).
    pub fn set_provisional_selection(&self, overlay: HashSet<K>) {
        let accepted: HashSet<K> = overlay
            .into_iter()
            .filter(|k| self.predicate.can_set_state_for_key(k, true))
            .collect();
        let delta = self.selection.borrow_mut().set_provisional(accepted);
        for (key, selected) in &delta {
            self.notify_item(key, *selected);
        }
        if !delta.is_empty() {
            self.notify_changed();
        }
    }

    /// Commit the provisional overlay into the committed selection. Called
    /// exactly once per completed drag/band gesture.
    pub fn merge_provisional_selection(&self) {
        let had_overlay = {
            let mut selection = self.selection.borrow_mut();
            let had = selection.provisional().next().is_some();
            selection.merge_provisional();
            had
        };
        if had_overlay {
            self.notify_changed();
        }
    }

    /// Discard the provisional overlay without committing it.
    pub fn clear_provisional_selection(&self) {
        let dropped = self.selection.borrow_mut().clear_provisional();
        for key in &dropped {
            self.notify_item(key, false);
        }
        if !dropped.is_empty() {
            self.notify_changed();
        }
    }

    // --- data / persistence ----------------------------------------------

    /// The backing data changed. Drops the provisional overlay and
    /// re-validates every committed key against the key provider and the
    /// predicate; keys that no longer resolve (or are no longer selectable)
    /// are dropped. Fires `on_selection_refresh`.
    pub fn on_data_changed(&self) {
        self.clear_provisional_selection();
        self.notify_refresh();
        let committed: Vec<K> = self.selection.borrow().committed().cloned().collect();
        let mut removed: Vec<K> = Vec::new();
        for key in committed {
            let still_valid = self.key_provider.position_of(&key).is_some()
                && self.predicate.can_set_state_for_key(&key, true);
            if still_valid {
                // Surviving rows re-bind their selected state.
                self.notify_item(&key, true);
            } else {
                self.selection.borrow_mut().remove(&key);
                removed.push(key);
            }
        }
        for key in &removed {
            self.notify_item(key, false);
        }
        if !removed.is_empty() {
            self.notify_changed();
        }
    }

    /// Snapshot the committed selection for persistence. The provisional
    /// overlay is transient and never saved.
    pub fn save_instance_state(&self) -> InstanceState<K> {
        InstanceState {
            selection_id: self.selection_id.clone(),
            keys: self.selection.borrow().committed().cloned().collect(),
        }
    }

    /// Restore a previously saved selection. State saved under a different
    /// selection id is ignored. Restored keys produce a single
    /// `on_selection_restored` notification, not per-item notifications.
    pub fn restore_instance_state(&self, state: &InstanceState<K>) {
        if state.selection_id != self.selection_id {
            return;
        }
        let accepted: Vec<K> = state
            .keys
            .iter()
            .filter(|k| self.predicate.can_set_state_for_key(k, true))
            .cloned()
            .collect();
        let mut any = false;
        {
            let mut selection = self.selection.borrow_mut();
            for key in accepted {
                any |= selection.add(key);
            }
        }
        if any {
            self.notify_restored();
        }
    }

    // --- internals -------------------------------------------------------

    fn expect_key(&self, position: usize) -> K {
        self.key_provider
            .key_at(position)
            .unwrap_or_else(|| panic!("key provider has no key for position {position}"))
    }

    fn update_committed_span(
        &self,
        span: Span,
        selected: bool,
        preselected: &HashSet<K>,
    ) -> Vec<K> {
        let mut changed = Vec::new();
        for position in positions(span) {
            if !self.predicate.can_set_state_at_position(position, selected) {
                continue;
            }
            let key = self.expect_key(position);
            if !selected && preselected.contains(&key) {
                continue;
            }
            let did = {
                let mut selection = self.selection.borrow_mut();
                if selected {
                    selection.add(key.clone())
                } else {
                    selection.remove(&key)
                }
            };
            if did {
                changed.push(key);
            }
        }
        changed
    }

    fn update_provisional_span(&self, span: Span, selected: bool) -> Vec<(K, bool)> {
        let mut changed = Vec::new();
        for position in positions(span) {
            if !self.predicate.can_set_state_at_position(position, selected) {
                continue;
            }
            let key = self.expect_key(position);
            let did = {
                let mut selection = self.selection.borrow_mut();
                if selected {
                    selection.add_provisional(key.clone())
                } else {
                    selection.remove_provisional(&key)
                }
            };
            if did {
                changed.push((key, selected));
            }
        }
        changed
    }

    fn snapshot_observers(&self) -> Vec<Rc<dyn SelectionObserver<K>>> {
        self.observers.borrow().clone()
    }

    fn notify_item(&self, key: &K, selected: bool) {
        for observer in self.snapshot_observers() {
            observer.on_item_state_changed(key, selected);
        }
    }

    fn notify_changed(&self) {
        for observer in self.snapshot_observers() {
            observer.on_selection_changed();
        }
    }

    fn notify_cleared(&self) {
        for observer in self.snapshot_observers() {
            observer.on_selection_cleared();
        }
    }

    fn notify_restored(&self) {
        for observer in self.snapshot_observers() {
            observer.on_selection_restored();
        }
    }

    fn notify_refresh(&self) {
        for observer in self.snapshot_observers() {
            observer.on_selection_refresh();
        }
    }
}

/// The tracker participates in reset passes with its *gesture-transient*
/// state only: the provisional overlay (and the range anchor it may be
/// extending). The committed selection is durable user state — a reset pass
/// triggered by some stale filter latch must not destroy it. Hosts clear
/// the committed selection explicitly via
/// [`SelectionTracker::clear_selection`].
impl<K: Clone + Eq + Hash + Debug + 'static> Resettable for SelectionTracker<K> {
    fn is_reset_required(&self) -> bool {
        self.selection.borrow().provisional().next().is_some()
    }

    fn reset(&self) {
        self.end_range();
    }
}

impl<K> core::fmt::Debug for SelectionTracker<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selection_id", &self.selection_id)
            .field("range_active", &self.range.borrow().is_some())
            .finish_non_exhaustive()
    }
}
