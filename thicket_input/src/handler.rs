// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior shared by the touch and mouse input handlers.

use alloc::rc::Rc;
use core::fmt::Debug;
use core::hash::Hash;

use thicket_events::PointerEvent;
use thicket_selection::key_provider::AccessScope;
use thicket_selection::{KeyProvider, SelectionTracker};

use crate::details::ItemDetails;
use crate::focus::FocusDelegate;

/// The collaborators every motion input handler needs, plus the selection
/// moves both variants share.
pub(crate) struct HandlerCore<K> {
    pub(crate) tracker: Rc<SelectionTracker<K>>,
    pub(crate) key_provider: Rc<dyn KeyProvider<K>>,
    pub(crate) focus: Rc<dyn FocusDelegate<K>>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> HandlerCore<K> {
    /// Select `item` and anchor a range on it; focus it when it became the
    /// only selection.
    ///
    /// # Panics
    ///
    /// Panics if `item` has no selection key; callers check first.
    pub(crate) fn select_item(&self, item: &ItemDetails<K>) -> bool {
        let key = item
            .key
            .clone()
            .expect("select_item requires an item with a selection key");
        if self.tracker.select(key) {
            self.tracker.anchor_range(item.position);
        }
        if self.tracker.selection().len() == 1 {
            self.focus.focus_item(item);
        }
        true
    }

    /// Extend the active range (or anchor a fresh one on the current
    /// selection) to `item` and focus it.
    ///
    /// # Panics
    ///
    /// Panics if the key provider cannot map arbitrary positions; range
    /// extension reaches items that are not on screen.
    pub(crate) fn extend_selection_range(&self, item: &ItemDetails<K>) {
        assert!(
            self.key_provider.has_access(AccessScope::Mapped),
            "range extension requires a mapped key provider"
        );
        self.tracker.extend_range(item.position);
        self.focus.focus_item(item);
    }
}

/// Whether the event asks for range extension (the shift-click idiom).
pub(crate) fn should_extend_range<K>(core: &HandlerCore<K>, event: &PointerEvent) -> bool
where
    K: Clone + Eq + Hash + Debug + 'static,
{
    event.shift_pressed() && core.tracker.is_range_active()
}

impl<K> Debug for HandlerCore<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerCore").finish_non_exhaustive()
    }
}
