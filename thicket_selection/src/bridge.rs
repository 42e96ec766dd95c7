// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker → adapter row-change bridge.

use alloc::rc::Rc;
use core::fmt::Debug;
use core::hash::Hash;

use crate::key_provider::KeyProvider;
use crate::observer::SelectionObserver;
use crate::tracker::SelectionTracker;

/// Payload passed with row-change notifications caused by selection state,
/// so adapters can re-bind only the selection decoration instead of the
/// whole row.
pub const SELECTION_CHANGED_MARKER: &str = "selection-changed";

/// Outbound capability: tell the rendering layer a bound row changed.
pub trait ItemChangeNotifier {
    /// Re-bind the row at `position`; `marker` identifies what changed.
    fn notify_item_changed(&self, position: usize, marker: &str);
}

/// Wire a tracker to the rendering layer: every per-item selection
/// transition is translated into a row-change notification at the key's
/// current position.
pub fn install_bridge<K: Clone + Eq + Hash + Debug + 'static>(
    tracker: &SelectionTracker<K>,
    key_provider: Rc<dyn KeyProvider<K>>,
    notifier: Rc<dyn ItemChangeNotifier>,
) {
    tracker.add_observer(Rc::new(TrackerToAdapterBridge {
        key_provider,
        notifier,
    }));
}

struct TrackerToAdapterBridge<K> {
    key_provider: Rc<dyn KeyProvider<K>>,
    notifier: Rc<dyn ItemChangeNotifier>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> SelectionObserver<K> for TrackerToAdapterBridge<K> {
    fn on_item_state_changed(&self, key: &K, _selected: bool) {
        // Cached-scope providers legitimately lose positions for items that
        // scrolled out of view; there is no row to re-bind in that case.
        if let Some(position) = self.key_provider.position_of(key) {
            self.notifier
                .notify_item_changed(position, SELECTION_CHANGED_MARKER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_provider::AccessScope;
    use crate::predicate::SelectAnything;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    struct Keys(&'static [u32]);

    impl KeyProvider<u32> for Keys {
        fn has_access(&self, _scope: AccessScope) -> bool {
            true
        }
        fn key_at(&self, position: usize) -> Option<u32> {
            self.0.get(position).copied()
        }
        fn position_of(&self, key: &u32) -> Option<usize> {
            self.0.iter().position(|k| k == key)
        }
    }

    struct Rebinds(RefCell<Vec<usize>>);

    impl ItemChangeNotifier for Rebinds {
        fn notify_item_changed(&self, position: usize, marker: &str) {
            assert_eq!(marker, SELECTION_CHANGED_MARKER);
            self.0.borrow_mut().push(position);
        }
    }

    #[test]
    fn selection_changes_rebind_the_affected_rows() {
        let keys: Rc<Keys> = Rc::new(Keys(&[10, 20, 30]));
        let tracker = SelectionTracker::new("test", keys.clone(), Rc::new(SelectAnything));
        let rebinds = Rc::new(Rebinds(RefCell::new(Vec::new())));
        install_bridge(&tracker, keys, rebinds.clone());

        tracker.select(20);
        tracker.deselect(&20);
        assert_eq!(*rebinds.0.borrow(), [1, 1]);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let keys: Rc<Keys> = Rc::new(Keys(&[10]));
        let tracker = SelectionTracker::new("test", keys.clone(), Rc::new(SelectAnything));
        let rebinds = Rc::new(Rebinds(RefCell::new(Vec::new())));
        install_bridge(&tracker, keys, rebinds.clone());

        // 99 is selectable but not currently mapped to a row.
        tracker.select(99);
        assert!(rebinds.0.borrow().is_empty());
    }
}
