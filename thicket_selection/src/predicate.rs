// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection legality predicates.

/// Decides, per key or per position, whether a selection state change is
/// legal, and whether multi-select is enabled at all.
///
/// The tracker consults the predicate before every mutating operation. A
/// `false` answer makes the operation a silent no-op — predicate rejection
/// is policy, not an error.
pub trait SelectionPredicate<K> {
    /// Whether `key` may transition to `next_state`.
    fn can_set_state_for_key(&self, key: &K, next_state: bool) -> bool;

    /// Whether the item at `position` may transition to `next_state`.
    fn can_set_state_at_position(&self, position: usize, next_state: bool) -> bool;

    /// Whether more than one item may be selected at a time.
    fn can_select_multiple(&self) -> bool;
}

/// Permits everything, including multi-select.
#[derive(Copy, Clone, Debug, Default)]
pub struct SelectAnything;

impl<K> SelectionPredicate<K> for SelectAnything {
    fn can_set_state_for_key(&self, _key: &K, _next_state: bool) -> bool {
        true
    }

    fn can_set_state_at_position(&self, _position: usize, _next_state: bool) -> bool {
        true
    }

    fn can_select_multiple(&self) -> bool {
        true
    }
}

/// Permits any single item; the tracker enforces the single-selection cap by
/// deselecting the previous item when a new one is selected.
#[derive(Copy, Clone, Debug, Default)]
pub struct SelectSingleAnything;

impl<K> SelectionPredicate<K> for SelectSingleAnything {
    fn can_set_state_for_key(&self, _key: &K, _next_state: bool) -> bool {
        true
    }

    fn can_set_state_at_position(&self, _position: usize, _next_state: bool) -> bool {
        true
    }

    fn can_select_multiple(&self) -> bool {
        false
    }
}
