// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The item-details capability.

use thicket_events::PointerEvent;

/// What the host knows about the item under a screen coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDetails<K> {
    /// Adapter position of the item.
    pub position: usize,
    /// The item's selection key, if it participates in selection.
    pub key: Option<K>,
    /// Whether the event landed in the item's selection hot-spot (the
    /// region — a checkbox, say — where a tap selects instead of
    /// activating).
    pub in_selection_hotspot: bool,
    /// Whether the event landed in the item's drag-initiation region.
    pub in_drag_region: bool,
}

impl<K> ItemDetails<K> {
    /// Whether this item participates in selection at all.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

/// Resolves a pointer event to the item under it, with the flags already
/// evaluated for that event's coordinates.
pub trait ItemDetailsLookup<K> {
    /// Details for the item under `event`, or `None` over empty space.
    fn item_details(&self, event: &PointerEvent) -> Option<ItemDetails<K>>;

    /// Whether `event` is over an item that participates in selection.
    fn over_item_with_key(&self, event: &PointerEvent) -> bool {
        self.item_details(event).is_some_and(|d| d.has_key())
    }
}
