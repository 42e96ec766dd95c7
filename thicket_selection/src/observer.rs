// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection change notifications.

/// Receiver of selection state notifications.
///
/// All methods default to no-ops; implementations override what they need.
/// Observers are called after the tracker's own state has settled, so an
/// observer may call back into the tracker. Methods take `&self`; observers
/// with state use interior mutability.
pub trait SelectionObserver<K> {
    /// The selected state of a single item changed. Fired once per key per
    /// transition, including provisional overlay transitions.
    fn on_item_state_changed(&self, key: &K, selected: bool) {
        let _ = (key, selected);
    }

    /// The selection changed in some way. Fired once per mutating operation,
    /// not once per affected key.
    fn on_selection_changed(&self) {}

    /// The selection was cleared outright.
    fn on_selection_cleared(&self) {}

    /// The selection was reloaded from persisted state. Fired instead of
    /// per-item notifications for the restored keys.
    fn on_selection_restored(&self) {}

    /// The backing data changed and the selection was re-evaluated against
    /// it; rebind anything displaying selection state.
    fn on_selection_refresh(&self) {}
}
