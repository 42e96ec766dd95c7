// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks for input outcomes that are not selection mutations.

use thicket_events::PointerEvent;

use crate::details::ItemDetails;

/// The user activated an item (tapped it outside selection semantics).
pub trait ItemActivatedListener<K> {
    /// Return `true` if the activation was handled.
    fn on_item_activated(&self, item: &ItemDetails<K>, event: &PointerEvent) -> bool;
}

/// The user began a drag on an already-selected item; the host may start
/// its drag-and-drop machinery.
pub trait DragInitiatedListener {
    /// Return `true` if a drag was started.
    fn on_drag_initiated(&self, event: &PointerEvent) -> bool;
}

/// The user context-clicked (right click, or alt + primary).
pub trait ContextClickListener {
    /// Return `true` if the context click was handled.
    fn on_context_click(&self, event: &PointerEvent) -> bool;
}

/// Ignores activations. Builder default.
#[derive(Debug, Default)]
pub struct NoopItemActivatedListener;

impl<K> ItemActivatedListener<K> for NoopItemActivatedListener {
    fn on_item_activated(&self, _item: &ItemDetails<K>, _event: &PointerEvent) -> bool {
        false
    }
}

/// Ignores drag initiation. Builder default.
#[derive(Debug, Default)]
pub struct NoopDragInitiatedListener;

impl DragInitiatedListener for NoopDragInitiatedListener {
    fn on_drag_initiated(&self, _event: &PointerEvent) -> bool {
        false
    }
}

/// Ignores context clicks. Builder default.
#[derive(Debug, Default)]
pub struct NoopContextClickListener;

impl ContextClickListener for NoopContextClickListener {
    fn on_context_click(&self, _event: &PointerEvent) -> bool {
        false
    }
}
