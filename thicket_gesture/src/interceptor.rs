// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-drag demultiplexing for mouse input.

use alloc::rc::Rc;
use core::fmt::Debug;

use thicket_events::{EventHandler, PointerEvent};
use thicket_input::ItemDetailsLookup;
use thicket_input::listeners::DragInitiatedListener;

/// Splits a primary-button mouse drag between two outcomes: a drag that
/// starts in an item's drag region goes to the host's drag-and-drop
/// machinery; anything else is offered to the band helper.
pub struct PointerDragInterceptor<K> {
    details: Rc<dyn ItemDetailsLookup<K>>,
    drag_listener: Rc<dyn DragInitiatedListener>,
    /// Usually the band selection helper; `None` when band selection is
    /// disabled (single-select hosts, unmapped key providers).
    delegate: Option<Rc<dyn EventHandler>>,
}

impl<K> PointerDragInterceptor<K> {
    /// Create an interceptor.
    pub fn new(
        details: Rc<dyn ItemDetailsLookup<K>>,
        drag_listener: Rc<dyn DragInitiatedListener>,
        delegate: Option<Rc<dyn EventHandler>>,
    ) -> Self {
        Self {
            details,
            drag_listener,
            delegate,
        }
    }
}

impl<K> EventHandler for PointerDragInterceptor<K> {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if event.is_pointer_drag_event()
            && self
                .details
                .item_details(event)
                .is_some_and(|item| item.in_drag_region)
        {
            return self.drag_listener.on_drag_initiated(event);
        }
        match &self.delegate {
            Some(delegate) => delegate.on_intercept(event),
            None => false,
        }
    }

    fn on_event(&self, event: &PointerEvent) {
        if let Some(delegate) = &self.delegate {
            delegate.on_event(event);
        }
    }

    fn on_disallow_intercept(&self, disallow: bool) {
        if let Some(delegate) = &self.delegate {
            delegate.on_disallow_intercept(disallow);
        }
    }
}

impl<K> Debug for PointerDragInterceptor<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerDragInterceptor")
            .field("has_delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}
