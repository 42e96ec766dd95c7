// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse-flavored gesture interpretation.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt::Debug;
use core::hash::Hash;

use thicket_events::PointerEvent;
use thicket_events::gesture::GestureListener;
use thicket_selection::{KeyProvider, SelectionTracker};

use crate::details::ItemDetailsLookup;
use crate::focus::FocusDelegate;
use crate::handler::{HandlerCore, should_extend_range};
use crate::listeners::{ContextClickListener, ItemActivatedListener};

/// Interprets classified mouse gestures into selection operations.
///
/// Mouse taps differ from touch taps in two ways: a single tap with no
/// selection live *focuses* rather than activates (activation is the double
/// tap), and a right click — or alt + primary, the trackpad idiom — selects
/// the item under the pointer if needed and then asks the host's
/// context-click listener for a menu.
///
/// Selection-mode taps are handled on the lift ([`GestureListener::on_single_tap_up`])
/// for responsiveness; taps that may yet become a double tap wait for
/// [`GestureListener::on_single_tap_confirmed`].
pub struct MouseInputHandler<K> {
    core: HandlerCore<K>,
    details: Rc<dyn ItemDetailsLookup<K>>,
    context_click_listener: Rc<dyn ContextClickListener>,
    activation_listener: Rc<dyn ItemActivatedListener<K>>,
    /// The down was consumed as a context click; swallow the tap it produces.
    handled_on_down: Cell<bool>,
    /// The lift was consumed as a selection-mode tap; swallow the confirm.
    handled_tap_up: Cell<bool>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> MouseInputHandler<K> {
    /// Create a handler. Pass the no-op listener types for outcomes the
    /// host does not care about.
    pub fn new(
        tracker: Rc<SelectionTracker<K>>,
        key_provider: Rc<dyn KeyProvider<K>>,
        details: Rc<dyn ItemDetailsLookup<K>>,
        focus: Rc<dyn FocusDelegate<K>>,
        context_click_listener: Rc<dyn ContextClickListener>,
        activation_listener: Rc<dyn ItemActivatedListener<K>>,
    ) -> Self {
        Self {
            core: HandlerCore {
                tracker,
                key_provider,
                focus,
            },
            details,
            context_click_listener,
            activation_listener,
            handled_on_down: Cell::new(false),
            handled_tap_up: Cell::new(false),
        }
    }

    fn tracker(&self) -> &SelectionTracker<K> {
        &self.core.tracker
    }

    fn on_context_click(&self, event: &PointerEvent) -> bool {
        if let Some(item) = self.details.item_details(event) {
            if item.has_key() {
                let key = item.key.clone().expect("checked by has_key");
                if !self.tracker().is_selected(&key) {
                    self.tracker().clear_selection();
                    self.core.select_item(&item);
                }
            }
        }
        self.context_click_listener.on_context_click(event)
    }
}

impl<K: Clone + Eq + Hash + Debug + 'static> GestureListener for MouseInputHandler<K> {
    fn on_down(&self, event: &PointerEvent) -> bool {
        if event.secondary_pressed() || (event.alt_pressed() && event.primary_pressed()) {
            self.handled_on_down.set(true);
            return self.on_context_click(event);
        }
        false
    }

    fn on_single_tap_up(&self, event: &PointerEvent) -> bool {
        if self.handled_on_down.replace(false) {
            // The down already resolved this gesture as a context click.
            return false;
        }
        if !self.tracker().has_selection() {
            // Leave the tap for on_single_tap_confirmed / on_double_tap.
            return false;
        }
        let item = match self.details.item_details(event) {
            Some(item) if item.has_key() => item,
            _ => {
                self.tracker().clear_selection();
                self.core.focus.clear_focus();
                self.handled_tap_up.set(true);
                return true;
            }
        };
        let key = item.key.clone().expect("checked by has_key");
        if should_extend_range(&self.core, event) {
            self.core.extend_selection_range(&item);
        } else if self.tracker().is_selected(&key) {
            self.tracker().deselect(&key);
        } else {
            self.core.select_item(&item);
        }
        self.handled_tap_up.set(true);
        true
    }

    fn on_single_tap_confirmed(&self, event: &PointerEvent) -> bool {
        if self.handled_tap_up.replace(false) {
            return false;
        }
        if self.tracker().has_selection() {
            // Selection-mode taps were handled on the lift.
            return false;
        }
        let item = match self.details.item_details(event) {
            Some(item) if item.has_key() => item,
            _ => return false,
        };
        if item.in_selection_hotspot {
            return self.core.select_item(&item);
        }
        self.core.focus.focus_item(&item);
        true
    }

    fn on_double_tap(&self, event: &PointerEvent) -> bool {
        self.handled_tap_up.set(false);
        match self.details.item_details(event) {
            Some(item) if item.has_key() => {
                self.activation_listener.on_item_activated(&item, event)
            }
            _ => false,
        }
    }
}

impl<K> Debug for MouseInputHandler<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MouseInputHandler").finish_non_exhaustive()
    }
}
