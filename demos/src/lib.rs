// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared in-memory fixtures for the Thicket demos: a simple list model
//! that implements every host capability, and a scripted gesture detector.

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use thicket::gesture_event::{GestureDetector, GestureListener, GestureRouter};
use thicket::{
    AccessScope, BandHost, ItemChangeNotifier, ItemDetails, ItemDetailsLookup, KeyProvider,
    ListDelegate, PointerEvent,
};

/// Row height of the demo list, in logical pixels.
pub const ROW_HEIGHT: f64 = 24.0;
/// Row width of the demo list.
pub const ROW_WIDTH: f64 = 320.0;
/// Width of the selection hot-spot at the left edge of each row.
pub const HOTSPOT_WIDTH: f64 = 32.0;
/// Width of the drag handle at the right edge of each row.
pub const DRAG_HANDLE_WIDTH: f64 = 32.0;

/// An in-memory list whose keys are its row labels.
///
/// Implements every capability the pipeline consumes: key lookup, item
/// details (hot-spot at the left edge, drag handle at the right), drag
/// layout, and band layout.
#[derive(Debug)]
pub struct SimpleList {
    labels: Vec<String>,
}

impl SimpleList {
    /// Create a list over `labels`.
    pub fn new(labels: &[&str]) -> Rc<Self> {
        Rc::new(Self {
            labels: labels.iter().map(|l| (*l).to_owned()).collect(),
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn row_at(&self, y: f64) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let position = (y / ROW_HEIGHT) as usize;
        (position < self.labels.len()).then_some(position)
    }

    /// The center of a row, handy for scripting pointer events.
    pub fn center_of(&self, position: usize) -> Point {
        Point::new(ROW_WIDTH / 2.0, position as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0)
    }

    /// A point inside a row's selection hot-spot.
    pub fn hotspot_of(&self, position: usize) -> Point {
        Point::new(
            HOTSPOT_WIDTH / 2.0,
            position as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0,
        )
    }
}

impl KeyProvider<String> for SimpleList {
    fn has_access(&self, _scope: AccessScope) -> bool {
        true
    }

    fn key_at(&self, position: usize) -> Option<String> {
        self.labels.get(position).cloned()
    }

    fn position_of(&self, key: &String) -> Option<usize> {
        self.labels.iter().position(|l| l == key)
    }
}

impl ItemDetailsLookup<String> for SimpleList {
    fn item_details(&self, event: &PointerEvent) -> Option<ItemDetails<String>> {
        let position = self.row_at(event.position.y)?;
        Some(ItemDetails {
            position,
            key: Some(self.labels[position].clone()),
            in_selection_hotspot: event.position.x < HOTSPOT_WIDTH,
            in_drag_region: event.position.x > ROW_WIDTH - DRAG_HANDLE_WIDTH,
        })
    }
}

impl ListDelegate for SimpleList {
    fn height(&self) -> f64 {
        self.labels.len() as f64 * ROW_HEIGHT
    }

    fn item_under(&self, point: Point) -> Option<usize> {
        self.row_at(point.y)
    }

    fn last_glided_position(&self, point: Point) -> usize {
        self.row_at(point.y)
            .unwrap_or_else(|| self.labels.len().saturating_sub(1))
    }
}

impl BandHost for SimpleList {
    fn visible_items(&self) -> Vec<(usize, Rect)> {
        (0..self.labels.len())
            .map(|i| {
                let top = i as f64 * ROW_HEIGHT;
                (i, Rect::new(0.0, top, ROW_WIDTH, top + ROW_HEIGHT))
            })
            .collect()
    }
}

/// Prints row-change notifications the way an adapter would re-bind rows.
#[derive(Debug, Default)]
pub struct PrintingNotifier;

impl ItemChangeNotifier for PrintingNotifier {
    fn notify_item_changed(&self, position: usize, marker: &str) {
        println!("    (adapter) re-bind row {position} [{marker}]");
    }
}

/// A scripted gesture recognizer: every lift that was not preceded by a
/// long-press is a tap. Long-press timeouts do not exist here; the demo
/// script calls [`SimpleDetector::fire_long_press`] where a real
/// recognizer's timer would fire.
pub struct SimpleDetector {
    router: Rc<GestureRouter>,
    pressed: Cell<Option<PointerEvent>>,
    long_press_fired: Cell<bool>,
}

impl SimpleDetector {
    /// Create a detector reporting to `router`.
    pub fn new(router: Rc<GestureRouter>) -> Rc<Self> {
        Rc::new(Self {
            router,
            pressed: Cell::new(None),
            long_press_fired: Cell::new(false),
        })
    }

    /// Simulate the long-press timeout for the current press.
    pub fn fire_long_press(&self) {
        if let Some(down) = self.pressed.get() {
            self.long_press_fired.set(true);
            self.router.on_long_press(&down);
        }
    }
}

impl GestureDetector for SimpleDetector {
    fn handle(&self, event: &PointerEvent) -> bool {
        if event.is_down() {
            self.pressed.set(Some(*event));
            self.long_press_fired.set(false);
            return self.router.on_down(event);
        }
        if event.is_cancel() {
            self.pressed.set(None);
            self.long_press_fired.set(false);
            return false;
        }
        if event.is_up() {
            let had_press = self.pressed.replace(None).is_some();
            let long_pressed = self.long_press_fired.replace(false);
            if had_press && !long_pressed {
                let handled = self.router.on_single_tap_up(event);
                let confirmed = self.router.on_single_tap_confirmed(event);
                return handled || confirmed;
            }
        }
        false
    }
}

impl std::fmt::Debug for SimpleDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleDetector")
            .field("pressed", &self.pressed.get().is_some())
            .finish_non_exhaustive()
    }
}
