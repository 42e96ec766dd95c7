// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-proximity auto-scroll for drag gestures.

use alloc::rc::Rc;
use core::cell::Cell;
use kurbo::Point;

/// The scrolling side of a drag: helpers report the pointer location while
/// a drag is live and reset when it ends.
pub trait AutoScroller {
    /// The pointer moved to `location` (view coordinates) mid-drag.
    fn scroll(&self, location: Point);

    /// The drag ended or was interrupted; stop scrolling.
    fn reset(&self);
}

/// An [`AutoScroller`] that never scrolls, for hosts without a viewport.
#[derive(Debug, Default)]
pub struct NoopAutoScroller;

impl AutoScroller for NoopAutoScroller {
    fn scroll(&self, _location: Point) {}
    fn reset(&self) {}
}

/// The host viewport an [`EdgeAutoScroller`] drives.
///
/// Scheduling is cooperative: `request_tick` asks the host to call
/// [`EdgeAutoScroller::on_tick`] at its next frame; the scroller re-requests
/// from inside the tick while it remains active, and `cancel_tick` withdraws
/// an outstanding request.
pub trait ScrollHost {
    /// Current viewport height in view coordinates.
    fn view_height(&self) -> f64;

    /// Scroll the content by `dy` (positive scrolls down).
    fn scroll_by(&self, dy: f64);

    /// Schedule a call to the scroller's tick at the next frame.
    fn request_tick(&self);

    /// Withdraw any outstanding tick request.
    fn cancel_tick(&self);
}

/// Fraction of the viewport height, at each end, inside which a drag starts
/// to auto-scroll.
const EDGE_BAND_RATIO: f64 = 0.125;

/// Largest per-tick scroll step, reached when the pointer is pinned to (or
/// past) the viewport edge.
const MAX_SCROLL_STEP: f64 = 70.0;

/// Scrolls the viewport while a drag hovers near its top or bottom edge.
///
/// The step per tick ramps with the pointer's depth into the edge band:
/// the depth fraction is clamped to ±1 and raised to the tenth power, so
/// scrolling stays barely perceptible through most of the band and reaches
/// full speed only hard against the edge.
pub struct EdgeAutoScroller {
    host: Rc<dyn ScrollHost>,
    last_location: Cell<Option<Point>>,
    active: Cell<bool>,
}

impl EdgeAutoScroller {
    /// Create a scroller over `host`.
    pub fn new(host: Rc<dyn ScrollHost>) -> Self {
        Self {
            host,
            last_location: Cell::new(None),
            active: Cell::new(false),
        }
    }

    /// One scheduled tick: apply the current step and re-request while the
    /// drag is live. Called by the host in response to
    /// [`ScrollHost::request_tick`].
    pub fn on_tick(&self) {
        if !self.active.get() {
            return;
        }
        let Some(location) = self.last_location.get() else {
            return;
        };
        let dy = self.step_for(location.y);
        if dy != 0.0 {
            self.host.scroll_by(dy);
        }
        self.host.request_tick();
    }

    fn step_for(&self, y: f64) -> f64 {
        let height = self.host.view_height();
        let band = height * EDGE_BAND_RATIO;
        if band <= 0.0 {
            return 0.0;
        }
        let past_edge = if y < band {
            y - band
        } else if y > height - band {
            y - (height - band)
        } else {
            return 0.0;
        };
        let depth = (past_edge / band).clamp(-1.0, 1.0);
        MAX_SCROLL_STEP * decile(depth)
    }
}

/// `r^10` with the sign of `r` preserved.
fn decile(r: f64) -> f64 {
    let r2 = r * r;
    let r4 = r2 * r2;
    let magnitude = r4 * r4 * r2;
    if r < 0.0 { -magnitude } else { magnitude }
}

impl AutoScroller for EdgeAutoScroller {
    fn scroll(&self, location: Point) {
        self.last_location.set(Some(location));
        if !self.active.replace(true) {
            self.host.request_tick();
        }
    }

    fn reset(&self) {
        self.active.set(false);
        self.last_location.set(None);
        self.host.cancel_tick();
    }
}

impl core::fmt::Debug for EdgeAutoScroller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EdgeAutoScroller")
            .field("active", &self.active.get())
            .field("last_location", &self.last_location.get())
            .finish_non_exhaustive()
    }
}
