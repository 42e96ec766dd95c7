// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operation-in-progress tracking.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use crate::reset::Resettable;

/// Change notification for [`OperationMonitor`] busy-state transitions.
pub type MonitorListener = Rc<dyn Fn()>;

#[derive(Default)]
struct MonitorInner {
    ops: Cell<usize>,
    listeners: RefCell<alloc::vec::Vec<MonitorListener>>,
}

impl MonitorInner {
    fn notify(&self) {
        // Snapshot so a listener can add/remove listeners re-entrantly.
        let listeners: alloc::vec::Vec<MonitorListener> = self.listeners.borrow().clone();
        for listener in &listeners {
            listener();
        }
    }
}

impl Resettable for MonitorInner {
    fn is_reset_required(&self) -> bool {
        self.ops.get() > 0
    }

    fn reset(&self) {
        if self.ops.replace(0) > 0 {
            self.notify();
        }
    }
}

/// A reference-counted "selection operation in progress" flag.
///
/// Long-running selection-affecting operations — a gesture drag, a band
/// sweep — hold the monitor between `start` and `stop` so competing
/// operations can refuse to begin. Clones share one counter; `start`/`stop`
/// pairs must balance even on the cancellation path (helpers stop the
/// monitor from both their merge and their reset paths).
///
/// Listeners fire on the idle↔busy transitions only, not on every nested
/// start/stop.
#[derive(Clone, Default)]
pub struct OperationMonitor {
    inner: Rc<MonitorInner>,
}

impl OperationMonitor {
    /// Create an idle monitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of an operation.
    pub fn start(&self) {
        let ops = self.inner.ops.get() + 1;
        self.inner.ops.set(ops);
        if ops == 1 {
            self.inner.notify();
        }
    }

    /// Mark the end of an operation.
    ///
    /// # Panics
    ///
    /// Panics if there is no operation in progress; an unbalanced stop is a
    /// programming error in the calling helper.
    pub fn stop(&self) {
        let ops = self.inner.ops.get();
        assert!(ops > 0, "OperationMonitor::stop without a matching start");
        self.inner.ops.set(ops - 1);
        if ops == 1 {
            self.inner.notify();
        }
    }

    /// Whether any operation is in progress.
    pub fn is_started(&self) -> bool {
        self.inner.ops.get() > 0
    }

    /// Register a busy-state transition listener.
    pub fn add_listener(&self, listener: MonitorListener) {
        self.inner.listeners.borrow_mut().push(listener);
    }

    /// Remove a previously registered listener (identity comparison).
    pub fn remove_listener(&self, listener: &MonitorListener) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// A [`Resettable`] view of this monitor for reset-manager registration.
    /// Resetting zeroes the counter outright; the operations it counted are
    /// being interrupted, not completed.
    pub fn as_resettable(&self) -> Rc<dyn Resettable> {
        self.inner.clone()
    }
}

impl core::fmt::Debug for OperationMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OperationMonitor")
            .field("ops", &self.inner.ops.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_stop_tracks_busy_state() {
        let monitor = OperationMonitor::new();
        assert!(!monitor.is_started());
        monitor.start();
        assert!(monitor.is_started());
        monitor.start();
        monitor.stop();
        // Still busy: starts nest.
        assert!(monitor.is_started());
        monitor.stop();
        assert!(!monitor.is_started());
    }

    #[test]
    fn clones_share_the_counter() {
        let monitor = OperationMonitor::new();
        let other = monitor.clone();
        monitor.start();
        assert!(other.is_started());
        other.stop();
        assert!(!monitor.is_started());
    }

    #[test]
    #[should_panic(expected = "without a matching start")]
    fn unbalanced_stop_panics() {
        OperationMonitor::new().stop();
    }

    #[test]
    fn listeners_fire_only_on_transitions() {
        let monitor = OperationMonitor::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in = fired.clone();
        monitor.add_listener(Rc::new(move || fired_in.set(fired_in.get() + 1)));

        monitor.start(); // idle -> busy
        monitor.start(); // nested, no notification
        monitor.stop(); // still busy
        monitor.stop(); // busy -> idle
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn reset_zeroes_the_counter() {
        let monitor = OperationMonitor::new();
        monitor.start();
        monitor.start();
        let resettable = monitor.as_resettable();
        assert!(resettable.is_reset_required());
        resettable.reset();
        assert!(!monitor.is_started());
        assert!(!resettable.is_reset_required());
    }

    #[test]
    fn removed_listener_goes_quiet() {
        let monitor = OperationMonitor::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in = fired.clone();
        let listener: MonitorListener = Rc::new(move || fired_in.set(fired_in.get() + 1));
        monitor.add_listener(listener.clone());
        monitor.remove_listener(&listener);
        monitor.start();
        assert_eq!(fired.get(), 0);
    }
}
