// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronized interruption of stateful pipeline participants.
//!
//! Everything in the selection pipeline that accumulates transient input
//! state — routers with disallow latches, gesture helpers mid-drag, the
//! tracker's provisional overlay — implements [`Resettable`]. The
//! [`ResetManager`] holds the whole set and, when any one participant
//! detects an external interruption (a new gesture starting over stale
//! state, the backing data changing under a drag), resets *all* of them in
//! registration order so no participant is left referencing a world that no
//! longer exists.
//!
//! Registration is weak: the manager carries each participant's reset
//! signal, never its lifetime. Participants dropped by their owners simply
//! disappear from subsequent passes.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use smallvec::SmallVec;

use crate::event::PointerEvent;
use crate::handler::EventHandler;

/// A component with transient input state that can be forcibly cleared.
///
/// Methods take `&self`; implementations keep their flags in
/// `Cell`/`RefCell`. A reset pass may reach a participant whose methods are
/// lower on the current call stack, so `reset` must not assume exclusive
/// access to anything beyond the participant's own interior state.
pub trait Resettable {
    /// Whether this participant is holding transient state that a new
    /// gesture must not observe.
    fn is_reset_required(&self) -> bool;

    /// Unconditionally drop transient state. Must leave
    /// [`Resettable::is_reset_required`] returning `false`.
    fn reset(&self);
}

#[derive(Default)]
struct ResetManagerInner {
    participants: RefCell<SmallVec<[Weak<dyn Resettable>; 8]>>,
    in_pass: Cell<bool>,
}

/// Coordinates reset passes over an ordered set of [`Resettable`]s.
///
/// Two triggers feed the manager:
///
/// - [`ResetManager::input_handler`] returns an [`EventHandler`] facade; it
///   runs a pass when a press-down arrives while any participant still
///   reports [`Resettable::is_reset_required`]. Attach it *before* the
///   routers it guards, so stale state is gone before the new gesture is
///   routed.
/// - [`ResetManager::request_reset`] runs a pass directly; the composition
///   root wires it to the tracker's selection-cleared notification.
///
/// A pass resets every live participant, in registration order,
/// unconditionally. Passes are re-entrancy guarded: a participant whose
/// reset clears the selection (and thereby re-triggers the manager) does not
/// start a second pass.
#[derive(Clone, Default)]
pub struct ResetManager {
    inner: Rc<ResetManagerInner>,
}

impl ResetManager {
    /// Create a manager with no participants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `participant` after all current participants.
    ///
    /// Order matters: filters that suppress re-entrant routing must be
    /// registered before the handlers they wrap. Registration is weak; the
    /// caller keeps the participant alive.
    pub fn add_resettable(&self, participant: Rc<dyn Resettable>) {
        self.inner
            .participants
            .borrow_mut()
            .push(Rc::downgrade(&participant));
    }

    /// Whether any live participant reports reset-required.
    pub fn is_reset_required(&self) -> bool {
        self.live().iter().any(|p| p.is_reset_required())
    }

    /// Run a reset pass now, unless one is already in progress.
    pub fn request_reset(&self) {
        if self.inner.in_pass.replace(true) {
            // A pass is already resetting everyone; the nested trigger is a
            // consequence of that pass, not a new interruption.
            return;
        }
        for participant in self.live() {
            participant.reset();
        }
        self.inner.in_pass.set(false);
    }

    /// Run a reset pass only if some participant requires one.
    pub fn reset_if_required(&self) {
        if self.is_reset_required() {
            self.request_reset();
        }
    }

    /// The press-down trigger facade, to be attached to the dispatcher ahead
    /// of the routers.
    pub fn input_handler(&self) -> Rc<dyn EventHandler> {
        Rc::new(ResetTrigger {
            manager: self.clone(),
        })
    }

    /// Snapshot live participants (and prune dead ones) so a pass never
    /// holds the registration borrow while calling out.
    fn live(&self) -> SmallVec<[Rc<dyn Resettable>; 8]> {
        let mut participants = self.inner.participants.borrow_mut();
        participants.retain(|w| w.upgrade().is_some());
        participants.iter().filter_map(Weak::upgrade).collect()
    }
}

impl core::fmt::Debug for ResetManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResetManager")
            .field("participants", &self.inner.participants.borrow().len())
            .field("in_pass", &self.inner.in_pass.get())
            .finish_non_exhaustive()
    }
}

struct ResetTrigger {
    manager: ResetManager,
}

impl EventHandler for ResetTrigger {
    fn on_intercept(&self, event: &PointerEvent) -> bool {
        if event.is_down() {
            self.manager.reset_if_required();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PointerAction, PointerEvent, ToolType};
    use alloc::vec::Vec;
    use kurbo::Point;

    struct Flag {
        dirty: Cell<bool>,
        resets: Cell<usize>,
    }

    impl Flag {
        fn new(dirty: bool) -> Rc<Self> {
            Rc::new(Self {
                dirty: Cell::new(dirty),
                resets: Cell::new(0),
            })
        }
    }

    impl Resettable for Flag {
        fn is_reset_required(&self) -> bool {
            self.dirty.get()
        }

        fn reset(&self) {
            self.dirty.set(false);
            self.resets.set(self.resets.get() + 1);
        }
    }

    #[test]
    fn pass_resets_every_participant_unconditionally() {
        let manager = ResetManager::new();
        let dirty = Flag::new(true);
        let clean = Flag::new(false);
        manager.add_resettable(dirty.clone());
        manager.add_resettable(clean.clone());

        manager.request_reset();
        assert_eq!(dirty.resets.get(), 1);
        assert_eq!(clean.resets.get(), 1);
        assert!(!manager.is_reset_required());
    }

    #[test]
    fn reset_if_required_is_a_noop_when_everyone_is_clean() {
        let manager = ResetManager::new();
        let clean = Flag::new(false);
        manager.add_resettable(clean.clone());
        manager.reset_if_required();
        assert_eq!(clean.resets.get(), 0);
    }

    #[test]
    fn press_down_triggers_a_pass_only_when_state_is_stale() {
        let manager = ResetManager::new();
        let flag = Flag::new(true);
        manager.add_resettable(flag.clone());
        let trigger = manager.input_handler();

        // Moves never trigger.
        trigger.on_intercept(&PointerEvent::new(
            PointerAction::Move,
            ToolType::Finger,
            Point::ZERO,
        ));
        assert_eq!(flag.resets.get(), 0);

        let down = PointerEvent::new(PointerAction::Down, ToolType::Finger, Point::ZERO);
        assert!(!trigger.on_intercept(&down));
        assert_eq!(flag.resets.get(), 1);

        // Clean state: the next down does not re-reset.
        trigger.on_intercept(&down);
        assert_eq!(flag.resets.get(), 1);
    }

    #[test]
    fn dropped_participants_are_skipped() {
        let manager = ResetManager::new();
        let kept = Flag::new(true);
        {
            let dropped = Flag::new(true);
            manager.add_resettable(dropped.clone());
        }
        manager.add_resettable(kept.clone());
        manager.request_reset();
        assert_eq!(kept.resets.get(), 1);
    }

    #[test]
    fn passes_run_in_registration_order() {
        struct Ordered {
            id: usize,
            log: Rc<RefCell<Vec<usize>>>,
        }
        impl Resettable for Ordered {
            fn is_reset_required(&self) -> bool {
                true
            }
            fn reset(&self) {
                self.log.borrow_mut().push(self.id);
            }
        }

        let manager = ResetManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::new(Ordered {
            id: 1,
            log: log.clone(),
        });
        let b = Rc::new(Ordered {
            id: 2,
            log: log.clone(),
        });
        let c = Rc::new(Ordered {
            id: 3,
            log: log.clone(),
        });
        manager.add_resettable(a.clone());
        manager.add_resettable(b.clone());
        manager.add_resettable(c.clone());
        manager.request_reset();
        assert_eq!(*log.borrow(), [1, 2, 3]);
    }

    #[test]
    fn nested_trigger_does_not_start_a_second_pass() {
        struct Recursive {
            manager: RefCell<Option<ResetManager>>,
            resets: Cell<usize>,
        }
        impl Resettable for Recursive {
            fn is_reset_required(&self) -> bool {
                true
            }
            fn reset(&self) {
                self.resets.set(self.resets.get() + 1);
                // Mimic a tracker whose reset clears the selection, which
                // notifies an observer that requests another pass.
                if let Some(manager) = self.manager.borrow().as_ref() {
                    manager.request_reset();
                }
            }
        }

        let manager = ResetManager::new();
        let recursive = Rc::new(Recursive {
            manager: RefCell::new(Some(manager.clone())),
            resets: Cell::new(0),
        });
        manager.add_resettable(recursive.clone());
        manager.request_reset();
        assert_eq!(recursive.resets.get(), 1);
    }
}
