// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition root.
//!
//! [`TrackerBuilder`] is the one place the whole pipeline is wired: every
//! component is constructed with the collaborators it needs as explicit
//! arguments, and the result is handed back as a [`SelectionPipeline`]. No
//! component discovers another through globals or ambient registries.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt::Debug;
use core::hash::Hash;

use thicket_events::filters::{DisallowInterceptFilter, EventBackstop};
use thicket_events::gesture::{GestureAdapter, GestureDetector, GestureRouter};
use thicket_events::router::EventRouter;
use thicket_events::{
    EventDispatcher, EventHandler, OperationMonitor, PointerEvent, ResetManager, ToolType,
};
use thicket_gesture::autoscroll::{AutoScroller, EdgeAutoScroller, NoopAutoScroller, ScrollHost};
use thicket_gesture::band::{BandHost, BandPredicate, BandSelectionHelper, NonDraggableArea};
use thicket_gesture::drag::{GestureSelectionHelper, ListDelegate};
use thicket_gesture::interceptor::PointerDragInterceptor;
use thicket_input::listeners::{
    ContextClickListener, DragInitiatedListener, ItemActivatedListener, NoopContextClickListener,
    NoopDragInitiatedListener, NoopItemActivatedListener,
};
use thicket_input::{
    FocusDelegate, ItemDetailsLookup, MouseInputHandler, NoopFocusDelegate, TouchInputHandler,
};
use thicket_selection::bridge::{ItemChangeNotifier, install_bridge};
use thicket_selection::key_provider::AccessScope;
use thicket_selection::{
    KeyProvider, SelectAnything, SelectionObserver, SelectionPredicate, SelectionTracker,
};

/// Observer facade: an externally triggered clear means every gesture in
/// flight is now meaningless.
struct ResetOnClear {
    manager: ResetManager,
}

impl<K> SelectionObserver<K> for ResetOnClear {
    fn on_selection_cleared(&self) {
        self.manager.request_reset();
    }
}

/// Builds a fully wired selection pipeline for one list view.
///
/// Required collaborators come in through [`TrackerBuilder::new`] and
/// [`TrackerBuilder::build`]; everything else has a sensible default and a
/// `with_*` override. Continuous-gesture features degrade by omission:
/// without a [`ListDelegate`] there is no finger-drag range selection,
/// without a [`BandHost`] (or without mapped key access, or with a
/// single-select predicate) there is no band selection, and without a
/// [`ScrollHost`] drags simply do not auto-scroll.
pub struct TrackerBuilder<K> {
    selection_id: String,
    key_provider: Rc<dyn KeyProvider<K>>,
    details: Rc<dyn ItemDetailsLookup<K>>,
    predicate: Rc<dyn SelectionPredicate<K>>,
    monitor: OperationMonitor,
    focus: Rc<dyn FocusDelegate<K>>,
    activation_listener: Rc<dyn ItemActivatedListener<K>>,
    drag_listener: Rc<dyn DragInitiatedListener>,
    context_click_listener: Rc<dyn ContextClickListener>,
    band_predicate: Option<Rc<dyn BandPredicate>>,
    band_host: Option<Rc<dyn BandHost>>,
    scroll_host: Option<Rc<dyn ScrollHost>>,
    list_delegate: Option<Rc<dyn ListDelegate>>,
    notifier: Option<Rc<dyn ItemChangeNotifier>>,
    haptics: Rc<dyn Fn()>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> TrackerBuilder<K> {
    /// Start a builder for the list identified by `selection_id`.
    ///
    /// # Panics
    ///
    /// Panics if `selection_id` is empty (via the tracker, at build time).
    pub fn new(
        selection_id: &str,
        key_provider: Rc<dyn KeyProvider<K>>,
        details: Rc<dyn ItemDetailsLookup<K>>,
    ) -> Self {
        Self {
            selection_id: String::from(selection_id),
            key_provider,
            details,
            predicate: Rc::new(SelectAnything),
            monitor: OperationMonitor::new(),
            focus: Rc::new(NoopFocusDelegate),
            activation_listener: Rc::new(NoopItemActivatedListener),
            drag_listener: Rc::new(NoopDragInitiatedListener),
            context_click_listener: Rc::new(NoopContextClickListener),
            band_predicate: None,
            band_host: None,
            scroll_host: None,
            list_delegate: None,
            notifier: None,
            haptics: Rc::new(|| {}),
        }
    }

    /// Replace the default allow-everything predicate.
    pub fn with_selection_predicate(mut self, predicate: Rc<dyn SelectionPredicate<K>>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Share an operation monitor with other machinery in the host.
    pub fn with_operation_monitor(mut self, monitor: OperationMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Route focus side effects to the host.
    pub fn with_focus_delegate(mut self, focus: Rc<dyn FocusDelegate<K>>) -> Self {
        self.focus = focus;
        self
    }

    /// Receive item activations (taps outside selection semantics).
    pub fn with_item_activated_listener(
        mut self,
        listener: Rc<dyn ItemActivatedListener<K>>,
    ) -> Self {
        self.activation_listener = listener;
        self
    }

    /// Receive drag-initiation requests for selected items.
    pub fn with_drag_initiated_listener(mut self, listener: Rc<dyn DragInitiatedListener>) -> Self {
        self.drag_listener = listener;
        self
    }

    /// Receive context clicks.
    pub fn with_context_click_listener(mut self, listener: Rc<dyn ContextClickListener>) -> Self {
        self.context_click_listener = listener;
        self
    }

    /// Replace the default band predicate (anywhere-but-a-drag-region).
    pub fn with_band_predicate(mut self, predicate: Rc<dyn BandPredicate>) -> Self {
        self.band_predicate = Some(predicate);
        self
    }

    /// Enable band selection against this layout/feedback surface.
    pub fn with_band_host(mut self, host: Rc<dyn BandHost>) -> Self {
        self.band_host = Some(host);
        self
    }

    /// Enable auto-scroll during drags against this viewport.
    pub fn with_scroll_host(mut self, host: Rc<dyn ScrollHost>) -> Self {
        self.scroll_host = Some(host);
        self
    }

    /// Enable finger-drag range selection against this layout.
    pub fn with_list_delegate(mut self, delegate: Rc<dyn ListDelegate>) -> Self {
        self.list_delegate = Some(delegate);
        self
    }

    /// Re-bind rows as their selection state changes.
    pub fn with_item_change_notifier(mut self, notifier: Rc<dyn ItemChangeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Haptic feedback hook for accepted long-press outcomes.
    pub fn with_haptics(mut self, haptics: Rc<dyn Fn()>) -> Self {
        self.haptics = haptics;
        self
    }

    /// Wire everything and hand back the pipeline.
    ///
    /// `detector_factory` receives the gesture router and must return the
    /// host's gesture recognizer calling back into it; tap/long-press
    /// recognition itself lives outside this crate.
    pub fn build<F>(self, detector_factory: F) -> SelectionPipeline<K>
    where
        F: FnOnce(Rc<GestureRouter>) -> Rc<dyn GestureDetector>,
    {
        let tracker = Rc::new(SelectionTracker::new(
            &self.selection_id,
            self.key_provider.clone(),
            self.predicate.clone(),
        ));

        if let Some(notifier) = &self.notifier {
            install_bridge(&tracker, self.key_provider.clone(), notifier.clone());
        }

        let edge_scroller = self
            .scroll_host
            .as_ref()
            .map(|host| Rc::new(EdgeAutoScroller::new(host.clone())));
        let scroller: Rc<dyn AutoScroller> = match &edge_scroller {
            Some(edge) => edge.clone(),
            None => Rc::new(NoopAutoScroller),
        };

        let gesture_router = Rc::new(GestureRouter::new());
        let detector = detector_factory(gesture_router.clone());
        let gesture_adapter = Rc::new(GestureAdapter::new(detector));

        let gesture_helper = self.list_delegate.as_ref().map(|view| {
            Rc::new(GestureSelectionHelper::new(
                tracker.clone(),
                view.clone(),
                scroller.clone(),
                self.monitor.clone(),
            ))
        });

        let event_router = Rc::new(EventRouter::new());
        let backstop = Rc::new(EventBackstop::new());
        let backstop_filter = Rc::new(DisallowInterceptFilter::new(backstop.clone()));
        let backstop_router = Rc::new(EventRouter::new());
        backstop_router.set(ToolType::Finger, backstop_filter.clone());
        backstop_router.set(ToolType::Stylus, backstop_filter.clone());

        let reset_manager = ResetManager::new();
        tracker.add_observer(Rc::new(ResetOnClear {
            manager: reset_manager.clone(),
        }));

        let dispatcher = Rc::new(EventDispatcher::new());
        dispatcher.add_handler(reset_manager.input_handler());
        dispatcher.add_handler(event_router.clone());
        dispatcher.add_handler(gesture_adapter.clone());
        dispatcher.add_handler(backstop_router.clone());

        // Participant order places filters that guard against re-entrant
        // routing before the handlers they wrap.
        reset_manager.add_resettable(tracker.clone());
        reset_manager.add_resettable(self.monitor.as_resettable());
        if let Some(helper) = &gesture_helper {
            reset_manager.add_resettable(helper.clone());
        }
        reset_manager.add_resettable(gesture_adapter.clone());
        reset_manager.add_resettable(event_router.clone());
        reset_manager.add_resettable(backstop_router.clone());
        reset_manager.add_resettable(backstop.clone());
        reset_manager.add_resettable(backstop_filter.clone());

        let gesture_starter: Rc<dyn Fn()> = match &gesture_helper {
            Some(helper) => {
                let helper = helper.clone();
                Rc::new(move || helper.start())
            }
            None => Rc::new(|| {}),
        };
        let long_press_latch: Rc<dyn Fn()> = {
            let backstop = backstop.clone();
            Rc::new(move || backstop.on_long_press())
        };

        let touch_handler = Rc::new(TouchInputHandler::new(
            tracker.clone(),
            self.key_provider.clone(),
            self.details.clone(),
            self.predicate.clone(),
            self.focus.clone(),
            gesture_starter,
            self.drag_listener.clone(),
            self.activation_listener.clone(),
            self.haptics.clone(),
            long_press_latch,
        ));
        gesture_router.register(ToolType::Finger, touch_handler.clone());
        gesture_router.register(ToolType::Stylus, touch_handler);
        if let Some(helper) = &gesture_helper {
            event_router.set(ToolType::Finger, helper.clone());
            event_router.set(ToolType::Stylus, helper.clone());
        }

        let mouse_handler = Rc::new(MouseInputHandler::new(
            tracker.clone(),
            self.key_provider.clone(),
            self.details.clone(),
            self.focus.clone(),
            self.context_click_listener.clone(),
            self.activation_listener.clone(),
        ));
        gesture_router.register(ToolType::Mouse, mouse_handler);

        let band_enabled = self.band_host.is_some()
            && self.key_provider.has_access(AccessScope::Mapped)
            && self.predicate.can_select_multiple();
        let band_helper = if band_enabled {
            let band_predicate = self
                .band_predicate
                .clone()
                .unwrap_or_else(|| Rc::new(NonDraggableArea::new(self.details.clone())));
            let helper = Rc::new(BandSelectionHelper::new(
                tracker.clone(),
                self.key_provider.clone(),
                self.predicate.clone(),
                band_predicate,
                self.band_host.clone().expect("checked by band_enabled"),
                scroller.clone(),
                self.monitor.clone(),
            ));
            reset_manager.add_resettable(helper.clone());
            Some(helper)
        } else {
            None
        };
        event_router.set(
            ToolType::Mouse,
            Rc::new(PointerDragInterceptor::new(
                self.details.clone(),
                self.drag_listener.clone(),
                band_helper
                    .as_ref()
                    .map(|helper| helper.clone() as Rc<dyn EventHandler>),
            )),
        );

        SelectionPipeline {
            tracker,
            dispatcher,
            reset_manager,
            monitor: self.monitor,
            gesture_router,
            gesture_helper,
            band_helper,
            edge_scroller,
        }
    }
}

impl<K> Debug for TrackerBuilder<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackerBuilder")
            .field("selection_id", &self.selection_id)
            .finish_non_exhaustive()
    }
}

/// A wired selection pipeline for one list view.
///
/// The host owns this for as long as the view is attached, feeds it every
/// pointer event via [`SelectionPipeline::dispatch`], and forwards
/// nested-scroll interception via
/// [`SelectionPipeline::set_disallow_intercept`]. Dropping the pipeline
/// tears the whole object graph down.
pub struct SelectionPipeline<K> {
    tracker: Rc<SelectionTracker<K>>,
    dispatcher: Rc<EventDispatcher>,
    reset_manager: ResetManager,
    monitor: OperationMonitor,
    gesture_router: Rc<GestureRouter>,
    gesture_helper: Option<Rc<GestureSelectionHelper<K>>>,
    band_helper: Option<Rc<BandSelectionHelper<K>>>,
    edge_scroller: Option<Rc<EdgeAutoScroller>>,
}

impl<K: Clone + Eq + Hash + Debug + 'static> SelectionPipeline<K> {
    /// Feed one pointer event through the pipeline. Returns `true` if some
    /// handler owned it.
    pub fn dispatch(&self, event: &PointerEvent) -> bool {
        self.dispatcher.dispatch(event)
    }

    /// A nested scrolling child claimed (or released) the pointer stream.
    pub fn set_disallow_intercept(&self, disallow: bool) {
        self.dispatcher.set_disallow_intercept(disallow);
    }

    /// The tracker: the host's handle for programmatic selection access.
    pub fn tracker(&self) -> &Rc<SelectionTracker<K>> {
        &self.tracker
    }

    /// The shared operation monitor.
    pub fn monitor(&self) -> &OperationMonitor {
        &self.monitor
    }

    /// The reset manager, for registering additional host participants.
    pub fn reset_manager(&self) -> &ResetManager {
        &self.reset_manager
    }

    /// The gesture router, for hosts that classify gestures themselves and
    /// want to feed classifications in directly.
    pub fn gesture_router(&self) -> &Rc<GestureRouter> {
        &self.gesture_router
    }

    /// The finger-drag helper, when a list delegate was provided. Hosts
    /// with their own long-press sources may arm it directly.
    pub fn gesture_helper(&self) -> Option<&Rc<GestureSelectionHelper<K>>> {
        self.gesture_helper.as_ref()
    }

    /// Whether band selection was enabled at build time.
    pub fn band_selection_enabled(&self) -> bool {
        self.band_helper.is_some()
    }

    /// The edge auto-scroller, when a scroll host was provided. The host's
    /// tick scheduling calls [`EdgeAutoScroller::on_tick`] on it.
    pub fn edge_scroller(&self) -> Option<&Rc<EdgeAutoScroller>> {
        self.edge_scroller.as_ref()
    }
}

impl<K> Debug for SelectionPipeline<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectionPipeline")
            .field("band_selection", &self.band_helper.is_some())
            .field("gesture_selection", &self.gesture_helper.is_some())
            .finish_non_exhaustive()
    }
}
