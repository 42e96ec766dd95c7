// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted walk through the selection pipeline: taps, shift-taps,
//! long-press finger-drag range selection, and mouse band selection, all
//! driven by raw pointer events against an in-memory list.
//!
//! Run:
//! - `cargo run -p thicket_demos --example list_selection`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use thicket::{
    Buttons, Modifiers, PointerAction, PointerEvent, SelectionPipeline, ToolType, TrackerBuilder,
};
use thicket_demos::{PrintingNotifier, SimpleDetector, SimpleList};

fn show(pipeline: &SelectionPipeline<String>) {
    let selection = pipeline.tracker().selection();
    let mut committed: Vec<&String> = selection.committed().collect();
    committed.sort();
    let mut provisional: Vec<&String> = selection.provisional().collect();
    provisional.sort();
    println!("  selection: committed={committed:?} provisional={provisional:?}");
}

fn touch(action: PointerAction, at: Point) -> PointerEvent {
    PointerEvent::new(action, ToolType::Finger, at)
}

fn tap(pipeline: &SelectionPipeline<String>, at: Point, modifiers: Modifiers) {
    pipeline.dispatch(&touch(PointerAction::Down, at).with_modifiers(modifiers));
    pipeline.dispatch(&touch(PointerAction::Up, at).with_modifiers(modifiers));
}

fn main() {
    let list = SimpleList::new(&[
        "alder", "birch", "cedar", "dogwood", "elm", "fir", "ginkgo", "hazel",
    ]);

    let detector_slot: Rc<RefCell<Option<Rc<SimpleDetector>>>> = Rc::new(RefCell::new(None));
    let slot = detector_slot.clone();
    let pipeline = TrackerBuilder::new("demo-list", list.clone(), list.clone())
        .with_list_delegate(list.clone())
        .with_band_host(list.clone())
        .with_item_change_notifier(Rc::new(PrintingNotifier))
        .build(move |router| {
            let detector = SimpleDetector::new(router);
            *slot.borrow_mut() = Some(detector.clone());
            detector
        });
    let detector = detector_slot.borrow().clone().expect("factory ran");

    println!("== Tap the hot-spot of row 1 (birch) ==");
    tap(&pipeline, list.hotspot_of(1), Modifiers::empty());
    show(&pipeline);

    println!("\n== Shift-tap row 4 (elm): extend the anchored range ==");
    tap(&pipeline, list.center_of(4), Modifiers::SHIFT);
    show(&pipeline);

    println!("\n== Tap row 2 (cedar) again: toggle it back off ==");
    tap(&pipeline, list.center_of(2), Modifiers::empty());
    show(&pipeline);

    println!("\n== Clear, then long-press row 5 (fir) and drag to row 7 ==");
    pipeline.tracker().clear_selection();
    pipeline.dispatch(&touch(PointerAction::Down, list.center_of(5)));
    detector.fire_long_press();
    for row in [6, 7] {
        pipeline.dispatch(&touch(PointerAction::Move, list.center_of(row)));
        show(&pipeline);
    }
    pipeline.dispatch(&touch(PointerAction::Up, list.center_of(7)));
    println!("  after lift (provisional merged):");
    show(&pipeline);

    println!("\n== Clear, then sweep a mouse band over rows 0..=2 ==");
    pipeline.tracker().clear_selection();
    let band = |point: Point| {
        PointerEvent::new(PointerAction::Move, ToolType::Mouse, point)
            .with_buttons(Buttons::PRIMARY)
    };
    pipeline.dispatch(&band(Point::new(8.0, 4.0)));
    pipeline.dispatch(&band(Point::new(200.0, 40.0)));
    show(&pipeline);
    pipeline.dispatch(&band(Point::new(200.0, 70.0)));
    show(&pipeline);
    pipeline.dispatch(&PointerEvent::new(
        PointerAction::Up,
        ToolType::Mouse,
        Point::new(200.0, 70.0),
    ));
    println!("  after release (band merged):");
    show(&pipeline);

    println!("\n== Save, wipe, restore ==");
    let saved = pipeline.tracker().save_instance_state();
    pipeline.tracker().clear_selection();
    show(&pipeline);
    pipeline.tracker().restore_instance_state(&saved);
    show(&pipeline);
}
