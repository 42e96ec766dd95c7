// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event model.
//!
//! A [`PointerEvent`] is the raw unit of input consumed by every handler in
//! this workspace: an action, a position, the tool that produced it, and the
//! modifier/button state at the time it fired. Hosts translate their native
//! input events into this type once, at the boundary, and feed them to an
//! [`EventDispatcher`](crate::handler::EventDispatcher).
//!
//! The helper predicates (`is_down`, `shift_pressed`, `is_pointer_drag_event`,
//! …) exist so handler code reads as a decision tree rather than a pile of
//! field comparisons.

use kurbo::Point;

/// Classification of the input device that produced a pointer event.
///
/// Routing decisions key off this value: touch-style handlers are registered
/// for [`ToolType::Finger`]/[`ToolType::Stylus`], pointer-style handlers for
/// [`ToolType::Mouse`]. Events from unregistered tools fall through to a
/// registry's default handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolType {
    /// The device class could not be determined.
    Unknown,
    /// A finger on a touch surface.
    Finger,
    /// A stylus on a touch surface.
    Stylus,
    /// A mouse or trackpad pointer.
    Mouse,
    /// The eraser end of a stylus.
    Eraser,
}

impl ToolType {
    /// Number of distinct tool classes; used to size per-tool registries.
    pub(crate) const COUNT: usize = 5;

    /// Dense index for per-tool registry slots.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Finger => 1,
            Self::Stylus => 2,
            Self::Mouse => 3,
            Self::Eraser => 4,
        }
    }
}

/// What a pointer did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The pointer made contact (press / primary button down).
    Down,
    /// The pointer moved while in contact.
    Move,
    /// The pointer lifted normally.
    Up,
    /// The gesture was aborted; no terminal `Up` will follow.
    Cancel,
}

bitflags::bitflags! {
    /// Keyboard modifier state captured with a pointer event.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        /// Shift key held.
        const SHIFT = 1 << 0;
        /// Control key held.
        const CTRL = 1 << 1;
        /// Alt key held.
        const ALT = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Mouse button state captured with a pointer event.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        /// Primary (usually left) button.
        const PRIMARY = 1 << 0;
        /// Secondary (usually right) button.
        const SECONDARY = 1 << 1;
        /// Tertiary (usually middle) button.
        const TERTIARY = 1 << 2;
    }
}

/// A single pointer input event.
///
/// Events are cheap, `Copy`, and carry no references back into the host; a
/// handler that needs to remember where a gesture began stores the position,
/// not the event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What the pointer did.
    pub action: PointerAction,
    /// Position in the host view's coordinate space.
    pub position: Point,
    /// Device class of the originating pointer.
    pub tool: ToolType,
    /// Keyboard modifiers held when the event fired.
    pub modifiers: Modifiers,
    /// Mouse buttons held when the event fired.
    pub buttons: Buttons,
}

impl PointerEvent {
    /// Create an event with no modifiers and no buttons pressed.
    pub fn new(action: PointerAction, tool: ToolType, position: Point) -> Self {
        Self {
            action,
            position,
            tool,
            modifiers: Modifiers::empty(),
            buttons: Buttons::empty(),
        }
    }

    /// A synthetic cancel event, used to abort an in-flight gesture in a
    /// wrapped recognizer when the pipeline is reset.
    pub fn cancel() -> Self {
        Self::new(PointerAction::Cancel, ToolType::Unknown, Point::ZERO)
    }

    /// Builder-style modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Builder-style button state.
    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// `true` for a press.
    pub fn is_down(&self) -> bool {
        self.action == PointerAction::Down
    }

    /// `true` for a motion update.
    pub fn is_move(&self) -> bool {
        self.action == PointerAction::Move
    }

    /// `true` for a normal lift.
    pub fn is_up(&self) -> bool {
        self.action == PointerAction::Up
    }

    /// `true` for a gesture abort.
    pub fn is_cancel(&self) -> bool {
        self.action == PointerAction::Cancel
    }

    /// `true` when the originating pointer is a mouse.
    pub fn is_mouse(&self) -> bool {
        self.tool == ToolType::Mouse
    }

    /// `true` when the originating pointer is a finger or stylus.
    pub fn is_touch(&self) -> bool {
        matches!(self.tool, ToolType::Finger | ToolType::Stylus)
    }

    /// Shift held.
    pub fn shift_pressed(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Control held.
    pub fn ctrl_pressed(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Alt held.
    pub fn alt_pressed(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Primary mouse button held.
    pub fn primary_pressed(&self) -> bool {
        self.buttons.contains(Buttons::PRIMARY)
    }

    /// Secondary mouse button held.
    pub fn secondary_pressed(&self) -> bool {
        self.buttons.contains(Buttons::SECONDARY)
    }

    /// Tertiary mouse button held.
    pub fn tertiary_pressed(&self) -> bool {
        self.buttons.contains(Buttons::TERTIARY)
    }

    /// A mouse move with the primary button held: the start (or continuation)
    /// of a pointer drag, which band selection and drag initiation key off.
    pub fn is_pointer_drag_event(&self) -> bool {
        self.is_mouse() && self.is_move() && self.primary_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_and_predicates() {
        let e = PointerEvent::new(PointerAction::Down, ToolType::Finger, Point::new(3.0, 4.0));
        assert!(e.is_down());
        assert!(!e.is_up());
        assert!(e.is_touch());
        assert!(!e.is_mouse());
        assert!(!e.shift_pressed());
        assert_eq!(e.position, Point::new(3.0, 4.0));
    }

    #[test]
    fn cancel_event_is_cancel() {
        let e = PointerEvent::cancel();
        assert!(e.is_cancel());
        assert!(!e.is_down());
    }

    #[test]
    fn pointer_drag_requires_mouse_move_and_primary_button() {
        let drag = PointerEvent::new(PointerAction::Move, ToolType::Mouse, Point::ZERO)
            .with_buttons(Buttons::PRIMARY);
        assert!(drag.is_pointer_drag_event());

        let hover = PointerEvent::new(PointerAction::Move, ToolType::Mouse, Point::ZERO);
        assert!(!hover.is_pointer_drag_event());

        let touch_move = PointerEvent::new(PointerAction::Move, ToolType::Finger, Point::ZERO)
            .with_buttons(Buttons::PRIMARY);
        assert!(!touch_move.is_pointer_drag_event());
    }

    #[test]
    fn modifier_builder_composes() {
        let e = PointerEvent::new(PointerAction::Up, ToolType::Mouse, Point::ZERO)
            .with_modifiers(Modifiers::SHIFT | Modifiers::CTRL)
            .with_buttons(Buttons::SECONDARY);
        assert!(e.shift_pressed());
        assert!(e.ctrl_pressed());
        assert!(!e.alt_pressed());
        assert!(e.secondary_pressed());
    }

    #[test]
    fn tool_indices_are_dense_and_distinct() {
        let tools = [
            ToolType::Unknown,
            ToolType::Finger,
            ToolType::Stylus,
            ToolType::Mouse,
            ToolType::Eraser,
        ];
        for (i, t) in tools.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
        assert_eq!(tools.len(), ToolType::COUNT);
    }
}
