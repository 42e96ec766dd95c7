// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tool-type handler registry.

use crate::event::ToolType;

/// A registry mapping each [`ToolType`] to at most one handler, with a
/// required default used for tools nothing was registered for.
///
/// Both the event router and the gesture router are built on this: register a
/// touch-flavored handler for fingers, a pointer-flavored handler for mice,
/// and let everything else fall through to a no-op.
#[derive(Debug)]
pub struct ToolHandlerRegistry<T> {
    // One slot per ToolType::index(); None falls back to `default`.
    slots: [Option<T>; ToolType::COUNT],
    default: T,
}

impl<T> ToolHandlerRegistry<T> {
    /// Create a registry where every tool resolves to `default`.
    pub fn new(default: T) -> Self {
        Self {
            slots: [None, None, None, None, None],
            default,
        }
    }

    /// Register `handler` for `tool`.
    ///
    /// # Panics
    ///
    /// Panics if a handler was already registered for `tool`; replacing a
    /// registration is a wiring error, not a runtime state change.
    pub fn set(&mut self, tool: ToolType, handler: T) {
        let slot = &mut self.slots[tool.index()];
        assert!(
            slot.is_none(),
            "a handler is already registered for {tool:?}"
        );
        *slot = Some(handler);
    }

    /// Resolve the handler for `tool`, falling back to the default.
    pub fn get(&self, tool: ToolType) -> &T {
        self.slots[tool.index()].as_ref().unwrap_or(&self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_tools_fall_back_to_default() {
        let registry: ToolHandlerRegistry<&str> = ToolHandlerRegistry::new("default");
        assert_eq!(*registry.get(ToolType::Finger), "default");
        assert_eq!(*registry.get(ToolType::Mouse), "default");
    }

    #[test]
    fn registered_tool_resolves_to_its_handler() {
        let mut registry = ToolHandlerRegistry::new("default");
        registry.set(ToolType::Mouse, "mouse");
        assert_eq!(*registry.get(ToolType::Mouse), "mouse");
        assert_eq!(*registry.get(ToolType::Finger), "default");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn double_registration_panics() {
        let mut registry = ToolHandlerRegistry::new("default");
        registry.set(ToolType::Finger, "first");
        registry.set(ToolType::Finger, "second");
    }
}
