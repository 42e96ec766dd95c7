// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The key-provider capability.

/// How much of the position↔key mapping a [`KeyProvider`] can answer for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessScope {
    /// The provider can resolve any position or key at any time, visible or
    /// not. Required for band selection and range extension, which reach
    /// items that are not currently on screen.
    Mapped,
    /// The provider only knows about currently materialized items.
    Cached,
}

/// Maps between adapter positions and stable item keys.
///
/// Keys are owned by the host; this subsystem stores clones and never
/// invents them. A key must remain stable across list mutations — it is the
/// identity the selection survives a data refresh by.
pub trait KeyProvider<K> {
    /// Whether this provider supports `scope`.
    fn has_access(&self, scope: AccessScope) -> bool;

    /// The key at `position`, or `None` if the position is out of bounds or
    /// not resolvable in this provider's scope.
    fn key_at(&self, position: usize) -> Option<K>;

    /// The position currently displaying `key`, or `None` if the key is not
    /// resolvable right now.
    fn position_of(&self, key: &K) -> Option<usize>;
}
