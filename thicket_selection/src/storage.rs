// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted-state snapshot.

use alloc::string::String;
use alloc::vec::Vec;

/// An opaque snapshot of a tracker's committed selection, suitable for the
/// host's saved-instance-state machinery.
///
/// The snapshot is keyed by the tracker's selection id so state saved by one
/// list is never restored into another. With the `serde` feature enabled the
/// snapshot derives `Serialize`/`Deserialize`; the wire format is otherwise
/// the host's business.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceState<K> {
    /// Id of the tracker that produced this snapshot.
    pub selection_id: String,
    /// The committed keys at save time. Provisional state is never saved.
    pub keys: Vec<K>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_compare_by_content() {
        let a = InstanceState {
            selection_id: String::from("list"),
            keys: alloc::vec![1, 2, 3],
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
