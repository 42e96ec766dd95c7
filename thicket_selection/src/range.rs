// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored range-extension math.
//!
//! A range is anchored at one position and repeatedly extended to a new
//! endpoint as the user drags or shift-clicks. Each extension changes which
//! positions lie in the inclusive anchor↔endpoint span; [`Range::extend`]
//! reports exactly the spans that entered and left, so the tracker applies a
//! minimal delta instead of rewriting the whole span. Extending back to a
//! previous endpoint reverses precisely what the intermediate extensions did
//! — range collapse leaves no residue.

/// An inclusive span of positions.
pub(crate) type Span = (usize, usize);

/// The positions a range extension newly covered and newly released.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RangeDelta {
    /// Positions that entered the span.
    pub(crate) select: Option<Span>,
    /// Positions that left the span. Never includes the anchor.
    pub(crate) deselect: Option<Span>,
}

/// An active anchored range.
#[derive(Clone, Debug)]
pub(crate) struct Range {
    anchor: usize,
    end: Option<usize>,
}

impl Range {
    pub(crate) fn new(anchor: usize) -> Self {
        Self { anchor, end: None }
    }

    pub(crate) fn anchor(&self) -> usize {
        self.anchor
    }

    /// Extend the range to `position`, returning the span delta.
    pub(crate) fn extend(&mut self, position: usize) -> RangeDelta {
        let old_end = self.end.unwrap_or(self.anchor);
        self.end = Some(position);

        let (old_lo, old_hi) = ordered(self.anchor, old_end);
        let (new_lo, new_hi) = ordered(self.anchor, position);

        let mut delta = RangeDelta::default();
        // Both spans contain the anchor, so each difference is contiguous.
        if new_lo < old_lo {
            delta.select = Some((new_lo, old_lo - 1));
        } else if new_hi > old_hi {
            delta.select = Some((old_hi + 1, new_hi));
        }
        if old_lo < new_lo {
            delta.deselect = Some((old_lo, new_lo - 1));
        } else if old_hi > new_hi {
            delta.deselect = Some((new_hi + 1, old_hi));
        }
        delta
    }
}

fn ordered(a: usize, b: usize) -> Span {
    if a <= b { (a, b) } else { (b, a) }
}

/// Iterate the positions of a span.
pub(crate) fn positions(span: Span) -> impl Iterator<Item = usize> {
    span.0..=span.1
}
