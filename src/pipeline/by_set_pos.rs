// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYSETPOS` stage.

use crate::instance::{Instance, IntervalSet};
use crate::rule::RecurrenceRule;

/// Selects candidates by position within the completed interval set.
///
/// This is the reason the pipeline moves whole interval sets rather than
/// single candidates: `-1` can only name the last occurrence once the
/// interval is fully expanded and filtered.
#[derive(Debug)]
pub(crate) struct BySetPos<'r> {
    positions: &'r [i16],
}

impl<'r> BySetPos<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule) -> Self {
        BySetPos {
            positions: rule.by_set_pos(),
        }
    }

    /// Keep the candidates at the listed 1-based positions, counting from
    /// the end for negative values. Out-of-range positions select nothing;
    /// a position listed twice still selects one candidate.
    pub(crate) fn select(&self, set: IntervalSet) -> IntervalSet {
        let candidates: Vec<Instance> = set.into_sorted().collect();
        let len = candidates.len() as i32;

        let mut selected = IntervalSet::new();
        for &pos in self.positions {
            let index = if pos > 0 {
                i32::from(pos) - 1
            } else {
                len + i32::from(pos)
            };
            if let Ok(index) = usize::try_from(index) {
                if let Some(instance) = candidates.get(index) {
                    selected.insert(*instance);
                }
            }
        }
        selected
    }
}
