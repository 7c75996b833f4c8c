// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYMONTH` stage.

use crate::calendar::WeekNumbering;
use crate::instance::{Instance, IntervalSet};
use crate::rule::RecurrenceRule;

/// Expands yearly intervals into the listed months, or limits finer
/// frequencies to them.
#[derive(Debug)]
pub(crate) struct ByMonth<'r> {
    /// 1-based month numbers.
    months: &'r [u8],
    numbering: WeekNumbering,
}

impl<'r> ByMonth<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, numbering: WeekNumbering) -> Self {
        ByMonth {
            months: rule.by_month(),
            numbering,
        }
    }

    /// One candidate per listed month, keeping the seed's day-of-month. The
    /// day may not exist in the target month; later day stages rewrite it,
    /// or the sanity filter rejects it.
    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        for &month in self.months {
            let mut instance = *seed;
            instance.set_date(seed.year, month - 1, seed.day_of_month, self.numbering);
            out.insert(instance);
        }
    }

    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        self.months.contains(&(instance.month + 1))
    }
}
