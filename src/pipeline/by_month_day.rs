// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYMONTHDAY` stage.

use crate::calendar::{self, WeekNumbering};
use crate::instance::{Instance, IntervalSet};
use crate::pipeline::Scope;
use crate::rule::RecurrenceRule;

/// Expands yearly and monthly intervals into the listed days of month, or
/// limits finer frequencies to them. Negative values count back from the
/// month end (`-1` is the last day).
#[derive(Debug)]
pub(crate) struct ByMonthDay<'r> {
    days: &'r [i8],
    scope: Scope,
    numbering: WeekNumbering,
}

impl<'r> ByMonthDay<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, numbering: WeekNumbering) -> Self {
        ByMonthDay {
            days: rule.by_month_day(),
            scope: Scope::of(rule),
            numbering,
        }
    }

    fn matches(&self, day_of_month: i32, month_len: i8) -> bool {
        self.days.iter().any(|&day| {
            let actual = if day < 0 {
                i32::from(month_len) + i32::from(day) + 1
            } else {
                i32::from(day)
            };
            actual == day_of_month
        })
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        match self.scope {
            // A week-number stage ahead of this one narrows nothing here:
            // the listed days still expand across the month the candidate
            // landed in, and any week/month intersection was already
            // resolved upstream.
            Scope::Monthly | Scope::Weekly | Scope::WeeklyAndMonthly => {
                self.expand_month(seed, seed.month, out);
            }
            Scope::Yearly => {
                for month in 0..12 {
                    self.expand_month(seed, month, out);
                }
            }
        }
    }

    fn expand_month(&self, seed: &Instance, month: u8, out: &mut IntervalSet) {
        let month_len = calendar::days_in_month(seed.year, month);
        for &day in self.days {
            let actual = if day < 0 {
                i32::from(month_len) + i32::from(day) + 1
            } else {
                i32::from(day)
            };
            if actual < 1 || actual > i32::from(month_len) {
                continue;
            }
            let mut instance = *seed;
            instance.set_date(seed.year, month, actual, self.numbering);
            out.insert(instance);
        }
    }

    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        let month_len = calendar::days_in_month(instance.year, instance.month);
        self.matches(instance.day_of_month, month_len)
    }
}
