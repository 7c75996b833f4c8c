// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYYEARDAY` stage.

use crate::calendar::{self, WeekNumbering};
use crate::instance::{Instance, IntervalSet};
use crate::pipeline::Scope;
use crate::rule::RecurrenceRule;

/// Expands yearly, monthly and weekly intervals into the listed days of
/// year, or limits finer frequencies to them. RFC 5545 permits this part on
/// yearly rules only; the RFC 2445 tolerance also expands it under monthly
/// and weekly rules, restricted to the seed's month or week.
#[derive(Debug)]
pub(crate) struct ByYearDay<'r> {
    days: &'r [i16],
    scope: Scope,
    numbering: WeekNumbering,
}

impl<'r> ByYearDay<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, numbering: WeekNumbering) -> Self {
        ByYearDay {
            days: rule.by_year_day(),
            scope: Scope::of(rule),
            numbering,
        }
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        let year_len = calendar::days_in_year(seed.year);
        for &day in self.days {
            let actual = if day < 0 {
                year_len + i32::from(day) + 1
            } else {
                i32::from(day)
            };
            if actual < 1 || actual > year_len {
                continue;
            }

            let mut instance = *seed;
            instance.set_day_of_year(seed.year, actual, self.numbering);
            let keep = match self.scope {
                Scope::Yearly => true,
                Scope::Monthly => instance.month == seed.month,
                Scope::Weekly => self.in_seed_week(seed, actual),
                Scope::WeeklyAndMonthly => {
                    self.in_seed_week(seed, actual) && instance.month == seed.month
                }
            };
            if keep {
                out.insert(instance);
            }
        }
    }

    fn in_seed_week(&self, seed: &Instance, day_of_year: i32) -> bool {
        let week_start = calendar::days_since_epoch(
            seed.year,
            seed.day_of_year - self.numbering.days_into_week(seed.day_of_week),
        );
        let day = calendar::days_since_epoch(seed.year, day_of_year);
        (0..7).contains(&(day - week_start))
    }

    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        let year_len = calendar::days_in_year(instance.year);
        self.days.iter().any(|&day| {
            i32::from(day) == instance.day_of_year
                || i32::from(day) == instance.day_of_year - year_len - 1
        })
    }
}
