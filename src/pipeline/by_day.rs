// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYDAY` stage.
//!
//! The most combinatorial of the BY parts: each entry names a weekday, may
//! carry a positional prefix (`2MO`, `-1FR`), and the meaning of both
//! depends on the effective scope. In week scope every listed weekday of the
//! seed's week is a candidate; in month and year scope the entry means every
//! (or the n-th) such weekday of the month or year.

use crate::calendar::{self, WeekNumbering};
use crate::instance::{Instance, IntervalSet};
use crate::pipeline::Scope;
use crate::rule::{RecurrenceRule, WeekdayNum};

#[derive(Debug)]
pub(crate) struct ByDay<'r> {
    days: &'r [WeekdayNum],
    scope: Scope,
    numbering: WeekNumbering,
}

impl<'r> ByDay<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, numbering: WeekNumbering) -> Self {
        ByDay {
            days: rule.by_day(),
            scope: Scope::of(rule),
            numbering,
        }
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        match self.scope {
            // Positional prefixes carry no meaning inside a single week and
            // are read as the plain weekday.
            Scope::Weekly | Scope::WeeklyAndMonthly => {
                let week_start = seed.day_of_year - self.numbering.days_into_week(seed.day_of_week);
                for entry in self.days {
                    let offset = self.numbering.days_into_week(entry.day.to_monday_one());
                    let mut instance = *seed;
                    instance.set_day_of_year(seed.year, week_start + offset, self.numbering);
                    if self.scope == Scope::Weekly || instance.month == seed.month {
                        out.insert(instance);
                    }
                }
            }
            Scope::Monthly => {
                let first = calendar::days_before_month(seed.year, seed.month) + 1;
                let month_len = i32::from(calendar::days_in_month(seed.year, seed.month));
                for entry in self.days {
                    self.expand_span(seed, first, month_len, entry, out);
                }
            }
            Scope::Yearly => {
                let year_len = calendar::days_in_year(seed.year);
                for entry in self.days {
                    self.expand_span(seed, 1, year_len, entry, out);
                }
            }
        }
    }

    /// Emit the occurrences of `entry` within the span of `len` days whose
    /// first day is the day-of-year `first`: all of them without a prefix,
    /// the n-th (from either end) with one. An out-of-range position is
    /// skipped silently.
    fn expand_span(
        &self,
        seed: &Instance,
        first: i32,
        len: i32,
        entry: &WeekdayNum,
        out: &mut IntervalSet,
    ) {
        let first_dow = calendar::day_of_week(seed.year, first);
        let offset = (i32::from(entry.day.to_monday_one()) - i32::from(first_dow)).rem_euclid(7);
        if offset >= len {
            return;
        }
        let occurrences = (len - offset - 1) / 7 + 1;

        let mut emit = |nth: i32| {
            let mut instance = *seed;
            instance.set_day_of_year(seed.year, first + offset + nth * 7, self.numbering);
            out.insert(instance);
        };

        match entry.pos {
            None => {
                for nth in 0..occurrences {
                    emit(nth);
                }
            }
            Some(pos) => {
                let nth = if pos > 0 {
                    i32::from(pos) - 1
                } else {
                    occurrences + i32::from(pos)
                };
                if (0..occurrences).contains(&nth) {
                    emit(nth);
                }
            }
        }
    }

    /// Filter mode: positional prefixes are illegal at daily and finer
    /// frequencies and read as the plain weekday.
    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        self.days
            .iter()
            .any(|entry| entry.day.to_monday_one() == instance.day_of_week)
    }
}
