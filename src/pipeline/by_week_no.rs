// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYWEEKNO` stage.
//!
//! RFC 5545 allows week numbers on yearly rules only; RFC 2445 carried no
//! such restriction, so monthly rules (and yearly rules narrowed to a month
//! by `BYMONTH`) are handled as well. Under a month scope a week counts when
//! it intersects the seed's month: if a day-level part follows, the whole
//! intersecting week is let through, shifted onto the seed weekday, and the
//! day stage culls whatever lands outside the month.

use crate::calendar::WeekNumbering;
use crate::instance::{Instance, IntervalSet};
use crate::rule::{Frequency, RecurrenceRule};

#[derive(Debug)]
pub(crate) struct ByWeekNo<'r> {
    /// Week numbers, negative values counting back from the last week.
    weeks: &'r [i8],
    /// Restrict expanded weeks to the seed's month.
    month_scope: bool,
    /// Let a week overlapping the month boundary through for the following
    /// day stage to resolve.
    allow_overlap: bool,
    numbering: WeekNumbering,
}

impl<'r> ByWeekNo<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, numbering: WeekNumbering) -> Self {
        let month_scope = rule.freq() == Frequency::Monthly
            || (rule.freq() == Frequency::Yearly && !rule.by_month().is_empty());
        let day_part_follows = !rule.by_day().is_empty()
            || !rule.by_month_day().is_empty()
            || !rule.by_year_day().is_empty();
        ByWeekNo {
            weeks: rule.by_week_no(),
            month_scope,
            allow_overlap: month_scope && day_part_follows,
            numbering,
        }
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        let year_weeks = self.numbering.weeks_in_year(seed.year);
        for &week in self.weeks {
            let actual = if week < 0 {
                year_weeks + i32::from(week) + 1
            } else {
                i32::from(week)
            };
            if actual < 1 || actual > year_weeks {
                continue;
            }

            // The seed's weekday moved into the target week.
            let mut candidate = *seed;
            candidate.set_day_of_year(
                seed.year,
                self.numbering.day_in_week(seed.year, actual, seed.day_of_week),
                self.numbering,
            );

            if !self.month_scope || candidate.month == seed.month {
                out.insert(candidate);
            } else if self.allow_overlap {
                self.expand_overlap(seed, actual, candidate, out);
            }
        }
    }

    /// The weekday itself fell outside the seed month. If the week still
    /// touches the month, emit the candidate anchored at the inside end of
    /// the week, with the day fields shifted back onto the seed's weekday.
    /// The shifted day-of-month may leave the month; the following day stage
    /// renormalizes or culls it.
    fn expand_overlap(
        &self,
        seed: &Instance,
        week: i32,
        candidate: Instance,
        out: &mut IntervalSet,
    ) {
        let week_start_day =
            self.numbering
                .day_in_week(seed.year, week, self.numbering.week_start.to_monday_one());
        let into_week = self.numbering.days_into_week(seed.day_of_week);

        let mut week_start = *seed;
        week_start.set_day_of_year(seed.year, week_start_day, self.numbering);
        if week_start.month == seed.month {
            let mut instance = week_start;
            instance.day_of_month += into_week;
            instance.day_of_year += into_week;
            instance.day_of_week = seed.day_of_week;
            instance.week_of_year = candidate.week_of_year;
            out.insert(instance);
            return;
        }

        let mut week_end = *seed;
        week_end.set_day_of_year(seed.year, week_start_day + 6, self.numbering);
        if week_end.month == seed.month {
            let offset = into_week - 6;
            let mut instance = week_end;
            instance.day_of_month += offset;
            instance.day_of_year += offset;
            instance.day_of_week = seed.day_of_week;
            instance.week_of_year = candidate.week_of_year;
            out.insert(instance);
        }
    }

    /// Filtering is not part of RFC 5545 either, but nothing in RFC 2445
    /// forbids a week-number limit on daily and finer rules.
    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        let year_weeks = self.numbering.weeks_in_year(instance.year);
        let week = i32::from(instance.week_of_year);
        week <= year_weeks
            && self
                .weeks
                .iter()
                .any(|&w| i32::from(w) == week || i32::from(w) == week - 1 - year_weeks)
    }
}
