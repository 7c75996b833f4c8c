// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The seed iterator: one candidate per outer interval.

use jiff::civil::DateTime;

use crate::calendar::{self, WeekNumbering};
use crate::instance::Instance;
use crate::rule::{Frequency, RecurrenceRule};

/// Emits the seed instance of each outer interval: the start instant stepped
/// by whole frequency units.
///
/// Stepping months keeps the start's day-of-month as-is. A step that lands
/// on a day the target month does not have (January 31 stepped to February)
/// keeps the impossible date; the sanity filter at the end of the pipeline
/// drops it unless a later stage rewrites the day anyway.
#[derive(Debug, Clone)]
pub(crate) struct FreqIter {
    freq: Frequency,
    interval: i64,
    numbering: WeekNumbering,
    next: Instance,
}

impl FreqIter {
    pub(crate) fn new(rule: &RecurrenceRule, start: Instance) -> Self {
        FreqIter {
            freq: rule.freq(),
            interval: i64::from(rule.interval()),
            numbering: WeekNumbering {
                week_start: rule.week_start(),
            },
            next: start,
        }
    }

    /// Emit the current seed and step one interval forward.
    pub(crate) fn next_seed(&mut self) -> Instance {
        let seed = self.next;
        self.advance(1);
        seed
    }

    /// Jump forward so the upcoming seed lies at most two intervals before
    /// `to` (or stay put when it already does).
    pub(crate) fn fast_forward(&mut self, to: DateTime) {
        let elapsed_units = match self.freq {
            Frequency::Yearly => i64::from(to.year()) - i64::from(self.next.year),
            Frequency::Monthly => {
                let target = i64::from(to.year()) * 12 + i64::from(to.month()) - 1;
                let current = i64::from(self.next.year) * 12 + i64::from(self.next.month);
                target - current
            }
            Frequency::Weekly => self.days_until(to) / 7,
            Frequency::Daily => self.days_until(to),
            Frequency::Hourly => self.seconds_until(to) / 3_600,
            Frequency::Minutely => self.seconds_until(to) / 60,
            Frequency::Secondly => self.seconds_until(to),
        };

        let intervals = elapsed_units / self.interval - 2;
        if intervals > 0 {
            self.advance(intervals);
        }
    }

    fn days_until(&self, to: DateTime) -> i64 {
        let target = calendar::days_since_epoch(
            i32::from(to.year()),
            i32::from(to.day_of_year()),
        );
        target - calendar::days_since_epoch(self.next.year, self.next.day_of_year)
    }

    fn seconds_until(&self, to: DateTime) -> i64 {
        let days = self.days_until(to);
        let target = i64::from(to.hour()) * 3_600 + i64::from(to.minute()) * 60 + i64::from(to.second());
        let current = i64::from(self.next.hour) * 3_600
            + i64::from(self.next.minute) * 60
            + i64::from(self.next.second);
        days * 86_400 + target - current
    }

    fn advance(&mut self, intervals: i64) {
        let step = self.interval * intervals;
        match self.freq {
            Frequency::Yearly => {
                let year = self.next.year + step as i32;
                self.next
                    .set_date(year, self.next.month, self.next.day_of_month, self.numbering);
            }
            Frequency::Monthly => {
                let months = i64::from(self.next.year) * 12 + i64::from(self.next.month) + step;
                let year = months.div_euclid(12) as i32;
                let month = months.rem_euclid(12) as u8;
                self.next
                    .set_date(year, month, self.next.day_of_month, self.numbering);
            }
            Frequency::Weekly => self.add_days(step * 7),
            Frequency::Daily => self.add_days(step),
            Frequency::Hourly => self.add_seconds(step * 3_600),
            Frequency::Minutely => self.add_seconds(step * 60),
            Frequency::Secondly => self.add_seconds(step),
        }
    }

    fn add_days(&mut self, days: i64) {
        let total = calendar::days_since_epoch(self.next.year, self.next.day_of_year) + days;
        let (year, day_of_year) = calendar::from_days_since_epoch(total);
        self.next.set_day_of_year(year, day_of_year, self.numbering);
    }

    fn add_seconds(&mut self, seconds: i64) {
        let total = i64::from(self.next.hour) * 3_600
            + i64::from(self.next.minute) * 60
            + i64::from(self.next.second)
            + seconds;
        self.next.hour = (total.rem_euclid(86_400) / 3_600) as u8;
        self.next.minute = (total.rem_euclid(3_600) / 60) as u8;
        self.next.second = total.rem_euclid(60) as u8;

        let days = total.div_euclid(86_400);
        if days != 0 {
            self.add_days(days);
        }
    }
}
