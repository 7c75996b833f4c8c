// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-flight candidates and the per-interval candidate set.

use std::collections::BTreeMap;

use jiff::civil::{Date, DateTime, Time};

use crate::calendar::{self, WeekNumbering};

/// A candidate occurrence carried between pipeline stages.
///
/// All date fields are redundant on purpose: stages read whichever view of
/// the date they operate on (month/day, day of year, week/weekday). A stage
/// that rewrites any day field re-derives the dependent ones before handing
/// the instance on.
///
/// Between stages an instance may be denormalized: `day_of_month` and
/// `day_of_year` can run past the month or year end while a week is being
/// shifted onto a month boundary. Such candidates are either renormalized by
/// a later day stage or rejected by the sanity filter; `is_valid_date`
/// reports whether the fields name a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Instance {
    pub(crate) year: i32,
    /// 0-based month, 0 = January.
    pub(crate) month: u8,
    /// 1-based day, denormalized values may leave `1..=31`.
    pub(crate) day_of_month: i32,
    /// 1-based day of year, denormalized values may leave `1..=366`.
    pub(crate) day_of_year: i32,
    /// ISO weekday, 1 = Monday .. 7 = Sunday.
    pub(crate) day_of_week: u8,
    pub(crate) week_of_year: u8,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    /// 0..=60; 60 is only ever carried through from upstream, never made up.
    pub(crate) second: u8,
}

impl Instance {
    pub(crate) fn from_datetime(dt: DateTime, numbering: WeekNumbering) -> Self {
        let mut instance = Instance {
            year: 0,
            month: 0,
            day_of_month: 1,
            day_of_year: 1,
            day_of_week: 1,
            week_of_year: 1,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
        };
        instance.set_date(
            i32::from(dt.year()),
            dt.month() as u8 - 1,
            i32::from(dt.day()),
            numbering,
        );
        instance
    }

    /// Rewrite the date as `(year, month, day_of_month)` and re-derive the
    /// dependent fields.
    ///
    /// The day is taken as given even when the month is shorter; the derived
    /// day-of-year then counts through the month end and `is_valid_date`
    /// turns false.
    pub(crate) fn set_date(&mut self, year: i32, month: u8, day: i32, numbering: WeekNumbering) {
        self.year = year;
        self.month = month;
        self.day_of_month = day;
        self.day_of_year = calendar::day_of_year(year, month, day);
        self.day_of_week = calendar::day_of_week(year, self.day_of_year);
        self.week_of_year = numbering.week_of_year(year, self.day_of_year);
    }

    /// Rewrite the date as a day-of-year offset, rolling into adjacent years
    /// as needed, and re-derive the dependent fields.
    pub(crate) fn set_day_of_year(&mut self, year: i32, day: i32, numbering: WeekNumbering) {
        let (year, day) = calendar::normalize_day_of_year(year, day);
        let (month, day_of_month) = calendar::month_and_day(year, day);
        self.year = year;
        self.month = month;
        self.day_of_month = i32::from(day_of_month);
        self.day_of_year = day;
        self.day_of_week = calendar::day_of_week(year, day);
        self.week_of_year = numbering.week_of_year(year, day);
    }

    /// Whether the date fields name a real, in-range calendar date.
    pub(crate) fn is_valid_date(&self) -> bool {
        self.month <= 11
            && self.day_of_month >= 1
            && self.day_of_month <= i32::from(calendar::days_in_month(self.year, self.month))
            && self.day_of_year == calendar::day_of_year(self.year, self.month, self.day_of_month)
            && self.year >= -9999
            && self.year <= 9999
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 59
    }

    /// Convert to a civil datetime; `None` when the candidate is not a real
    /// date (or lies outside the supported year range).
    pub(crate) fn to_datetime(self) -> Option<DateTime> {
        if !self.is_valid_date() {
            return None;
        }
        let date = Date::new(self.year as i16, self.month as i8 + 1, self.day_of_month as i8).ok()?;
        let time = Time::new(self.hour as i8, self.minute as i8, self.second as i8, 0).ok()?;
        Some(DateTime::from_parts(date, time))
    }

    /// Total order key over `(year, month, day, hour, minute, second)`.
    ///
    /// Week and weekday fields deliberately do not participate: two
    /// candidates naming the same instant are one occurrence.
    pub(crate) fn key(self) -> i64 {
        pack(
            self.year,
            self.month,
            self.day_of_month,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// Pack date-time fields into an order-preserving key.
pub(crate) fn pack(year: i32, month: u8, day: i32, hour: u8, minute: u8, second: u8) -> i64 {
    debug_assert!((-64..64).contains(&day), "day out of packable range: {day}");
    (i64::from(year) << 28)
        | (i64::from(month) << 24)
        | ((i64::from(day) + 64) << 17)
        | (i64::from(hour) << 12)
        | (i64::from(minute) << 6)
        | i64::from(second)
}

/// Order key of a civil datetime, comparable with [`Instance::key`].
pub(crate) fn datetime_key(dt: DateTime) -> i64 {
    pack(
        i32::from(dt.year()),
        dt.month() as u8 - 1,
        i32::from(dt.day()),
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
    )
}

/// The ordered, deduplicated candidates of one outer interval.
///
/// Candidates are keyed by instant; inserting an instant twice keeps the
/// first record. The set is built, consumed and dropped per interval.
#[derive(Debug, Default)]
pub(crate) struct IntervalSet {
    items: BTreeMap<i64, Instance>,
}

impl IntervalSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, instance: Instance) {
        self.items.entry(instance.key()).or_insert(instance);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.items.values()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Instance) -> bool) {
        self.items.retain(|_, instance| keep(instance));
    }

    /// Consume the set in ascending instant order.
    pub(crate) fn into_sorted(self) -> impl Iterator<Item = Instance> {
        self.items.into_values()
    }
}
