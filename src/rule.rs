// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The structured recurrence rule and its builder.

mod parse;

use std::fmt::{self, Display};

use jiff::civil::DateTime;

use crate::error::{RecurError, RulePart};
use crate::iter::RuleIter;

/// Recurrence frequency, the outer periodicity of a rule.
///
/// Variants are ordered from the finest to the coarsest unit, so range
/// comparisons read naturally (`freq >= Frequency::Daily`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Secondly => "SECONDLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Hourly => "HOURLY",
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        };
        f.write_str(name)
    }
}

/// Day of the week, ISO numbered (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// ISO number of the day, 1 = Monday through 7 = Sunday.
    #[must_use]
    pub fn to_monday_one(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`Weekday::to_monday_one`]; `None` outside `1..=7`.
    #[must_use]
    pub fn from_monday_one(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// The day without a positional prefix, e.g. `MO`.
    #[must_use]
    pub fn every(self) -> WeekdayNum {
        WeekdayNum {
            day: self,
            pos: None,
        }
    }

    /// The day with a positional prefix, e.g. `-1FR` for the last Friday.
    #[must_use]
    pub fn nth(self, pos: i8) -> WeekdayNum {
        WeekdayNum {
            day: self,
            pos: Some(pos),
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(day: jiff::civil::Weekday) -> Self {
        match day {
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        };
        f.write_str(name)
    }
}

/// A `BYDAY` entry: a weekday with an optional positional prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Day of the week.
    pub day: Weekday,
    /// Occurrence within the effective scope, counted from the start when
    /// positive and from the end when negative. Never zero.
    pub pos: Option<i8>,
}

impl From<Weekday> for WeekdayNum {
    fn from(day: Weekday) -> Self {
        day.every()
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{pos}{}", self.day),
            None => write!(f, "{}", self.day),
        }
    }
}

/// An immutable, validated recurrence rule.
///
/// Build one programmatically with [`RecurrenceRule::builder`] or parse RFC
/// 5545 rule text with [`str::parse`]. Validation happens once, at
/// construction; iteration is infallible afterwards.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    freq: Frequency,
    interval: u32,
    week_start: Weekday,
    until: Option<DateTime>,
    count: Option<u32>,
    by_second: Vec<u8>,
    by_minute: Vec<u8>,
    by_hour: Vec<u8>,
    by_day: Vec<WeekdayNum>,
    by_month_day: Vec<i8>,
    by_year_day: Vec<i16>,
    by_week_no: Vec<i8>,
    by_month: Vec<u8>,
    by_set_pos: Vec<i16>,
}

impl RecurrenceRule {
    /// Start building a rule with the given frequency.
    #[must_use]
    pub fn builder(freq: Frequency) -> RuleBuilder {
        RuleBuilder {
            rule: RecurrenceRule {
                freq,
                interval: 1,
                week_start: Weekday::Monday,
                until: None,
                count: None,
                by_second: Vec::new(),
                by_minute: Vec::new(),
                by_hour: Vec::new(),
                by_day: Vec::new(),
                by_month_day: Vec::new(),
                by_year_day: Vec::new(),
                by_week_no: Vec::new(),
                by_month: Vec::new(),
                by_set_pos: Vec::new(),
            },
        }
    }

    /// Iterate the occurrences of this rule anchored at `dtstart`.
    ///
    /// The first occurrence is `dtstart` itself when it matches every BY
    /// part of the rule; otherwise iteration starts at the first matching
    /// instant after it.
    #[must_use]
    pub fn iter(&self, dtstart: DateTime) -> RuleIter<'_> {
        RuleIter::new(self, dtstart)
    }

    /// Frequency of recurrence.
    #[must_use]
    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Interval between outer intervals, at least 1.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// First day of the week used for `BYWEEKNO` and weekly `BYDAY`.
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Inclusive end of the recurrence, if bounded by `UNTIL`.
    #[must_use]
    pub fn until(&self) -> Option<DateTime> {
        self.until
    }

    /// Maximum number of occurrences, if bounded by `COUNT`.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// `BYSECOND` values (0..=60).
    #[must_use]
    pub fn by_second(&self) -> &[u8] {
        &self.by_second
    }

    /// `BYMINUTE` values (0..=59).
    #[must_use]
    pub fn by_minute(&self) -> &[u8] {
        &self.by_minute
    }

    /// `BYHOUR` values (0..=23).
    #[must_use]
    pub fn by_hour(&self) -> &[u8] {
        &self.by_hour
    }

    /// `BYDAY` values.
    #[must_use]
    pub fn by_day(&self) -> &[WeekdayNum] {
        &self.by_day
    }

    /// `BYMONTHDAY` values (±1..=31).
    #[must_use]
    pub fn by_month_day(&self) -> &[i8] {
        &self.by_month_day
    }

    /// `BYYEARDAY` values (±1..=366).
    #[must_use]
    pub fn by_year_day(&self) -> &[i16] {
        &self.by_year_day
    }

    /// `BYWEEKNO` values (±1..=53).
    #[must_use]
    pub fn by_week_no(&self) -> &[i8] {
        &self.by_week_no
    }

    /// `BYMONTH` values (1..=12).
    #[must_use]
    pub fn by_month(&self) -> &[u8] {
        &self.by_month
    }

    /// `BYSETPOS` values (±1..=366).
    #[must_use]
    pub fn by_set_pos(&self) -> &[i16] {
        &self.by_set_pos
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.freq)?;
        if let Some(until) = &self.until {
            write!(f, ";UNTIL={}", until.strftime("%Y%m%dT%H%M%S"))?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        write_list(f, "BYSECOND", &self.by_second)?;
        write_list(f, "BYMINUTE", &self.by_minute)?;
        write_list(f, "BYHOUR", &self.by_hour)?;
        write_list(f, "BYDAY", &self.by_day)?;
        write_list(f, "BYMONTHDAY", &self.by_month_day)?;
        write_list(f, "BYYEARDAY", &self.by_year_day)?;
        write_list(f, "BYWEEKNO", &self.by_week_no)?;
        write_list(f, "BYMONTH", &self.by_month)?;
        write_list(f, "BYSETPOS", &self.by_set_pos)?;
        if self.week_start != Weekday::Monday {
            write!(f, ";WKST={}", self.week_start)?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
    let mut values = values.iter();
    let Some(first) = values.next() else {
        return Ok(());
    };
    write!(f, ";{name}={first}")?;
    for value in values {
        write!(f, ",{value}")?;
    }
    Ok(())
}

/// Builder for [`RecurrenceRule`].
///
/// Setters do not validate; [`RuleBuilder::build`] checks every part once
/// and reports the first violation.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: RecurrenceRule,
}

impl RuleBuilder {
    /// Set the interval between outer intervals (default 1).
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.rule.interval = interval;
        self
    }

    /// Set the first day of the week (default Monday).
    #[must_use]
    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.rule.week_start = week_start;
        self
    }

    /// Bound the recurrence by an inclusive end instant.
    #[must_use]
    pub fn until(mut self, until: DateTime) -> Self {
        self.rule.until = Some(until);
        self
    }

    /// Bound the recurrence by a number of occurrences.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.rule.count = Some(count);
        self
    }

    /// Set the `BYSECOND` list.
    #[must_use]
    pub fn by_second(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.rule.by_second = values.into_iter().collect();
        self
    }

    /// Set the `BYMINUTE` list.
    #[must_use]
    pub fn by_minute(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.rule.by_minute = values.into_iter().collect();
        self
    }

    /// Set the `BYHOUR` list.
    #[must_use]
    pub fn by_hour(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.rule.by_hour = values.into_iter().collect();
        self
    }

    /// Set the `BYDAY` list.
    #[must_use]
    pub fn by_day(mut self, values: impl IntoIterator<Item = impl Into<WeekdayNum>>) -> Self {
        self.rule.by_day = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `BYMONTHDAY` list.
    #[must_use]
    pub fn by_month_day(mut self, values: impl IntoIterator<Item = i8>) -> Self {
        self.rule.by_month_day = values.into_iter().collect();
        self
    }

    /// Set the `BYYEARDAY` list.
    #[must_use]
    pub fn by_year_day(mut self, values: impl IntoIterator<Item = i16>) -> Self {
        self.rule.by_year_day = values.into_iter().collect();
        self
    }

    /// Set the `BYWEEKNO` list.
    #[must_use]
    pub fn by_week_no(mut self, values: impl IntoIterator<Item = i8>) -> Self {
        self.rule.by_week_no = values.into_iter().collect();
        self
    }

    /// Set the `BYMONTH` list.
    #[must_use]
    pub fn by_month(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.rule.by_month = values.into_iter().collect();
        self
    }

    /// Set the `BYSETPOS` list.
    #[must_use]
    pub fn by_set_pos(mut self, values: impl IntoIterator<Item = i16>) -> Self {
        self.rule.by_set_pos = values.into_iter().collect();
        self
    }

    /// Validate and finish the rule.
    ///
    /// # Errors
    /// If any part value lies outside its RFC 5545 range, if a signed part
    /// carries a zero, or if both `UNTIL` and `COUNT` are set.
    pub fn build(self) -> Result<RecurrenceRule, RecurError> {
        let rule = self.rule;

        if rule.interval == 0 {
            return Err(RecurError::ZeroValue {
                part: RulePart::Interval,
            });
        }
        if rule.count == Some(0) {
            return Err(RecurError::ZeroValue {
                part: RulePart::Count,
            });
        }
        if rule.until.is_some() && rule.count.is_some() {
            return Err(RecurError::UntilCountExclusive);
        }

        check_unsigned(RulePart::BySecond, &rule.by_second, 60)?;
        check_unsigned(RulePart::ByMinute, &rule.by_minute, 59)?;
        check_unsigned(RulePart::ByHour, &rule.by_hour, 23)?;
        check_signed(RulePart::ByMonthDay, &rule.by_month_day, 31)?;
        check_signed(RulePart::ByYearDay, &rule.by_year_day, 366)?;
        check_signed(RulePart::ByWeekNo, &rule.by_week_no, 53)?;
        check_signed(RulePart::BySetPos, &rule.by_set_pos, 366)?;
        for month in &rule.by_month {
            if *month < 1 || *month > 12 {
                return Err(RecurError::Unsatisfiable {
                    part: RulePart::ByMonth,
                    value: i32::from(*month),
                    min: 1,
                    max: 12,
                });
            }
        }
        for day in &rule.by_day {
            if let Some(pos) = day.pos {
                if pos == 0 {
                    return Err(RecurError::ZeroValue {
                        part: RulePart::ByDay,
                    });
                }
                if pos < -53 || pos > 53 {
                    return Err(RecurError::Unsatisfiable {
                        part: RulePart::ByDay,
                        value: i32::from(pos),
                        min: 1,
                        max: 53,
                    });
                }
            }
        }

        Ok(rule)
    }
}

fn check_unsigned(part: RulePart, values: &[u8], max: u8) -> Result<(), RecurError> {
    for value in values {
        if *value > max {
            return Err(RecurError::Unsatisfiable {
                part,
                value: i32::from(*value),
                min: 0,
                max: i32::from(max),
            });
        }
    }
    Ok(())
}

fn check_signed<T: Copy + Into<i32>>(part: RulePart, values: &[T], max: i32) -> Result<(), RecurError> {
    for value in values {
        let value = (*value).into();
        if value == 0 {
            return Err(RecurError::ZeroValue { part });
        }
        if value < -max || value > max {
            return Err(RecurError::Unsatisfiable {
                part,
                value,
                min: 1,
                max,
            });
        }
    }
    Ok(())
}
