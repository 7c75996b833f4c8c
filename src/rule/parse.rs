// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parser for RFC 5545 `recur` rule text.
//!
//! The grammar is handled with one parser per ABNF production. Numeric
//! range checking is not duplicated here; the rule builder validates every
//! part once the parts are assembled, so `BYMONTH=13` parses but fails to
//! build with [`RecurError::Unsatisfiable`](crate::RecurError).

use std::str::FromStr;

use chumsky::prelude::*;
use jiff::civil::{Date, DateTime, Time};

use crate::error::RecurError;
use crate::rule::{Frequency, RecurrenceRule, Weekday, WeekdayNum};

type Extra<'src> = extra::Err<Rich<'src, char>>;

impl FromStr for RecurrenceRule {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = rrule_parts()
            .parse(s)
            .into_result()
            .map_err(|errs| {
                let msgs: Vec<String> = errs.iter().map(ToString::to_string).collect();
                RecurError::Parse(msgs.join("; "))
            })?;
        build_from_parts(parts)
    }
}

/// One `recur-rule-part`, accumulated before assembly because the parts may
/// appear in any order.
#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(DateTime),
    Count(u32),
    Interval(u32),
    BySecond(Vec<u8>),
    ByMinute(Vec<u8>),
    ByHour(Vec<u8>),
    ByDay(Vec<WeekdayNum>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<u8>),
    BySetPos(Vec<i16>),
    Wkst(Weekday),
}

impl Part {
    fn name(&self) -> &'static str {
        match self {
            Part::Freq(_) => "FREQ",
            Part::Until(_) => "UNTIL",
            Part::Count(_) => "COUNT",
            Part::Interval(_) => "INTERVAL",
            Part::BySecond(_) => "BYSECOND",
            Part::ByMinute(_) => "BYMINUTE",
            Part::ByHour(_) => "BYHOUR",
            Part::ByDay(_) => "BYDAY",
            Part::ByMonthDay(_) => "BYMONTHDAY",
            Part::ByYearDay(_) => "BYYEARDAY",
            Part::ByWeekNo(_) => "BYWEEKNO",
            Part::ByMonth(_) => "BYMONTH",
            Part::BySetPos(_) => "BYSETPOS",
            Part::Wkst(_) => "WKST",
        }
    }
}

fn build_from_parts(parts: Vec<Part>) -> Result<RecurrenceRule, RecurError> {
    let mut freq = None;
    let mut seen: Vec<&'static str> = Vec::with_capacity(parts.len());
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut by_second = Vec::new();
    let mut by_minute = Vec::new();
    let mut by_hour = Vec::new();
    let mut by_day = Vec::new();
    let mut by_month_day = Vec::new();
    let mut by_year_day = Vec::new();
    let mut by_week_no = Vec::new();
    let mut by_month = Vec::new();
    let mut by_set_pos = Vec::new();
    let mut wkst = None;

    for part in parts {
        let name = part.name();
        if seen.contains(&name) {
            return Err(RecurError::Parse(format!("duplicate rule part {name}")));
        }
        seen.push(name);

        match part {
            Part::Freq(v) => freq = Some(v),
            Part::Until(v) => until = Some(v),
            Part::Count(v) => count = Some(v),
            Part::Interval(v) => interval = Some(v),
            Part::BySecond(v) => by_second = v,
            Part::ByMinute(v) => by_minute = v,
            Part::ByHour(v) => by_hour = v,
            Part::ByDay(v) => by_day = v,
            Part::ByMonthDay(v) => by_month_day = v,
            Part::ByYearDay(v) => by_year_day = v,
            Part::ByWeekNo(v) => by_week_no = v,
            Part::ByMonth(v) => by_month = v,
            Part::BySetPos(v) => by_set_pos = v,
            Part::Wkst(v) => wkst = Some(v),
        }
    }

    let Some(freq) = freq else {
        return Err(RecurError::Parse("FREQ is required".into()));
    };

    let mut builder = RecurrenceRule::builder(freq)
        .by_second(by_second)
        .by_minute(by_minute)
        .by_hour(by_hour)
        .by_day(by_day)
        .by_month_day(by_month_day)
        .by_year_day(by_year_day)
        .by_week_no(by_week_no)
        .by_month(by_month)
        .by_set_pos(by_set_pos);
    if let Some(until) = until {
        builder = builder.until(until);
    }
    if let Some(count) = count {
        builder = builder.count(count);
    }
    if let Some(interval) = interval {
        builder = builder.interval(interval);
    }
    if let Some(wkst) = wkst {
        builder = builder.week_start(wkst);
    }
    builder.build()
}

/// ```txt
/// recur = recur-rule-part *( ";" recur-rule-part )
/// ```
fn rrule_parts<'src>() -> impl Parser<'src, &'src str, Vec<Part>, Extra<'src>> {
    rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .then_ignore(end())
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn rrule_part<'src>() -> impl Parser<'src, &'src str, Part, Extra<'src>> {
    let kw = |name| just(name).ignore_then(just('='));

    choice((
        kw("FREQ").ignore_then(freq()).map(Part::Freq),
        kw("UNTIL").ignore_then(enddate()).map(Part::Until),
        kw("COUNT").ignore_then(unsigned::<u32>(10)).map(Part::Count),
        kw("INTERVAL")
            .ignore_then(unsigned::<u32>(10))
            .map(Part::Interval),
        kw("BYSECOND")
            .ignore_then(list(unsigned::<u8>(2)))
            .map(Part::BySecond),
        kw("BYMINUTE")
            .ignore_then(list(unsigned::<u8>(2)))
            .map(Part::ByMinute),
        kw("BYHOUR")
            .ignore_then(list(unsigned::<u8>(2)))
            .map(Part::ByHour),
        kw("BYDAY").ignore_then(list(weekdaynum())).map(Part::ByDay),
        kw("BYMONTHDAY")
            .ignore_then(list(signed::<i8>(2)))
            .map(Part::ByMonthDay),
        kw("BYYEARDAY")
            .ignore_then(list(signed::<i16>(3)))
            .map(Part::ByYearDay),
        kw("BYWEEKNO")
            .ignore_then(list(signed::<i8>(2)))
            .map(Part::ByWeekNo),
        kw("BYMONTH")
            .ignore_then(list(unsigned::<u8>(2)))
            .map(Part::ByMonth),
        kw("BYSETPOS")
            .ignore_then(list(signed::<i16>(3)))
            .map(Part::BySetPos),
        kw("WKST").ignore_then(weekday()).map(Part::Wkst),
    ))
}

/// ```txt
/// freq = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///      / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src>() -> impl Parser<'src, &'src str, Frequency, Extra<'src>> {
    choice((
        just("SECONDLY").to(Frequency::Secondly),
        just("MINUTELY").to(Frequency::Minutely),
        just("HOURLY").to(Frequency::Hourly),
        just("DAILY").to(Frequency::Daily),
        just("WEEKLY").to(Frequency::Weekly),
        just("MONTHLY").to(Frequency::Monthly),
        just("YEARLY").to(Frequency::Yearly),
    ))
}

/// ```txt
/// enddate = date / date-time
/// ```
///
/// A trailing `Z` is accepted and ignored; UNTIL is compared as wall-clock
/// time in the rule's declared zone, attachment of zones is the caller's
/// concern. A date-only UNTIL is read as midnight of that day.
fn enddate<'src>() -> impl Parser<'src, &'src str, DateTime, Extra<'src>> {
    let digits = |n| digit().repeated().exactly(n).to_slice();

    digits(8)
        .then(just('T').ignore_then(digits(6)).or_not())
        .then_ignore(just('Z').or_not())
        .try_map(|(date, time): (&str, Option<&str>), span| {
            let year: i16 = date[0..4].parse().map_err(|_| bad_until(span))?;
            let month: i8 = date[4..6].parse().map_err(|_| bad_until(span))?;
            let day: i8 = date[6..8].parse().map_err(|_| bad_until(span))?;
            let date = Date::new(year, month, day).map_err(|_| bad_until(span))?;

            let time = match time {
                Some(t) => {
                    let hour: i8 = t[0..2].parse().map_err(|_| bad_until(span))?;
                    let minute: i8 = t[2..4].parse().map_err(|_| bad_until(span))?;
                    let second: i8 = t[4..6].parse().map_err(|_| bad_until(span))?;
                    Time::new(hour, minute, second, 0).map_err(|_| bad_until(span))?
                }
                None => Time::midnight(),
            };
            Ok(DateTime::from_parts(date, time))
        })
}

fn bad_until<'src>(span: SimpleSpan) -> Rich<'src, char> {
    Rich::custom(span, "invalid UNTIL instant")
}

/// ```txt
/// weekdaynum = [[plus / minus] ordwk] weekday
/// ```
fn weekdaynum<'src>() -> impl Parser<'src, &'src str, WeekdayNum, Extra<'src>> {
    is_positive()
        .then(unsigned::<i8>(2))
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(pos, day)| WeekdayNum { day, pos })
}

/// ```txt
/// weekday = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src>() -> impl Parser<'src, &'src str, Weekday, Extra<'src>> {
    choice((
        just("SU").to(Weekday::Sunday),
        just("MO").to(Weekday::Monday),
        just("TU").to(Weekday::Tuesday),
        just("WE").to(Weekday::Wednesday),
        just("TH").to(Weekday::Thursday),
        just("FR").to(Weekday::Friday),
        just("SA").to(Weekday::Saturday),
    ))
}

fn list<'src, T>(
    value: impl Parser<'src, &'src str, T, Extra<'src>>,
) -> impl Parser<'src, &'src str, Vec<T>, Extra<'src>> {
    value.separated_by(just(',')).at_least(1).collect()
}

fn digit<'src>() -> impl Parser<'src, &'src str, char, Extra<'src>> + Copy {
    select! { c @ ('0'..='9') => c }
}

fn is_positive<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> + Copy {
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

fn unsigned<'src, T: FromStr>(
    max_digits: usize,
) -> impl Parser<'src, &'src str, T, Extra<'src>> {
    digit()
        .repeated()
        .at_least(1)
        .at_most(max_digits)
        .to_slice()
        .try_map(|s: &str, span| {
            s.parse::<T>()
                .map_err(|_| Rich::custom(span, "number out of range"))
        })
}

fn signed<'src, T: FromStr + std::ops::Neg<Output = T>>(
    max_digits: usize,
) -> impl Parser<'src, &'src str, T, Extra<'src>> {
    is_positive()
        .then(unsigned::<T>(max_digits))
        .map(|(positive, n)| if positive { n } else { -n })
}
