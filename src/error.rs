// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors reported while constructing a recurrence rule.
//!
//! Construction is the only fallible boundary: once a rule has been built or
//! parsed successfully, iteration never fails. Runtime anomalies (impossible
//! dates produced by month arithmetic, out-of-range positional picks) are
//! recovered locally by dropping the offending candidate.

use std::fmt;

/// The rule part a value belongs to, used in error reports.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum RulePart {
    Freq,
    Interval,
    Count,
    Until,
    BySecond,
    ByMinute,
    ByHour,
    ByDay,
    ByMonthDay,
    ByYearDay,
    ByWeekNo,
    ByMonth,
    BySetPos,
    WeekStart,
}

impl fmt::Display for RulePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RulePart::Freq => "FREQ",
            RulePart::Interval => "INTERVAL",
            RulePart::Count => "COUNT",
            RulePart::Until => "UNTIL",
            RulePart::BySecond => "BYSECOND",
            RulePart::ByMinute => "BYMINUTE",
            RulePart::ByHour => "BYHOUR",
            RulePart::ByDay => "BYDAY",
            RulePart::ByMonthDay => "BYMONTHDAY",
            RulePart::ByYearDay => "BYYEARDAY",
            RulePart::ByWeekNo => "BYWEEKNO",
            RulePart::ByMonth => "BYMONTH",
            RulePart::BySetPos => "BYSETPOS",
            RulePart::WeekStart => "WKST",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when building or parsing a recurrence rule.
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecurError {
    /// A part value can never match any instant, e.g. `BYMONTH=13`.
    #[error("{part} value {value} can never be satisfied, allowed range is {min}..={max}")]
    Unsatisfiable {
        /// The rule part carrying the value.
        part: RulePart,
        /// The offending value.
        value: i32,
        /// Smallest allowed magnitude.
        min: i32,
        /// Largest allowed magnitude.
        max: i32,
    },

    /// A part value is zero where zero has no meaning (day, week and
    /// position numbering is 1-based in both directions).
    #[error("{part} does not allow a zero value")]
    ZeroValue {
        /// The rule part carrying the zero.
        part: RulePart,
    },

    /// `UNTIL` and `COUNT` were both present.
    #[error("UNTIL and COUNT are mutually exclusive")]
    UntilCountExclusive,

    /// The rule text did not match the RFC 5545 `recur` grammar.
    #[error("invalid recurrence rule text: {0}")]
    Parse(String),
}
