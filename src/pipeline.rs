// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The staged expansion pipeline.
//!
//! A rule is compiled once into a seed iterator plus an ordered vector of BY
//! stages. Each stage runs in exactly one of two modes, decided by the outer
//! frequency: an *expander* derives new candidates from each upstream
//! candidate, a *filter* drops candidates whose field is not listed. The
//! driver pulls one complete [`IntervalSet`] at a time, because `BYSETPOS`
//! can only pick positions once the whole interval is known.

mod by_day;
mod by_month;
mod by_month_day;
mod by_set_pos;
mod by_time;
mod by_week_no;
mod by_year_day;
mod freq;

use jiff::civil::DateTime;

use crate::calendar::WeekNumbering;
use crate::instance::{Instance, IntervalSet};
use crate::rule::{Frequency, RecurrenceRule};

/// Effective granularity of a day-level BY part, possibly narrower than the
/// outer frequency: a month part in force narrows a yearly rule to months,
/// a week-number part ahead in the pipeline narrows day expansion to weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    Weekly,
    WeeklyAndMonthly,
    Monthly,
    Yearly,
}

impl Scope {
    fn of(rule: &RecurrenceRule) -> Self {
        let monthly = rule.freq() == Frequency::Monthly || !rule.by_month().is_empty();
        if rule.freq() == Frequency::Weekly || !rule.by_week_no().is_empty() {
            if monthly { Scope::WeeklyAndMonthly } else { Scope::Weekly }
        } else if monthly {
            Scope::Monthly
        } else {
            Scope::Yearly
        }
    }
}

/// Whether a stage adds candidates or drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageMode {
    Expand,
    Limit,
}

impl StageMode {
    fn expand_when(freq: Frequency, coarsest: Frequency) -> Self {
        if freq >= coarsest { StageMode::Expand } else { StageMode::Limit }
    }
}

/// One BY part, compiled against the rule.
#[derive(Debug)]
enum ByStage<'r> {
    Month(by_month::ByMonth<'r>),
    WeekNo(by_week_no::ByWeekNo<'r>),
    YearDay(by_year_day::ByYearDay<'r>),
    MonthDay(by_month_day::ByMonthDay<'r>),
    Day(by_day::ByDay<'r>),
    Hour(by_time::ByHour<'r>),
    Minute(by_time::ByMinute<'r>),
    Second(by_time::BySecond<'r>),
}

impl ByStage<'_> {
    fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        match self {
            ByStage::Month(stage) => stage.expand(seed, out),
            ByStage::WeekNo(stage) => stage.expand(seed, out),
            ByStage::YearDay(stage) => stage.expand(seed, out),
            ByStage::MonthDay(stage) => stage.expand(seed, out),
            ByStage::Day(stage) => stage.expand(seed, out),
            ByStage::Hour(stage) => stage.expand(seed, out),
            ByStage::Minute(stage) => stage.expand(seed, out),
            ByStage::Second(stage) => stage.expand(seed, out),
        }
    }

    fn keeps(&self, instance: &Instance) -> bool {
        match self {
            ByStage::Month(stage) => stage.keeps(instance),
            ByStage::WeekNo(stage) => stage.keeps(instance),
            ByStage::YearDay(stage) => stage.keeps(instance),
            ByStage::MonthDay(stage) => stage.keeps(instance),
            ByStage::Day(stage) => stage.keeps(instance),
            ByStage::Hour(stage) => stage.keeps(instance),
            ByStage::Minute(stage) => stage.keeps(instance),
            ByStage::Second(stage) => stage.keeps(instance),
        }
    }
}

#[derive(Debug)]
struct StageRun<'r> {
    stage: ByStage<'r>,
    mode: StageMode,
}

/// The compiled pipeline of one rule.
#[derive(Debug)]
pub(crate) struct Pipeline<'r> {
    seeds: freq::FreqIter,
    stages: Vec<StageRun<'r>>,
    set_pos: Option<by_set_pos::BySetPos<'r>>,
}

impl<'r> Pipeline<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, start: Instance) -> Self {
        let freq = rule.freq();
        let numbering = WeekNumbering {
            week_start: rule.week_start(),
        };

        let mut stages = Vec::new();
        if !rule.by_month().is_empty() {
            stages.push(StageRun {
                stage: ByStage::Month(by_month::ByMonth::new(rule, numbering)),
                mode: StageMode::expand_when(freq, Frequency::Yearly),
            });
        }
        if !rule.by_week_no().is_empty() {
            stages.push(StageRun {
                stage: ByStage::WeekNo(by_week_no::ByWeekNo::new(rule, numbering)),
                // RFC 5545 allows week numbers on yearly rules only; the
                // RFC 2445 tolerance also expands them under monthly rules.
                mode: StageMode::expand_when(freq, Frequency::Monthly),
            });
        }
        if !rule.by_year_day().is_empty() {
            stages.push(StageRun {
                stage: ByStage::YearDay(by_year_day::ByYearDay::new(rule, numbering)),
                mode: StageMode::expand_when(freq, Frequency::Weekly),
            });
        }
        if !rule.by_month_day().is_empty() {
            // A year-day part ahead in the pipeline already fixed the day;
            // month days then only limit, or the stages would union.
            let mode = if rule.by_year_day().is_empty() {
                StageMode::expand_when(freq, Frequency::Monthly)
            } else {
                StageMode::Limit
            };
            stages.push(StageRun {
                stage: ByStage::MonthDay(by_month_day::ByMonthDay::new(rule, numbering)),
                mode,
            });
        }
        if !rule.by_day().is_empty() {
            // Same intersection rule: with a day-of-month or day-of-year
            // part ahead, weekdays limit instead of expanding ("Friday the
            // 13th" is BYMONTHDAY=13 expanded, then BYDAY=FR limited).
            let mode = if rule.by_month_day().is_empty() && rule.by_year_day().is_empty() {
                StageMode::expand_when(freq, Frequency::Weekly)
            } else {
                StageMode::Limit
            };
            stages.push(StageRun {
                stage: ByStage::Day(by_day::ByDay::new(rule, numbering)),
                mode,
            });
        }
        if !rule.by_hour().is_empty() {
            stages.push(StageRun {
                stage: ByStage::Hour(by_time::ByHour::new(rule)),
                mode: StageMode::expand_when(freq, Frequency::Daily),
            });
        }
        if !rule.by_minute().is_empty() {
            stages.push(StageRun {
                stage: ByStage::Minute(by_time::ByMinute::new(rule)),
                mode: StageMode::expand_when(freq, Frequency::Hourly),
            });
        }
        if !rule.by_second().is_empty() {
            stages.push(StageRun {
                stage: ByStage::Second(by_time::BySecond::new(rule)),
                mode: StageMode::expand_when(freq, Frequency::Minutely),
            });
        }

        let set_pos = (!rule.by_set_pos().is_empty())
            .then(|| by_set_pos::BySetPos::new(rule));

        Pipeline {
            seeds: freq::FreqIter::new(rule, start),
            stages,
            set_pos,
        }
    }

    /// Produce the candidate set of the next outer interval.
    pub(crate) fn next_interval(&mut self) -> IntervalSet {
        let seed = self.seeds.next_seed();
        let mut set = IntervalSet::new();
        set.insert(seed);

        for run in &self.stages {
            match run.mode {
                StageMode::Expand => {
                    let mut expanded = IntervalSet::new();
                    for instance in set.iter() {
                        run.stage.expand(instance, &mut expanded);
                    }
                    set = expanded;
                }
                StageMode::Limit => set.retain(|instance| run.stage.keeps(instance)),
            }
        }

        match &self.set_pos {
            Some(set_pos) => set_pos.select(set),
            None => set,
        }
    }

    /// Skip whole outer intervals so that the seed lands shortly before
    /// `to`, leaving a two-interval margin for parts that reach backwards
    /// (overlapping weeks, negative positions).
    pub(crate) fn fast_forward(&mut self, to: DateTime) {
        self.seeds.fast_forward(to);
    }
}
