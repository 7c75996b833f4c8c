// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The occurrence iterator of a single rule.

use std::collections::VecDeque;

use jiff::civil::DateTime;

use crate::calendar::WeekNumbering;
use crate::instance::{Instance, IntervalSet, datetime_key};
use crate::pipeline::Pipeline;
use crate::rule::RecurrenceRule;

/// Give up after this many outer intervals in a row without a candidate.
///
/// A rule like `FREQ=YEARLY;BYMONTHDAY=30;BYMONTH=2` produces nothing, ever;
/// without a cutoff the pipeline would walk the calendar forever looking for
/// February 30.
const EMPTY_INTERVAL_LIMIT: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Still producing.
    Active,
    /// Ran dry: the rule is unbounded but stopped matching anything.
    Drained,
    /// Hit its UNTIL or COUNT bound.
    Terminated,
}

/// Iterator over the occurrences of one rule from one start instant.
///
/// Occurrences come out strictly ascending and deduplicated. The iterator
/// borrows its rule; distinct iterators share nothing mutable and may run on
/// different threads.
///
/// Construct with [`RecurrenceRule::iter`].
#[derive(Debug)]
pub struct RuleIter<'r> {
    pipeline: Pipeline<'r>,
    buffer: VecDeque<Instance>,
    peeked: Option<DateTime>,
    start_key: i64,
    until_key: Option<i64>,
    /// Occurrences left under COUNT; `None` when unbounded.
    remaining: Option<u32>,
    naive_fast_forward: bool,
    last_key: i64,
    state: State,
}

impl<'r> RuleIter<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule, dtstart: DateTime) -> Self {
        let numbering = WeekNumbering {
            week_start: rule.week_start(),
        };
        let start = Instance::from_datetime(dtstart, numbering);
        RuleIter {
            pipeline: Pipeline::new(rule, start),
            buffer: VecDeque::new(),
            peeked: None,
            start_key: start.key(),
            until_key: rule.until().map(datetime_key),
            remaining: rule.count(),
            naive_fast_forward: rule.count().is_some(),
            last_key: i64::MIN,
            state: State::Active,
        }
    }

    /// The next occurrence, without consuming it.
    pub fn peek(&mut self) -> Option<DateTime> {
        if self.peeked.is_none() {
            self.peeked = self.advance();
        }
        self.peeked
    }

    /// Skip to the first occurrence at or after `to`.
    ///
    /// Unbounded and UNTIL-bounded rules jump the seed iterator by whole
    /// intervals first; a COUNT-bounded rule has to pull through every
    /// occurrence on the way, since each one spends the count.
    pub fn fast_forward(&mut self, to: DateTime) {
        if !self.naive_fast_forward {
            self.buffer.clear();
            self.peeked = None;
            self.pipeline.fast_forward(to);
        }
        let target = datetime_key(to);
        while let Some(occurrence) = self.peek() {
            if datetime_key(occurrence) >= target {
                break;
            }
            self.peeked = None;
        }
    }

    /// Pull candidates through the sanity filter and the UNTIL/COUNT sink.
    fn advance(&mut self) -> Option<DateTime> {
        while self.state == State::Active {
            if self.remaining == Some(0) {
                self.state = State::Terminated;
                break;
            }

            let Some(instance) = self.buffer.pop_front() else {
                self.refill();
                continue;
            };

            let key = instance.key();
            if key < self.start_key || key <= self.last_key {
                continue;
            }
            let Some(occurrence) = instance.to_datetime() else {
                tracing::trace!(?instance, "dropping impossible candidate");
                continue;
            };
            if let Some(until) = self.until_key {
                if key > until {
                    self.state = State::Terminated;
                    break;
                }
            }

            if let Some(remaining) = &mut self.remaining {
                *remaining -= 1;
            }
            self.last_key = key;
            return Some(occurrence);
        }
        None
    }

    fn refill(&mut self) {
        let mut empty_streak = 0u32;
        loop {
            let set: IntervalSet = self.pipeline.next_interval();
            if set.is_empty() {
                empty_streak += 1;
                if empty_streak >= EMPTY_INTERVAL_LIMIT {
                    tracing::trace!(
                        limit = EMPTY_INTERVAL_LIMIT,
                        "no candidates for too many consecutive intervals, draining"
                    );
                    self.state = State::Drained;
                    return;
                }
                continue;
            }
            tracing::trace!(candidates = set.len(), "expanded interval");
            self.buffer.extend(set.into_sorted());
            return;
        }
    }
}

impl Iterator for RuleIter<'_> {
    type Item = DateTime;

    fn next(&mut self) -> Option<DateTime> {
        match self.peeked.take() {
            Some(occurrence) => Some(occurrence),
            None => self.advance(),
        }
    }
}
