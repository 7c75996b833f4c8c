// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Merging of several recurrence sources into one occurrence sequence.

use jiff::civil::DateTime;

use crate::iter::RuleIter;
use crate::rule::RecurrenceRule;

/// A complete recurrence definition: any number of rules and explicit
/// instants, minus exception rules and exception instants, all anchored at
/// one start instant.
///
/// Mirrors the RRULE/RDATE/EXRULE/EXDATE properties of an iCalendar
/// component. Iteration yields the ordered, deduplicated union of the
/// positive sources with every exception instant removed.
#[derive(Debug, Default)]
pub struct RecurrenceSet<'r> {
    rules: Vec<&'r RecurrenceRule>,
    instances: Vec<DateTime>,
    exception_rules: Vec<&'r RecurrenceRule>,
    exceptions: Vec<DateTime>,
}

impl<'r> RecurrenceSet<'r> {
    /// An empty set; populate it with the `add_*` methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recurrence rule.
    pub fn add_rule(&mut self, rule: &'r RecurrenceRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Add an explicit instance (an `RDATE` instant).
    pub fn add_instance(&mut self, instant: DateTime) -> &mut Self {
        self.instances.push(instant);
        self
    }

    /// Add an exception rule; its occurrences are removed from the result.
    pub fn add_exception_rule(&mut self, rule: &'r RecurrenceRule) -> &mut Self {
        self.exception_rules.push(rule);
        self
    }

    /// Add an exception instant (an `EXDATE` instant).
    pub fn add_exception(&mut self, instant: DateTime) -> &mut Self {
        self.exceptions.push(instant);
        self
    }

    /// Iterate the merged occurrences, all rules anchored at `dtstart`.
    #[must_use]
    pub fn iter(&self, dtstart: DateTime) -> OccurrenceIter<'r> {
        let mut instances = self.instances.clone();
        instances.sort_unstable();
        instances.dedup();
        let mut exceptions = self.exceptions.clone();
        exceptions.sort_unstable();
        exceptions.dedup();

        OccurrenceIter {
            sources: self.rules.iter().map(|rule| rule.iter(dtstart)).collect(),
            instances,
            next_instance: 0,
            exception_sources: self
                .exception_rules
                .iter()
                .map(|rule| rule.iter(dtstart))
                .collect(),
            exceptions,
            next_exception: 0,
        }
    }
}

/// Iterator over the merged occurrences of a [`RecurrenceSet`].
#[derive(Debug)]
pub struct OccurrenceIter<'r> {
    sources: Vec<RuleIter<'r>>,
    instances: Vec<DateTime>,
    next_instance: usize,
    exception_sources: Vec<RuleIter<'r>>,
    exceptions: Vec<DateTime>,
    next_exception: usize,
}

impl OccurrenceIter<'_> {
    /// The earliest instant any positive source offers.
    fn earliest(&mut self) -> Option<DateTime> {
        let mut earliest = self.instances.get(self.next_instance).copied();
        for source in &mut self.sources {
            if let Some(head) = source.peek() {
                earliest = Some(earliest.map_or(head, |e| e.min(head)));
            }
        }
        earliest
    }

    /// Consume `instant` from every source currently offering it, so each
    /// occurrence comes out once no matter how many sources produce it.
    fn consume(&mut self, instant: DateTime) {
        while self.instances.get(self.next_instance) == Some(&instant) {
            self.next_instance += 1;
        }
        for source in &mut self.sources {
            if source.peek() == Some(instant) {
                source.next();
            }
        }
    }

    /// Whether `instant` is named by an exception instant or exception rule.
    fn is_exception(&mut self, instant: DateTime) -> bool {
        while self
            .exceptions
            .get(self.next_exception)
            .is_some_and(|&e| e < instant)
        {
            self.next_exception += 1;
        }
        if self.exceptions.get(self.next_exception) == Some(&instant) {
            return true;
        }

        self.exception_sources.iter_mut().any(|source| {
            source.fast_forward(instant);
            source.peek() == Some(instant)
        })
    }
}

impl Iterator for OccurrenceIter<'_> {
    type Item = DateTime;

    fn next(&mut self) -> Option<DateTime> {
        loop {
            let instant = self.earliest()?;
            self.consume(instant);
            if !self.is_exception(instant) {
                return Some(instant);
            }
        }
    }
}
