// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `BYHOUR`, `BYMINUTE` and `BYSECOND` stages.
//!
//! The three stages are structurally identical: expansion crosses the
//! upstream candidates with the listed values of one time field, filtering
//! keeps candidates whose field is listed. Date fields are untouched, so
//! nothing needs re-deriving.

use crate::instance::{Instance, IntervalSet};
use crate::rule::RecurrenceRule;

/// Expands daily (and coarser) intervals into the listed hours.
#[derive(Debug)]
pub(crate) struct ByHour<'r> {
    hours: &'r [u8],
}

impl<'r> ByHour<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule) -> Self {
        ByHour {
            hours: rule.by_hour(),
        }
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        for &hour in self.hours {
            let mut instance = *seed;
            instance.hour = hour;
            out.insert(instance);
        }
    }

    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        self.hours.contains(&instance.hour)
    }
}

/// Expands hourly (and coarser) intervals into the listed minutes.
#[derive(Debug)]
pub(crate) struct ByMinute<'r> {
    minutes: &'r [u8],
}

impl<'r> ByMinute<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule) -> Self {
        ByMinute {
            minutes: rule.by_minute(),
        }
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        for &minute in self.minutes {
            let mut instance = *seed;
            instance.minute = minute;
            out.insert(instance);
        }
    }

    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        self.minutes.contains(&instance.minute)
    }
}

/// Expands minutely (and coarser) intervals into the listed seconds.
#[derive(Debug)]
pub(crate) struct BySecond<'r> {
    seconds: &'r [u8],
}

impl<'r> BySecond<'r> {
    pub(crate) fn new(rule: &'r RecurrenceRule) -> Self {
        BySecond {
            seconds: rule.by_second(),
        }
    }

    pub(crate) fn expand(&self, seed: &Instance, out: &mut IntervalSet) {
        for &second in self.seconds {
            // A leap second is never synthesized, it only passes through
            // when the seed itself carries one.
            if second == 60 && seed.second != 60 {
                continue;
            }
            let mut instance = *seed;
            instance.second = second;
            out.insert(instance);
        }
    }

    pub(crate) fn keeps(&self, instance: &Instance) -> bool {
        self.seconds.contains(&instance.second)
    }
}
