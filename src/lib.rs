// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expand iCalendar recurrence rules into their occurrences.
//!
//! Implements the RFC 5545 recurrence model with a tolerance for the laxer
//! RFC 2445 part combinations. A [`RecurrenceRule`] is parsed from rule text
//! or built programmatically, then expanded from a start instant into an
//! ordered, deduplicated occurrence sequence; [`RecurrenceSet`] merges
//! several rules and explicit instants and subtracts exceptions.
//!
//! ```
//! use aimcal_recur::RecurrenceRule;
//! use jiff::civil::datetime;
//!
//! // The first Friday of the month, three times.
//! let rule: RecurrenceRule = "FREQ=MONTHLY;BYDAY=1FR;COUNT=3".parse()?;
//! let occurrences: Vec<_> = rule.iter(datetime(1997, 9, 2, 9, 0, 0, 0)).collect();
//! assert_eq!(
//!     occurrences,
//!     [
//!         datetime(1997, 9, 5, 9, 0, 0, 0),
//!         datetime(1997, 10, 3, 9, 0, 0, 0),
//!         datetime(1997, 11, 7, 9, 0, 0, 0),
//!     ]
//! );
//! # Ok::<(), aimcal_recur::RecurError>(())
//! ```
//!
//! Expansion is a pure computation: no clocks, no I/O, no shared state.
//! Iterators over distinct rules are independent and may run in parallel.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::similar_names
)]

mod calendar;
mod error;
mod instance;
mod iter;
mod pipeline;
mod rule;
mod set;

pub use crate::error::{RecurError, RulePart};
pub use crate::iter::RuleIter;
pub use crate::rule::{Frequency, RecurrenceRule, RuleBuilder, Weekday, WeekdayNum};
pub use crate::set::{OccurrenceIter, RecurrenceSet};
