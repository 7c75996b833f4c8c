// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Monthly frequency: positional weekdays, month days, set positions, and
//! the week-number tolerance.

use jiff::civil::datetime;

use crate::common::{expand, expand_all};

#[test]
fn expands_first_friday_of_month() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYDAY=1FR;COUNT=3",
        datetime(1997, 9, 2, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 5, 9, 0, 0, 0),
            datetime(1997, 10, 3, 9, 0, 0, 0),
            datetime(1997, 11, 7, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_first_friday_until() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYDAY=1FR;UNTIL=19971224T000000Z",
        datetime(1997, 9, 5, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 5, 9, 0, 0, 0),
            datetime(1997, 10, 3, 9, 0, 0, 0),
            datetime(1997, 11, 7, 9, 0, 0, 0),
            datetime(1997, 12, 5, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_first_and_last_sunday_every_other_month() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=1SU,-1SU",
        datetime(1997, 9, 7, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 7, 9, 0, 0, 0),
            datetime(1997, 9, 28, 9, 0, 0, 0),
            datetime(1997, 11, 2, 9, 0, 0, 0),
            datetime(1997, 11, 30, 9, 0, 0, 0),
            datetime(1998, 1, 4, 9, 0, 0, 0),
            datetime(1998, 1, 25, 9, 0, 0, 0),
            datetime(1998, 3, 1, 9, 0, 0, 0),
            datetime(1998, 3, 29, 9, 0, 0, 0),
            datetime(1998, 5, 3, 9, 0, 0, 0),
            datetime(1998, 5, 31, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_second_to_last_monday() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;COUNT=6;BYDAY=-2MO",
        datetime(1997, 9, 22, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 22, 9, 0, 0, 0),
            datetime(1997, 10, 20, 9, 0, 0, 0),
            datetime(1997, 11, 17, 9, 0, 0, 0),
            datetime(1997, 12, 22, 9, 0, 0, 0),
            datetime(1998, 1, 19, 9, 0, 0, 0),
            datetime(1998, 2, 16, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_last_day_of_month() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYMONTHDAY=-1;COUNT=3",
        datetime(1997, 9, 4, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 30, 9, 0, 0, 0),
            datetime(1997, 10, 31, 9, 0, 0, 0),
            datetime(1997, 11, 30, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_third_to_last_day_of_month() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYMONTHDAY=-3;COUNT=6",
        datetime(1997, 9, 28, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 28, 9, 0, 0, 0),
            datetime(1997, 10, 29, 9, 0, 0, 0),
            datetime(1997, 11, 28, 9, 0, 0, 0),
            datetime(1997, 12, 29, 9, 0, 0, 0),
            datetime(1998, 1, 29, 9, 0, 0, 0),
            datetime(1998, 2, 26, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_second_and_fifteenth() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;COUNT=10;BYMONTHDAY=2,15",
        datetime(1997, 9, 2, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 2, 9, 0, 0, 0),
            datetime(1997, 9, 15, 9, 0, 0, 0),
            datetime(1997, 10, 2, 9, 0, 0, 0),
            datetime(1997, 10, 15, 9, 0, 0, 0),
            datetime(1997, 11, 2, 9, 0, 0, 0),
            datetime(1997, 11, 15, 9, 0, 0, 0),
            datetime(1997, 12, 2, 9, 0, 0, 0),
            datetime(1997, 12, 15, 9, 0, 0, 0),
            datetime(1998, 1, 2, 9, 0, 0, 0),
            datetime(1998, 1, 15, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_first_and_last_day_of_month() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;COUNT=10;BYMONTHDAY=1,-1",
        datetime(1997, 9, 30, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 30, 9, 0, 0, 0),
            datetime(1997, 10, 1, 9, 0, 0, 0),
            datetime(1997, 10, 31, 9, 0, 0, 0),
            datetime(1997, 11, 1, 9, 0, 0, 0),
            datetime(1997, 11, 30, 9, 0, 0, 0),
            datetime(1997, 12, 1, 9, 0, 0, 0),
            datetime(1997, 12, 31, 9, 0, 0, 0),
            datetime(1998, 1, 1, 9, 0, 0, 0),
            datetime(1998, 1, 31, 9, 0, 0, 0),
            datetime(1998, 2, 1, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_mid_month_window_every_eighteen_months() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;INTERVAL=18;COUNT=10;BYMONTHDAY=10,11,12,13,14,15",
        datetime(1997, 9, 10, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 10, 9, 0, 0, 0),
            datetime(1997, 9, 11, 9, 0, 0, 0),
            datetime(1997, 9, 12, 9, 0, 0, 0),
            datetime(1997, 9, 13, 9, 0, 0, 0),
            datetime(1997, 9, 14, 9, 0, 0, 0),
            datetime(1997, 9, 15, 9, 0, 0, 0),
            datetime(1999, 3, 10, 9, 0, 0, 0),
            datetime(1999, 3, 11, 9, 0, 0, 0),
            datetime(1999, 3, 12, 9, 0, 0, 0),
            datetime(1999, 3, 13, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_every_tuesday_every_other_month() {
    let occurrences = expand(
        "FREQ=MONTHLY;INTERVAL=2;BYDAY=TU",
        datetime(1997, 9, 2, 9, 0, 0, 0),
        9,
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 2, 9, 0, 0, 0),
            datetime(1997, 9, 9, 9, 0, 0, 0),
            datetime(1997, 9, 16, 9, 0, 0, 0),
            datetime(1997, 9, 23, 9, 0, 0, 0),
            datetime(1997, 9, 30, 9, 0, 0, 0),
            datetime(1997, 11, 4, 9, 0, 0, 0),
            datetime(1997, 11, 11, 9, 0, 0, 0),
            datetime(1997, 11, 18, 9, 0, 0, 0),
            datetime(1997, 11, 25, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn selects_third_weekday_instance_with_set_pos() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;COUNT=3;BYDAY=TU,WE,TH;BYSETPOS=3",
        datetime(1997, 9, 4, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 4, 9, 0, 0, 0),
            datetime(1997, 10, 7, 9, 0, 0, 0),
            datetime(1997, 11, 6, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn selects_second_to_last_weekday_with_set_pos() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2;COUNT=7",
        datetime(1997, 9, 29, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 29, 9, 0, 0, 0),
            datetime(1997, 10, 30, 9, 0, 0, 0),
            datetime(1997, 11, 27, 9, 0, 0, 0),
            datetime(1997, 12, 30, 9, 0, 0, 0),
            datetime(1998, 1, 29, 9, 0, 0, 0),
            datetime(1998, 2, 26, 9, 0, 0, 0),
            datetime(1998, 3, 30, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn intersects_weekday_with_month_day() {
    // Friday the 13th: BYMONTHDAY expands, BYDAY limits.
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYDAY=FR;BYMONTHDAY=13;COUNT=5",
        datetime(1997, 9, 2, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1998, 2, 13, 9, 0, 0, 0),
            datetime(1998, 3, 13, 9, 0, 0, 0),
            datetime(1998, 11, 13, 9, 0, 0, 0),
            datetime(1999, 8, 13, 9, 0, 0, 0),
            datetime(2000, 10, 13, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_saturday_following_first_sunday() {
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYDAY=SA;BYMONTHDAY=7,8,9,10,11,12,13;COUNT=10",
        datetime(1997, 9, 13, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 13, 9, 0, 0, 0),
            datetime(1997, 10, 11, 9, 0, 0, 0),
            datetime(1997, 11, 8, 9, 0, 0, 0),
            datetime(1997, 12, 13, 9, 0, 0, 0),
            datetime(1998, 1, 10, 9, 0, 0, 0),
            datetime(1998, 2, 7, 9, 0, 0, 0),
            datetime(1998, 3, 7, 9, 0, 0, 0),
            datetime(1998, 4, 11, 9, 0, 0, 0),
            datetime(1998, 5, 9, 9, 0, 0, 0),
            datetime(1998, 6, 13, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn tolerates_week_numbers_on_monthly_rules() {
    // Not allowed by RFC 5545, accepted per RFC 2445: the seed's weekday
    // moved into week 5, whenever that day lands in the seed's month.
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYWEEKNO=5;COUNT=4",
        datetime(1997, 1, 1, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 1, 29, 9, 0, 0, 0),
            datetime(1997, 2, 1, 9, 0, 0, 0),
            datetime(1998, 1, 29, 9, 0, 0, 0),
            datetime(1998, 2, 1, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_overlapping_week_through_the_day_stage() {
    // Week 1 straddles the year boundary; the Saturday is found even when
    // the seed weekday of that week lies outside January.
    let occurrences = expand_all(
        "FREQ=MONTHLY;BYWEEKNO=1;BYDAY=SA;COUNT=3",
        datetime(1997, 1, 1, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 1, 4, 9, 0, 0, 0),
            datetime(1998, 1, 3, 9, 0, 0, 0),
            datetime(1999, 1, 9, 9, 0, 0, 0),
        ]
    );
}
