// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Weekly frequency, including the week-start sensitivity cases.

use jiff::civil::datetime;

use crate::common::expand_all;

#[test]
fn expands_weekly_count() {
    let occurrences = expand_all("FREQ=WEEKLY;COUNT=5", datetime(1997, 9, 2, 9, 0, 0, 0));
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 2, 9, 0, 0, 0),
            datetime(1997, 9, 9, 9, 0, 0, 0),
            datetime(1997, 9, 16, 9, 0, 0, 0),
            datetime(1997, 9, 23, 9, 0, 0, 0),
            datetime(1997, 9, 30, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_every_other_week() {
    let occurrences = expand_all(
        "FREQ=WEEKLY;INTERVAL=2;WKST=SU;COUNT=6",
        datetime(1997, 9, 2, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 2, 9, 0, 0, 0),
            datetime(1997, 9, 16, 9, 0, 0, 0),
            datetime(1997, 9, 30, 9, 0, 0, 0),
            datetime(1997, 10, 14, 9, 0, 0, 0),
            datetime(1997, 10, 28, 9, 0, 0, 0),
            datetime(1997, 11, 11, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_tuesdays_and_thursdays_until() {
    let occurrences = expand_all(
        "FREQ=WEEKLY;UNTIL=19971007T000000Z;WKST=SU;BYDAY=TU,TH",
        datetime(1997, 9, 2, 9, 0, 0, 0),
    );
    assert_eq!(
        occurrences,
        [
            datetime(1997, 9, 2, 9, 0, 0, 0),
            datetime(1997, 9, 4, 9, 0, 0, 0),
            datetime(1997, 9, 9, 9, 0, 0, 0),
            datetime(1997, 9, 11, 9, 0, 0, 0),
            datetime(1997, 9, 16, 9, 0, 0, 0),
            datetime(1997, 9, 18, 9, 0, 0, 0),
            datetime(1997, 9, 23, 9, 0, 0, 0),
            datetime(1997, 9, 25, 9, 0, 0, 0),
            datetime(1997, 9, 30, 9, 0, 0, 0),
            datetime(1997, 10, 2, 9, 0, 0, 0),
        ]
    );
}

#[test]
fn expands_alternating_weeks_of_weekdays() {
    // Every other week on Monday, Wednesday and Friday, Sep 1 to Dec 24.
    let occurrences = expand_all(
        "FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;WKST=SU;BYDAY=MO,WE,FR",
        datetime(1997, 9, 1, 9, 0, 0, 0),
    );
    assert_eq!(occurrences.len(), 25);
    assert_eq!(
        occurrences.first_chunk::<6>().unwrap(),
        &[
            datetime(1997, 9, 1, 9, 0, 0, 0),
            datetime(1997, 9, 3, 9, 0, 0, 0),
            datetime(1997, 9, 5, 9, 0, 0, 0),
            datetime(1997, 9, 15, 9, 0, 0, 0),
            datetime(1997, 9, 17, 9, 0, 0, 0),
            datetime(1997, 9, 19, 9, 0, 0, 0),
        ]
    );
    // December 24 itself falls at 9:00, after the midnight UNTIL.
    assert_eq!(occurrences.last(), Some(&datetime(1997, 12, 22, 9, 0, 0, 0)));
}

#[test]
fn week_start_changes_which_week_a_sunday_belongs_to() {
    // The classic WKST example: with Monday weeks, the Sunday sharing
    // Tuesday August 5's week is August 10; with Sunday weeks it is
    // August 3 (before the start) and the next one is August 17.
    let monday_weeks = expand_all(
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=MO",
        datetime(1997, 8, 5, 9, 0, 0, 0),
    );
    assert_eq!(
        monday_weeks,
        [
            datetime(1997, 8, 5, 9, 0, 0, 0),
            datetime(1997, 8, 10, 9, 0, 0, 0),
            datetime(1997, 8, 19, 9, 0, 0, 0),
            datetime(1997, 8, 24, 9, 0, 0, 0),
        ]
    );

    let sunday_weeks = expand_all(
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=SU",
        datetime(1997, 8, 5, 9, 0, 0, 0),
    );
    assert_eq!(
        sunday_weeks,
        [
            datetime(1997, 8, 5, 9, 0, 0, 0),
            datetime(1997, 8, 17, 9, 0, 0, 0),
            datetime(1997, 8, 19, 9, 0, 0, 0),
            datetime(1997, 8, 31, 9, 0, 0, 0),
        ]
    );
}
