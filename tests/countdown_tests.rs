// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use subtrack::countdown::{Countdown, classify, classify_within, days_remaining};
use subtrack::models::Cycle;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

#[test]
fn days_remaining_examples() {
    let today = at("2025-01-01 00:00");
    assert_eq!(days_remaining(date("2025-01-10"), today), 9);
    assert_eq!(days_remaining(date("2025-01-01"), today), 0);
    assert_eq!(days_remaining(date("2024-12-20"), today), -12);
}

#[test]
fn time_of_day_is_ignored() {
    assert_eq!(days_remaining(date("2025-01-02"), at("2025-01-01 23:59")), 1);
    assert_eq!(days_remaining(date("2025-01-01"), at("2025-01-01 18:30")), 0);
    assert_eq!(
        classify(&Cycle::Monthly, date("2025-01-01"), at("2025-01-01 23:59")),
        Countdown::DueToday
    );
}

/// Whole days from local midnight to `next_date` read as UTC midnight,
/// rounded up, the way a timestamp-based client counts them.
fn ceil_days_from_utc_target(next_date: NaiveDate, today: NaiveDateTime, offset: FixedOffset) -> i64 {
    let local_midnight = offset
        .from_local_datetime(&today.date().and_hms_opt(0, 0, 0).unwrap())
        .unwrap()
        .with_timezone(&Utc);
    let target = next_date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let ms = (target - local_midnight).num_milliseconds();
    (ms as f64 / 86_400_000.0).ceil() as i64
}

#[test]
fn matches_timestamp_ceiling_at_and_west_of_utc() {
    let targets = ["2025-01-10", "2025-01-01", "2024-12-20", "2025-03-31", "2024-02-29"];
    let todays = ["2025-01-01 00:00", "2025-01-01 23:59", "2025-03-30 12:00"];
    for hours in 0..=12 {
        let offset = FixedOffset::west_opt(hours * 3600).unwrap();
        for t in targets {
            for now in todays {
                assert_eq!(
                    days_remaining(date(t), at(now)),
                    ceil_days_from_utc_target(date(t), at(now), offset),
                    "target {t} today {now} at UTC-{hours}"
                );
            }
        }
    }
}

#[test]
fn east_of_utc_counts_calendar_days_not_the_ceiling() {
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();
    let today = at("2025-01-01 08:00");
    assert_eq!(days_remaining(date("2025-01-10"), today), 9);
    assert_eq!(ceil_days_from_utc_target(date("2025-01-10"), today, offset), 10);
}

#[test]
fn recurring_classification() {
    let today = at("2025-01-01 09:00");
    let due_today = classify(&Cycle::Monthly, date("2025-01-01"), today);
    assert_eq!(due_today, Countdown::DueToday);
    assert!(due_today.is_urgent());

    let overdue = classify(&Cycle::Yearly, date("2024-12-20"), today);
    assert_eq!(overdue, Countdown::Overdue { days: 12 });
    assert!(overdue.is_urgent());
    assert_eq!(overdue.label(), "overdue by 12 days");

    let soon = classify(&Cycle::Quarterly, date("2025-01-04"), today);
    assert_eq!(soon, Countdown::DueSoon { days: 3 });
    assert!(soon.is_urgent());

    let later = classify(&Cycle::HalfYearly, date("2025-01-05"), today);
    assert_eq!(later, Countdown::DueLater { days: 4 });
    assert!(!later.is_urgent());
    assert_eq!(later.label(), "4 days left");

    assert_eq!(
        classify(&Cycle::Monthly, date("2025-01-02"), today).label(),
        "1 day left"
    );
}

#[test]
fn one_time_is_never_urgent() {
    let today = at("2025-01-01 00:00");
    let paid = classify(&Cycle::OneTime, date("2024-12-31"), today);
    assert_eq!(paid, Countdown::Paid { on: date("2024-12-31") });
    assert!(!paid.is_urgent());
    assert_eq!(paid.label(), "paid on 2024-12-31");

    let today_scheduled = classify(&Cycle::OneTime, date("2025-01-01"), today);
    assert_eq!(today_scheduled, Countdown::Scheduled { on: date("2025-01-01") });
    assert!(!today_scheduled.is_urgent());

    let later = classify(&Cycle::OneTime, date("2025-03-01"), today);
    assert_eq!(later.label(), "scheduled for 2025-03-01");
}

#[test]
fn urgency_window_is_configurable() {
    let today = at("2025-01-01 00:00");
    assert_eq!(
        classify_within(&Cycle::Monthly, date("2025-01-08"), today, 7),
        Countdown::DueSoon { days: 7 }
    );
    assert_eq!(
        classify_within(&Cycle::Monthly, date("2025-01-02"), today, 0),
        Countdown::DueLater { days: 1 }
    );
}
