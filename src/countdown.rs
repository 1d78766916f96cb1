// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::Cycle;

/// Payments due within this many days are flagged urgent.
pub const DEFAULT_URGENT_DAYS: i64 = 3;

/// Signed whole days from `today` (time of day ignored) until `next_date`.
///
/// Both sides are compared at midnight, so a partial day can never occur.
/// This equals the ceiling of (target at UTC midnight - local midnight) for
/// any local offset at or west of UTC; east of UTC that ceiling would count
/// one extra day, which the date-only difference deliberately does not.
pub fn days_remaining(next_date: NaiveDate, today: NaiveDateTime) -> i64 {
    (next_date - today.date()).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Countdown {
    /// One-time payment whose date has passed.
    Paid { on: NaiveDate },
    /// One-time payment today or later.
    Scheduled { on: NaiveDate },
    Overdue { days: i64 },
    DueToday,
    DueSoon { days: i64 },
    DueLater { days: i64 },
}

impl Countdown {
    pub fn is_urgent(&self) -> bool {
        matches!(
            self,
            Countdown::Overdue { .. } | Countdown::DueToday | Countdown::DueSoon { .. }
        )
    }

    pub fn label(&self) -> String {
        match self {
            Countdown::Paid { on } => format!("paid on {}", on),
            Countdown::Scheduled { on } => format!("scheduled for {}", on),
            Countdown::Overdue { days } => format!("overdue by {} {}", days, plural(*days)),
            Countdown::DueToday => "due today".to_string(),
            Countdown::DueSoon { days } | Countdown::DueLater { days } => {
                format!("{} {} left", days, plural(*days))
            }
        }
    }
}

fn plural(days: i64) -> &'static str {
    if days == 1 { "day" } else { "days" }
}

pub fn classify(cycle: &Cycle, next_date: NaiveDate, today: NaiveDateTime) -> Countdown {
    classify_within(cycle, next_date, today, DEFAULT_URGENT_DAYS)
}

/// Like [`classify`] with a configurable urgency window.
pub fn classify_within(
    cycle: &Cycle,
    next_date: NaiveDate,
    today: NaiveDateTime,
    urgent_days: i64,
) -> Countdown {
    let days = days_remaining(next_date, today);
    if *cycle == Cycle::OneTime {
        return if days < 0 {
            Countdown::Paid { on: next_date }
        } else {
            Countdown::Scheduled { on: next_date }
        };
    }
    match days {
        d if d < 0 => Countdown::Overdue { days: -d },
        0 => Countdown::DueToday,
        d if d <= urgent_days => Countdown::DueSoon { days: d },
        d => Countdown::DueLater { days: d },
    }
}
