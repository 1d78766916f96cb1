// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use subtrack::aggregate::summarize;
use subtrack::models::{Cycle, Subscription};

fn sub(id: i64, name: &str, price: i64, cycle: Cycle) -> Subscription {
    Subscription {
        id,
        name: name.to_string(),
        price: Decimal::new(price, 0),
        cycle,
        next_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
    }
}

#[test]
fn monthly_and_yearly_scenario() {
    let subs = vec![
        sub(1, "Netflix", 300, Cycle::Monthly),
        sub(2, "Domain", 1200, Cycle::Yearly),
    ];
    let s = summarize(&subs);
    assert_eq!(s.total_monthly, Decimal::new(400, 0));
    assert_eq!(s.total_yearly, Decimal::new(4800, 0));
    let labels: Vec<&str> = s.breakdown.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Netflix", "Domain"]);
    assert_eq!(s.breakdown[1].monthly_cost, Decimal::new(100, 0));
}

#[test]
fn one_time_entries_are_excluded() {
    let subs = vec![
        sub(1, "Course", 9000, Cycle::OneTime),
        sub(2, "Spotify", 149, Cycle::Monthly),
        sub(3, "Concert", 2500, Cycle::OneTime),
    ];
    let s = summarize(&subs);
    assert_eq!(s.total_monthly, Decimal::new(149, 0));
    assert_eq!(s.total_yearly, Decimal::new(149 * 12, 0));
    assert_eq!(s.breakdown.len(), 1);
    assert_eq!(s.breakdown[0].label, "Spotify");

    let only_one_time = vec![sub(1, "Course", 9000, Cycle::OneTime)];
    let empty = summarize(&only_one_time);
    assert!(empty.total_monthly.is_zero());
    assert!(empty.total_yearly.is_zero());
    assert!(empty.breakdown.is_empty());
}

#[test]
fn every_cycle_contributes_per_table() {
    let subs = vec![
        sub(1, "M", 120, Cycle::Monthly),
        sub(2, "Q", 120, Cycle::Quarterly),
        sub(3, "H", 120, Cycle::HalfYearly),
        sub(4, "Y", 120, Cycle::Yearly),
    ];
    let s = summarize(&subs);
    // 120 + 40 + 20 + 10
    assert_eq!(s.total_monthly, Decimal::new(190, 0));
    // 1440 + 480 + 240 + 120
    assert_eq!(s.total_yearly, Decimal::new(2280, 0));
}

#[test]
fn totals_keep_full_precision() {
    let subs = vec![
        sub(1, "A", 100, Cycle::Quarterly),
        sub(2, "B", 100, Cycle::Quarterly),
        sub(3, "C", 100, Cycle::Quarterly),
    ];
    let s = summarize(&subs);
    // Three thirds of 100 stay unrounded; rounding each to whole units first
    // would give 99.
    assert_eq!(s.total_monthly.round_dp(6), Decimal::new(100, 0));
    assert!(s.breakdown[0].monthly_cost > Decimal::new(3333, 2));
    assert_eq!(s.total_yearly, Decimal::new(1200, 0));
}

#[test]
fn aggregation_is_idempotent() {
    let subs = vec![
        sub(1, "A", 390, Cycle::Monthly),
        sub(2, "B", 1490, Cycle::HalfYearly),
    ];
    let before = subs.clone();
    let first = summarize(&subs);
    let second = summarize(&subs);
    assert_eq!(first, second);
    assert_eq!(subs, before);
}

#[test]
fn totals_are_additive_over_disjoint_ledgers() {
    let left = vec![
        sub(1, "A", 390, Cycle::Monthly),
        sub(2, "B", 900, Cycle::Quarterly),
        sub(3, "C", 50, Cycle::OneTime),
    ];
    let right = vec![
        sub(4, "D", 1200, Cycle::Yearly),
        sub(5, "E", 600, Cycle::HalfYearly),
    ];
    let union: Vec<Subscription> = left.iter().chain(right.iter()).cloned().collect();

    let l = summarize(&left);
    let r = summarize(&right);
    let u = summarize(&union);
    assert_eq!(u.total_monthly, l.total_monthly + r.total_monthly);
    assert_eq!(u.total_yearly, l.total_yearly + r.total_yearly);
    assert_eq!(u.breakdown.len(), l.breakdown.len() + r.breakdown.len());
}

#[test]
fn share_percent_sums_to_hundred() {
    let subs = vec![
        sub(1, "A", 300, Cycle::Monthly),
        sub(2, "B", 1200, Cycle::Yearly),
    ];
    let s = summarize(&subs);
    assert_eq!(s.share_percent(&s.breakdown[0]), Decimal::new(75, 0));
    assert_eq!(s.share_percent(&s.breakdown[1]), Decimal::new(25, 0));
}

#[test]
fn unrecognized_cycles_add_nothing() {
    let subs = vec![
        sub(1, "A", 300, Cycle::Monthly),
        sub(2, "B", 70, Cycle::Unknown("weekly".into())),
    ];
    let s = summarize(&subs);
    assert_eq!(s.total_monthly, Decimal::new(300, 0));
    assert_eq!(s.breakdown.len(), 1);
    assert_eq!(s.breakdown[0].label, "A");
}
