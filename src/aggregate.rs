// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Cycle, Subscription};

/// Recurring cycles as (months per billing period, billing periods per year).
/// One-time payments and unrecognized cycles have no row and never contribute
/// to the totals.
const COST_TABLE: [(Cycle, i64, i64); 4] = [
    (Cycle::Monthly, 1, 12),
    (Cycle::Quarterly, 3, 4),
    (Cycle::HalfYearly, 6, 2),
    (Cycle::Yearly, 12, 1),
];

/// Monthly-equivalent and yearly cost of a single payment of `price`.
pub fn cycle_costs(cycle: &Cycle, price: Decimal) -> Option<(Decimal, Decimal)> {
    COST_TABLE
        .iter()
        .find(|(c, _, _)| c == cycle)
        .map(|&(_, months, per_year)| {
            (
                price / Decimal::from(months),
                price * Decimal::from(per_year),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownItem {
    pub label: String,
    pub monthly_cost: Decimal,
}

/// Full-precision totals. Round only when displaying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostSummary {
    pub total_monthly: Decimal,
    pub total_yearly: Decimal,
    pub breakdown: Vec<BreakdownItem>,
}

impl CostSummary {
    /// Share of the monthly total taken by `item`, in percent.
    pub fn share_percent(&self, item: &BreakdownItem) -> Decimal {
        if self.total_monthly.is_zero() {
            return Decimal::ZERO;
        }
        item.monthly_cost * Decimal::ONE_HUNDRED / self.total_monthly
    }
}

pub fn summarize<'a, I>(subs: I) -> CostSummary
where
    I: IntoIterator<Item = &'a Subscription>,
{
    let mut summary = CostSummary::default();
    for sub in subs.into_iter().filter(|s| s.cycle.is_recurring()) {
        let Some((monthly, yearly)) = cycle_costs(&sub.cycle, sub.price) else {
            continue;
        };
        summary.total_monthly += monthly;
        summary.total_yearly += yearly;
        summary.breakdown.push(BreakdownItem {
            label: sub.name.clone(),
            monthly_cost: monthly,
        });
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_recurring_cycle_has_a_row() {
        for cycle in Cycle::ALL {
            assert_eq!(
                cycle_costs(&cycle, Decimal::ONE).is_some(),
                cycle.is_recurring(),
                "{cycle}"
            );
        }
    }

    #[test]
    fn unknown_cycle_has_no_row() {
        assert_eq!(cycle_costs(&Cycle::Unknown("weekly".into()), Decimal::ONE), None);
    }

    #[test]
    fn quarterly_and_half_yearly_factors() {
        let p = Decimal::new(600, 0);
        assert_eq!(
            cycle_costs(&Cycle::Quarterly, p),
            Some((Decimal::new(200, 0), Decimal::new(2400, 0)))
        );
        assert_eq!(
            cycle_costs(&Cycle::HalfYearly, p),
            Some((Decimal::new(100, 0), Decimal::new(1200, 0)))
        );
    }
}
