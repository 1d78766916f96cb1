// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::aggregate::{CostSummary, summarize};
use crate::db::SqliteStore;
use crate::store::SubscriptionGateway;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};

pub const NO_RECURRING: &str = "No recurring subscriptions";

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let report = build_report(conn)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Monthly", "Yearly"],
            vec![vec![report.monthly.clone(), report.yearly.clone()]],
        )
    );
    println!(
        "{}",
        pretty_table(&["Subscription", "Per month", "Share"], breakdown_rows(&report.totals))
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub currency: String,
    /// Totals rounded to whole units for display.
    pub monthly: String,
    pub yearly: String,
    #[serde(flatten)]
    pub totals: CostSummary,
}

pub fn build_report(conn: &Connection) -> Result<SummaryReport> {
    let store = SqliteStore::new(conn);
    let ledger = SubscriptionGateway::new(store).load_ledger()?;
    let currency = get_currency(&store)?;
    let totals = summarize(ledger.all());
    Ok(SummaryReport {
        monthly: fmt_money(&totals.total_monthly, &currency),
        yearly: fmt_money(&totals.total_yearly, &currency),
        currency,
        totals,
    })
}

pub fn breakdown_rows(totals: &CostSummary) -> Vec<Vec<String>> {
    if totals.breakdown.is_empty() {
        return vec![vec![NO_RECURRING.to_string(), "-".into(), "-".into()]];
    }
    totals
        .breakdown
        .iter()
        .map(|item| {
            vec![
                item.label.clone(),
                format!("{:.2}", item.monthly_cost.round_dp(2)),
                format!("{:.1}%", totals.share_percent(item).round_dp(1)),
            ]
        })
        .collect()
}
