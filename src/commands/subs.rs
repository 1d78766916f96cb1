// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use rusqlite::Connection;
use serde::Serialize;

use crate::countdown::{Countdown, classify_within};
use crate::db::SqliteStore;
use crate::error::LedgerError;
use crate::form::{FormController, FormInput, KNOWN_SERVICES};
use crate::ledger::{IdGenerator, Ledger};
use crate::models::{Cycle, Subscription};
use crate::store::{KeyValueStore, SubscriptionGateway};
use crate::utils::{get_urgent_days, maybe_print_json, now_local, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("services", _)) => services(),
        _ => {}
    }
    Ok(())
}

/// Writes the ledger back after a mutation that already happened in memory.
pub fn persist<S: KeyValueStore>(gw: &SubscriptionGateway<S>, ledger: &Ledger) -> Result<()> {
    gw.save(ledger.all())
        .context("Change applied but could not be saved; it will be lost on exit")
}

fn overlay(input: &mut FormInput, sub: &clap::ArgMatches) {
    if let Some(name) = sub.get_one::<String>("name") {
        input.set_name(name);
    }
    if let Some(price) = sub.get_one::<String>("price") {
        input.price = price.clone();
    }
    if let Some(cycle) = sub.get_one::<String>("cycle") {
        input.cycle = cycle.clone();
    }
    if let Some(date) = sub.get_one::<String>("date") {
        input.next_date = date.clone();
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let gw = SubscriptionGateway::new(SqliteStore::new(conn));
    let mut ledger = gw.load_ledger()?;
    let mut ids = IdGenerator::seeded(&ledger);

    let mut input = FormInput {
        next_date: now_local().date().to_string(),
        ..FormInput::default()
    };
    overlay(&mut input, sub);

    let mut form = FormController::new();
    let id = form.submit(&mut ledger, &mut ids, &input)?.id();
    persist(&gw, &ledger)?;
    println!("Added subscription {} '{}'", id, input.name().trim());
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let gw = SubscriptionGateway::new(SqliteStore::new(conn));
    let mut ledger = gw.load_ledger()?;
    let mut ids = IdGenerator::seeded(&ledger);

    let mut form = FormController::new();
    let mut input = form
        .start_edit(&ledger, id)
        .with_context(|| format!("Cannot edit subscription {}", id))?;
    overlay(&mut input, sub);

    let id = form.submit(&mut ledger, &mut ids, &input)?.id();
    persist(&gw, &ledger)?;
    println!("Updated subscription {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let gw = SubscriptionGateway::new(SqliteStore::new(conn));
    let mut ledger = gw.load_ledger()?;

    let mut form = FormController::new();
    match form.delete(&mut ledger, id) {
        Ok(removed) => {
            persist(&gw, &ledger)?;
            println!("Removed subscription {} '{}'", id, removed.name);
        }
        Err(LedgerError::NotFound(_)) => {
            warn!("rm: subscription {} not found", id);
            println!("No subscription with id {}; nothing removed", id);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let store = SqliteStore::new(conn);
    let ledger = SubscriptionGateway::new(store).load_ledger()?;
    let found = ledger
        .find_by_id(id)
        .ok_or_else(|| anyhow!("Subscription {} not found", id))?;
    let item = listed(found, now_local(), get_urgent_days(&store)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &item)? {
        println!("{}", pretty_table(HEADERS, vec![item.row()]));
    }
    Ok(())
}

const HEADERS: &[&str] = &["ID", "Name", "Price", "Cycle", "Next date", "Countdown"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedSubscription {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub countdown: Countdown,
    pub label: String,
    pub urgent: bool,
}

impl ListedSubscription {
    fn row(&self) -> Vec<String> {
        let s = &self.subscription;
        let mark = if self.urgent { "! " } else { "" };
        vec![
            s.id.to_string(),
            s.name.clone(),
            s.price.normalize().to_string(),
            s.cycle.to_string(),
            s.next_date.to_string(),
            format!("{}{}", mark, self.label),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleGroup {
    pub cycle: Cycle,
    pub entries: Vec<ListedSubscription>,
}

fn listed(sub: &Subscription, now: NaiveDateTime, urgent_days: i64) -> ListedSubscription {
    let countdown = classify_within(&sub.cycle, sub.next_date, now, urgent_days);
    ListedSubscription {
        subscription: sub.clone(),
        countdown,
        label: countdown.label(),
        urgent: countdown.is_urgent(),
    }
}

/// Groups in fixed cycle order, empty groups dropped, each group sorted by
/// next payment date (ties keep ledger order). Unrecognized cycles follow,
/// one group each in order of first appearance, so they can still be removed.
pub fn group_by_cycle(subs: &[Subscription]) -> Vec<(Cycle, Vec<&Subscription>)> {
    let mut order: Vec<Cycle> = Cycle::ALL.to_vec();
    for s in subs {
        if !order.contains(&s.cycle) {
            order.push(s.cycle.clone());
        }
    }
    order
        .into_iter()
        .filter_map(|cycle| {
            let mut group: Vec<&Subscription> = subs.iter().filter(|s| s.cycle == cycle).collect();
            if group.is_empty() {
                return None;
            }
            group.sort_by_key(|s| s.next_date);
            Some((cycle, group))
        })
        .collect()
}

pub fn list_groups(ledger: &Ledger, now: NaiveDateTime, urgent_days: i64) -> Vec<CycleGroup> {
    group_by_cycle(ledger.all())
        .into_iter()
        .map(|(cycle, subs)| CycleGroup {
            cycle,
            entries: subs.into_iter().map(|s| listed(s, now, urgent_days)).collect(),
        })
        .collect()
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let now = match sub.get_one::<String>("today") {
        Some(d) => midnight(parse_date(d)?),
        None => now_local(),
    };
    let store = SqliteStore::new(conn);
    let ledger = SubscriptionGateway::new(store).load_ledger()?;
    let groups = list_groups(&ledger, now, get_urgent_days(&store)?);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &groups)? {
        return Ok(());
    }
    if groups.is_empty() {
        println!("No subscriptions yet. Add one with `subtrack sub add`.");
        return Ok(());
    }
    for g in groups {
        let heading = match &g.cycle {
            Cycle::Unknown(raw) => format!("{} '{}'", g.cycle.title(), raw),
            known => known.title().to_string(),
        };
        println!("{} ({})", heading, g.entries.len());
        let rows = g.entries.iter().map(ListedSubscription::row).collect();
        println!("{}", pretty_table(HEADERS, rows));
    }
    Ok(())
}

fn midnight(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

fn services() {
    for name in KNOWN_SERVICES {
        println!("{}", name);
    }
    println!("(any other name is stored as a custom service)");
}
