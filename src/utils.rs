// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::countdown::DEFAULT_URGENT_DAYS;
use crate::error::PersistenceError;
use crate::store::KeyValueStore;

pub const DEFAULT_CURRENCY: &str = "TWD";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Local wall-clock now; countdowns only look at its date part.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Rounds half away from zero to whole units and groups thousands.
pub fn fmt_whole(d: &Decimal) -> String {
    let whole = d
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", fmt_whole(d), ccy)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Display settings
pub fn get_currency(store: &impl KeyValueStore) -> Result<String, PersistenceError> {
    Ok(store
        .get("currency")?
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(store: &impl KeyValueStore, ccy: &str) -> Result<(), PersistenceError> {
    store.set("currency", ccy)
}

pub fn get_urgent_days(store: &impl KeyValueStore) -> Result<i64, PersistenceError> {
    match store.get("urgent_days")? {
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| PersistenceError::Corrupt(format!("urgent_days '{}' is not a number", v))),
        None => Ok(DEFAULT_URGENT_DAYS),
    }
}

pub fn set_urgent_days(store: &impl KeyValueStore, days: i64) -> Result<(), PersistenceError> {
    store.set("urgent_days", &days.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_units_round_half_up_and_group() {
        assert_eq!(fmt_whole(&Decimal::new(12345675, 1)), "1,234,568");
        assert_eq!(fmt_whole(&Decimal::new(4005, 1)), "401");
        assert_eq!(fmt_whole(&Decimal::new(999, 0)), "999");
        assert_eq!(fmt_whole(&Decimal::ZERO), "0");
    }
}
