// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::db::SqliteStore;
use crate::utils::{get_currency, get_urgent_days, pretty_table, set_currency, set_urgent_days};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
            set_currency(&store, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        Some(("set-urgent-days", sub)) => {
            let days = *sub.get_one::<i64>("days").unwrap();
            set_urgent_days(&store, days)?;
            println!("Payments due within {} days are now flagged urgent", days);
        }
        Some(("show", _)) | None => {
            let rows = vec![
                vec!["currency".to_string(), get_currency(&store)?],
                vec!["urgent_days".to_string(), get_urgent_days(&store)?.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
