// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;

use crate::db::SqliteStore;
use crate::store::SubscriptionGateway;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();

    let subs = SubscriptionGateway::new(SqliteStore::new(conn)).load()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "name", "price", "cycle", "nextDate"])?;
            for s in &subs {
                wtr.write_record([
                    s.id.to_string(),
                    s.name.clone(),
                    s.price.normalize().to_string(),
                    s.cycle.to_string(),
                    s.next_date.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&subs)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} subscriptions to {}", subs.len(), out);
    Ok(())
}
