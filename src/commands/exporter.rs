// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec;
use crate::store::LedgerStore;
use crate::utils::{filters_from_matches, required};
use crate::view;
use anyhow::{Context, Result, bail};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let fmt = required(m, "format")?.to_lowercase();
    let out = required(m, "out")?;
    let filters = filters_from_matches(m)?;
    let rows = view::apply_filters(store.records(), &filters);

    match fmt.as_str() {
        "csv" => {
            let file = File::create(out).with_context(|| format!("Create {}", out))?;
            codec::encode(BufWriter::new(file), rows.iter().copied(), false)?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    let [date, kind, category, method, amount, description] = r.to_row();
                    json!({
                        "date": date, "type": kind, "category": category, "method": method,
                        "amount": amount, "description": description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} records to {}", rows.len(), out);
    Ok(())
}
