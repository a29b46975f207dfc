// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Kind, Method, NewRecord, RecordId};
use crate::store::LedgerStore;
use crate::utils::{
    filters_from_matches, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table,
    required,
};
use crate::view;
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn add(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let kind: Kind = required(sub, "type")?.parse().map_err(|e: String| anyhow!(e))?;
    let category = required(sub, "category")?.to_string();
    let method: Method = required(sub, "method")?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let id = store.insert(NewRecord {
        date: Some(date),
        kind,
        category: category.clone(),
        method,
        amount,
        description,
    })?;
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        kind,
        fmt_money(&amount),
        date,
        category,
        id
    );
    Ok(())
}

pub fn remove(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<u64>("id")
        .copied()
        .ok_or_else(|| anyhow!("Missing required argument --id"))?;
    let removed = store.remove(RecordId(id))?;
    println!(
        "Removed {} {} in '{}' (id {}); {} records left",
        removed.kind,
        fmt_money(&removed.amount),
        removed.category,
        removed.id,
        store.len()
    );
    Ok(())
}

pub fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No data recorded yet.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.kind.clone(),
                r.category.clone(),
                r.method.clone(),
                r.amount.clone(),
                r.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Type", "Category", "Method", "Amount", "Description"],
            rows,
        )
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub method: String,
    pub amount: String,
    pub description: String,
}

/// Filtered records, newest first; undated records sort last.
pub fn query_rows(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filters = filters_from_matches(sub)?;
    let mut picked = view::apply_filters(store.records(), &filters);
    picked.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        picked.truncate(*limit);
    }
    Ok(picked
        .into_iter()
        .map(|r| TransactionRow {
            id: r.id.0,
            date: r.date.map(|d| d.to_string()).unwrap_or_default(),
            kind: r.kind.to_string(),
            category: r.category.clone(),
            method: r.method.to_string(),
            amount: r.amount.to_string(),
            description: r.description.clone().unwrap_or_default(),
        })
        .collect())
}
