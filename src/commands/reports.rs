// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::{filters_from_matches, fmt_money, fmt_percent, maybe_print_json, pretty_table};
use crate::view::{self, FlowShares, Summary};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub records: usize,
    #[serde(flatten)]
    pub summary: Summary,
    pub shares: FlowShares,
}

pub fn summary_report(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<SummaryReport> {
    let filters = filters_from_matches(sub)?;
    let rows = view::apply_filters(store.records(), &filters);
    let summary = view::summarize(rows.iter().copied())?;
    Ok(SummaryReport {
        records: rows.len(),
        shares: view::flow_shares(&summary)?,
        summary,
    })
}

pub fn summary(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let report = summary_report(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), false, &report)? {
        return Ok(());
    }
    if report.records == 0 {
        println!("No data recorded yet.");
        return Ok(());
    }
    let s = &report.summary;
    let data = vec![
        vec!["Income".into(), fmt_money(&s.total_income)],
        vec!["Expense".into(), fmt_money(&s.total_expense)],
        vec!["Balance".into(), fmt_money(&s.balance)],
        vec!["Savings".into(), fmt_percent(&s.savings_rate)],
        vec![
            "Income / Expense split".into(),
            format!(
                "{} / {}",
                fmt_percent(&report.shares.income_pct),
                fmt_percent(&report.shares.expense_pct)
            ),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], data));
    Ok(())
}

pub fn monthly(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filters = filters_from_matches(sub)?;
    let rows = view::apply_filters(store.records(), &filters);
    let totals = view::group_by_period_and_kind(rows.iter().copied())?;
    if maybe_print_json(json_flag, jsonl_flag, &totals)? {
        return Ok(());
    }
    if totals.is_empty() {
        println!("No data recorded yet.");
        return Ok(());
    }
    let data = totals
        .iter()
        .map(|t| {
            vec![
                t.year.to_string(),
                t.month_name.clone(),
                t.kind.to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Year", "Month", "Type", "Amount"], data));
    Ok(())
}
