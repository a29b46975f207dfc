// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::pretty_table;
use anyhow::Result;

/// Issues worth surfacing to the user, as (issue, detail) pairs.
pub fn findings(store: &LedgerStore) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Dates that were present but unreadable
    if store.unparsed_dates() > 0 {
        rows.push(vec![
            "unparsed_date".into(),
            format!("{} rows loaded without a date", store.unparsed_dates()),
        ]);
    }

    // 2) Records that fall outside every period
    for r in store.records().iter().filter(|r| r.date.is_none()) {
        rows.push(vec![
            "undated_record".into(),
            format!("id {} ({} {})", r.id, r.category, r.amount),
        ]);
    }

    // 3) Blank categories
    for r in store.records().iter().filter(|r| r.category.is_empty()) {
        rows.push(vec!["missing_category".into(), format!("id {}", r.id)]);
    }
    rows
}

pub fn handle(store: &LedgerStore) -> Result<()> {
    let rows = findings(store);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
