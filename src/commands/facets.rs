// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table};
use crate::view::{self, WILDCARDS};
use anyhow::Result;
use std::iter::once;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let facets = view::derive_facets(store.records());
    if maybe_print_json(m.get_flag("json"), false, &facets)? {
        return Ok(());
    }
    let all = WILDCARDS[0].to_string();
    let line = |values: Vec<String>| {
        once(all.clone())
            .chain(values)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let data = vec![
        vec![
            "Year".into(),
            line(facets.years.iter().map(|y| y.to_string()).collect()),
        ],
        vec!["Month".into(), line(facets.months.clone())],
        vec![
            "Type".into(),
            line(facets.kinds.iter().map(|k| k.to_string()).collect()),
        ],
        vec!["Category".into(), line(facets.categories.clone())],
    ];
    println!("{}", pretty_table(&["Facet", "Values"], data));
    Ok(())
}
