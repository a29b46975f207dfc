// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::required;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let path = required(m, "path")?;
    let report = store
        .import_path(Path::new(path))
        .with_context(|| format!("Import of {} aborted, ledger unchanged", path))?;
    println!(
        "Imported {} records from {} ({} total)",
        report.added,
        path,
        store.len()
    );
    if report.unparsed_dates > 0 {
        println!(
            "Warning: {} rows had an unreadable date and were stored without one",
            report.unparsed_dates
        );
    }
    Ok(())
}
