// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use ledgerlite::{cli, commands, store, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let data = matches.get_one::<String>("data").map(Path::new);
    let mut store = store::open_or_init(data)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Ledger ready at {} ({} records)",
                store.path().display(),
                store.len()
            );
        }
        Some(("add", sub)) => commands::transactions::add(&mut store, sub)?,
        Some(("list", sub)) => commands::transactions::list(&store, sub)?,
        Some(("rm", sub)) => commands::transactions::remove(&mut store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&store, sub)?,
        Some(("monthly", sub)) => commands::reports::monthly(&store, sub)?,
        Some(("facets", sub)) => commands::facets::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
