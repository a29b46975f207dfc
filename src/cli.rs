// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn filter_args() -> [Arg; 4] {
    [
        Arg::new("year")
            .long("year")
            .action(ArgAction::Append)
            .help("Keep records from this year (repeatable, 'All' for any)"),
        Arg::new("month")
            .long("month")
            .action(ArgAction::Append)
            .help("Keep records from this month: name or 1-12 (repeatable)"),
        Arg::new("type")
            .long("type")
            .action(ArgAction::Append)
            .help("Keep Ingreso or Gasto records (repeatable)"),
        Arg::new("category")
            .long("category")
            .action(ArgAction::Append)
            .help("Keep records in this category (repeatable)"),
    ]
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("ledgerlite")
        .about("Personal income and expense ledger backed by a CSV file")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("PATH")
                .help("Ledger file (defaults to $LEDGERLITE_DATA, then the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the ledger (with seed data) if missing"))
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("Ingreso|Gasto (or income|expense)"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("method")
                        .long("method")
                        .required(true)
                        .help("Efectivo, Tarjeta Débito, Tarjeta Crédito or Transferencia"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("list")
                .about("List records matching the filters, newest first")
                .args(filter_args())
                .args(json_args())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("rm").about("Delete a record by id").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new("import")
                .about("Append records from a CSV with columns date,type,category,method,amount,description")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Write the filtered records to a file")
                .args(filter_args())
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Income, expense, balance and savings rate")
                .args(filter_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("monthly")
                .about("Totals per month and type")
                .args(filter_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("facets")
                .about("Values available to the filters")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for data problems"))
}
