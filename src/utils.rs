// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::Once;

use crate::view::Filters;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber once. Events go to stderr so that
/// tables and JSON on stdout stay machine readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ledgerlite=warn"));

        // Err only when a global subscriber is already set, e.g. by a test harness.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Lenient date parsing for tabular sources. Returns `None` rather than failing.
pub fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Renders an amount with thousands separators and no fraction, the way the
/// dashboard shows totals.
pub fn fmt_money(d: &Decimal) -> String {
    let rounded = d.round_dp(0).abs().to_string();
    let digits = rounded.split('.').next().unwrap_or("0");
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if d.round_dp(0).is_sign_negative() && !d.round_dp(0).is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{}%", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Fetches an argument clap has already marked as required.
pub fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .ok_or_else(|| anyhow!("Missing required argument --{}", name))
}

fn many(m: &clap::ArgMatches, name: &str) -> Vec<String> {
    m.get_many::<String>(name)
        .map(|vals| vals.map(|s| s.trim().to_string()).collect())
        .unwrap_or_default()
}

/// Builds view filters from the repeatable `--year/--month/--type/--category` flags.
pub fn filters_from_matches(m: &clap::ArgMatches) -> Result<Filters> {
    Filters::from_tokens(
        &many(m, "year"),
        &many(m, "month"),
        &many(m, "type"),
        &many(m, "category"),
    )
}
