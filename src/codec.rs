// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tabular text encoding shared by the ledger file, imports and exports.

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{COLUMNS, Kind, Method, NewRecord, Record};
use crate::utils::{parse_decimal, parse_loose_date};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{Read, Write};

pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Rows decoded from a tabular source, all validated.
#[derive(Debug, Default)]
pub struct Decoded {
    pub records: Vec<NewRecord>,
    /// Rows whose date was present but could not be parsed.
    pub unparsed_dates: usize,
}

/// Decodes a CSV source with the six ledger columns in any order.
///
/// Unknown columns are ignored. A missing column fails the whole source, and so
/// does any row with an invalid type, method or amount; unparseable dates do not,
/// they become `None` and are counted.
pub fn decode<R: Read>(mut src: R) -> LedgerResult<Decoded> {
    let mut raw = Vec::new();
    src.read_to_end(&mut raw)?;
    let body = raw.strip_prefix(BOM).unwrap_or(&raw[..]);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body);

    let headers = rdr.headers()?.clone();
    let index = column_index(&headers)?;

    let mut out = Decoded::default();
    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let row = i + 2;
        let rec = result?;
        let field = |col: usize| rec.get(index[col]).unwrap_or("").trim();

        let date_raw = field(0);
        let date = if date_raw.is_empty() {
            None
        } else {
            let parsed = parse_loose_date(date_raw);
            if parsed.is_none() {
                out.unparsed_dates += 1;
            }
            parsed
        };
        let kind: Kind = field(1)
            .parse()
            .map_err(|message| LedgerError::InvalidRow { row, message })?;
        let method: Method = field(3)
            .parse()
            .map_err(|message| LedgerError::InvalidRow { row, message })?;
        let amount = parse_amount(field(4)).map_err(|message| LedgerError::InvalidRow { row, message })?;
        let description = Some(field(5))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        out.records.push(NewRecord {
            date,
            kind,
            category: field(2).to_string(),
            method,
            amount,
            description,
        });
    }
    Ok(out)
}

fn column_index(headers: &StringRecord) -> LedgerResult<[usize; 6]> {
    let mut index = [0usize; 6];
    let mut missing = Vec::new();
    for (slot, name) in COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)) {
            Some(pos) => index[slot] = pos,
            None => missing.push(name.to_string()),
        }
    }
    if missing.is_empty() {
        Ok(index)
    } else {
        Err(LedgerError::MissingColumns { missing })
    }
}

fn parse_amount(s: &str) -> Result<Decimal, String> {
    let amount = parse_decimal(s).map_err(|e| e.to_string())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("Amount must not be negative (got {})", amount));
    }
    Ok(amount)
}

/// Writes records in ledger column order, optionally prefixed with a UTF-8 BOM.
pub fn encode<'a, W, I>(mut dst: W, records: I, with_bom: bool) -> LedgerResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    if with_bom {
        dst.write_all(BOM)?;
    }
    let mut wtr = WriterBuilder::new().from_writer(dst);
    wtr.write_record(COLUMNS)?;
    for r in records {
        wtr.write_record(r.to_row())?;
    }
    wtr.flush()?;
    Ok(())
}
