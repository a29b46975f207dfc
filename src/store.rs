// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::codec;
use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Kind, Method, NewRecord, Record, RecordId};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Ledgerlite", "ledgerlite"));

pub const DATA_ENV: &str = "LEDGERLITE_DATA";
pub const DATA_FILE: &str = "transactions.csv";

/// Resolves the ledger file: explicit path, then `LEDGERLITE_DATA`, then the
/// platform data directory.
pub fn data_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(DATA_FILE))
}

pub fn open_or_init(explicit: Option<&Path>) -> Result<LedgerStore> {
    let path = data_path(explicit)?;
    LedgerStore::open(&path).with_context(|| format!("Open ledger at {}", path.display()))
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub unparsed_dates: usize,
}

/// Owns the session's records and keeps the ledger file in sync with them.
///
/// Every mutation rewrites the whole file before returning. There is no
/// locking: a second process writing the same file wins if it writes last.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    records: Vec<Record>,
    next_id: u64,
    unparsed_dates: usize,
}

impl LedgerStore {
    /// Loads the ledger file, or seeds and writes one if it does not exist.
    pub fn open(path: &Path) -> LedgerResult<Self> {
        let mut store = LedgerStore {
            path: path.to_path_buf(),
            records: Vec::new(),
            next_id: 1,
            unparsed_dates: 0,
        };
        if !path.exists() {
            info!(path = %path.display(), "no ledger found, writing seed data");
            store.extend(seed_records());
            store.persist()?;
            return Ok(store);
        }

        let mut raw = Vec::new();
        File::open(path)?.read_to_end(&mut raw)?;
        if raw.is_empty() {
            debug!(path = %path.display(), "ledger file is empty");
            return Ok(store);
        }
        let decoded = codec::decode(raw.as_slice())?;
        store.unparsed_dates = decoded.unparsed_dates;
        if decoded.unparsed_dates > 0 {
            warn!(
                count = decoded.unparsed_dates,
                "ledger rows with unparseable dates loaded without a date"
            );
        }
        store.extend(decoded.records);
        debug!(path = %path.display(), records = store.records.len(), "ledger loaded");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dates that failed to parse, on load or import, during this session.
    pub fn unparsed_dates(&self) -> usize {
        self.unparsed_dates
    }

    pub fn insert(&mut self, new: NewRecord) -> LedgerResult<RecordId> {
        if new.amount.is_sign_negative() && !new.amount.is_zero() {
            return Err(LedgerError::NegativeAmount(new.amount));
        }
        let saved_next = self.next_id;
        let id = self.push(new);
        if let Err(e) = self.persist() {
            self.records.pop();
            self.next_id = saved_next;
            return Err(e);
        }
        info!(%id, "record added");
        Ok(id)
    }

    /// Appends every row of a CSV source, or nothing if any row is invalid.
    pub fn import_reader<R: Read>(&mut self, src: R) -> LedgerResult<ImportReport> {
        let decoded = codec::decode(src)?;
        let report = ImportReport {
            added: decoded.records.len(),
            unparsed_dates: decoded.unparsed_dates,
        };
        if decoded.unparsed_dates > 0 {
            warn!(
                count = decoded.unparsed_dates,
                "imported rows with unparseable dates stored without a date"
            );
        }
        let (saved_len, saved_next) = (self.records.len(), self.next_id);
        self.extend(decoded.records);
        if let Err(e) = self.persist() {
            self.records.truncate(saved_len);
            self.next_id = saved_next;
            return Err(e);
        }
        self.unparsed_dates += decoded.unparsed_dates;
        info!(added = report.added, "import complete");
        Ok(report)
    }

    pub fn import_path(&mut self, path: &Path) -> LedgerResult<ImportReport> {
        self.import_reader(File::open(path)?)
    }

    pub fn remove(&mut self, id: RecordId) -> LedgerResult<Record> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(LedgerError::UnknownRecord(id))?;
        let removed = self.records.remove(pos);
        if let Err(e) = self.persist() {
            self.records.insert(pos, removed);
            return Err(e);
        }
        info!(%id, "record removed");
        Ok(removed)
    }

    /// Overwrites the ledger file with the current records.
    pub fn persist(&self) -> LedgerResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = temp_path(&self.path);
        let written = File::create(&tmp)
            .map_err(LedgerError::from)
            .and_then(|file| -> LedgerResult<()> {
                let mut out = BufWriter::new(file);
                codec::encode(&mut out, &self.records, true)?;
                out.flush()?;
                Ok(())
            })
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(LedgerError::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        debug!(path = %self.path.display(), records = self.records.len(), "ledger persisted");
        Ok(())
    }

    fn push(&mut self, new: NewRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(Record::from_new(id, new));
        id
    }

    fn extend<I: IntoIterator<Item = NewRecord>>(&mut self, rows: I) {
        for new in rows {
            self.push(new);
        }
    }
}

/// Sibling staging file for `path`: the full file name plus `.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// The bootstrap month written when no ledger exists yet.
pub fn seed_records() -> Vec<NewRecord> {
    let date = NaiveDate::from_ymd_opt(2025, 8, 1);
    let fixed_expenses: [(&str, i64); 5] = [
        ("Arriendo", 550_000),
        ("Servicios", 200_000),
        ("Inversiones", 500_000),
        ("Transporte", 200_000),
        ("Gastos hormiga", 1_000_000),
    ];

    let mut rows = vec![NewRecord {
        date,
        kind: Kind::Income,
        category: "Salario".into(),
        method: Method::Transfer,
        amount: Decimal::from(5_000_000),
        description: Some("Pago mensual".into()),
    }];
    for (category, amount) in fixed_expenses {
        rows.push(NewRecord {
            date,
            kind: Kind::Expense,
            category: category.to_string(),
            method: Method::Cash,
            amount: Decimal::from(amount),
            description: Some(format!("Gasto de {}", category)),
        });
    }
    rows
}
