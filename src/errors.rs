// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{COLUMNS, RecordId};
use thiserror::Error;

/// Failures raised by the ledger store and its CSV boundary.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(
        "CSV must contain the columns {:?}; missing: {}",
        COLUMNS,
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },
    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },
    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(rust_decimal::Decimal),
    #[error("Amounts too large to total: {0} overflowed")]
    Overflow(&'static str),
    #[error("No record with id {0}")]
    UnknownRecord(RecordId),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
