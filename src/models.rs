// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column order of the ledger file, the import template and CSV exports.
pub const COLUMNS: [&str; 6] = ["date", "type", "category", "method", "amount", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "Ingreso")]
    Income,
    #[serde(rename = "Gasto")]
    Expense,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Income, Kind::Expense];

    /// Token written to the ledger file.
    pub fn token(self) -> &'static str {
        match self {
            Kind::Income => "Ingreso",
            Kind::Expense => "Gasto",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "ingreso" | "income" => Ok(Kind::Income),
            "gasto" | "expense" => Ok(Kind::Expense),
            _ => Err(format!(
                "Invalid type '{}', expected Ingreso|Gasto (or income|expense)",
                s.trim()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Tarjeta Débito")]
    DebitCard,
    #[serde(rename = "Tarjeta Crédito")]
    CreditCard,
    #[serde(rename = "Transferencia")]
    Transfer,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Cash,
        Method::DebitCard,
        Method::CreditCard,
        Method::Transfer,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Method::Cash => "Efectivo",
            Method::DebitCard => "Tarjeta Débito",
            Method::CreditCard => "Tarjeta Crédito",
            Method::Transfer => "Transferencia",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "efectivo" | "cash" => Ok(Method::Cash),
            "tarjeta debito" | "debit" | "debit card" => Ok(Method::DebitCard),
            "tarjeta credito" | "credit" | "credit card" => Ok(Method::CreditCard),
            "transferencia" | "transfer" => Ok(Method::Transfer),
            _ => Err(format!(
                "Invalid method '{}', expected one of: {}",
                s.trim(),
                Method::ALL.map(|m| m.token()).join(", ")
            )),
        }
    }
}

/// Lowercases, strips the Spanish accents used by the method tokens and
/// collapses inner whitespace.
fn fold(s: &str) -> String {
    let lowered: String = s
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            _ => c,
        })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A record as submitted by a caller, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub date: Option<NaiveDate>,
    pub kind: Kind,
    pub category: String,
    pub method: Method,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub category: String,
    pub method: Method,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl Record {
    pub fn from_new(id: RecordId, new: NewRecord) -> Self {
        Record {
            id,
            date: new.date,
            kind: new.kind,
            category: new.category,
            method: new.method,
            amount: new.amount,
            description: new.description,
        }
    }

    /// Field values in [`COLUMNS`] order, as written to CSV.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.date.map(|d| d.to_string()).unwrap_or_default(),
            self.kind.token().to_string(),
            self.category.clone(),
            self.method.token().to_string(),
            self.amount.to_string(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}
