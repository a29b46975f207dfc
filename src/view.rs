// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only views over the ledger: facet values, filtering and aggregates.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Month};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Kind, Record};

/// Tokens that select every value of a facet.
pub const WILDCARDS: [&str; 2] = ["All", "Todos"];

/// One filter dimension: either unconstrained or restricted to a value set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T: Ord> {
    All,
    Only(BTreeSet<T>),
}

impl<T: Ord> Facet<T> {
    /// Parses user tokens; no tokens, or any wildcard token, yields `All`.
    pub fn from_tokens<F>(tokens: &[String], mut parse: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<T>,
    {
        if tokens.is_empty() || tokens.iter().any(|t| is_wildcard(t)) {
            return Ok(Facet::All);
        }
        let mut set = BTreeSet::new();
        for t in tokens {
            set.insert(parse(t)?);
        }
        Ok(Facet::Only(set))
    }

    /// A missing value only satisfies an unconstrained facet.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(set) => value.is_some_and(|v| set.contains(v)),
        }
    }
}

fn is_wildcard(token: &str) -> bool {
    WILDCARDS.iter().any(|w| w.eq_ignore_ascii_case(token.trim()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub years: Facet<i32>,
    /// Month numbers, 1 to 12.
    pub months: Facet<u32>,
    pub kinds: Facet<Kind>,
    pub categories: Facet<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Self::all()
    }
}

impl Filters {
    pub fn all() -> Self {
        Filters {
            years: Facet::All,
            months: Facet::All,
            kinds: Facet::All,
            categories: Facet::All,
        }
    }

    pub fn from_tokens(
        years: &[String],
        months: &[String],
        kinds: &[String],
        categories: &[String],
    ) -> Result<Self> {
        Ok(Filters {
            years: Facet::from_tokens(years, |s| {
                s.parse::<i32>()
                    .with_context(|| format!("Invalid year '{}'", s))
            })?,
            months: Facet::from_tokens(months, parse_month_token)?,
            kinds: Facet::from_tokens(kinds, |s| s.parse::<Kind>().map_err(|e| anyhow!(e)))?,
            categories: Facet::from_tokens(categories, |s| Ok(s.to_string()))?,
        })
    }

    pub fn matches(&self, r: &Record) -> bool {
        self.years.matches(r.date.map(|d| d.year()).as_ref())
            && self.months.matches(r.date.map(|d| d.month()).as_ref())
            && self.kinds.matches(Some(&r.kind))
            && self.categories.matches(Some(&r.category))
    }
}

/// Month names as shown in facets and the monthly series.
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Accepts `1`..`12`, `Agosto`, and the English `August` or `aug`.
pub fn parse_month_token(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        if (1..=12).contains(&n) {
            return Ok(n);
        }
        return Err(anyhow!("Invalid month number {}", n));
    }
    if let Some(pos) = MONTH_NAMES.iter().position(|m| m.eq_ignore_ascii_case(s)) {
        return Ok(pos as u32 + 1);
    }
    s.parse::<Month>()
        .map(|m| m.number_from_month())
        .map_err(|_| anyhow!("Invalid month '{}'", s))
}

pub fn month_name(month: u32) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTH_NAMES.get(i).copied())
        .unwrap_or("?")
}

/// Selectable values for each filter dimension, drawn from the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub years: Vec<i32>,
    pub months: Vec<String>,
    pub kinds: Vec<Kind>,
    pub categories: Vec<String>,
}

pub fn derive_facets<'a, I>(records: I) -> Facets
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut years = BTreeSet::new();
    let mut months = BTreeSet::new();
    let mut kinds = BTreeSet::new();
    let mut categories = BTreeSet::new();
    for r in records {
        if let Some(d) = r.date {
            years.insert(d.year());
            months.insert(d.month());
        }
        kinds.insert(r.kind);
        categories.insert(r.category.clone());
    }
    Facets {
        years: years.into_iter().collect(),
        months: months.into_iter().map(|m| month_name(m).to_string()).collect(),
        kinds: kinds.into_iter().collect(),
        categories: categories.into_iter().collect(),
    }
}

pub fn apply_filters<'a, I>(records: I, filters: &Filters) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| filters.matches(r)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Percent of income kept; zero when there is no income.
    pub savings_rate: Decimal,
}

fn checked_sum(acc: Decimal, amount: Decimal, what: &'static str) -> LedgerResult<Decimal> {
    acc.checked_add(amount).ok_or(LedgerError::Overflow(what))
}

/// `part / whole * 100`; dividing first keeps large ledgers in range.
fn percent_of(part: Decimal, whole: Decimal, what: &'static str) -> LedgerResult<Decimal> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(LedgerError::Overflow(what))
}

pub fn summarize<'a, I>(records: I) -> LedgerResult<Summary>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for r in records {
        match r.kind {
            Kind::Income => total_income = checked_sum(total_income, r.amount, "total income")?,
            Kind::Expense => total_expense = checked_sum(total_expense, r.amount, "total expense")?,
        }
    }
    let balance = total_income
        .checked_sub(total_expense)
        .ok_or(LedgerError::Overflow("balance"))?;
    let savings_rate = if total_income > Decimal::ZERO {
        percent_of(balance, total_income, "savings rate")?
    } else {
        Decimal::ZERO
    };
    Ok(Summary {
        total_income,
        total_expense,
        balance,
        savings_rate,
    })
}

/// Income and expense as percentages of their combined flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlowShares {
    pub income_pct: Decimal,
    pub expense_pct: Decimal,
}

pub fn flow_shares(summary: &Summary) -> LedgerResult<FlowShares> {
    let flow = checked_sum(summary.total_income, summary.total_expense, "total flow")?;
    if flow.is_zero() {
        return Ok(FlowShares::default());
    }
    Ok(FlowShares {
        income_pct: percent_of(summary.total_income, flow, "income share")?,
        expense_pct: percent_of(summary.total_expense, flow, "expense share")?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotal {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub amount: Decimal,
}

/// Sums amounts per (year, month, kind), ascending. Undated records have no
/// period and are skipped.
pub fn group_by_period_and_kind<'a, I>(records: I) -> LedgerResult<Vec<PeriodTotal>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut map: BTreeMap<(i32, u32, Kind), Decimal> = BTreeMap::new();
    for r in records {
        let Some(d) = r.date else { continue };
        let total = map.entry((d.year(), d.month(), r.kind)).or_insert(Decimal::ZERO);
        *total = checked_sum(*total, r.amount, "monthly total")?;
    }
    Ok(map
        .into_iter()
        .map(|((year, month, kind), amount)| PeriodTotal {
            year,
            month,
            month_name: month_name(month).to_string(),
            kind,
            amount,
        })
        .collect())
}
