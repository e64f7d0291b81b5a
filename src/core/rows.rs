//! Sheet-shaped input rows.
//!
//! A spreadsheet reader hands over one [`RawRow`] per line, keyed by the
//! sheet's column headers. Conversion to [`TransactionRow`] is forgiving:
//! numeric cells that are missing or do not parse count as zero.

use std::str::FromStr;

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::TransactionRow;

/// A single sheet cell: either a number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// The cell as display text.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    /// The cell as a decimal, if it holds a finite number or parsable text.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Number(n) => Decimal::from_f64(*n),
            Cell::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// One line of the transaction sheet, before conversion.
///
/// Field names follow the sheet headers. Columns not listed here are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "DATE", default)]
    pub date: Option<Cell>,
    #[serde(rename = "CUSTOMER", default)]
    pub customer: Option<Cell>,
    #[serde(rename = "ITEM", default)]
    pub item: Option<Cell>,
    #[serde(rename = "SUPPLIER", default)]
    pub supplier: Option<Cell>,
    #[serde(rename = "PRICE", default)]
    pub price: Option<Cell>,
    #[serde(rename = "QTY", default)]
    pub qty: Option<Cell>,
    #[serde(rename = "TOTAL", default)]
    pub total: Option<Cell>,
    #[serde(rename = "RealSUp", default)]
    pub category: Option<Cell>,
}

impl RawRow {
    /// Convert into a typed row. Bad numeric cells become zero.
    pub fn into_row(self) -> TransactionRow {
        let customer = text(&self.customer);
        TransactionRow {
            price: number(&self.price, "PRICE", &customer),
            qty: number(&self.qty, "QTY", &customer),
            total: number(&self.total, "TOTAL", &customer),
            date: text(&self.date),
            item: text(&self.item),
            supplier: text(&self.supplier),
            category: text(&self.category),
            customer,
        }
    }
}

fn text(cell: &Option<Cell>) -> String {
    cell.as_ref().map(Cell::to_text).unwrap_or_default()
}

fn number(cell: &Option<Cell>, column: &str, customer: &str) -> Decimal {
    match cell {
        None => Decimal::ZERO,
        Some(c) => c.to_decimal().unwrap_or_else(|| {
            warn!(column, customer, value = %c.to_text(), "unreadable numeric cell, using 0");
            Decimal::ZERO
        }),
    }
}

/// Turns raw sheet rows into transaction rows ready for aggregation.
#[derive(Debug, Clone, Default)]
pub struct RowNormalizer {
    year: Option<i32>,
}

impl RowNormalizer {
    /// Leave date stamps untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `year` to every date stamp ("12 Jan" becomes "12 Jan 2024").
    pub fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }

    /// Append the current local year to every date stamp.
    pub fn with_current_year() -> Self {
        Self::with_year(Local::now().year())
    }

    /// Convert rows, dropping those with a blank customer.
    pub fn normalize(&self, rows: impl IntoIterator<Item = RawRow>) -> Vec<TransactionRow> {
        rows.into_iter()
            .map(RawRow::into_row)
            .filter(|row| !row.has_blank_customer())
            .map(|mut row| {
                if let Some(year) = self.year {
                    row.date = format!("{} {year}", row.date);
                }
                row
            })
            .collect()
    }
}
