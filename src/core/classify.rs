//! Row classification.
//!
//! Every transaction row lands in exactly one bucket of its customer's
//! invoice. Which bucket is decided by two fields compared against sentinel
//! values, checked in a fixed order (see [`RULES`]).

use serde::{Deserialize, Serialize};

use super::types::TransactionRow;

/// The bucket a row is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    DeliveryFee,
    Discount,
    AdditionalFee,
    LineItem,
}

/// Sentinel values marking fee and discount rows.
///
/// The defaults are the tags used in the Indonesian transaction sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentinels {
    /// Supplier label of delivery-fee rows.
    pub delivery_supplier: String,
    /// Category tag of discount rows.
    pub discount_tag: String,
    /// Category tag of additional-fee rows.
    pub additional_fee_tag: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            delivery_supplier: "Ongkir".into(),
            discount_tag: "Pengurangan".into(),
            additional_fee_tag: "Penambahan".into(),
        }
    }
}

type Rule = (RowKind, fn(&Sentinels, &TransactionRow) -> bool);

/// Classification rules in precedence order. The first match wins; rows
/// matching none are line items.
pub const RULES: &[Rule] = &[
    (RowKind::DeliveryFee, |s, row| row.supplier == s.delivery_supplier),
    (RowKind::Discount, |s, row| row.category == s.discount_tag),
    (RowKind::AdditionalFee, |s, row| row.category == s.additional_fee_tag),
];

impl Sentinels {
    /// Classify a row.
    pub fn classify(&self, row: &TransactionRow) -> RowKind {
        RULES
            .iter()
            .find(|(_, matches)| matches(self, row))
            .map(|(kind, _)| *kind)
            .unwrap_or(RowKind::LineItem)
    }
}
