use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One line of the transaction sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Billing-period stamp as written in the sheet (e.g. "12 Jan 2024").
    pub date: String,
    /// Customer the row is billed to. Blank rows are dropped.
    pub customer: String,
    /// Item description, or the note of a fee/discount row.
    pub item: String,
    /// Supplier label; also carries the delivery-fee sentinel.
    pub supplier: String,
    /// Unit price.
    pub price: Decimal,
    /// Quantity.
    pub qty: Decimal,
    /// Line total as computed in the sheet.
    pub total: Decimal,
    /// Category tag ("real supplier"): the actual supplier for goods, or a
    /// sentinel marking discount and additional-fee rows.
    pub category: String,
}

impl TransactionRow {
    /// True when the customer cell is empty or whitespace.
    pub fn has_blank_customer(&self) -> bool {
        self.customer.trim().is_empty()
    }
}

/// An ordinary goods line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub name: String,
    pub price: Decimal,
    pub qty: Decimal,
    pub total: Decimal,
    /// Category tag of the originating row.
    pub supplier: String,
}

/// A delivery fee, additional fee or discount.
///
/// Amounts are kept with whatever sign the sheet used; nothing is negated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    pub note: String,
    pub amount: Decimal,
}

impl AdjustmentEntry {
    pub fn new(note: impl Into<String>, amount: Decimal) -> Self {
        Self {
            note: note.into(),
            amount,
        }
    }
}

/// Everything billed to one customer.
///
/// Records are built by the aggregator and are read-only afterwards. Totals
/// are derived on demand rather than stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Customer name.
    pub name: String,
    /// Billing-period stamp taken from the customer's first row.
    pub date: String,
    /// Line items grouped by supplier label. Iteration is alphabetical by
    /// label; within a group, items keep row order.
    pub items: BTreeMap<String, Vec<InvoiceLineItem>>,
    pub delivery_fees: Vec<AdjustmentEntry>,
    pub additional_fees: Vec<AdjustmentEntry>,
    pub discounts: Vec<AdjustmentEntry>,
}

impl InvoiceRecord {
    /// An empty record for `name`.
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            items: BTreeMap::new(),
            delivery_fees: Vec::new(),
            additional_fees: Vec::new(),
            discounts: Vec::new(),
        }
    }

    /// All line items across supplier groups, in group order.
    pub fn flattened_items(&self) -> impl Iterator<Item = &InvoiceLineItem> {
        self.items.values().flatten()
    }

    /// Number of line items across all groups.
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Sum of all line-item totals.
    pub fn subtotal(&self) -> Decimal {
        clamped_sum(self.flattened_items().map(|item| item.total))
    }

    pub fn delivery_total(&self) -> Decimal {
        sum_amounts(&self.delivery_fees)
    }

    pub fn additional_total(&self) -> Decimal {
        sum_amounts(&self.additional_fees)
    }

    pub fn discount_total(&self) -> Decimal {
        sum_amounts(&self.discounts)
    }

    /// Subtotal plus every adjustment, each taken as stored.
    pub fn grand_total(&self) -> Decimal {
        clamped_sum([
            self.subtotal(),
            self.delivery_total(),
            self.additional_total(),
            self.discount_total(),
        ])
    }

    /// Number of source rows folded into this record.
    pub fn row_count(&self) -> usize {
        self.item_count()
            + self.delivery_fees.len()
            + self.additional_fees.len()
            + self.discounts.len()
    }
}

fn sum_amounts(entries: &[AdjustmentEntry]) -> Decimal {
    clamped_sum(entries.iter().map(|entry| entry.amount))
}

/// Sum that stops at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
///
/// Sheet amounts are not validated, so a running total can leave the
/// representable range. Once it does, it stays pinned at the bound.
pub fn clamped_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut overflowed = false;
    for amount in amounts {
        total = match total.checked_add(amount) {
            Some(sum) if !overflowed => sum,
            _ => {
                overflowed = true;
                if total.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            }
        };
    }
    if overflowed {
        warn!(total = %total, "amount total out of range, clamped");
    }
    total
}

/// Sum of the grand totals of several records.
pub fn combined_total<'a>(records: impl IntoIterator<Item = &'a InvoiceRecord>) -> Decimal {
    clamped_sum(records.into_iter().map(InvoiceRecord::grand_total))
}
