use std::collections::BTreeMap;

use tracing::debug;

use super::classify::{RowKind, Sentinels};
use super::types::{AdjustmentEntry, InvoiceLineItem, InvoiceRecord, TransactionRow};

/// Customer name → invoice record.
pub type InvoiceMap = BTreeMap<String, InvoiceRecord>;

/// Group transaction rows into one invoice record per customer, using the
/// default sentinels.
///
/// Rows with a blank customer are skipped. Nothing is validated: amounts are
/// summed exactly as they appear in the rows.
pub fn build_invoices(rows: &[TransactionRow]) -> InvoiceMap {
    build_invoices_with(rows, &Sentinels::default())
}

/// Same as [`build_invoices`] with explicit sentinels.
pub fn build_invoices_with(rows: &[TransactionRow], sentinels: &Sentinels) -> InvoiceMap {
    let mut invoices = InvoiceMap::new();
    let mut skipped = 0usize;

    for row in rows {
        if row.has_blank_customer() {
            skipped += 1;
            continue;
        }

        let record = invoices
            .entry(row.customer.clone())
            .or_insert_with(|| InvoiceRecord::new(row.customer.clone(), row.date.clone()));

        match sentinels.classify(row) {
            RowKind::DeliveryFee => record
                .delivery_fees
                .push(AdjustmentEntry::new(row.item.clone(), row.total)),
            RowKind::Discount => record
                .discounts
                .push(AdjustmentEntry::new(row.item.clone(), row.total)),
            RowKind::AdditionalFee => record
                .additional_fees
                .push(AdjustmentEntry::new(row.item.clone(), row.total)),
            RowKind::LineItem => record
                .items
                .entry(row.supplier.clone())
                .or_default()
                .push(InvoiceLineItem {
                    name: row.item.clone(),
                    price: row.price,
                    qty: row.qty,
                    total: row.total,
                    supplier: row.category.clone(),
                }),
        }
    }

    debug!(
        rows = rows.len(),
        skipped,
        customers = invoices.len(),
        "aggregated transaction rows"
    );
    invoices
}

/// Customer names present in `invoices`, in map order (alphabetical).
pub fn list_customers(invoices: &InvoiceMap) -> Vec<String> {
    invoices.keys().cloned().collect()
}

/// Drop rows whose customer cell is blank.
pub fn filter_blank_rows(rows: impl IntoIterator<Item = TransactionRow>) -> Vec<TransactionRow> {
    rows.into_iter()
        .filter(|row| !row.has_blank_customer())
        .collect()
}
