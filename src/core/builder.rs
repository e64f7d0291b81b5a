use rust_decimal::Decimal;

use super::classify::Sentinels;
use super::types::TransactionRow;

/// Builder for transaction rows.
///
/// Mostly useful for tests and for callers that assemble rows from something
/// other than a sheet. The shortcut constructors tag rows with the default
/// [`Sentinels`].
///
/// ```
/// use billsheet::core::*;
/// use rust_decimal_macros::dec;
///
/// let rows = vec![
///     RowBuilder::delivery_fee("Alice", "Shipping", dec!(10)).build(),
///     RowBuilder::item("Alice", "Fish", "Salmon", dec!(5), dec!(2)).build(),
/// ];
/// let invoices = build_invoices(&rows);
/// assert_eq!(invoices["Alice"].grand_total(), dec!(20));
/// ```
#[derive(Debug, Clone)]
pub struct RowBuilder {
    date: String,
    customer: String,
    item: String,
    supplier: String,
    price: Decimal,
    qty: Decimal,
    total: Option<Decimal>,
    category: String,
}

impl RowBuilder {
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            date: String::new(),
            customer: customer.into(),
            item: String::new(),
            supplier: String::new(),
            price: Decimal::ZERO,
            qty: Decimal::ZERO,
            total: None,
            category: String::new(),
        }
    }

    /// An ordinary goods row. The category tag is the supplier and the total
    /// is `price * qty` unless overridden.
    pub fn item(
        customer: impl Into<String>,
        supplier: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        qty: Decimal,
    ) -> Self {
        let supplier = supplier.into();
        Self::new(customer)
            .item_name(name)
            .category(supplier.clone())
            .supplier(supplier)
            .price(price)
            .qty(qty)
    }

    /// A delivery-fee row.
    pub fn delivery_fee(customer: impl Into<String>, note: impl Into<String>, amount: Decimal) -> Self {
        Self::new(customer)
            .supplier(Sentinels::default().delivery_supplier)
            .item_name(note)
            .total(amount)
    }

    /// A discount row.
    pub fn discount(customer: impl Into<String>, note: impl Into<String>, amount: Decimal) -> Self {
        Self::new(customer)
            .category(Sentinels::default().discount_tag)
            .item_name(note)
            .total(amount)
    }

    /// An additional-fee row.
    pub fn additional_fee(
        customer: impl Into<String>,
        note: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self::new(customer)
            .category(Sentinels::default().additional_fee_tag)
            .item_name(note)
            .total(amount)
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn item_name(mut self, name: impl Into<String>) -> Self {
        self.item = name.into();
        self
    }

    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn category(mut self, tag: impl Into<String>) -> Self {
        self.category = tag.into();
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn qty(mut self, qty: Decimal) -> Self {
        self.qty = qty;
        self
    }

    /// Override the line total. Sheets sometimes carry totals that differ
    /// from `price * qty`; the stored total is what gets billed.
    pub fn total(mut self, total: Decimal) -> Self {
        self.total = Some(total);
        self
    }

    pub fn build(self) -> TransactionRow {
        TransactionRow {
            total: self.total.unwrap_or(self.price * self.qty),
            date: self.date,
            customer: self.customer,
            item: self.item,
            supplier: self.supplier,
            price: self.price,
            qty: self.qty,
            category: self.category,
        }
    }
}
