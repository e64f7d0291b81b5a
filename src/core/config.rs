use std::path::Path;

use serde::{Deserialize, Serialize};

use super::aggregate::{InvoiceMap, build_invoices_with};
use super::classify::Sentinels;
use super::currency::CurrencyFormat;
use super::error::{BillingError, BillingResult};
use super::types::TransactionRow;
use crate::layout::{Color, PageSetup};

/// Everything that shapes how rows are read and invoices are drawn.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```
/// use billsheet::core::InvoiceConfig;
///
/// let config = InvoiceConfig::from_toml_str(r#"
///     [brand]
///     name = "GREEN GROCER"
///
///     [currency]
///     symbol = "IDR"
/// "#).unwrap();
/// assert_eq!(config.brand.name, "GREEN GROCER");
/// assert_eq!(config.currency.thousands_separator, ".");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Applied by [`InvoiceConfig::build_invoices`].
    pub sentinels: Sentinels,
    pub currency: CurrencyFormat,
    pub labels: Labels,
    pub brand: Brand,
    pub page: PageSetup,
    pub table: TableOptions,
}

impl InvoiceConfig {
    pub fn from_toml_str(source: &str) -> BillingResult<Self> {
        toml::from_str(source).map_err(|e| BillingError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> BillingResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Group rows into invoice records using this config's sentinels.
    pub fn build_invoices(&self, rows: &[TransactionRow]) -> InvoiceMap {
        build_invoices_with(rows, &self.sentinels)
    }
}

/// Seller branding shown in the header block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub name: String,
    pub color: Color,
    /// Shown right-aligned next to the customer block. Empty hides it.
    pub payment_instructions: String,
    /// Background of the amount-due panel.
    pub panel_color: Color,
    /// Band drawn between customers in a combined invoice.
    pub divider_color: Color,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "RUMAH SEHAT".into(),
            color: Color::from_hex(0x61E03A),
            payment_instructions: String::new(),
            panel_color: Color::from_hex(0xEEF9EA),
            divider_color: Color::from_hex(0x61E03A),
        }
    }
}

/// Table behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Supplier groups whose label starts with this prefix are grouped under
    /// a parent and get no label row of their own. Empty disables hiding.
    pub hidden_group_prefix: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            hidden_group_prefix: "_".into(),
        }
    }
}

impl TableOptions {
    pub fn shows_label(&self, label: &str) -> bool {
        self.hidden_group_prefix.is_empty() || !label.starts_with(&self.hidden_group_prefix)
    }
}

/// Every piece of fixed text drawn on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub invoice: String,
    pub to: String,
    pub period: String,
    pub amount_due: String,
    pub item: String,
    pub price: String,
    pub qty: String,
    pub amount: String,
    pub subtotal: String,
    pub delivery_fees: String,
    pub additional_fees: String,
    pub discounts: String,
    pub grand_total: String,
    /// Prefix of the per-customer banner in combined invoices.
    pub billing: String,
    /// Prefix of the per-customer total in combined invoices.
    pub total: String,
    pub combined_total: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            invoice: "INVOICE".into(),
            to: "To".into(),
            period: "Period".into(),
            amount_due: "Amount Due".into(),
            item: "Item".into(),
            price: "Price".into(),
            qty: "Qty".into(),
            amount: "Amount".into(),
            subtotal: "Subtotal".into(),
            delivery_fees: "Delivery Fees".into(),
            additional_fees: "Additional Fees".into(),
            discounts: "Discounts".into(),
            grand_total: "Grand Total".into(),
            billing: "Billing".into(),
            total: "Total".into(),
            combined_total: "Combined Total".into(),
        }
    }
}

impl Labels {
    /// Indonesian wording, as printed on the rupiah invoices.
    pub fn indonesian() -> Self {
        Self {
            invoice: "INVOICE".into(),
            to: "Kepada".into(),
            period: "Periode".into(),
            amount_due: "Jumlah Tagihan".into(),
            item: "Item".into(),
            price: "Harga".into(),
            qty: "Qty".into(),
            amount: "Jumlah".into(),
            subtotal: "Subtotal".into(),
            delivery_fees: "Ongkir".into(),
            additional_fees: "Penambahan".into(),
            discounts: "Pengurangan".into(),
            grand_total: "Total".into(),
            billing: "Tagihan".into(),
            total: "Total".into(),
            combined_total: "Total Gabungan".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AdjustmentEntry, RowBuilder};
    use rust_decimal::Decimal;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(InvoiceConfig::from_toml_str("").unwrap(), InvoiceConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = InvoiceConfig::from_toml_str(
            r##"
            [sentinels]
            delivery_supplier = "Shipping"

            [brand]
            color = "#102030"

            [page]
            margin_left = 36.0
            "##,
        )
        .unwrap();
        assert_eq!(config.sentinels.delivery_supplier, "Shipping");
        assert_eq!(config.sentinels.discount_tag, "Pengurangan");
        assert_eq!(config.brand.color, Color::from_hex(0x102030));
        assert_eq!(config.page.margin_left, 36.0);
        assert_eq!(config.page.margin_right, 72.0);
    }

    #[test]
    fn configured_sentinels_drive_aggregation() {
        let config =
            InvoiceConfig::from_toml_str("[sentinels]\ndelivery_supplier = \"Shipping\"").unwrap();
        let rows = [
            RowBuilder::new("Alice")
                .item_name("Courier")
                .supplier("Shipping")
                .total(Decimal::from(9))
                .build(),
            RowBuilder::new("Alice")
                .item_name("Courier")
                .supplier("Ongkir")
                .category("Fish")
                .total(Decimal::from(4))
                .build(),
        ];

        let invoices = config.build_invoices(&rows);
        let alice = &invoices["Alice"];
        assert_eq!(alice.delivery_fees, vec![AdjustmentEntry::new("Courier", Decimal::from(9))]);
        assert_eq!(alice.items["Ongkir"][0].total, Decimal::from(4));
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = InvoiceConfig::from_toml_str("[brand\nname = 1").unwrap_err();
        assert!(matches!(err, BillingError::Config(_)));
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = InvoiceConfig::from_toml_str("[brand]\ncolor = \"green\"").unwrap_err();
        assert!(matches!(err, BillingError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = InvoiceConfig::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, BillingError::Io(_)));
    }

    #[test]
    fn hidden_group_prefix() {
        let table = TableOptions::default();
        assert!(table.shows_label("Fish"));
        assert!(!table.shows_label("_Fish"));
        let all = TableOptions {
            hidden_group_prefix: String::new(),
        };
        assert!(all.shows_label("_Fish"));
    }
}
