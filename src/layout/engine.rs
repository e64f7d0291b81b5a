//! Invoice layout.
//!
//! A document is built in phases: header, item table, subtotal, adjustment
//! sections, grand total. Combined documents share one header and repeat the
//! remaining phases per customer before closing with the combined total.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, instrument};

use super::context::{Column, LayoutContext, TableColumns};
use super::style::{Align, RuleWeight, TextStyle};
use super::surface::Surface;
use crate::core::{
    AdjustmentEntry, BatchPlan, BillingError, BillingResult, CurrencyFormat, CurrencyFormatter,
    DocumentJob, DocumentSink, InvoiceConfig, InvoiceMap, InvoiceRecord, combined_total,
};

const BRAND_SIZE: f64 = 30.0;
const TITLE_SIZE: f64 = 25.0;
const ADDRESS_SIZE: f64 = 15.0;
const BODY_SIZE: f64 = 12.0;
const BANNER_SIZE: f64 = 14.0;
const GRAND_TOTAL_SIZE: f64 = 16.0;
const COMBINED_TOTAL_SIZE: f64 = 20.0;
const PANEL_PADDING: f64 = 8.0;
const DIVIDER_HEIGHT: f64 = 6.0;
const SECTION_GAP: f64 = 10.0;

/// Lays out invoice records on a [`Surface`].
///
/// ```
/// use billsheet::core::*;
/// use billsheet::layout::{InvoiceRenderer, RecordingSurface};
/// use rust_decimal_macros::dec;
///
/// let rows = vec![RowBuilder::item("Alice", "Fish", "Salmon", dec!(5000), dec!(2)).build()];
/// let invoices = build_invoices(&rows);
///
/// let renderer = InvoiceRenderer::new(InvoiceConfig::default());
/// let doc = renderer.render_single(RecordingSurface::new(), &invoices["Alice"]).unwrap();
/// assert!(doc.texts().contains(&"Rp 10.000"));
/// ```
pub struct InvoiceRenderer<F = CurrencyFormat> {
    config: InvoiceConfig,
    formatter: F,
}

impl InvoiceRenderer<CurrencyFormat> {
    /// Renderer formatting amounts with `config.currency`.
    pub fn new(config: InvoiceConfig) -> Self {
        let formatter = config.currency.clone();
        InvoiceRenderer { config, formatter }
    }
}

impl Default for InvoiceRenderer<CurrencyFormat> {
    fn default() -> Self {
        Self::new(InvoiceConfig::default())
    }
}

impl<F: CurrencyFormatter> InvoiceRenderer<F> {
    /// Renderer with a custom amount formatter; `config.currency` is ignored.
    pub fn with_formatter(config: InvoiceConfig, formatter: F) -> Self {
        InvoiceRenderer { config, formatter }
    }

    pub fn config(&self) -> &InvoiceConfig {
        &self.config
    }

    /// One customer's invoice.
    #[instrument(skip_all, fields(customer = %record.name))]
    pub fn render_single<S: Surface>(
        &self,
        surface: S,
        record: &InvoiceRecord,
    ) -> BillingResult<S::Document> {
        let mut ctx = LayoutContext::new(surface, self.config.page);
        self.header(&mut ctx, &record.name, &record.date, record.grand_total());
        self.body(
            &mut ctx,
            record,
            &self.config.labels.subtotal,
            &self.config.labels.grand_total,
        );
        ctx.finish()
    }

    /// Several customers billed together, addressed to `destination`.
    ///
    /// Fails before drawing anything when `records` is empty.
    #[instrument(skip_all, fields(destination = %destination, customers = records.len()))]
    pub fn render_combined<S: Surface>(
        &self,
        surface: S,
        destination: &str,
        period: &str,
        records: &[&InvoiceRecord],
    ) -> BillingResult<S::Document> {
        if records.is_empty() {
            return Err(BillingError::EmptyCombination);
        }
        let labels = &self.config.labels;
        let total = combined_total(records.iter().copied());

        let mut ctx = LayoutContext::new(surface, self.config.page);
        self.header(&mut ctx, destination, period, total);

        for record in records {
            ctx.advance_by(SECTION_GAP);
            ctx.with_style(TextStyle::bold(BANNER_SIZE), |c| {
                let banner = format!("{}: {}", labels.billing, record.name);
                let full = c.full_width();
                c.ensure_room(3.0 * c.line_height());
                c.write_row(&[(banner.as_str(), full, Align::Left)]);
            });
            self.body(
                &mut ctx,
                record,
                &format!("{} {}", labels.subtotal, record.name),
                &format!("{} {}", labels.total, record.name),
            );
            ctx.advance_by(SECTION_GAP);
            ctx.fill_band(DIVIDER_HEIGHT, self.config.brand.divider_color);
        }

        ctx.advance_by(SECTION_GAP);
        ctx.with_style(TextStyle::bold(COMBINED_TOTAL_SIZE), |c| {
            let text = format!("{}: {}", labels.combined_total, self.money(total));
            let full = c.full_width();
            c.write_row(&[(text.as_str(), full, Align::Center)]);
        });
        ctx.rule_double();
        ctx.finish()
    }

    /// Render every job of `plan` and hand each document to `sink`.
    ///
    /// `new_surface` supplies a fresh surface per document. Returns the number
    /// of documents written; stops at the first failure.
    pub fn run_batch<S, N, K>(
        &self,
        plan: &BatchPlan,
        invoices: &InvoiceMap,
        mut new_surface: N,
        sink: &mut K,
    ) -> BillingResult<usize>
    where
        S: Surface,
        N: FnMut() -> S,
        K: DocumentSink<S::Document>,
    {
        let lookup = |name: &String| {
            invoices
                .get(name)
                .ok_or_else(|| BillingError::UnknownCustomer(name.clone()))
        };

        let mut written = 0;
        for job in plan.jobs() {
            let document = match job {
                DocumentJob::Single { customer } => {
                    self.render_single(new_surface(), lookup(customer)?)?
                }
                DocumentJob::Combined {
                    destination,
                    period,
                    customers,
                } => {
                    let records = customers
                        .iter()
                        .map(lookup)
                        .collect::<BillingResult<Vec<_>>>()?;
                    self.render_combined(new_surface(), destination, period, &records)?
                }
            };
            sink.accept(&job.document_name(invoices), document)?;
            written += 1;
        }

        info!(documents = written, "invoice batch written");
        Ok(written)
    }

    fn money(&self, amount: Decimal) -> String {
        self.formatter.format(amount)
    }

    fn header<S: Surface>(
        &self,
        ctx: &mut LayoutContext<S>,
        customer: &str,
        period: &str,
        amount_due: Decimal,
    ) {
        let brand = &self.config.brand;
        let labels = &self.config.labels;
        let full = ctx.full_width();
        let left = ctx.left_half();
        let right = ctx.right_half();

        ctx.with_style(TextStyle::bold(BRAND_SIZE).with_color(brand.color), |c| {
            c.write_row(&[(brand.name.as_str(), full, Align::Left)]);
        });
        ctx.advance_line(1.0);

        ctx.with_style(TextStyle::bold(TITLE_SIZE), |c| {
            c.write_row(&[(labels.invoice.as_str(), left, Align::Left)]);
        });

        ctx.with_style(TextStyle::regular(ADDRESS_SIZE), |c| {
            let top = c.cursor_y();
            let to = format!("{}: {customer}", labels.to);
            let period = format!("{}: {period}", labels.period);
            c.write_row(&[(to.as_str(), left, Align::Left)]);
            c.write_row(&[(period.as_str(), left, Align::Left)]);
            let left_bottom = c.cursor_y();

            c.set_cursor_y(top);
            for line in brand.payment_instructions.lines() {
                c.write_row(&[(line, right, Align::Right)]);
            }
            let bottom = left_bottom.max(c.cursor_y());
            c.set_cursor_y(bottom);
        });
        ctx.advance_by(SECTION_GAP);

        let panel_style = TextStyle::bold(GRAND_TOTAL_SIZE);
        let panel_height = panel_style.line_height() + 2.0 * PANEL_PADDING;
        ctx.ensure_room(panel_height);
        ctx.fill_column(full, panel_height, brand.panel_color);
        ctx.advance_by(PANEL_PADDING);
        ctx.with_style(panel_style, |c| {
            let inner = Column::new(full.x + PANEL_PADDING, full.width - 2.0 * PANEL_PADDING);
            let due = self.money(amount_due);
            c.write_row(&[
                (labels.amount_due.as_str(), inner, Align::Left),
                (due.as_str(), inner, Align::Right),
            ]);
        });
        ctx.advance_by(PANEL_PADDING);

        ctx.rule_horizontal(RuleWeight::Heavy);
    }

    /// Table, subtotal, adjustments and grand total for one record.
    fn body<S: Surface>(
        &self,
        ctx: &mut LayoutContext<S>,
        record: &InvoiceRecord,
        subtotal_label: &str,
        grand_total_label: &str,
    ) {
        let labels = &self.config.labels;
        let cols = ctx.columns();
        let saved = ctx.style();
        ctx.set_style(TextStyle::regular(BODY_SIZE));

        self.item_table(ctx, record, &cols);

        ctx.rule_horizontal(RuleWeight::Light);
        ctx.with_style(TextStyle::bold(BODY_SIZE), |c| {
            let subtotal = self.money(record.subtotal());
            c.write_row(&[
                (subtotal_label, cols.label(), Align::Left),
                (subtotal.as_str(), cols.amount, Align::Right),
            ]);
        });

        let sections: [(&str, &[AdjustmentEntry]); 3] = [
            (labels.delivery_fees.as_str(), record.delivery_fees.as_slice()),
            (labels.additional_fees.as_str(), record.additional_fees.as_slice()),
            (labels.discounts.as_str(), record.discounts.as_slice()),
        ];
        for (label, entries) in sections {
            self.adjustment_section(ctx, label, entries, &cols);
        }

        ctx.rule_horizontal(RuleWeight::Heavy);
        ctx.with_style(TextStyle::bold(GRAND_TOTAL_SIZE), |c| {
            let total = self.money(record.grand_total());
            c.write_row(&[
                (grand_total_label, cols.label(), Align::Left),
                (total.as_str(), cols.amount, Align::Right),
            ]);
        });

        ctx.set_style(saved);
    }

    fn item_table<S: Surface>(
        &self,
        ctx: &mut LayoutContext<S>,
        record: &InvoiceRecord,
        cols: &TableColumns,
    ) {
        let labels = &self.config.labels;
        let bold = TextStyle::bold(BODY_SIZE);

        ctx.with_style(bold, |c| {
            c.ensure_room(2.0 * c.line_height());
            c.write_row(&[
                (labels.item.as_str(), cols.item, Align::Left),
                (labels.price.as_str(), cols.price, Align::Right),
                (labels.qty.as_str(), cols.qty, Align::Center),
                (labels.amount.as_str(), cols.amount, Align::Right),
            ]);
        });

        for (label, items) in &record.items {
            if self.config.table.shows_label(label) {
                ctx.with_style(bold, |c| {
                    c.ensure_room(2.0 * c.line_height());
                    c.write_row(&[(label.as_str(), cols.label(), Align::Left)]);
                });
            }
            for item in items {
                let price = self.money(item.price);
                let qty = quantity_text(item.qty);
                let total = self.money(item.total);
                ctx.write_row(&[
                    (item.name.as_str(), cols.item, Align::Left),
                    (price.as_str(), cols.price, Align::Right),
                    (qty.as_str(), cols.qty, Align::Center),
                    (total.as_str(), cols.amount, Align::Right),
                ]);
            }
        }
    }

    fn adjustment_section<S: Surface>(
        &self,
        ctx: &mut LayoutContext<S>,
        label: &str,
        entries: &[AdjustmentEntry],
        cols: &TableColumns,
    ) {
        if entries.is_empty() {
            return;
        }
        ctx.advance_line(0.5);
        ctx.with_style(TextStyle::bold(BODY_SIZE), |c| {
            c.ensure_room(2.0 * c.line_height());
            c.write_row(&[(label, cols.label(), Align::Left)]);
        });
        for entry in entries {
            let amount = self.money(entry.amount);
            ctx.write_row(&[
                (entry.note.as_str(), cols.label(), Align::Left),
                (amount.as_str(), cols.amount, Align::Right),
            ]);
        }
    }
}

/// Quantity as a whole number.
fn quantity_text(qty: Decimal) -> String {
    let whole = qty.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if whole.is_zero() {
        "0".to_string()
    } else {
        whole.normalize().to_string()
    }
}
