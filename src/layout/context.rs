use tracing::debug;

use super::metrics::{clip_to_width, text_width};
use super::style::{Align, Color, PageSetup, RuleWeight, TextStyle};
use super::surface::Surface;
use crate::core::BillingResult;

/// Space kept above and below a horizontal rule, in points.
const RULE_GAP: f64 = 6.0;

/// A horizontal slot on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f64,
    pub width: f64,
}

impl Column {
    pub fn new(x: f64, width: f64) -> Self {
        Column { x, width }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The slot from the left edge of `self` to the right edge of `other`.
    pub fn span_to(&self, other: Column) -> Column {
        Column::new(self.x, other.right() - self.x)
    }
}

/// The four invoice table columns: 40% / 20% / 20% / remainder of the usable
/// width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableColumns {
    pub item: Column,
    pub price: Column,
    pub qty: Column,
    pub amount: Column,
}

impl TableColumns {
    pub fn for_page(setup: &PageSetup) -> Self {
        let usable = setup.usable_width();
        let item = Column::new(setup.content_left(), usable * 0.4);
        let price = Column::new(item.right(), usable * 0.2);
        let qty = Column::new(price.right(), usable * 0.2);
        let amount = Column::new(qty.right(), setup.content_right() - qty.right());
        TableColumns {
            item,
            price,
            qty,
            amount,
        }
    }

    /// Item, price and quantity columns together; where notes and labels of
    /// summary rows go.
    pub fn label(&self) -> Column {
        self.item.span_to(self.qty)
    }
}

/// Cursor-driven writer over a [`Surface`].
///
/// Holds the vertical cursor, the current text style and the page geometry.
/// Writing a cell never moves the cursor; [`advance_line`](Self::advance_line)
/// does. Blocks that would cross the bottom margin start a new page first.
/// [`finish`](Self::finish) consumes the context, so a sealed document
/// cannot be written to.
pub struct LayoutContext<S: Surface> {
    surface: S,
    setup: PageSetup,
    y: f64,
    style: TextStyle,
    pages: usize,
}

impl<S: Surface> LayoutContext<S> {
    /// Start a document on `surface` with its first page open.
    pub fn new(mut surface: S, setup: PageSetup) -> Self {
        surface.begin_page(&setup);
        LayoutContext {
            surface,
            y: setup.margin_top,
            setup,
            style: TextStyle::default(),
            pages: 1,
        }
    }

    pub fn page_setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn cursor_y(&self) -> f64 {
        self.y
    }

    pub fn set_cursor_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    /// Run `f` with `style` applied, then restore the previous style.
    pub fn with_style<R>(&mut self, style: TextStyle, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.style;
        self.style = style;
        let out = f(self);
        self.style = saved;
        out
    }

    pub fn line_height(&self) -> f64 {
        self.style.line_height()
    }

    pub fn columns(&self) -> TableColumns {
        TableColumns::for_page(&self.setup)
    }

    /// The whole usable width.
    pub fn full_width(&self) -> Column {
        Column::new(self.setup.content_left(), self.setup.usable_width())
    }

    pub fn left_half(&self) -> Column {
        let full = self.full_width();
        Column::new(full.x, full.width / 2.0)
    }

    pub fn right_half(&self) -> Column {
        let full = self.full_width();
        Column::new(full.x + full.width / 2.0, full.width / 2.0)
    }

    /// Draw `text` in `column` at the cursor, clipped to the column width.
    /// The cursor does not move.
    pub fn write_cell(&mut self, text: &str, column: Column, align: Align) {
        let text = clip_to_width(text, &self.style, column.width);
        if text.is_empty() {
            return;
        }
        let width = text_width(text, &self.style);
        let x = match align {
            Align::Left => column.x,
            Align::Center => column.x + (column.width - width) / 2.0,
            Align::Right => column.right() - width,
        };
        self.surface.draw_text(text, x, self.y, &self.style);
    }

    /// Draw `text` across the columns from `first` to `last`. The cursor does
    /// not move.
    pub fn write_span(&mut self, text: &str, first: Column, last: Column, align: Align) {
        self.write_cell(text, first.span_to(last), align);
    }

    /// Write one row of cells and move to the next line, breaking the page
    /// first if the row would not fit.
    pub fn write_row(&mut self, cells: &[(&str, Column, Align)]) {
        self.ensure_room(self.line_height());
        for (text, column, align) in cells {
            self.write_cell(text, *column, *align);
        }
        self.advance_line(1.0);
    }

    /// Move the cursor down by `lines` lines of the current style.
    pub fn advance_line(&mut self, lines: f64) {
        self.y += lines * self.line_height();
    }

    /// Move the cursor by `dy` points (negative moves up).
    pub fn advance_by(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Start a new page unless `height` points still fit above the bottom
    /// margin.
    pub fn ensure_room(&mut self, height: f64) {
        if self.y + height > self.setup.content_bottom() && self.y > self.setup.margin_top {
            self.new_page();
        }
    }

    pub fn new_page(&mut self) {
        self.surface.begin_page(&self.setup);
        self.pages += 1;
        self.y = self.setup.margin_top;
        debug!(page = self.pages, "page break");
    }

    /// Full-width horizontal rule with a small gap above and below.
    pub fn rule_horizontal(&mut self, weight: RuleWeight) {
        let width = weight.line_width();
        self.ensure_room(2.0 * RULE_GAP + width);
        self.y += RULE_GAP + width / 2.0;
        let full = self.full_width();
        self.surface
            .draw_line((full.x, self.y), (full.right(), self.y), width, Color::BLACK);
        self.y += width / 2.0 + RULE_GAP;
    }

    /// Two light rules close together, closing a document.
    pub fn rule_double(&mut self) {
        let width = RuleWeight::Light.line_width();
        self.ensure_room(2.0 * RULE_GAP + 4.0 * width);
        self.y += RULE_GAP;
        let full = self.full_width();
        for _ in 0..2 {
            self.surface
                .draw_line((full.x, self.y), (full.right(), self.y), width, Color::BLACK);
            self.y += 3.0 * width;
        }
        self.y += RULE_GAP;
    }

    /// Full-width filled band of `height` points; the cursor moves below it.
    pub fn fill_band(&mut self, height: f64, color: Color) {
        self.ensure_room(height);
        let full = self.full_width();
        self.surface
            .fill_rect(full.x, self.y, full.width, height, color);
        self.y += height;
    }

    /// Filled rectangle over `column` starting at the cursor. The cursor does
    /// not move.
    pub fn fill_column(&mut self, column: Column, height: f64, color: Color) {
        self.surface
            .fill_rect(column.x, self.y, column.width, height, color);
    }

    /// Seal the document.
    pub fn finish(self) -> BillingResult<S::Document> {
        debug!(pages = self.pages, "document finished");
        self.surface.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DrawOp, RecordingSurface};

    fn ctx() -> LayoutContext<RecordingSurface> {
        LayoutContext::new(RecordingSurface::new(), PageSetup::default())
    }

    #[test]
    fn columns_split_forty_twenty_twenty_twenty() {
        let cols = TableColumns::for_page(&PageSetup::default());
        assert_eq!(cols.item.x, 72.0);
        assert!((cols.item.width - 187.2).abs() < 1e-9);
        assert!((cols.price.width - 93.6).abs() < 1e-9);
        assert!((cols.qty.width - 93.6).abs() < 1e-9);
        assert!((cols.amount.width - 93.6).abs() < 1e-9);
        assert!((cols.amount.right() - 540.0).abs() < 1e-9);
        assert!((cols.label().right() - cols.qty.right()).abs() < 1e-9);
    }

    #[test]
    fn alignment_inside_a_column() {
        let mut ctx = ctx();
        ctx.set_style(TextStyle::regular(10.0));
        let col = Column::new(100.0, 100.0);
        ctx.write_cell("00", col, Align::Left);
        ctx.write_cell("00", col, Align::Right);
        ctx.write_cell("00", col, Align::Center);
        let doc = ctx.finish().unwrap();
        let xs: Vec<f64> = doc.placed_texts().map(|t| t.x).collect();
        assert!((xs[0] - 100.0).abs() < 1e-9);
        assert!((xs[1] - 188.88).abs() < 1e-9);
        assert!((xs[2] - 144.44).abs() < 1e-9);
    }

    #[test]
    fn write_cell_keeps_cursor_and_clips() {
        let mut ctx = ctx();
        ctx.set_style(TextStyle::regular(10.0));
        let y = ctx.cursor_y();
        ctx.write_cell("0000", Column::new(0.0, 11.2), Align::Left);
        assert_eq!(ctx.cursor_y(), y);
        let doc = ctx.finish().unwrap();
        assert_eq!(doc.texts(), vec!["00"]);
    }

    #[test]
    fn span_covers_several_columns() {
        let mut ctx = ctx();
        ctx.set_style(TextStyle::regular(10.0));
        let cols = ctx.columns();
        ctx.write_span("00", cols.price, cols.amount, Align::Right);
        let doc = ctx.finish().unwrap();
        let placed = doc.find_text("00").unwrap();
        assert!((placed.x - (540.0 - 11.12)).abs() < 1e-9);
    }

    #[test]
    fn rows_advance_one_line() {
        let mut ctx = ctx();
        ctx.set_style(TextStyle::regular(10.0));
        let start = ctx.cursor_y();
        let col = ctx.full_width();
        ctx.write_row(&[("a", col, Align::Left)]);
        assert!((ctx.cursor_y() - start - 12.0).abs() < 1e-9);
    }

    #[test]
    fn with_style_restores() {
        let mut ctx = ctx();
        let before = ctx.style();
        let size = ctx.with_style(TextStyle::bold(20.0), |c| c.style().size);
        assert_eq!(size, 20.0);
        assert_eq!(ctx.style(), before);
    }

    #[test]
    fn overflowing_rows_start_a_new_page() {
        let mut ctx = ctx();
        ctx.set_style(TextStyle::regular(10.0));
        let col = ctx.full_width();
        // 648pt of content height at 12pt per row fits 54 rows.
        for _ in 0..60 {
            ctx.write_row(&[("row", col, Align::Left)]);
        }
        assert_eq!(ctx.page_count(), 2);
        let doc = ctx.finish().unwrap();
        assert_eq!(doc.pages[0].ops.len(), 54);
        assert_eq!(doc.pages[1].ops.len(), 6);
        match &doc.pages[1].ops[0] {
            DrawOp::Text { y, .. } => assert_eq!(*y, 72.0),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn rule_spans_content_width() {
        let mut ctx = ctx();
        ctx.rule_horizontal(RuleWeight::Heavy);
        let doc = ctx.finish().unwrap();
        match &doc.pages[0].ops[0] {
            DrawOp::Line { from, to, width, .. } => {
                assert_eq!(from.0, 72.0);
                assert_eq!(to.0, 540.0);
                assert_eq!(*width, 3.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}
