use billsheet::core::*;
use billsheet::layout::{
    self, DrawOp, InvoiceRenderer, RecordedDocument, RecordingSurface, TableColumns,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn alice() -> InvoiceRecord {
    let rows = vec![
        RowBuilder::delivery_fee("Alice", "Shipping", dec!(10000))
            .date("1 Jan 2024")
            .build(),
        RowBuilder::item("Alice", "Fish", "Salmon", dec!(5000), dec!(2))
            .date("1 Jan 2024")
            .build(),
    ];
    build_invoices(&rows).remove("Alice").unwrap()
}

fn record(name: &str, total: Decimal) -> InvoiceRecord {
    let row = RowBuilder::item(name, "Fish", "Salmon", total, dec!(1))
        .date("1 Jan 2024")
        .build();
    build_invoices(&[row]).remove(name).unwrap()
}

fn position(doc: &RecordedDocument, text: &str) -> usize {
    doc.texts()
        .iter()
        .position(|t| *t == text)
        .unwrap_or_else(|| panic!("{text:?} not drawn"))
}

// --- Single invoices ---

#[test]
fn single_invoice_text_stream() {
    let doc = layout::render_single(&alice()).unwrap();
    insta::assert_snapshot!(doc.texts().join("\n"), @r"
    RUMAH SEHAT
    INVOICE
    To: Alice
    Period: 1 Jan 2024
    Amount Due
    Rp 20.000
    Item
    Price
    Qty
    Amount
    Fish
    Salmon
    Rp 5.000
    2
    Rp 10.000
    Subtotal
    Rp 10.000
    Delivery Fees
    Shipping
    Rp 10.000
    Grand Total
    Rp 20.000
    ");
}

#[test]
fn phases_run_in_order() {
    let rows = vec![
        RowBuilder::item("Alice", "Fish", "Salmon", dec!(5000), dec!(2)).build(),
        RowBuilder::delivery_fee("Alice", "Courier", dec!(1000)).build(),
        RowBuilder::additional_fee("Alice", "Packaging", dec!(500)).build(),
        RowBuilder::discount("Alice", "Loyalty", dec!(-700)).build(),
    ];
    let doc = layout::render_single(&build_invoices(&rows)["Alice"]).unwrap();

    let order = [
        "INVOICE",
        "Item",
        "Salmon",
        "Subtotal",
        "Delivery Fees",
        "Courier",
        "Additional Fees",
        "Packaging",
        "Discounts",
        "Loyalty",
        "Grand Total",
    ];
    let positions: Vec<usize> = order.iter().map(|t| position(&doc, t)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert!(doc.texts().contains(&"-Rp 700"));
    assert!(doc.texts().contains(&"Rp 10.800"));
}

#[test]
fn empty_adjustment_sections_are_skipped() {
    let doc = layout::render_single(&record("Bob", dec!(3000))).unwrap();
    let texts = doc.texts();
    assert!(!texts.contains(&"Delivery Fees"));
    assert!(!texts.contains(&"Additional Fees"));
    assert!(!texts.contains(&"Discounts"));
    assert!(texts.contains(&"Grand Total"));
}

#[test]
fn supplier_groups_render_alphabetically() {
    let rows = vec![
        RowBuilder::item("Alice", "Veg", "Kale", dec!(1), dec!(1)).build(),
        RowBuilder::item("Alice", "Dairy", "Milk", dec!(1), dec!(1)).build(),
        RowBuilder::item("Alice", "Fish", "Tuna", dec!(1), dec!(1)).build(),
    ];
    let doc = layout::render_single(&build_invoices(&rows)["Alice"]).unwrap();
    let dairy = position(&doc, "Dairy");
    let fish = position(&doc, "Fish");
    let veg = position(&doc, "Veg");
    assert!(dairy < position(&doc, "Milk"));
    assert!(dairy < fish && fish < veg);
    assert!(position(&doc, "Tuna") < veg);
}

#[test]
fn hidden_groups_have_no_label_row() {
    let rows = vec![
        RowBuilder::item("Alice", "_bundle", "Basket", dec!(1), dec!(1)).build(),
        RowBuilder::item("Alice", "Fish", "Tuna", dec!(1), dec!(1)).build(),
    ];
    let doc = layout::render_single(&build_invoices(&rows)["Alice"]).unwrap();
    assert!(doc.find_text("_bundle").is_none());
    assert!(doc.find_text("Basket").is_some());
    assert!(doc.find_text("Fish").is_some());
}

#[test]
fn columns_and_alignment() {
    let doc = layout::render_single(&alice()).unwrap();
    let cols = TableColumns::for_page(&InvoiceConfig::default().page);

    let item = doc.find_text("Salmon").unwrap();
    assert_eq!(item.x, cols.item.x);

    let price = doc.find_text("Rp 5.000").unwrap();
    let price_width = layout::text_width(price.text, price.style);
    assert!((price.x + price_width - cols.price.right()).abs() < 1e-6);

    let qty = doc.find_text("2").unwrap();
    let qty_width = layout::text_width(qty.text, qty.style);
    let qty_center = qty.x + qty_width / 2.0;
    assert!((qty_center - (cols.qty.x + cols.qty.width / 2.0)).abs() < 1e-6);

    // Item row cells share one baseline.
    assert_eq!(item.y, price.y);
    assert_eq!(item.y, qty.y);
}

#[test]
fn long_item_names_are_clipped_to_their_column() {
    let name = "Extra virgin olive oil, cold pressed, imported, family size bottle";
    let row = RowBuilder::item("Alice", "Pantry", name, dec!(1), dec!(1)).build();
    let doc = layout::render_single(&build_invoices(&[row])["Alice"]).unwrap();
    let cols = TableColumns::for_page(&InvoiceConfig::default().page);

    let drawn = doc
        .placed_texts()
        .find(|t| name.starts_with(t.text) && t.text.len() > 10)
        .unwrap();
    assert!(drawn.text.len() < name.len());
    assert!(layout::text_width(drawn.text, drawn.style) <= cols.item.width);
}

#[test]
fn grand_total_is_larger_and_bold() {
    let doc = layout::render_single(&alice()).unwrap();
    let label = doc.find_text("Grand Total").unwrap();
    assert_eq!(label.style.size, 16.0);
    assert_eq!(label.style.weight, layout::FontWeight::Bold);
    let salmon = doc.find_text("Salmon").unwrap();
    assert_eq!(salmon.style.size, 12.0);
}

#[test]
fn rules_frame_the_table() {
    let doc = layout::render_single(&alice()).unwrap();
    // header and grand total are closed by heavy rules, subtotal opened by a light one
    assert_eq!(doc.count_lines(3.0), 2);
    assert_eq!(doc.count_lines(1.0), 1);
}

#[test]
fn long_invoices_flow_onto_more_pages() {
    let rows: Vec<_> = (0..120)
        .map(|i| RowBuilder::item("Alice", "Veg", format!("Item {i}"), dec!(100), dec!(1)).build())
        .collect();
    let doc = layout::render_single(&build_invoices(&rows)["Alice"]).unwrap();
    assert!(doc.page_count() >= 3);

    let first = doc.find_text("Item 0").unwrap();
    let last = doc.find_text("Item 119").unwrap();
    assert_eq!(first.page, 0);
    assert!(last.page > 0);

    let setup = InvoiceConfig::default().page;
    for placed in doc.placed_texts() {
        assert!(placed.y >= setup.margin_top);
        assert!(placed.y + placed.style.line_height() <= setup.content_bottom() + 1e-6);
    }
    assert!(doc.find_text("Rp 12.000").is_some());
}

// --- Combined invoices ---

#[test]
fn combined_total_shown_once_at_the_end() {
    let a = record("Alice", dec!(20));
    let b = record("Bob", dec!(30));
    let doc = layout::render_combined("Alice", "1 Jan 2024", &[&a, &b]).unwrap();
    let texts = doc.texts();

    let combined: Vec<_> = texts.iter().filter(|t| t.starts_with("Combined Total")).collect();
    assert_eq!(combined, vec![&"Combined Total: Rp 50"]);
    assert_eq!(texts.last(), Some(&"Combined Total: Rp 50"));

    // amount due in the header is the combined total too
    assert!(position(&doc, "Rp 50") < position(&doc, "Billing: Alice"));
}

#[test]
fn combined_sections_follow_input_order() {
    let a = record("Zed", dec!(1));
    let b = record("Amy", dec!(2));
    let doc = layout::render_combined("Zed", "Jan", &[&a, &b]).unwrap();

    assert_eq!(doc.texts().iter().filter(|&&t| t == "INVOICE").count(), 1);
    let zed = position(&doc, "Billing: Zed");
    let amy = position(&doc, "Billing: Amy");
    assert!(zed < position(&doc, "Subtotal Zed"));
    assert!(position(&doc, "Total Zed") < amy);
    assert!(amy < position(&doc, "Total Amy"));
    assert!(doc.find_text("To: Zed").is_some());
    assert!(doc.find_text("Period: Jan").is_some());
}

#[test]
fn combined_sections_are_divided_by_bands() {
    let a = record("Alice", dec!(20));
    let b = record("Bob", dec!(30));
    let doc = layout::render_combined("Alice", "Jan", &[&a, &b]).unwrap();
    let divider = InvoiceConfig::default().brand.divider_color;
    let bands = doc
        .rects()
        .filter(|op| matches!(op, DrawOp::Rect { color, .. } if *color == divider))
        .count();
    assert_eq!(bands, 2);
}

#[test]
fn combining_nothing_is_an_error() {
    let err = layout::render_combined("Nobody", "Jan", &[]).unwrap_err();
    assert!(matches!(err, BillingError::EmptyCombination));
}

#[test]
fn single_member_combination_renders() {
    let a = record("Alice", dec!(20));
    let doc = layout::render_combined("Alice", "Jan", &[&a]).unwrap();
    assert!(doc.find_text("Combined Total: Rp 20").is_some());
}

// --- Configuration ---

#[test]
fn labels_and_currency_come_from_config() {
    let config = InvoiceConfig {
        labels: Labels::indonesian(),
        currency: CurrencyFormat::dollar(),
        ..InvoiceConfig::default()
    };
    let renderer = InvoiceRenderer::new(config);
    let doc = renderer
        .render_single(RecordingSurface::new(), &record("Alice", dec!(12.5)))
        .unwrap();
    assert!(doc.find_text("Kepada: Alice").is_some());
    assert!(doc.find_text("Harga").is_some());
    assert!(doc.find_text("$12.50").is_some());
}

#[test]
fn closures_work_as_formatters() {
    let renderer = InvoiceRenderer::with_formatter(InvoiceConfig::default(), |amount: Decimal| {
        format!("{amount} IDR")
    });
    let doc = renderer
        .render_single(RecordingSurface::new(), &record("Alice", dec!(7)))
        .unwrap();
    assert!(doc.find_text("7 IDR").is_some());
}

#[test]
fn payment_instructions_sit_in_the_right_half() {
    let mut config = InvoiceConfig::default();
    config.brand.payment_instructions = "Bank Transfer\nACC 0001".into();
    let renderer = InvoiceRenderer::new(config);
    let doc = renderer
        .render_single(RecordingSurface::new(), &alice())
        .unwrap();

    let to = doc.find_text("To: Alice").unwrap();
    let bank = doc.find_text("Bank Transfer").unwrap();
    let acc = doc.find_text("ACC 0001").unwrap();
    assert_eq!(bank.y, to.y);
    assert!(acc.y > bank.y);
    assert!(bank.x > 306.0);
}

// --- Batches ---

#[test]
fn batch_renders_singles_then_combinations() {
    let rows: Vec<_> = ["Alice", "Bob", "Nelly", "Yuliana (Nelly)"]
        .into_iter()
        .map(|c| {
            RowBuilder::item(c, "Fish", "Salmon", dec!(10), dec!(1))
                .date("Jan 2024")
                .build()
        })
        .collect();
    let invoices = build_invoices(&rows);
    let plan = BatchPlan::new(
        &invoices,
        &[vec!["Yuliana (Nelly)".into(), "Nelly".into()]],
    )
    .unwrap();

    let mut sink = MemorySink::default();
    let written = InvoiceRenderer::default()
        .run_batch(&plan, &invoices, RecordingSurface::new, &mut sink)
        .unwrap();

    assert_eq!(written, 3);
    let names: Vec<&str> = sink.documents.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["Alice Jan 2024", "Bob Jan 2024", "Yuliana (Nelly) Jan 2024"]
    );
    let combined = &sink.documents[2].1;
    assert!(combined.find_text("Combined Total: Rp 20").is_some());
}
