#![no_main]

use billsheet::core::{BatchPlan, RawRow, RowNormalizer, build_invoices};
use billsheet::layout::{InvoiceRenderer, RecordingSurface};
use billsheet::pdf::PdfSurface;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<Vec<RawRow>>(data) else {
        return;
    };
    // Must not panic on any sheet content.
    let rows = RowNormalizer::with_year(2024).normalize(raw);
    let invoices = build_invoices(&rows);
    let renderer = InvoiceRenderer::default();

    let records: Vec<_> = invoices.values().collect();
    if !records.is_empty() {
        let _ = renderer.render_combined(RecordingSurface::new(), "All", "2024", &records);
    }

    let plan = BatchPlan::singles(&invoices);
    let mut sink = billsheet::core::MemorySink::default();
    let _ = renderer.run_batch(&plan, &invoices, PdfSurface::new, &mut sink);
});
