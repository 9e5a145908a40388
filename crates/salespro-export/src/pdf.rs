//! # PDF Report Export
//!
//! Renders the snapshot as a printable A4 report: a summary block followed
//! by one table per entity, paginated with a simple y-cursor. Uses the PDF
//! builtin Helvetica fonts so the output needs no font embedding.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use salespro_core::Money;

use crate::{ExportError, ExportResult, ExportSnapshot};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 15.0;
const TOP_Y_MM: f32 = 282.0;
const BOTTOM_Y_MM: f32 = 18.0;
const ROW_STEP_MM: f32 = 5.5;

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn money(value: i64) -> String {
    Money::from_cents(value).to_string()
}

/// Clips a cell to a printable width (builtin fonts have no auto-wrap).
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

/// Y-cursor over the current page, adding pages as sections overflow.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn ensure_room(&mut self, rows: f32) {
        if self.y - rows * ROW_STEP_MM < BOTTOM_Y_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y_MM;
        }
    }

    fn line(&mut self, font: &IndirectFontRef, size: f32, x: f32, text: &str) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    /// Writes one table row: (x offset, cell text) pairs, then advances.
    fn row(&mut self, font: &IndirectFontRef, size: f32, cells: &[(f32, String)]) {
        for (x, text) in cells {
            self.layer
                .use_text(text.as_str(), size, Mm(*x), Mm(self.y), font);
        }
        self.y -= ROW_STEP_MM;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn section_title(&mut self, bold: &IndirectFontRef, text: &str) {
        self.ensure_room(3.0);
        self.gap(3.0);
        self.line(bold, 13.0, MARGIN_LEFT_MM, text);
        self.y -= ROW_STEP_MM + 1.0;
    }
}

/// Builds the printable report and returns the PDF bytes.
pub fn report_bytes(snapshot: &ExportSnapshot) -> ExportResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "SalesPro Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    {
        let mut w = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: TOP_Y_MM,
        };

        // Header
        w.line(&bold, 16.0, MARGIN_LEFT_MM, "SalesPro Report");
        w.y -= 7.0;
        w.line(
            &font,
            10.0,
            MARGIN_LEFT_MM,
            &format!(
                "Generated {}",
                snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
            ),
        );
        w.y -= ROW_STEP_MM;

        write_summary(&mut w, &font, &bold, snapshot);
        write_catalog(&mut w, &font, &bold, snapshot);
        write_inventory(&mut w, &font, &bold, snapshot);
        write_sales(&mut w, &font, &bold, snapshot);
        write_expenses(&mut w, &font, &bold, snapshot);
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(pdf_err)?;
    writer.into_inner().map_err(pdf_err)
}

fn write_summary(
    w: &mut PageWriter<'_>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    snapshot: &ExportSnapshot,
) {
    let stats = &snapshot.stats;
    w.section_title(bold, "Summary");

    let rows: [(&str, String); 8] = [
        ("Total Revenue", money(stats.total_revenue_cents)),
        ("Total Profit", money(stats.total_profit_cents)),
        ("Total Expenses", money(stats.total_expenses_cents)),
        ("Net Profit", money(stats.net_profit_cents)),
        ("Catalog Items", stats.total_catalog_items.to_string()),
        ("Inventory Items", stats.total_inventory_items.to_string()),
        ("Sales", stats.total_sales.to_string()),
        ("Low Stock Items", stats.low_stock_count.to_string()),
    ];

    for (label, value) in rows {
        w.ensure_room(1.0);
        w.row(
            font,
            10.0,
            &[(MARGIN_LEFT_MM, label.to_string()), (70.0, value)],
        );
    }
}

fn write_catalog(
    w: &mut PageWriter<'_>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    snapshot: &ExportSnapshot,
) {
    w.section_title(bold, "Catalog");
    w.ensure_room(1.0);
    w.row(
        bold,
        9.0,
        &[
            (MARGIN_LEFT_MM, "Name".to_string()),
            (75.0, "SKU".to_string()),
            (105.0, "Price".to_string()),
            (130.0, "Cost".to_string()),
            (155.0, "Stock".to_string()),
            (175.0, "Category".to_string()),
        ],
    );

    for item in &snapshot.catalog {
        w.ensure_room(1.0);
        w.row(
            font,
            9.0,
            &[
                (MARGIN_LEFT_MM, clip(&item.name, 34)),
                (75.0, clip(item.sku.as_deref().unwrap_or("-"), 16)),
                (105.0, money(item.retail_price_cents)),
                (130.0, money(item.unit_cost_cents)),
                (155.0, item.current_stock.to_string()),
                (175.0, clip(item.category.as_deref().unwrap_or("-"), 14)),
            ],
        );
    }
}

fn write_inventory(
    w: &mut PageWriter<'_>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    snapshot: &ExportSnapshot,
) {
    w.section_title(bold, "Inventory");
    w.ensure_room(1.0);
    w.row(
        bold,
        9.0,
        &[
            (MARGIN_LEFT_MM, "Name".to_string()),
            (75.0, "SKU".to_string()),
            (105.0, "Unit Cost".to_string()),
            (135.0, "Stock".to_string()),
            (160.0, "Min Stock".to_string()),
        ],
    );

    for item in &snapshot.inventory {
        w.ensure_room(1.0);
        w.row(
            font,
            9.0,
            &[
                (MARGIN_LEFT_MM, clip(&item.name, 34)),
                (75.0, clip(&item.sku, 16)),
                (105.0, money(item.unit_cost_cents)),
                (135.0, item.current_stock.to_string()),
                (160.0, item.min_stock_level.to_string()),
            ],
        );
    }
}

fn write_sales(
    w: &mut PageWriter<'_>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    snapshot: &ExportSnapshot,
) {
    w.section_title(bold, "Sales");
    w.ensure_room(1.0);
    w.row(
        bold,
        9.0,
        &[
            (MARGIN_LEFT_MM, "Date".to_string()),
            (42.0, "Item".to_string()),
            (105.0, "Qty".to_string()),
            (120.0, "Price".to_string()),
            (145.0, "Revenue".to_string()),
            (172.0, "Profit".to_string()),
        ],
    );

    for sale in &snapshot.sales {
        w.ensure_room(1.0);
        w.row(
            font,
            9.0,
            &[
                (MARGIN_LEFT_MM, sale.date.format("%Y-%m-%d").to_string()),
                (42.0, clip(&sale.item_name, 30)),
                (105.0, sale.quantity_sold.to_string()),
                (120.0, money(sale.retail_price_cents)),
                (145.0, money(sale.revenue_cents)),
                (172.0, money(sale.profit_cents)),
            ],
        );
    }
}

fn write_expenses(
    w: &mut PageWriter<'_>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    snapshot: &ExportSnapshot,
) {
    w.section_title(bold, "Expenses");
    w.ensure_room(1.0);
    w.row(
        bold,
        9.0,
        &[
            (MARGIN_LEFT_MM, "Date".to_string()),
            (42.0, "Category".to_string()),
            (80.0, "Description".to_string()),
            (165.0, "Amount".to_string()),
        ],
    );

    for expense in &snapshot.expenses {
        w.ensure_room(1.0);
        w.row(
            font,
            9.0,
            &[
                (MARGIN_LEFT_MM, expense.date.format("%Y-%m-%d").to_string()),
                (42.0, clip(&expense.category, 18)),
                (80.0, clip(&expense.description, 40)),
                (165.0, money(expense.amount_cents)),
            ],
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{empty_snapshot, sample_snapshot};

    #[test]
    fn test_report_bytes_is_a_pdf() {
        let bytes = report_bytes(&sample_snapshot()).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_empty_snapshot_still_renders() {
        let bytes = report_bytes(&empty_snapshot()).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long product name", 10), "a very ...");
    }
}
