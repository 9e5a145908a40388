//! # XLSX Workbook Export
//!
//! Renders the snapshot as a workbook: one Summary sheet plus a detail sheet
//! per entity. Money lands in cells as major units (e.g. 99.99) so the
//! spreadsheet can keep computing on it; dates are plain `YYYY-MM-DD`.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use salespro_core::Money;

use crate::{ExportResult, ExportSnapshot};

/// Builds the full workbook and returns the XLSX bytes.
pub fn workbook_bytes(snapshot: &ExportSnapshot) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_summary_sheet(workbook.add_worksheet(), snapshot, &header)?;
    write_catalog_sheet(workbook.add_worksheet(), snapshot, &header)?;
    write_inventory_sheet(workbook.add_worksheet(), snapshot, &header)?;
    write_sales_sheet(workbook.add_worksheet(), snapshot, &header)?;
    write_expenses_sheet(workbook.add_worksheet(), snapshot, &header)?;

    Ok(workbook.save_to_buffer()?)
}

fn cents(value: i64) -> f64 {
    Money::from_cents(value).to_major_units()
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    snapshot: &ExportSnapshot,
    header: &Format,
) -> ExportResult<()> {
    sheet.set_name("Summary")?;
    sheet.set_column_width(0, 24)?;

    sheet.write_string_with_format(0, 0, "SalesPro Summary", header)?;
    sheet.write_string(1, 0, "Generated")?;
    sheet.write_string(1, 1, snapshot.generated_at.format("%Y-%m-%d %H:%M UTC").to_string())?;

    let stats = &snapshot.stats;
    let rows: &[(&str, f64)] = &[
        ("Total Revenue", cents(stats.total_revenue_cents)),
        ("Total Profit", cents(stats.total_profit_cents)),
        ("Total Expenses", cents(stats.total_expenses_cents)),
        ("Net Profit", cents(stats.net_profit_cents)),
        ("Catalog Items", stats.total_catalog_items as f64),
        ("Inventory Items", stats.total_inventory_items as f64),
        ("Sales", stats.total_sales as f64),
        ("Low Stock Items", stats.low_stock_count as f64),
    ];

    for (i, (label, value)) in rows.iter().enumerate() {
        let row = 3 + i as u32;
        sheet.write_string(row, 0, *label)?;
        sheet.write_number(row, 1, *value)?;
    }

    Ok(())
}

fn write_catalog_sheet(
    sheet: &mut Worksheet,
    snapshot: &ExportSnapshot,
    header: &Format,
) -> ExportResult<()> {
    sheet.set_name("Catalog")?;
    sheet.set_column_width(0, 28)?;

    let columns = ["Name", "SKU", "Retail Price", "Unit Cost", "Stock", "Category", "Unit"];
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, item) in snapshot.catalog.iter().enumerate() {
        let row = 1 + i as u32;
        sheet.write_string(row, 0, item.name.as_str())?;
        sheet.write_string(row, 1, item.sku.as_deref().unwrap_or(""))?;
        sheet.write_number(row, 2, cents(item.retail_price_cents))?;
        sheet.write_number(row, 3, cents(item.unit_cost_cents))?;
        sheet.write_number(row, 4, item.current_stock as f64)?;
        sheet.write_string(row, 5, item.category.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 6, item.unit.as_deref().unwrap_or(""))?;
    }

    Ok(())
}

fn write_inventory_sheet(
    sheet: &mut Worksheet,
    snapshot: &ExportSnapshot,
    header: &Format,
) -> ExportResult<()> {
    sheet.set_name("Inventory")?;
    sheet.set_column_width(0, 28)?;

    let columns = ["Name", "SKU", "Unit Cost", "Stock", "Min Stock", "Category"];
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, item) in snapshot.inventory.iter().enumerate() {
        let row = 1 + i as u32;
        sheet.write_string(row, 0, item.name.as_str())?;
        sheet.write_string(row, 1, item.sku.as_str())?;
        sheet.write_number(row, 2, cents(item.unit_cost_cents))?;
        sheet.write_number(row, 3, item.current_stock as f64)?;
        sheet.write_number(row, 4, item.min_stock_level as f64)?;
        sheet.write_string(row, 5, item.category.as_deref().unwrap_or(""))?;
    }

    Ok(())
}

fn write_sales_sheet(
    sheet: &mut Worksheet,
    snapshot: &ExportSnapshot,
    header: &Format,
) -> ExportResult<()> {
    sheet.set_name("Sales")?;
    sheet.set_column_width(1, 28)?;

    let columns = ["Date", "Item", "Quantity", "Unit Price", "Unit Cost", "Revenue", "Profit"];
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, sale) in snapshot.sales.iter().enumerate() {
        let row = 1 + i as u32;
        sheet.write_string(row, 0, sale.date.format("%Y-%m-%d").to_string())?;
        sheet.write_string(row, 1, sale.item_name.as_str())?;
        sheet.write_number(row, 2, sale.quantity_sold as f64)?;
        sheet.write_number(row, 3, cents(sale.retail_price_cents))?;
        sheet.write_number(row, 4, cents(sale.unit_cost_cents))?;
        sheet.write_number(row, 5, cents(sale.revenue_cents))?;
        sheet.write_number(row, 6, cents(sale.profit_cents))?;
    }

    Ok(())
}

fn write_expenses_sheet(
    sheet: &mut Worksheet,
    snapshot: &ExportSnapshot,
    header: &Format,
) -> ExportResult<()> {
    sheet.set_name("Expenses")?;
    sheet.set_column_width(2, 32)?;

    let columns = ["Date", "Category", "Description", "Amount"];
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, expense) in snapshot.expenses.iter().enumerate() {
        let row = 1 + i as u32;
        sheet.write_string(row, 0, expense.date.format("%Y-%m-%d").to_string())?;
        sheet.write_string(row, 1, expense.category.as_str())?;
        sheet.write_string(row, 2, expense.description.as_str())?;
        sheet.write_number(row, 3, cents(expense.amount_cents))?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{empty_snapshot, sample_snapshot};

    #[test]
    fn test_workbook_bytes_is_a_zip() {
        let bytes = workbook_bytes(&sample_snapshot()).unwrap();
        // XLSX is a ZIP container; check the magic.
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_empty_snapshot_still_renders() {
        let bytes = workbook_bytes(&empty_snapshot()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
