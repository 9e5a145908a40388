//! # Seed Data Generator
//!
//! Populates a database with the built-in sample catalog plus a few
//! inventory items and expenses for local development.
//!
//! ## Usage
//! ```bash
//! # Default database path (./salespro_dev.db)
//! cargo run -p salespro-db --bin seed
//!
//! # Specify database path
//! cargo run -p salespro-db --bin seed -- --db ./data/salespro.db
//! ```

use std::env;

use chrono::{Duration, Utc};
use salespro_core::{default_catalog, NewCatalogItem, NewExpense, NewInventoryItem};
use salespro_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./salespro_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SalesPro Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./salespro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SalesPro Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} catalog items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Catalog: the same sample items the UI falls back to, persisted for real.
    println!();
    println!("Seeding catalog...");
    for sample in default_catalog(Utc::now()) {
        let item = db
            .catalog()
            .insert(NewCatalogItem {
                name: sample.name,
                sku: sample.sku,
                retail_price_cents: sample.retail_price_cents,
                unit_cost_cents: sample.unit_cost_cents,
                current_stock: sample.current_stock,
                category: sample.category,
                unit: sample.unit,
            })
            .await?;
        println!("  + {} (stock {})", item.name, item.current_stock);
    }

    println!();
    println!("Seeding inventory...");
    let inventory = [
        ("Packaging Boxes", "PKG-001", 45, 200, 50),
        ("Bubble Wrap Roll", "PKG-002", 1200, 12, 5),
        ("Shipping Labels", "SHP-001", 8, 30, 100),
    ];
    for (name, sku, unit_cost_cents, current_stock, min_stock_level) in inventory {
        let item = db
            .inventory()
            .insert(NewInventoryItem {
                name: name.to_string(),
                sku: sku.to_string(),
                unit_cost_cents,
                current_stock,
                min_stock_level,
                category: Some("Supplies".to_string()),
            })
            .await?;
        println!("  + {} (stock {})", item.name, item.current_stock);
    }

    println!();
    println!("Seeding expenses...");
    let now = Utc::now();
    let expenses = [
        ("rent", "Monthly storefront rent", 120000, now - Duration::days(40)),
        ("utilities", "Electricity", 8500, now - Duration::days(35)),
        ("rent", "Monthly storefront rent", 120000, now - Duration::days(9)),
        ("marketing", "Flyer printing", 4300, now - Duration::days(3)),
    ];
    for (category, description, amount_cents, date) in expenses {
        let expense = db
            .expenses()
            .insert(NewExpense {
                category: category.to_string(),
                description: description.to_string(),
                amount_cents,
                date: Some(date),
            })
            .await?;
        println!("  + {} {}", expense.category, expense.amount());
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
