//! # Seed Data Generator
//!
//! Populates the database with demo records for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./tienda_dev.db with 20 invoices (default)
//! cargo run -p tienda-db --bin seed
//!
//! # Custom invoice count and database path
//! cargo run -p tienda-db --bin seed -- --invoices 200 --db ./data/tienda.db
//! ```
//!
//! Every record goes through `tienda_db::service`, so the seed obeys the
//! same formats and uniqueness rules as the REST API.

use std::env;

use tienda_core::{
    Money, NewCustomer, NewInvoice, NewPaymentMethod, NewProduct, NewWorker, PaymentMethodKind,
    Role,
};
use tienda_db::{service, Database, DbConfig};

/// (national_id, first name, last name, city)
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("1712345678", "Ana", "Mora", "Quito"),
    ("0912345678", "Carlos", "Vera", "Guayaquil"),
    ("0102345678", "María", "Ortiz", "Cuenca"),
    ("1312345678", "José", "Zambrano", "Portoviejo"),
    ("1812345678", "Lucía", "Páez", "Ambato"),
];

/// (national_id, first name, last name, role)
const WORKERS: &[(&str, &str, &str, Role)] = &[
    ("1700000001", "Sofía", "Andrade", Role::Administrator),
    ("1700000002", "Diego", "Salazar", Role::Cashier),
    ("1700000003", "Valeria", "Cruz", Role::Salesperson),
];

/// (id, name, category, price in cents, stock)
const PRODUCTS: &[(&str, &str, &str, i64, i64)] = &[
    ("A001", "Arroz 1kg", "granos", 125, 200),
    ("A002", "Azúcar 1kg", "granos", 110, 150),
    ("B001", "Leche 1L", "lácteos", 95, 80),
    ("B002", "Queso fresco", "lácteos", 350, 40),
    ("C001", "Aceite 1L", "abarrotes", 299, 60),
    ("C002", "Atún lata", "abarrotes", 175, 120),
    ("D001", "Jabón", "limpieza", 85, 90),
    ("D002", "Detergente 1kg", "limpieza", 450, 35),
];

const PAYMENT_METHODS: &[(&str, PaymentMethodKind)] = &[
    ("EF", PaymentMethodKind::Cash),
    ("TC", PaymentMethodKind::Card),
    ("TR", PaymentMethodKind::Transfer),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut invoices: usize = 20;
    let mut db_path = String::from("./tienda_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--invoices" | "-n" => {
                if i + 1 < args.len() {
                    invoices = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tienda POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --invoices <N>  Number of invoices to generate (default: 20)");
                println!("  -d, --db <PATH>     Database file path (default: ./tienda_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tienda POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Invoices: {}", invoices);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.customers().count().await? > 0 {
        println!("⚠ Database already has customers");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (id, first, last, city) in CUSTOMERS {
        service::create_customer(
            &db,
            NewCustomer {
                national_id: id.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}.{}@clientes.ec", ascii_lower(first), ascii_lower(last)),
                phone: format!("09{}", &id[2..]),
                address: format!("Centro, {}", city),
            },
        )
        .await?;
    }
    println!("✓ {} customers", CUSTOMERS.len());

    for (id, first, last, role) in WORKERS {
        service::create_worker(
            &db,
            NewWorker {
                national_id: id.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                phone: format!("09{}", &id[2..]),
                role: *role,
                email: format!("{}@tienda.ec", ascii_lower(first)),
            },
        )
        .await?;
    }
    println!("✓ {} workers", WORKERS.len());

    for (id, name, category, cents, stock) in PRODUCTS {
        service::create_product(
            &db,
            NewProduct {
                id: id.to_string(),
                name: name.to_string(),
                description: format!("{} ({})", name, category),
                price: Money::from_cents(*cents),
                stock: *stock,
                image: None,
                category: Some(category.to_string()),
            },
        )
        .await?;
    }
    println!("✓ {} products", PRODUCTS.len());

    for (id, kind) in PAYMENT_METHODS {
        service::create_payment_method(
            &db,
            NewPaymentMethod {
                id: id.to_string(),
                name: *kind,
            },
        )
        .await?;
    }
    println!("✓ {} payment methods", PAYMENT_METHODS.len());

    println!();
    println!("Generating invoices...");
    let start = std::time::Instant::now();
    let mut grand_total = Money::zero();

    // Deterministic spread over the catalog
    for n in 0..invoices {
        let invoice = service::create_invoice(
            &db,
            NewInvoice {
                customer_id: CUSTOMERS[n % CUSTOMERS.len()].0.to_string(),
                worker_id: WORKERS[n % WORKERS.len()].0.to_string(),
                product_id: PRODUCTS[(n * 3) % PRODUCTS.len()].0.to_string(),
                quantity: (n % 5 + 1) as i64,
                payment_method_id: PAYMENT_METHODS[n % PAYMENT_METHODS.len()].0.to_string(),
            },
        )
        .await?;
        grand_total = grand_total + invoice.total();
    }

    println!(
        "✓ Generated {} invoices in {:?} (total {})",
        invoices,
        start.elapsed(),
        grand_total
    );

    db.close().await;
    println!();
    println!("🎉 Seed complete!");

    Ok(())
}

/// "María" → "maria" for demo email addresses.
fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
