//! # Seed Data Generator
//!
//! Populates a catalog and ledger with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed files in the current directory (3 days of sales)
//! cargo run -p tillbook-store --bin seed
//!
//! # Custom paths and span
//! cargo run -p tillbook-store --bin seed -- \
//!     --catalog ./data/products.csv \
//!     --ledger ./data/transactions.csv \
//!     --days 7
//! ```
//!
//! Seeding extends whatever is already on disk: the catalog gains the demo
//! products, the ledger gains a handful of checkouts per day ending today.

use std::env;
use std::process::ExitCode;

use chrono::{Duration, Local, NaiveDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tillbook_store::{StoreResult, Till};

/// Products added to the catalog before seeding sales.
const DEMO_PRODUCTS: &[(&str, &str)] = &[
    ("Apple", "1.00"),
    ("Banana", "0.50"),
    ("Orange", "0.75"),
    ("Milk", "2.50"),
    ("Bread", "1.80"),
    ("Coffee", "4.20"),
    ("Tea", "3.10"),
    ("Cheese", "3.40"),
];

/// Customers the demo checkouts rotate through.
const DEMO_CUSTOMERS: &[&str] = &["Sam", "Kim", "Alex", ""];

struct Args {
    catalog: String,
    ledger: String,
    days: u32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        catalog: "products.csv".to_string(),
        ledger: "transactions.csv".to_string(),
        days: 3,
    };

    let mut iter = env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next().ok_or_else(|| format!("{} needs a value", name))
        };
        match flag.as_str() {
            "--catalog" => args.catalog = value("--catalog")?,
            "--ledger" => args.ledger = value("--ledger")?,
            "--days" => {
                args.days = value("--days")?
                    .parse()
                    .map_err(|_| "--days needs a number".to_string())?;
            }
            other => return Err(format!("unknown flag: {}", other)),
        }
    }
    Ok(args)
}

fn seed(args: &Args) -> StoreResult<()> {
    let mut till = Till::new(&args.catalog, &args.ledger);

    for (name, price) in DEMO_PRODUCTS {
        till.set_price(name, price)?;
    }
    info!(products = DEMO_PRODUCTS.len(), "Catalog seeded");

    let today = Local::now().naive_local();
    let mut checkouts = 0usize;
    for day_offset in (0..args.days).rev() {
        let day: NaiveDateTime = today - Duration::days(i64::from(day_offset));
        // a few checkouts per day, rotating products and basket sizes
        for sale in 0..3 {
            let start = (day_offset as usize + sale * 3) % DEMO_PRODUCTS.len();
            for unit in 0..(sale + 2) {
                let (name, _) = DEMO_PRODUCTS[(start + unit) % DEMO_PRODUCTS.len()];
                till.add_to_cart(name)?;
            }
            let customer = DEMO_CUSTOMERS[checkouts % DEMO_CUSTOMERS.len()];
            let receipt = till.checkout_at(customer, day - Duration::hours(sale as i64))?;
            info!(
                customer = %receipt.customer_name,
                total = %receipt.grand_total,
                "Seeded checkout"
            );
            checkouts += 1;
        }
    }

    info!(
        checkouts,
        catalog = %args.catalog,
        ledger = %args.ledger,
        "Seeding done"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("seed: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = seed(&args) {
        eprintln!("seed: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
