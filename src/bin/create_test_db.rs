use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{TransactionRecord, count_transactions, initialize_db, insert_transactions};

const CATEGORIES: [&str; 4] = [
    "men's clothing",
    "jewelery",
    "electronics",
    "women's clothing",
];

/// A utility for creating a test database for the sales_dashboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many sample transactions to create for each month.
    #[arg(long, default_value_t = 5)]
    per_month: u32,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample transactions...");

    let records = sample_records(args.per_month);
    insert_transactions(&records, &conn)?;

    println!("Success! Created {} transactions.", count_transactions(&conn)?);

    Ok(())
}

/// Spread records over every month of 2021 and 2022 with prices covering all the price ranges.
fn sample_records(per_month: u32) -> Vec<TransactionRecord> {
    let mut records = Vec::new();
    let mut id = 1;

    for year in [2021, 2022] {
        for month in 1..=12 {
            for i in 0..per_month {
                let price = f64::from((id * 37 + i * 113) % 1_100) + 0.99;
                let category = CATEGORIES[(id as usize) % CATEGORIES.len()];

                records.push(TransactionRecord {
                    id: Some(i64::from(id)),
                    title: format!("Sample product #{id}"),
                    price,
                    description: format!("A sample {category} product."),
                    category: category.to_owned(),
                    image: format!("https://example.com/images/{id}.jpg"),
                    sold: id % 3 != 0,
                    date_of_sale: format!("{year}-{month:02}"),
                });

                id += 1;
            }
        }
    }

    records
}
