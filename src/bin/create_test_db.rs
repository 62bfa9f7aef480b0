use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use catalog_rs::initialize_db;

/// A utility for creating a test database for the REST API server of catalog_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Categories and the products in them, as (name, price, stock).
const SAMPLE_CATALOG: &[(&str, Option<&str>, &[(&str, f64, i64)])] = &[
    (
        "Shoes",
        Some("https://example.com/images/shoes.png"),
        &[("Boot", 49.99, 10), ("Sandal", 19.5, 25)],
    ),
    (
        "Hats",
        None,
        &[("Fedora", 35.0, 4), ("Beanie", 12.0, 0)],
    ),
    ("Gloves", None, &[]),
];

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

    println!("Creating sample categories and products...");

    for (category_name, image_url, products) in SAMPLE_CATALOG {
        let category_id: i64 = conn.query_row(
            "INSERT INTO category (name, image_url) VALUES (?1, ?2) RETURNING id",
            (category_name, image_url),
            |row| row.get(0),
        )?;

        for (name, price, stock) in products.iter() {
            conn.execute(
                "INSERT INTO product (name, precio, stock, category_id) VALUES (?1, ?2, ?3, ?4)",
                (name, price, stock, category_id),
            )?;
        }
    }

    println!("Success!");

    Ok(())
}
