use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use bilant::{Category, NewTransaction, TransactionType, YearMonth, initialize_db, insert_transaction};

/// A utility for creating a test database for the bilant web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The number of months, ending with the current month, to fill with transactions.
    #[arg(long, short, default_value_t = 3)]
    months: u8,
}

/// One month of typical household transactions as (type, category, day, amount, memo).
const SAMPLE_MONTH: [(TransactionType, Category, u8, u32, Option<&str>); 12] = [
    (TransactionType::Expense, Category::Housing, 1, 80_000, Some("家賃")),
    (TransactionType::Expense, Category::Food, 3, 4_200, None),
    (TransactionType::Expense, Category::Socializing, 8, 6_000, Some("飲み会")),
    (TransactionType::Expense, Category::Food, 10, 3_800, None),
    (TransactionType::Expense, Category::Electricity, 12, 6_800, None),
    (TransactionType::Expense, Category::Gas, 14, 4_300, None),
    (TransactionType::Expense, Category::InsuranceAndTaxes, 15, 12_000, Some("住民税")),
    (TransactionType::Expense, Category::Food, 17, 5_100, Some("まとめ買い")),
    (TransactionType::Expense, Category::Water, 20, 3_000, None),
    (TransactionType::Expense, Category::Miscellaneous, 22, 1_500, None),
    (TransactionType::Income, Category::Other, 25, 250_000, Some("給料")),
    (TransactionType::Expense, Category::Communication, 27, 5_500, Some("携帯")),
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

    let today = OffsetDateTime::now_utc().date();
    let mut month = Some(YearMonth::from_date(today)?);
    let mut count = 0;

    for _ in 0..args.months {
        let Some(current) = month else {
            break;
        };

        println!("Creating transactions for {current}...");

        for (txn_type, category, day, amount, memo) in SAMPLE_MONTH {
            let txn_date = current.range().start.replace_day(day)?;

            if txn_date > today {
                continue;
            }

            insert_transaction(
                NewTransaction {
                    txn_type,
                    category,
                    txn_date,
                    amount,
                    memo: memo.map(str::to_owned),
                },
                &conn,
            )?;
            count += 1;
        }

        month = current.previous();
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
