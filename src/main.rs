use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rusty_csv::data::loader::load_file;
use rusty_csv::display::render_output;
use rusty_csv::{run_query, Query, Table};

#[derive(Parser, Debug)]
#[command(name = "rusty-csv")]
#[command(about = "Filter, sort and aggregate CSV, JSON and Parquet files")]
#[command(version)]
struct Cli {
    /// Input file (.csv, .json, .parquet)
    #[arg(long)]
    file: PathBuf,

    /// Filter rows: --where "price>500", "brand=apple"
    #[arg(long = "where", value_name = "CONDITION")]
    where_clause: Option<String>,

    /// Sort rows: --order-by price or --order-by price=desc
    #[arg(long, value_name = "COLUMN[=asc|desc]")]
    order_by: Option<String>,

    /// Reduce a column: --aggregate price=avg (avg, min, max, median)
    #[arg(long, value_name = "COLUMN=OPERATION")]
    aggregate: Option<String>,
}

impl From<Cli> for Query {
    fn from(cli: Cli) -> Self {
        Query {
            where_clause: cli.where_clause,
            order_by: cli.order_by,
            aggregate: cli.aggregate,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // An unreadable input is reported and the run carries on with no rows.
    let table = load_file(&cli.file).unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        Table::default()
    });

    let output = run_query(&table, &cli.into())?;
    let text = render_output(&output)?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}
