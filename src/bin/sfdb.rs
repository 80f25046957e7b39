use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_db::prelude::*;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run statements against the storefront database")]
struct Args {
    /// JSON file with `DbOptions`; `--database` overrides its path.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, short)]
    database: Option<String>,
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a statement or script.
    Exec { sql: String },
    /// Print every row as a JSON line.
    Select { sql: String },
    /// Insert one row, print the new id.
    Insert {
        table: String,
        #[arg(value_parser = parse_assignment, required = true)]
        values: Vec<(String, RowValues)>,
    },
    /// Update matching rows, print how many changed.
    Update {
        table: String,
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, RowValues)>,
        #[arg(long = "where", value_parser = parse_assignment, required = true)]
        filter: Vec<(String, RowValues)>,
    },
}

fn parse_value(raw: &str) -> RowValues {
    if let Ok(i) = raw.parse::<i64>() {
        RowValues::Int(i)
    } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        RowValues::Float(f)
    } else if raw.eq_ignore_ascii_case("null") {
        RowValues::Null
    } else {
        RowValues::Text(raw.to_string())
    }
}

fn parse_assignment(raw: &str) -> Result<(String, RowValues), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got '{raw}'"))?;
    Ok((column.trim().to_string(), parse_value(value)))
}

fn load_options(args: &Args) -> Result<DbOptions, Box<dyn std::error::Error>> {
    let mut opts = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => DbOptions::default(),
    };
    if let Some(database) = &args.database {
        opts.database.clone_from(database);
    }
    Ok(opts)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose > 0 {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    let mut db = Db::open_with(load_options(&args)?)?;
    match args.command {
        Command::Exec { sql } => db.execute_batch(&sql)?,
        Command::Select { sql } => {
            for row in &db.fetch_all(&sql)? {
                println!("{}", row.to_json());
            }
        }
        Command::Insert { table, values } => {
            let id = db.transaction(|db| db.insert_query(&table, &values.into_iter().collect()))?;
            println!("{id}");
        }
        Command::Update { table, set, filter } => {
            let set: ColumnValues = set.into_iter().collect();
            let filter: ColumnValues = filter.into_iter().collect();
            let changed = db.transaction(|db| db.update_query_where(&table, &set, &filter))?;
            println!("{changed}");
        }
    }
    db.close()?;
    Ok(())
}
