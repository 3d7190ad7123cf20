//! SlotStore CLI
//!
//! Command-line interface over a SlotStore data file. One subcommand per
//! store operation; all output goes to stdout, logs go to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slotstore::{Config, Record, RecordUpdate, Schema, Store, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// SlotStore CLI
#[derive(Parser, Debug)]
#[command(name = "slotstore-cli")]
#[command(about = "Fixed-size binary record store")]
#[command(version)]
struct Args {
    /// Data file
    #[arg(short, long, default_value = "data.bin")]
    data: String,

    /// Report output file
    #[arg(short, long, default_value = "report.txt")]
    report: String,

    /// Record layout of the data file
    #[arg(short, long, value_enum, default_value_t = SchemaArg::StockStatus)]
    schema: SchemaArg,

    /// fsync after every append
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaArg {
    /// id, name[20], price, category[20], stock_status[10]
    StockStatus,
    /// id, name[20], price, category[20], quantity
    Quantity,
}

impl SchemaArg {
    fn schema(self) -> Schema {
        match self {
            SchemaArg::StockStatus => Schema::stock_status(),
            SchemaArg::Quantity => Schema::quantity(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a new record
    Add {
        id: u32,
        name: String,
        price: f32,
        #[arg(long)]
        category: Option<String>,
        /// e.g. "In Stock" / "Out of Stock"
        #[arg(long)]
        stock_status: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
    },

    /// Display all records
    List {
        #[arg(long)]
        json: bool,
    },

    /// Find the first record matching an id or name
    Find {
        /// Id, or name (case-insensitive)
        query: String,
        #[arg(long)]
        json: bool,
    },

    /// Update every record with the given id
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        stock_status: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
    },

    /// Delete every record with the given id
    Delete { id: u32 },

    /// Write the grouped report file
    Report {
        /// Print the summary as JSON instead of writing the report file
        #[arg(long)]
        json: bool,
    },

    /// Show the record layout
    Schema,
}

fn main() -> ExitCode {
    // Logs on stderr; stdout carries command output only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,slotstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_path(&args.data)
        .report_path(&args.report)
        .schema(args.schema.schema())
        .sync_strategy(if args.sync {
            SyncStrategy::EveryWrite
        } else {
            SyncStrategy::OnRewrite
        })
        .build();

    let store = match Store::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&store, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &Store, command: Commands) -> slotstore::Result<()> {
    match command {
        Commands::Add {
            id,
            name,
            price,
            category,
            stock_status,
            quantity,
        } => {
            let record = Record {
                id,
                name,
                price,
                category,
                stock_status,
                quantity,
            };
            store.append(&record)?;
            println!("Record {} added.", id);
        }

        Commands::List { json } => {
            let scan = store.scan_all()?;
            if json {
                print_json(&scan)?;
            } else if scan.is_missing() {
                println!("Data file not found.");
            } else {
                for record in scan.records() {
                    println!("{}", describe(record));
                }
            }
        }

        Commands::Find { query, json } => {
            let found = store.find_by_id_or_name(&query)?;
            match (found, json) {
                (found, true) => print_json(&found)?,
                (Some(record), false) => println!("Match found: {}", describe(&record)),
                (None, false) => println!("No matching records found."),
            }
        }

        Commands::Update {
            id,
            name,
            price,
            category,
            stock_status,
            quantity,
        } => {
            let update = RecordUpdate {
                name,
                price,
                category,
                stock_status,
                quantity,
            };
            if update.is_empty() {
                println!("Nothing to update.");
            } else if store.replace_where(id, &update)? {
                println!("Record {} updated.", id);
            } else {
                println!("No matching record.");
            }
        }

        Commands::Delete { id } => {
            if store.remove_where(id)? {
                println!("Record {} deleted.", id);
            } else {
                println!("No matching record.");
            }
        }

        Commands::Report { json } => {
            if json {
                print_json(&store.group_by_category()?)?;
            } else {
                match store.write_report()? {
                    Some(_) => println!("Report saved to {}", store.config().report_path.display()),
                    None => println!("Data file not found."),
                }
            }
        }

        Commands::Schema => {
            let schema = store.schema();
            for (offset, field) in schema.layout() {
                println!(
                    "{:<6} {:<14} {:>3} bytes  {:?}",
                    offset,
                    field.column.name(),
                    field.width(),
                    field.kind
                );
            }
            println!("record size: {} bytes", schema.record_size());
        }
    }

    Ok(())
}

/// One-line human-readable record
fn describe(record: &Record) -> String {
    let mut line = format!(
        "ID: {}, Name: {}, Price: {:.2}",
        record.id, record.name, record.price
    );
    if let Some(category) = &record.category {
        line.push_str(&format!(", Category: {}", category));
    }
    if let Some(status) = &record.stock_status {
        line.push_str(&format!(", Stock Status: {}", status));
    }
    if let Some(quantity) = record.quantity {
        line.push_str(&format!(", Quantity: {}", quantity));
    }
    line
}

fn print_json<T: Serialize>(value: &T) -> slotstore::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| slotstore::StoreError::Encoding(format!("JSON output failed: {}", e)))?;
    println!("{}", text);
    Ok(())
}
