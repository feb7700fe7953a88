// ABOUTME: CLI entry point for the product catalog importer
// ABOUTME: Parses options, initializes logging and runs the import

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use product_importer::{run_import, ImportOptions, ProductStore, SqliteStore, DEFAULT_BATCH_SIZE};

#[derive(Parser)]
#[command(name = "product-importer")]
#[command(about = "Import products from a delimited catalog file", long_about = None)]
#[command(version)]
struct Cli {
    /// The path to the source csv file
    #[arg(long)]
    source: PathBuf,
    /// Path to the SQLite product database (created if missing)
    #[arg(long, default_value = "products.db")]
    database: PathBuf,
    /// Field delimiter used in the source file
    #[arg(long, default_value = ";")]
    delimiter: char,
    /// Number of rows per persistence batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    /// Set the log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over the --log flag.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if !cli.delimiter.is_ascii() {
        bail!(
            "Delimiter must be a single ASCII character, got '{}'",
            cli.delimiter
        );
    }
    if cli.batch_size == 0 {
        bail!("Batch size must be at least 1");
    }

    let options = ImportOptions {
        delimiter: cli.delimiter as u8,
        batch_size: cli.batch_size,
    };

    let mut store = SqliteStore::open(&cli.database)?;

    // Row-level errors are counted and logged, never fatal; only a missing
    // file or a store failure exits non-zero.
    let state = run_import(&mut store, &cli.source, &options)
        .with_context(|| format!("Import from \"{}\" failed", cli.source.display()))?;

    tracing::debug!(
        "Store now holds {} products",
        store.count().unwrap_or_default()
    );
    tracing::debug!(
        "Run totals: created={} updated={} skipped={} errors={}",
        state.created,
        state.updated,
        state.skipped,
        state.errors
    );

    Ok(())
}
