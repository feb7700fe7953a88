// ABOUTME: Batch runner driving a full import over a catalog file
// ABOUTME: Owns the run counters and flushes the store in bounded batches

use anyhow::{bail, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::reader::{RowSource, DEFAULT_DELIMITER};
use crate::reconcile::reconcile;
use crate::store::ProductStore;

/// Rows per persistence batch unless overridden.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Options for one import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Field delimiter in the source file.
    pub delimiter: u8,
    /// Pending writes are flushed and in-memory tracking cleared every this
    /// many rows.
    pub batch_size: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Counters and duplicate tracking for a single run. Owned by the runner
/// and returned to the caller once the summary is emitted.
#[derive(Debug, Default)]
pub struct RunState {
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    pub errors: u64,
    seen_skus: HashSet<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this sku was already created or updated earlier in the run.
    pub fn is_duplicate(&self, sku: &str) -> bool {
        self.seen_skus.contains(sku)
    }

    /// Record a sku as handled so later occurrences are rejected.
    pub fn register(&mut self, sku: String) {
        self.seen_skus.insert(sku);
    }

    /// The summary lines for this run, in fixed order. Zero counters stay
    /// silent; the finished marker is unconditional.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec!["Import is finished".to_string()];
        if self.errors > 0 {
            lines.push(format!("{} rows with errors", self.errors));
        }
        if self.created > 0 {
            lines.push(format!("{} products created", self.created));
        }
        if self.updated > 0 {
            lines.push(format!("{} products updated", self.updated));
        }
        if self.skipped > 0 {
            lines.push(format!("{} products skipped", self.skipped));
        }
        lines
    }
}

/// Run a full import of the catalog file at `source` against the store.
///
/// Rows are processed strictly in file order. Row-level problems are logged
/// and counted, never abort the run; a missing file or a store failure is
/// fatal and propagates. The store is flushed and cleared at every batch
/// boundary and once more after the last row; an empty file flushes nothing.
pub fn run_import(
    store: &mut dyn ProductStore,
    source: &Path,
    options: &ImportOptions,
) -> Result<RunState> {
    if !source.exists() {
        bail!("File \"{}\" does not exist", source.display());
    }

    tracing::info!("Import is started");

    let existing = store.count()?;
    tracing::debug!("{} products in the store before import", existing);

    let mut state = RunState::new();
    let mut rows_read: u64 = 0;

    for row_result in RowSource::open(source, options.delimiter)? {
        let row = row_result?;
        rows_read += 1;
        reconcile(store, &row, rows_read, &mut state)?;

        if rows_read % options.batch_size as u64 == 0 {
            store.flush()?;
            store.clear();
        }
    }

    // Final flush for the trailing partial batch. An empty file stays
    // flush-free.
    if rows_read > 0 {
        store.flush()?;
        store.clear();
    }

    for line in state.summary_lines() {
        tracing::info!("{}", line);
    }

    Ok(state)
}
