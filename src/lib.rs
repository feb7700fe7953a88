// ABOUTME: Library surface for the product catalog importer
// ABOUTME: Exposes the row model, validation, store, reconciler and runner

pub mod escape;
pub mod model;
pub mod reader;
pub mod reconcile;
pub mod runner;
pub mod store;
pub mod validate;

pub use model::CsvRow;
pub use reconcile::{products_differ, reconcile, Outcome};
pub use runner::{run_import, ImportOptions, RunState, DEFAULT_BATCH_SIZE};
pub use store::{Product, ProductStore, SqliteStore};
pub use validate::{validate, Violation};
