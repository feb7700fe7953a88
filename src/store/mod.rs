// ABOUTME: Record store interface for persisted products
// ABOUTME: Explicit repository contract: find, count, insert, update, flush, clear

pub mod sqlite;

pub use sqlite::SqliteStore;

use anyhow::Result;

/// A persisted product. The sku is the primary key and is never compared by
/// the change detector; the special price, when present, is below the normal
/// price by the time a product reaches the store (validation enforces it).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub sku: String,
    pub description: String,
    pub normal_price: f64,
    pub special_price: Option<f64>,
}

/// The record store the import pipeline writes through.
///
/// Writes are buffered: `insert` and `update` register pending work, and
/// `flush` commits it. `clear` releases whatever in-memory tracking the
/// store keeps between flushes so a long run stays memory-bounded. Products
/// are never deleted by the pipeline.
pub trait ProductStore {
    /// Look up a product by sku. Pending (unflushed) writes are visible.
    fn find_by_sku(&mut self, sku: &str) -> Result<Option<Product>>;

    /// Number of products currently persisted.
    fn count(&mut self) -> Result<u64>;

    /// Register a new product for insertion on the next flush.
    fn insert(&mut self, product: Product) -> Result<()>;

    /// Register changed fields of an existing product for the next flush.
    fn update(&mut self, product: Product) -> Result<()>;

    /// Commit all pending writes.
    fn flush(&mut self) -> Result<()>;

    /// Drop in-memory tracking state accumulated since the last clear.
    fn clear(&mut self);
}
