// ABOUTME: SQLite-backed product store
// ABOUTME: Buffers writes per batch and commits them in one transaction on flush

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

use super::{Product, ProductStore};

#[derive(Debug)]
enum PendingWrite {
    Insert(Product),
    Update(Product),
}

/// Product store on a single SQLite database.
///
/// `insert`/`update` only record pending writes; `flush` applies them inside
/// one transaction. Looked-up products are cached by sku so change detection
/// against rows in the same batch stays cheap; `clear` drops that cache.
pub struct SqliteStore {
    conn: Connection,
    pending: Vec<PendingWrite>,
    cache: HashMap<String, Product>,
}

impl SqliteStore {
    /// Open (or create) the product database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open product database \"{}\"", path.display()))?;
        Self::with_connection(conn)
    }

    /// In-memory store, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS product (
                sku TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                normal_price REAL NOT NULL,
                special_price REAL
            )",
            [],
        )
        .context("Failed to create product table")?;

        Ok(Self {
            conn,
            pending: Vec::new(),
            cache: HashMap::new(),
        })
    }
}

impl ProductStore for SqliteStore {
    fn find_by_sku(&mut self, sku: &str) -> Result<Option<Product>> {
        if let Some(product) = self.cache.get(sku) {
            return Ok(Some(product.clone()));
        }

        let product = self
            .conn
            .query_row(
                "SELECT sku, description, normal_price, special_price \
                 FROM product WHERE sku = ?1",
                params![sku],
                |row| {
                    Ok(Product {
                        sku: row.get(0)?,
                        description: row.get(1)?,
                        normal_price: row.get(2)?,
                        special_price: row.get(3)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("Failed to look up product \"{}\"", sku))?;

        if let Some(ref product) = product {
            self.cache.insert(product.sku.clone(), product.clone());
        }

        Ok(product)
    }

    fn count(&mut self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))
            .context("Failed to count products")?;
        Ok(count as u64)
    }

    fn insert(&mut self, product: Product) -> Result<()> {
        self.cache.insert(product.sku.clone(), product.clone());
        self.pending.push(PendingWrite::Insert(product));
        Ok(())
    }

    fn update(&mut self, product: Product) -> Result<()> {
        self.cache.insert(product.sku.clone(), product.clone());
        self.pending.push(PendingWrite::Update(product));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let pending = std::mem::take(&mut self.pending);
        let written = pending.len();

        let tx = self
            .conn
            .transaction()
            .context("Failed to start flush transaction")?;

        for write in pending {
            match write {
                PendingWrite::Insert(p) => {
                    tx.execute(
                        "INSERT INTO product (sku, description, normal_price, special_price) \
                         VALUES (?1, ?2, ?3, ?4)",
                        params![p.sku, p.description, p.normal_price, p.special_price],
                    )
                    .with_context(|| format!("Failed to insert product \"{}\"", p.sku))?;
                }
                PendingWrite::Update(p) => {
                    tx.execute(
                        "UPDATE product \
                         SET description = ?2, normal_price = ?3, special_price = ?4 \
                         WHERE sku = ?1",
                        params![p.sku, p.description, p.normal_price, p.special_price],
                    )
                    .with_context(|| format!("Failed to update product \"{}\"", p.sku))?;
                }
            }
        }

        tx.commit().context("Failed to commit flush transaction")?;
        tracing::debug!("Flushed {} pending writes", written);

        Ok(())
    }

    fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, normal: f64, special: Option<f64>) -> Product {
        Product {
            sku: sku.to_string(),
            description: format!("description of {}", sku),
            normal_price: normal,
            special_price: special,
        }
    }

    #[test]
    fn test_empty_store() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.find_by_sku("missing").unwrap().is_none());
    }

    #[test]
    fn test_insert_and_flush() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(product("a", 2.0, Some(1.0))).unwrap();
        store.insert(product("b", 3.5, None)).unwrap();

        // Nothing persisted until flush.
        assert_eq!(store.count().unwrap(), 0);

        store.flush().unwrap();
        assert_eq!(store.count().unwrap(), 2);

        store.clear();
        let found = store.find_by_sku("a").unwrap().unwrap();
        assert_eq!(found, product("a", 2.0, Some(1.0)));
    }

    #[test]
    fn test_pending_insert_visible_before_flush() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(product("a", 2.0, None)).unwrap();

        let found = store.find_by_sku("a").unwrap();
        assert_eq!(found, Some(product("a", 2.0, None)));
    }

    #[test]
    fn test_update_overwrites_fields() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(product("a", 2.0, Some(1.0))).unwrap();
        store.flush().unwrap();

        store.update(product("a", 4.0, None)).unwrap();
        store.flush().unwrap();
        store.clear();

        let found = store.find_by_sku("a").unwrap().unwrap();
        assert_eq!(found.normal_price, 4.0);
        assert_eq!(found.special_price, None);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_flush_with_nothing_pending_is_a_noop() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.flush().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_clear_drops_cache_not_data() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(product("a", 2.0, None)).unwrap();
        store.flush().unwrap();
        store.clear();

        // Re-reads from the database after the cache is gone.
        assert!(store.find_by_sku("a").unwrap().is_some());
    }

    #[test]
    fn test_null_special_price_round_trips() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(product("a", 2.55, None)).unwrap();
        store.flush().unwrap();
        store.clear();

        let found = store.find_by_sku("a").unwrap().unwrap();
        assert_eq!(found.special_price, None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.insert(product("a", 2.0, Some(1.0))).unwrap();
            store.flush().unwrap();
        }

        let mut store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.find_by_sku("a").unwrap().is_some());
    }
}
