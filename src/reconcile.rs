// ABOUTME: Per-row reconciliation against the product store
// ABOUTME: Decides create, update, skip or reject and keeps the counters honest

use anyhow::Result;

use crate::model::CsvRow;
use crate::runner::RunState;
use crate::store::{Product, ProductStore};
use crate::validate::validate;

/// Terminal outcome of reconciling one catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Skipped,
    Rejected,
}

/// Build a product from a validated row. Text fields arrive escaped, prices
/// numerically coerced.
pub fn product_from_row(row: &CsvRow) -> Product {
    Product {
        sku: row.sku(),
        description: row.description(),
        normal_price: row.normal_price(),
        special_price: row.special_price(),
    }
}

/// Report whether the persisted product differs from the incoming row in
/// description, normal price or special price. The sku is the lookup key
/// and is never compared. Equality is exact; a row is "unchanged" only when
/// all three fields match.
pub fn products_differ(product: &Product, row: &CsvRow) -> bool {
    product.description != row.description()
        || product.normal_price != row.normal_price()
        || product.special_price != row.special_price()
}

/// Reconcile one row against the store.
///
/// Invalid rows and duplicate skus are rejected and counted as errors;
/// valid rows are created, updated or skipped depending on what the store
/// already holds. Created and updated skus are registered with the
/// duplicate tracker so later occurrences in the same run are rejected.
/// Row numbers are 1-based and only used in log messages.
pub fn reconcile(
    store: &mut dyn ProductStore,
    row: &CsvRow,
    row_num: u64,
    state: &mut RunState,
) -> Result<Outcome> {
    let violations = validate(row);
    if !violations.is_empty() {
        for violation in &violations {
            tracing::error!("Row #{}: {}", row_num, violation.message);
        }
        state.errors += 1;
        return Ok(Outcome::Rejected);
    }

    let sku = row.sku();

    if state.is_duplicate(&sku) {
        tracing::error!(
            "Row #{}: contains duplicate for the product \"{}\"",
            row_num,
            sku
        );
        state.errors += 1;
        return Ok(Outcome::Rejected);
    }

    match store.find_by_sku(&sku)? {
        None => {
            store.insert(product_from_row(row))?;
            state.created += 1;
            state.register(sku.clone());
            tracing::debug!("Row #{}: The product \"{}\" is created", row_num, sku);
            Ok(Outcome::Created)
        }
        Some(existing) if products_differ(&existing, row) => {
            store.update(product_from_row(row))?;
            state.updated += 1;
            state.register(sku.clone());
            tracing::debug!("Row #{}: The product \"{}\" is updated", row_num, sku);
            Ok(Outcome::Updated)
        }
        Some(_) => {
            state.skipped += 1;
            tracing::debug!("Row #{}: The product \"{}\" is unchanged", row_num, sku);
            Ok(Outcome::Skipped)
        }
    }
}
