//! Stock signal derivation and fuzzy product/inventory matching.

use serde::{Deserialize, Serialize};

use crate::types::InventoryItem;

/// Inventory health of a product relative to its safety stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockSignal {
    Red,
    Green,
}

impl StockSignal {
    /// `Red` iff a safety stock is set and inventory is below it.
    #[must_use]
    pub fn from_levels(inventory: f64, safety_stock: f64) -> Self {
        if safety_stock > 0.0 && inventory < safety_stock {
            StockSignal::Red
        } else {
            StockSignal::Green
        }
    }

    #[must_use]
    pub fn for_item(item: &InventoryItem) -> Self {
        Self::from_levels(item.inventory, item.safety_stock)
    }

    #[must_use]
    pub fn is_low(self) -> bool {
        self == StockSignal::Red
    }
}

/// Exact or bidirectional substring match. Blank names never match.
fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(b) || b.contains(a)
}

/// Finds the inventory row for `product_name`, preferring rows in `store_name`.
///
/// Falls back to the first name-only match in input order when no row matches
/// both product and store.
#[must_use]
pub fn find_inventory_match<'a>(
    items: &'a [InventoryItem],
    product_name: &str,
    store_name: Option<&str>,
) -> Option<&'a InventoryItem> {
    let mut by_name = items
        .iter()
        .filter(|row| names_match(&row.product_name, product_name));

    let Some(store) = store_name else {
        return by_name.next();
    };

    let mut first_name_only = None;
    for row in by_name {
        if names_match(&row.store_name, store) {
            return Some(row);
        }
        first_name_only.get_or_insert(row);
    }
    first_name_only
}
