//! # Stock Search
//!
//! Backs the search box above the inventory table.

use crate::types::StockItem;

/// Returns the items whose product name or category contains `term`,
/// ignoring case, in their original order.
///
/// The term is trimmed first; an empty term matches every item. The input
/// slice is never modified, so the same snapshot can be filtered repeatedly.
///
/// ## Example
/// ```rust
/// use comptoir_core::filter::filter_stock;
///
/// assert!(filter_stock(&[], "laptop").is_empty());
/// ```
pub fn filter_stock<'a>(stock: &'a [StockItem], term: &str) -> Vec<&'a StockItem> {
    let needle = term.trim().to_lowercase();

    if needle.is_empty() {
        return stock.iter().collect();
    }

    stock
        .iter()
        .filter(|item| {
            item.product_name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
        })
        .collect()
}
