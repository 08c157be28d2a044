//! # Metrics Engine
//!
//! Pure functions deriving the dashboard figures from a record snapshot.
//!
//! ## Derivations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales ──────► Σ total ──────────────► total_revenue ──┐                │
//! │                                                        ├─► estimated    │
//! │  expenses ───► Σ amount ─────────────► total_expenses ─┘     profit     │
//! │                                                                         │
//! │  stock ──────► Σ quantity × cost ────► stock_value  (sums saturate)     │
//! │        └─────► StockItem::health() ──► out / low / healthy counts       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached or maintained incrementally: every call recomputes
//! from the slices it is given, and every result is independent of the
//! order of the input.

use serde::Serialize;

use crate::activity::ActivityEntry;
use crate::money::Money;
use crate::store::RecordStore;
use crate::types::{
    DashboardKpis, ExpenseRecord, ProductRevenue, SaleRecord, StockHealth, StockItem, StockStats,
};

/// Computes the four headline KPIs.
///
/// ## Example
/// ```rust
/// use comptoir_core::metrics::compute_kpis;
///
/// let kpis = compute_kpis(&[], &[], &[]);
/// assert!(kpis.total_revenue.is_zero());
/// assert!(kpis.estimated_profit.is_zero());
/// ```
pub fn compute_kpis(
    sales: &[SaleRecord],
    expenses: &[ExpenseRecord],
    stock: &[StockItem],
) -> DashboardKpis {
    let total_revenue: Money = sales.iter().map(|s| s.total).sum();
    let total_expenses: Money = expenses.iter().map(|e| e.amount).sum();
    let stock_value: Money = stock.iter().map(StockItem::stock_value).sum();

    DashboardKpis {
        total_revenue,
        total_expenses,
        stock_value,
        estimated_profit: total_revenue - total_expenses,
    }
}

/// Counts stock items per health class and totals the units on hand.
///
/// Each item lands in exactly one class, so the three counts always add up
/// to `stock.len()`.
pub fn compute_stock_stats(stock: &[StockItem]) -> StockStats {
    stock
        .iter()
        .fold(StockStats::default(), |mut stats, item| {
            match item.health() {
                StockHealth::OutOfStock => stats.out_of_stock += 1,
                StockHealth::Low => stats.low_stock += 1,
                StockHealth::Healthy => stats.healthy_stock += 1,
            }
            stats.total_items = stats.total_items.saturating_add(item.quantity);
            stats
        })
}

/// Items at or below their threshold, in inventory order.
///
/// Out-of-stock items are included: the critical panel lists everything the
/// operator needs to reorder.
pub fn critical_stock(stock: &[StockItem]) -> Vec<StockItem> {
    stock
        .iter()
        .filter(|item| item.needs_attention())
        .cloned()
        .collect()
}

/// Revenue and units per product name, in order of first appearance.
pub fn revenue_by_product(sales: &[SaleRecord]) -> Vec<ProductRevenue> {
    let mut rows: Vec<ProductRevenue> = Vec::new();

    for sale in sales {
        match rows.iter_mut().find(|r| r.product_name == sale.product_name) {
            Some(row) => {
                row.quantity = row.quantity.saturating_add(sale.quantity);
                row.revenue += sale.total;
            }
            None => rows.push(ProductRevenue {
                product_name: sale.product_name.clone(),
                quantity: sale.quantity,
                revenue: sale.total,
            }),
        }
    }

    rows
}

/// Everything the dashboard view renders, computed in one pass over a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub kpis: DashboardKpis,
    pub stock_stats: StockStats,
    pub critical_stock: Vec<StockItem>,
    pub revenue_by_product: Vec<ProductRevenue>,
    pub recent_activity: Vec<ActivityEntry>,
}

impl DashboardSnapshot {
    /// Builds the snapshot from the store and the current activity feed.
    pub fn build(store: &RecordStore, recent_activity: Vec<ActivityEntry>) -> Self {
        DashboardSnapshot {
            kpis: compute_kpis(store.sales(), store.expenses(), store.stock()),
            stock_stats: compute_stock_stats(store.stock()),
            critical_stock: critical_stock(store.stock()),
            revenue_by_product: revenue_by_product(store.sales()),
            recent_activity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()
    }

    fn sale(id: &str, name: &str, quantity: i64, unit_price: i64) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            date: date(),
            product_id: "P001".to_string(),
            product_name: name.to_string(),
            quantity,
            unit_price: Money::new(unit_price),
            total: Money::new(quantity * unit_price),
        }
    }

    fn expense(amount: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: "D001".to_string(),
            date: date(),
            category: "Loyer".to_string(),
            description: "Bureau".to_string(),
            amount: Money::new(amount),
        }
    }

    fn item(id: &str, quantity: i64, min_threshold: i64, cost: i64) -> StockItem {
        StockItem {
            id: id.to_string(),
            product_name: format!("Produit {}", id),
            category: "Divers".to_string(),
            quantity,
            min_threshold,
            purchase_cost: Money::new(cost),
            selling_price: Money::new(cost * 2),
            supplier: "Inconnu".to_string(),
        }
    }

    #[test]
    fn test_kpi_scenario() {
        let sales = vec![sale("V1", "Laptop", 2, 100)];
        let expenses = vec![expense(50)];
        let stock = vec![item("P1", 10, 5, 5)];

        let kpis = compute_kpis(&sales, &expenses, &stock);

        assert_eq!(kpis.total_revenue, Money::new(200));
        assert_eq!(kpis.total_expenses, Money::new(50));
        assert_eq!(kpis.stock_value, Money::new(50));
        assert_eq!(kpis.estimated_profit, Money::new(150));
    }

    #[test]
    fn test_empty_collections_yield_zero() {
        assert_eq!(compute_kpis(&[], &[], &[]), DashboardKpis::default());
        assert_eq!(compute_stock_stats(&[]), StockStats::default());
    }

    #[test]
    fn test_profit_can_be_negative() {
        let kpis = compute_kpis(&[], &[expense(25_000)], &[]);
        assert_eq!(kpis.estimated_profit, Money::new(-25_000));
    }

    #[test]
    fn test_revenue_uses_stored_total() {
        // A record whose total disagrees with quantity × price still
        // contributes its stored total.
        let mut odd = sale("V1", "Laptop", 2, 100);
        odd.total = Money::new(150);
        let kpis = compute_kpis(&[odd], &[], &[]);
        assert_eq!(kpis.total_revenue, Money::new(150));
    }

    #[test]
    fn test_stock_stats_classification() {
        let stock = vec![
            item("P1", 0, 10, 1),
            item("P2", 5, 5, 1),
            item("P3", 6, 5, 1),
            item("P4", 3, 5, 1),
        ];

        let stats = compute_stock_stats(&stock);

        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.low_stock, 2);
        assert_eq!(stats.healthy_stock, 1);
        assert_eq!(stats.total_items, 14);
        assert_eq!(stats.item_count(), stock.len());
    }

    #[test]
    fn test_critical_stock_keeps_order() {
        let stock = vec![
            item("P1", 15, 5, 1),
            item("P2", 3, 5, 1),
            item("P3", 0, 10, 1),
            item("P4", 45, 10, 1),
        ];

        let ids: Vec<_> = critical_stock(&stock).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["P2", "P3"]);
    }

    #[test]
    fn test_revenue_by_product_groups_by_name() {
        let sales = vec![
            sale("V1", "Laptop Pro", 2, 780_000),
            sale("V2", "Monitor 4K", 5, 260_000),
            sale("V3", "Laptop Pro", 1, 780_000),
        ];

        let rows = revenue_by_product(&sales);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "Laptop Pro");
        assert_eq!(rows[0].quantity, 3);
        assert_eq!(rows[0].revenue, Money::new(2_340_000));
        assert_eq!(rows[1].revenue, Money::new(1_300_000));
    }
}
