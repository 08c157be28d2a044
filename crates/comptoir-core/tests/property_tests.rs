//! Property-based tests for the dashboard engine.
//!
//! These check the invariants the dashboard relies on across arbitrary
//! record collections rather than hand-picked scenarios.

use chrono::NaiveDate;
use proptest::prelude::*;

use comptoir_core::activity::{ActivityKind, ActivityLog};
use comptoir_core::filter::filter_stock;
use comptoir_core::metrics::{compute_kpis, compute_stock_stats};
use comptoir_core::store::{RecordStore, MAX_STOCK_QUANTITY};
use comptoir_core::validation::parse_quantity_input;
use comptoir_core::{
    ExpenseRecord, Money, NewSale, NewStockItem, SaleRecord, StockHealth, StockItem,
    ACTIVITY_LOG_CAPACITY,
};

// Strategies for generating test data
fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()
}

fn sale_strategy() -> impl Strategy<Value = SaleRecord> {
    (0i64..1_000, 0i64..10_000_000).prop_map(|(quantity, price)| SaleRecord {
        id: "V001".to_string(),
        date: date(),
        product_id: "P001".to_string(),
        product_name: "Laptop Pro".to_string(),
        quantity,
        unit_price: Money::new(price),
        total: Money::new(quantity * price),
    })
}

fn expense_strategy() -> impl Strategy<Value = ExpenseRecord> {
    (0i64..100_000_000).prop_map(|amount| ExpenseRecord {
        id: "D001".to_string(),
        date: date(),
        category: "Loyer".to_string(),
        description: "Bureau".to_string(),
        amount: Money::new(amount),
    })
}

fn stock_strategy() -> impl Strategy<Value = StockItem> {
    (
        "[A-Za-z ]{1,12}",
        prop_oneof!["Informatique", "Accessoires", "Divers"],
        0i64..500,
        0i64..50,
        0i64..1_000_000,
    )
        .prop_map(|(name, category, quantity, min_threshold, cost)| StockItem {
            id: "P001".to_string(),
            product_name: name,
            category: category.to_string(),
            quantity,
            min_threshold,
            purchase_cost: Money::new(cost),
            selling_price: Money::new(cost * 2),
            supplier: "Inconnu".to_string(),
        })
}

// Property: KPIs are plain sums over the collections
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn revenue_is_sum_of_totals(
        sales in prop::collection::vec(sale_strategy(), 0..20),
        expenses in prop::collection::vec(expense_strategy(), 0..20),
    ) {
        let kpis = compute_kpis(&sales, &expenses, &[]);
        let revenue: i64 = sales.iter().map(|s| s.total.amount()).sum();
        let spent: i64 = expenses.iter().map(|e| e.amount.amount()).sum();

        prop_assert_eq!(kpis.total_revenue.amount(), revenue);
        prop_assert_eq!(kpis.total_expenses.amount(), spent);
        prop_assert_eq!(kpis.estimated_profit.amount(), revenue - spent);
    }

    #[test]
    fn kpis_ignore_input_order(
        mut sales in prop::collection::vec(sale_strategy(), 0..20),
        mut stock in prop::collection::vec(stock_strategy(), 0..20),
    ) {
        let before = compute_kpis(&sales, &[], &stock);
        sales.reverse();
        stock.reverse();
        prop_assert_eq!(compute_kpis(&sales, &[], &stock), before);
    }
}

// Property: stock health classes partition the inventory
proptest! {
    #[test]
    fn stock_classes_are_exhaustive(stock in prop::collection::vec(stock_strategy(), 0..30)) {
        let stats = compute_stock_stats(&stock);

        prop_assert_eq!(stats.item_count(), stock.len());
        prop_assert_eq!(stats.total_items, stock.iter().map(|i| i.quantity).sum::<i64>());
        let out = stock.iter().filter(|i| i.health() == StockHealth::OutOfStock).count();
        prop_assert_eq!(stats.out_of_stock, out);
    }

    #[test]
    fn threshold_itself_is_low(threshold in 1i64..1_000) {
        let mut item = fixed_item();
        item.quantity = threshold;
        item.min_threshold = threshold;
        prop_assert_eq!(item.health(), StockHealth::Low);
    }
}

fn fixed_item() -> StockItem {
    StockItem {
        id: "P001".to_string(),
        product_name: "Laptop Pro".to_string(),
        category: "Informatique".to_string(),
        quantity: 0,
        min_threshold: 0,
        purchase_cost: Money::zero(),
        selling_price: Money::zero(),
        supplier: "TechCorp".to_string(),
    }
}

// Property: filtering is an order-preserving subset
proptest! {
    #[test]
    fn filter_returns_ordered_subset(
        stock in prop::collection::vec(stock_strategy(), 0..20),
        term in "[a-zA-Z]{0,4}",
    ) {
        let found = filter_stock(&stock, &term);
        prop_assert!(found.len() <= stock.len());

        // Every hit appears in the input, after the previous hit.
        let mut cursor = 0;
        for hit in found {
            let offset = stock[cursor..]
                .iter()
                .position(|item| std::ptr::eq(item, hit));
            prop_assert!(offset.is_some());
            cursor += offset.unwrap_or(0) + 1;
        }
    }

    #[test]
    fn blank_term_matches_everything(
        stock in prop::collection::vec(stock_strategy(), 0..20),
        term in "\\s{0,3}",
    ) {
        prop_assert_eq!(filter_stock(&stock, &term).len(), stock.len());
    }
}

// Property: the activity log never outgrows its capacity
proptest! {
    #[test]
    fn activity_log_is_bounded(count in 0usize..40) {
        let mut log = ActivityLog::new();
        for i in 0..count {
            log.record(ActivityKind::System, format!("event {}", i));
        }

        prop_assert_eq!(log.len(), count.min(ACTIVITY_LOG_CAPACITY));
        if count > 0 {
            let newest = format!("event {}", count - 1);
            prop_assert_eq!(log.latest().map(|e| e.message.clone()), Some(newest));
        }
    }
}

// Property: stored quantities stay in range and the dashboard still renders
proptest! {
    #[test]
    fn updated_quantity_is_clamped(requested in any::<i64>(), cost in any::<i64>()) {
        let mut store = RecordStore::new();
        store
            .add_stock_item(NewStockItem {
                purchase_cost: Some(Money::new(cost.max(0))),
                ..NewStockItem::default()
            })
            .unwrap();
        store.update_stock_quantity("P001", requested);

        prop_assert_eq!(
            store.stock()[0].quantity,
            requested.clamp(0, MAX_STOCK_QUANTITY)
        );

        let kpis = compute_kpis(store.sales(), store.expenses(), store.stock());
        prop_assert!(kpis.stock_value.amount() >= 0);
        let stats = compute_stock_stats(store.stock());
        prop_assert_eq!(stats.total_items, store.stock()[0].quantity);
    }

    #[test]
    fn sale_totals_never_overflow(quantity in 0i64..=i64::MAX, price in 0i64..=i64::MAX) {
        let mut store = RecordStore::new();
        let draft = NewSale {
            quantity: Some(quantity),
            unit_price: Some(Money::new(price)),
            ..NewSale::default()
        };

        match store.add_sale(draft, date()) {
            Ok(sale) => prop_assert_eq!(Some(sale.total.amount()), quantity.checked_mul(price)),
            Err(_) => prop_assert!(quantity.checked_mul(price).is_none()),
        }

        let kpis = compute_kpis(store.sales(), store.expenses(), store.stock());
        prop_assert!(kpis.total_revenue.amount() >= 0);
    }

    #[test]
    fn parsed_digits_round_trip(n in 0i64..1_000_000_000) {
        prop_assert_eq!(parse_quantity_input(&n.to_string()), n);
        prop_assert_eq!(parse_quantity_input(&format!("-{}", n)), -n);
    }
}
