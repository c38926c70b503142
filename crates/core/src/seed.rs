use chrono::{Days, NaiveDate};

use crate::models::metric::{DailyMetric, RawEntry};
use crate::models::product::Product;
use crate::services::entry_service::EntryService;

/// Startup rows in source currency: (days ago, revenue, ad spend, orders, shipping, product costs).
const SEED_ROWS: [(u64, f64, f64, u32, f64, f64); 3] = [
    (0, 15500.0, 4200.0, 55, 1815.0, 3800.0),
    (1, 14200.0, 3500.0, 52, 1716.0, 4100.0),
    (2, 11800.0, 3800.0, 38, 1254.0, 3700.0),
];

/// Seed metrics for the last three days, already converted to display currency.
/// Returned sorted by date, oldest first.
pub fn seed_metrics(entry_service: &EntryService, today: NaiveDate) -> Vec<DailyMetric> {
    SEED_ROWS
        .iter()
        .rev()
        .filter_map(|&(days_ago, revenue, ad_spend, orders, shipping, product)| {
            let date = today.checked_sub_days(Days::new(days_ago))?;
            let raw = RawEntry::new(date, revenue, ad_spend, orders)
                .with_shipping(shipping)
                .with_product_costs(product);
            Some(entry_service.build_metric(&raw))
        })
        .collect()
}

/// Starting product catalogue, figures in display currency.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "BOLSO TRIBAL – NUEVA EDICION ESPECIAL".into(),
            image: "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=100&h=100&fit=crop".into(),
            orders: 12,
            delivery_rate: 25.0,
            gross_revenue: 205.42,
            predicted_revenue: 821.64,
            product_cost: 0.0,
        },
        Product {
            id: "2".into(),
            name: "Conjunto manga rangla adidas Ref: 2266".into(),
            image: "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=100&h=100&fit=crop".into(),
            orders: 1,
            delivery_rate: 0.0,
            gross_revenue: 0.0,
            predicted_revenue: 0.0,
            product_cost: 0.0,
        },
        Product {
            id: "3".into(),
            name: "CAMISETA COL + GORRA ADIDAS IMPORT 1.1".into(),
            image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=100&h=100&fit=crop".into(),
            orders: 45,
            delivery_rate: 68.0,
            gross_revenue: 4250.0,
            predicted_revenue: 6250.0,
            product_cost: 1200.0,
        },
    ]
}
