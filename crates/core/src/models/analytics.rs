use serde::{Deserialize, Serialize};

use super::product::Product;

/// Summary of the metrics inside the selected window.
///
/// Recomputed on every read; carries no identity of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of daily revenue
    pub total_revenue: f64,

    /// Sum of daily ad spend
    pub total_ad_spend: f64,

    /// Sum of daily net profit
    pub total_profit: f64,

    /// Sum of daily order counts
    pub total_orders: u64,

    /// Return on investment: `total_profit / total_ad_spend * 100`, or 0 without spend
    pub avg_roi: f64,

    /// Return on ad spend: `total_revenue / total_ad_spend`, or 0 without spend
    pub avg_roas: f64,

    /// Customer acquisition cost: `total_ad_spend / total_orders`, or 0 without orders
    pub avg_cac: f64,
}

/// Configured share of the ad budget going to one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelShare {
    /// Platform name (e.g., "Facebook Ads")
    pub name: String,

    /// Percentage of total ad spend, 0..=100
    pub percent: f64,
}

impl ChannelShare {
    pub fn new(name: impl Into<String>, percent: f64) -> Self {
        Self {
            name: name.into(),
            percent,
        }
    }
}

/// Ad spend attributed to one platform for the selected window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpend {
    pub name: String,
    pub percent: f64,
    pub spend: f64,
}

/// Per-product view used by the SKU performance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product: Product,

    /// Revenue still expected from undelivered orders: `predicted - gross`
    pub pending_revenue: f64,

    /// `gross_revenue - product_cost`
    pub gross_margin: f64,

    /// Delivery rate at or below the review threshold
    pub needs_review: bool,
}
