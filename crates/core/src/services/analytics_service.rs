use crate::models::analytics::{ChannelShare, ChannelSpend, DashboardStats, ProductSummary};
use crate::models::metric::DailyMetric;
use crate::models::product::Product;

/// Delivery rate (percent) at or below which a product is flagged for review.
pub const REVIEW_DELIVERY_RATE: f64 = 30.0;

/// Computes dashboard analytics: totals, ROI/ROAS/CAC and breakdowns.
///
/// Every ratio guards its denominator and falls back to 0, so an empty
/// window yields all-zero stats rather than NaN or infinity.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Reduce a window of daily metrics to its summary statistics.
    pub fn compute_stats(&self, records: &[DailyMetric]) -> DashboardStats {
        let mut total_revenue = 0.0;
        let mut total_ad_spend = 0.0;
        let mut total_profit = 0.0;
        let mut total_orders: u64 = 0;

        for m in records {
            total_revenue += m.revenue;
            total_ad_spend += m.ad_spend;
            total_profit += m.net_profit;
            total_orders += u64::from(m.orders);
        }

        let avg_roi = if total_ad_spend > 0.0 {
            (total_profit / total_ad_spend) * 100.0
        } else {
            0.0
        };
        let avg_roas = if total_ad_spend > 0.0 {
            total_revenue / total_ad_spend
        } else {
            0.0
        };
        let avg_cac = if total_orders > 0 {
            total_ad_spend / total_orders as f64
        } else {
            0.0
        };

        DashboardStats {
            total_revenue,
            total_ad_spend,
            total_profit,
            total_orders,
            avg_roi,
            avg_roas,
            avg_cac,
        }
    }

    /// Split the window's ad spend across the configured platforms.
    pub fn channel_breakdown(&self, total_ad_spend: f64, shares: &[ChannelShare]) -> Vec<ChannelSpend> {
        shares
            .iter()
            .map(|share| ChannelSpend {
                name: share.name.clone(),
                percent: share.percent,
                spend: total_ad_spend * share.percent / 100.0,
            })
            .collect()
    }

    /// Per-product revenue gap and margin, worst delivery rate first.
    pub fn product_summaries(&self, products: &[Product]) -> Vec<ProductSummary> {
        let mut summaries: Vec<ProductSummary> = products
            .iter()
            .map(|p| ProductSummary {
                product: p.clone(),
                pending_revenue: (p.predicted_revenue - p.gross_revenue).max(0.0),
                gross_margin: p.gross_revenue - p.product_cost,
                needs_review: p.delivery_rate <= REVIEW_DELIVERY_RATE,
            })
            .collect();

        summaries.sort_by(|a, b| {
            a.product
                .delivery_rate
                .partial_cmp(&b.product.delivery_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        summaries
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
