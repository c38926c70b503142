use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of financial figures, stored in the display currency.
///
/// Records are immutable once they enter the dashboard: there is no update
/// or delete path, only whole-collection replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    /// Calendar day (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,

    /// Gross revenue for the day
    pub revenue: f64,

    /// Advertising spend across all channels
    pub ad_spend: f64,

    /// Shipping paid to the logistics provider
    pub shipping_costs: f64,

    /// Cost of goods sold
    pub product_costs: f64,

    /// `revenue - ad_spend - shipping_costs - product_costs`, fixed at creation.
    /// May be negative.
    pub net_profit: f64,

    /// Number of orders placed that day
    pub orders: u32,
}

impl DailyMetric {
    /// Recompute the profit from the stored cost columns.
    /// Useful for checking that a record still satisfies its creation invariant.
    #[must_use]
    pub fn expected_net_profit(&self) -> f64 {
        self.revenue - self.ad_spend - self.shipping_costs - self.product_costs
    }
}

/// A manual entry as typed in by the operator, in the source currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub date: NaiveDate,
    pub revenue: f64,
    pub ad_spend: f64,
    pub orders: u32,

    /// Shipping for the day. `None` and `Some(0.0)` both mean "use the
    /// per-order default".
    #[serde(default)]
    pub shipping_costs: Option<f64>,

    /// Product costs for the day, `None` means zero.
    #[serde(default)]
    pub product_costs: Option<f64>,
}

impl RawEntry {
    /// Entry with no explicit shipping or product costs.
    pub fn new(date: NaiveDate, revenue: f64, ad_spend: f64, orders: u32) -> Self {
        Self {
            date,
            revenue,
            ad_spend,
            orders,
            shipping_costs: None,
            product_costs: None,
        }
    }

    pub fn with_shipping(mut self, shipping_costs: f64) -> Self {
        self.shipping_costs = Some(shipping_costs);
        self
    }

    pub fn with_product_costs(mut self, product_costs: f64) -> Self {
        self.product_costs = Some(product_costs);
        self
    }
}
