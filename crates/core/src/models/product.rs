use serde::{Deserialize, Serialize};

/// A catalogue item sold through the store, figures in display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,

    /// Thumbnail URL
    pub image: String,

    pub orders: u32,

    /// Share of orders actually delivered, in percent
    pub delivery_rate: f64,

    /// Revenue from delivered orders
    pub gross_revenue: f64,

    /// Revenue if every placed order is delivered
    pub predicted_revenue: f64,

    pub product_cost: f64,
}
