use serde::{Deserialize, Serialize};

use super::insight::Insight;
use super::metric::DailyMetric;
use super::period::Period;
use super::product::Product;

/// The main state container behind the dashboard screens.
///
/// Owned by the tracker and passed by reference to the services; nothing
/// in here is global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    /// Daily metrics, kept sorted by date (oldest first)
    pub metrics: Vec<DailyMetric>,

    /// Product catalogue for the SKU view
    pub products: Vec<Product>,

    /// Window the summary cards and insights are computed for
    pub selected_period: Period,

    /// Last insights received for the selected window
    pub insights: Vec<Insight>,

    /// Whether the operator passed the login screen
    pub authenticated: bool,
}
