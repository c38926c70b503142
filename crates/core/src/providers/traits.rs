use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::insight::Insight;
use crate::models::metric::DailyMetric;

/// Trait abstraction for the service that writes advice about the metrics.
///
/// The dashboard only depends on this trait; swapping the model vendor
/// means adding one implementation, nothing else changes.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InsightProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Produce insights for the given window of metrics.
    /// Callers pass the filtered window, never the whole collection.
    async fn get_insights(&self, metrics: &[DailyMetric]) -> Result<Vec<Insight>, CoreError>;
}
