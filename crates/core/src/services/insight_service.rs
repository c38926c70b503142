use tracing::{info, warn};

use crate::models::insight::Insight;
use crate::models::metric::DailyMetric;
use crate::providers::traits::InsightProvider;

/// Boundary to the insight collaborator.
///
/// Never fails: any provider error is logged and degrades to "no insights".
/// There is no retry, timeout or cancellation here; those belong to the
/// provider.
pub struct InsightService;

impl InsightService {
    pub fn new() -> Self {
        Self
    }

    /// Ask `provider` for insights about the filtered window.
    pub async fn fetch_insights(
        &self,
        provider: &dyn InsightProvider,
        metrics: &[DailyMetric],
    ) -> Vec<Insight> {
        match provider.get_insights(metrics).await {
            Ok(insights) => {
                info!(
                    provider = provider.name(),
                    days = metrics.len(),
                    count = insights.len(),
                    "received insights"
                );
                insights
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "insight fetch failed");
                Vec::new()
            }
        }
    }
}

impl Default for InsightService {
    fn default() -> Self {
        Self::new()
    }
}
