pub mod clock;
pub mod errors;
pub mod logging;
pub mod models;
pub mod providers;
pub mod seed;
pub mod services;

use chrono::NaiveDate;
use clock::{Clock, SystemClock};
use models::{
    analytics::{ChannelSpend, DashboardStats, ProductSummary},
    dashboard::Dashboard,
    insight::Insight,
    metric::{DailyMetric, RawEntry},
    period::{DateRange, Period},
    product::Product,
    settings::Settings,
};
use providers::{gemini::GeminiInsightProvider, traits::InsightProvider};
use services::{
    analytics_service::AnalyticsService, entry_service::EntryService,
    insight_service::InsightService, period_service::PeriodService,
};
use tracing::{debug, info};

use errors::CoreError;

/// Relative tolerance when checking an imported record's profit column.
const PROFIT_TOLERANCE: f64 = 1e-6;

/// Main entry point for the TrackingGT core library.
/// Holds the dashboard state and all services needed to operate on it.
#[must_use]
pub struct TrackingGt {
    dashboard: Dashboard,
    settings: Settings,
    clock: Box<dyn Clock>,
    insight_provider: Option<Box<dyn InsightProvider>>,
    period_service: PeriodService,
    analytics_service: AnalyticsService,
    entry_service: EntryService,
    insight_service: InsightService,
}

impl std::fmt::Debug for TrackingGt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingGt")
            .field("metrics", &self.dashboard.metrics.len())
            .field("products", &self.dashboard.products.len())
            .field("selected_period", &self.dashboard.selected_period)
            .field("authenticated", &self.dashboard.authenticated)
            .field(
                "insight_provider",
                &self.insight_provider.as_ref().map(|p| p.name().to_string()),
            )
            .finish()
    }
}

impl TrackingGt {
    /// Dashboard with default settings, the system clock and the seed data.
    pub fn create_new() -> Self {
        let settings = Settings::default();
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let entry_service = EntryService::from_settings(&settings);
        let metrics = seed::seed_metrics(&entry_service, clock.today());
        Self::build(settings, clock, metrics, seed::seed_products())
    }

    /// Dashboard with custom settings and clock, populated with the seed data.
    pub fn with_settings(settings: Settings, clock: Box<dyn Clock>) -> Result<Self, CoreError> {
        settings.validate()?;
        let entry_service = EntryService::from_settings(&settings);
        let metrics = seed::seed_metrics(&entry_service, clock.today());
        Ok(Self::build(settings, clock, metrics, seed::seed_products()))
    }

    /// Dashboard over an existing metric collection (already in display currency)
    /// and no products. Records are checked the same way an import is.
    pub fn with_metrics(
        settings: Settings,
        clock: Box<dyn Clock>,
        mut metrics: Vec<DailyMetric>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        for m in &metrics {
            validate_metric(m)?;
        }
        metrics.sort_by_key(|m| m.date);
        Ok(Self::build(settings, clock, metrics, Vec::new()))
    }

    /// Replace the insight collaborator (e.g., with a different model vendor).
    pub fn with_insight_provider(mut self, provider: Box<dyn InsightProvider>) -> Self {
        self.insight_provider = Some(provider);
        self
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Simulated login: any non-blank email and password is accepted.
    /// Does not fetch insights; see [`TrackingGt::log_in_and_refresh`].
    pub fn log_in(&mut self, email: &str, password: &str) -> Result<(), CoreError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Email and password are required".into(),
            ));
        }
        self.dashboard.authenticated = true;
        info!("operator logged in");
        Ok(())
    }

    /// End the session and forget the insights shown for it.
    pub fn log_out(&mut self) {
        self.dashboard.authenticated = false;
        self.dashboard.insights.clear();
        info!("operator logged out");
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.dashboard.authenticated
    }

    // ── Period & Stats ──────────────────────────────────────────────

    /// Change the reporting window without fetching insights.
    pub fn select_period(&mut self, period: Period) {
        debug!(%period, "period selected");
        self.dashboard.selected_period = period;
    }

    #[must_use]
    pub fn selected_period(&self) -> Period {
        self.dashboard.selected_period
    }

    /// Concrete dates the selected period covers right now.
    #[must_use]
    pub fn current_range(&self) -> DateRange {
        self.period_service
            .resolve_range(&self.dashboard.selected_period, self.clock.today())
    }

    /// Metrics inside the selected period, oldest first.
    #[must_use]
    pub fn filtered_metrics(&self) -> Vec<DailyMetric> {
        self.metrics_for(&self.dashboard.selected_period)
    }

    /// Metrics inside an arbitrary period, oldest first.
    #[must_use]
    pub fn metrics_for(&self, period: &Period) -> Vec<DailyMetric> {
        self.period_service
            .filter_by_period(&self.dashboard.metrics, period, self.clock.now())
    }

    /// Summary cards for the selected period.
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        self.analytics_service.compute_stats(&self.filtered_metrics())
    }

    /// Summary cards for an arbitrary period.
    #[must_use]
    pub fn stats_for(&self, period: &Period) -> DashboardStats {
        self.analytics_service.compute_stats(&self.metrics_for(period))
    }

    /// Ad spend of the selected period split by platform.
    #[must_use]
    pub fn channel_breakdown(&self) -> Vec<ChannelSpend> {
        let stats = self.stats();
        self.analytics_service
            .channel_breakdown(stats.total_ad_spend, &self.settings.ad_channels)
    }

    /// SKU table rows, worst delivery rate first.
    #[must_use]
    pub fn product_summaries(&self) -> Vec<ProductSummary> {
        self.analytics_service
            .product_summaries(&self.dashboard.products)
    }

    // ── Entries ─────────────────────────────────────────────────────

    /// Validate a manual entry, convert it to the display currency and
    /// merge it into the collection in date order.
    pub fn add_entry(&mut self, raw: &RawEntry) -> Result<(), CoreError> {
        self.entry_service.validate(raw)?;
        self.dashboard.metrics = self.entry_service.add_entry(&self.dashboard.metrics, raw);
        info!(date = %raw.date, total = self.dashboard.metrics.len(), "entry added");
        Ok(())
    }

    /// All metrics, oldest first.
    #[must_use]
    pub fn metrics(&self) -> &[DailyMetric] {
        &self.dashboard.metrics
    }

    /// Metrics recorded for one day. Usually one, duplicates are not rejected.
    #[must_use]
    pub fn metrics_on(&self, date: NaiveDate) -> Vec<&DailyMetric> {
        self.dashboard
            .metrics
            .iter()
            .filter(|m| m.date == date)
            .collect()
    }

    #[must_use]
    pub fn metric_count(&self) -> usize {
        self.dashboard.metrics.len()
    }

    #[must_use]
    pub fn earliest_metric_date(&self) -> Option<NaiveDate> {
        self.dashboard.metrics.first().map(|m| m.date)
    }

    #[must_use]
    pub fn latest_metric_date(&self) -> Option<NaiveDate> {
        self.dashboard.metrics.last().map(|m| m.date)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.dashboard.products
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Insights ────────────────────────────────────────────────────

    /// Re-fetch insights for the selected period.
    ///
    /// Provider failures are swallowed and leave an empty list. Errors are
    /// only returned for calls made without a session or without a provider.
    pub async fn refresh_insights(&mut self) -> Result<&[Insight], CoreError> {
        if !self.dashboard.authenticated {
            return Err(CoreError::NotAuthenticated);
        }
        let provider = self
            .insight_provider
            .as_deref()
            .ok_or(CoreError::NoInsightProvider)?;

        let window = self.filtered_metrics();
        let insights = self.insight_service.fetch_insights(provider, &window).await;
        self.dashboard.insights = insights;
        Ok(&self.dashboard.insights)
    }

    /// Log in, then fetch insights for the selected period.
    pub async fn log_in_and_refresh(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<&[Insight], CoreError> {
        self.log_in(email, password)?;
        self.refresh_insights().await
    }

    /// Switch the reporting window, then fetch insights for it.
    pub async fn select_period_and_refresh(
        &mut self,
        period: Period,
    ) -> Result<&[Insight], CoreError> {
        self.select_period(period);
        self.refresh_insights().await
    }

    /// Insights from the last refresh.
    #[must_use]
    pub fn insights(&self) -> &[Insight] {
        &self.dashboard.insights
    }

    #[must_use]
    pub fn has_insight_provider(&self) -> bool {
        self.insight_provider.is_some()
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all metrics as a JSON string.
    pub fn export_metrics_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.dashboard.metrics)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize metrics to JSON: {e}")))
    }

    /// Export all metrics as a CSV string.
    /// Columns: date, revenue, ad_spend, shipping_costs, product_costs, net_profit, orders
    #[must_use]
    pub fn export_metrics_to_csv(&self) -> String {
        let mut csv =
            String::from("date,revenue,ad_spend,shipping_costs,product_costs,net_profit,orders\n");
        for m in &self.dashboard.metrics {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                m.date, m.revenue, m.ad_spend, m.shipping_costs, m.product_costs, m.net_profit, m.orders,
            ));
        }
        csv
    }

    /// Import metrics (already in display currency) from a JSON array.
    /// All records are checked first; if any fails, none are added.
    /// Returns the number of metrics imported.
    pub fn import_metrics_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming: Vec<DailyMetric> = serde_json::from_str(json)?;
        for m in &incoming {
            validate_metric(m)?;
        }

        let count = incoming.len();
        let mut merged = self.dashboard.metrics.clone();
        merged.extend(incoming);
        merged.sort_by_key(|m| m.date);
        self.dashboard.metrics = merged;
        info!(count, "metrics imported");
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        settings: Settings,
        clock: Box<dyn Clock>,
        metrics: Vec<DailyMetric>,
        products: Vec<Product>,
    ) -> Self {
        let insight_provider: Option<Box<dyn InsightProvider>> =
            settings.api_keys.get("gemini").map(|key| {
                Box::new(
                    GeminiInsightProvider::new(key.clone())
                        .with_currency(settings.display_currency.clone()),
                ) as Box<dyn InsightProvider>
            });

        let dashboard = Dashboard {
            metrics,
            products,
            ..Dashboard::default()
        };

        Self {
            entry_service: EntryService::from_settings(&settings),
            period_service: PeriodService::new(),
            analytics_service: AnalyticsService::new(),
            insight_service: InsightService::new(),
            dashboard,
            settings,
            clock,
            insight_provider,
        }
    }
}

/// Stored metrics must carry non-negative finite amounts and a profit that
/// matches their cost columns.
fn validate_metric(m: &DailyMetric) -> Result<(), CoreError> {
    for (label, v) in [
        ("revenue", m.revenue),
        ("ad spend", m.ad_spend),
        ("shipping costs", m.shipping_costs),
        ("product costs", m.product_costs),
    ] {
        if !v.is_finite() || v < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "{label} on {} must be a non-negative number, got {v}",
                m.date
            )));
        }
    }

    let expected = m.expected_net_profit();
    let scale = m.revenue.abs().max(1.0);
    if !m.net_profit.is_finite() || (m.net_profit - expected).abs() > PROFIT_TOLERANCE * scale {
        return Err(CoreError::ValidationError(format!(
            "net profit on {} is {}, expected {expected}",
            m.date, m.net_profit
        )));
    }
    Ok(())
}
