use tracing::debug;

use crate::errors::CoreError;
use crate::models::metric::{DailyMetric, RawEntry};
use crate::models::settings::Settings;
use crate::services::currency_service::CurrencyService;

/// Turns manual entries (source currency) into stored daily metrics
/// (display currency) and merges them into the collection.
///
/// Pure business logic, no I/O. The pipeline itself never fails; use
/// [`EntryService::validate`] beforehand to reject malformed input.
pub struct EntryService {
    currency_service: CurrencyService,
    default_shipping_per_order: f64,
}

impl EntryService {
    pub fn new(currency_service: CurrencyService, default_shipping_per_order: f64) -> Self {
        Self {
            currency_service,
            default_shipping_per_order,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            CurrencyService::from_settings(settings),
            settings.default_shipping_per_order,
        )
    }

    /// Shipping for an entry in source currency.
    ///
    /// An explicit zero counts as "not provided" and is replaced by
    /// `orders × default_shipping_per_order`.
    #[must_use]
    pub fn shipping_for(&self, raw: &RawEntry) -> f64 {
        match raw.shipping_costs {
            Some(shipping) if shipping != 0.0 => shipping,
            _ => f64::from(raw.orders) * self.default_shipping_per_order,
        }
    }

    /// Build the stored record for a raw entry.
    ///
    /// Profit is computed in source currency first, then every monetary
    /// column is converted with the same rate.
    #[must_use]
    pub fn build_metric(&self, raw: &RawEntry) -> DailyMetric {
        let shipping = self.shipping_for(raw);
        let product_costs = raw.product_costs.unwrap_or(0.0);
        let profit = raw.revenue - raw.ad_spend - shipping - product_costs;

        let fx = &self.currency_service;
        DailyMetric {
            date: raw.date,
            revenue: fx.to_display(raw.revenue),
            ad_spend: fx.to_display(raw.ad_spend),
            shipping_costs: fx.to_display(shipping),
            product_costs: fx.to_display(product_costs),
            net_profit: fx.to_display(profit),
            orders: raw.orders,
        }
    }

    /// Return a new collection with the entry added, sorted by date.
    ///
    /// The sort is stable: an entry sharing a date with existing records
    /// lands after them.
    #[must_use]
    pub fn add_entry(&self, collection: &[DailyMetric], raw: &RawEntry) -> Vec<DailyMetric> {
        let metric = self.build_metric(raw);
        debug!(
            date = %metric.date,
            revenue = metric.revenue,
            net_profit = metric.net_profit,
            "ingesting daily entry"
        );

        let mut next = Vec::with_capacity(collection.len() + 1);
        next.extend_from_slice(collection);
        next.push(metric);
        next.sort_by_key(|m| m.date);
        next
    }

    /// Reject entries the pipeline cannot meaningfully convert:
    /// negative or non-finite amounts.
    pub fn validate(&self, raw: &RawEntry) -> Result<(), CoreError> {
        let amounts = [
            ("revenue", Some(raw.revenue)),
            ("ad spend", Some(raw.ad_spend)),
            ("shipping costs", raw.shipping_costs),
            ("product costs", raw.product_costs),
        ];
        for (label, value) in amounts {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(CoreError::ValidationError(format!(
                        "{label} must be a finite number, got {v}"
                    )));
                }
                if v < 0.0 {
                    return Err(CoreError::ValidationError(format!(
                        "{label} must not be negative, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}
