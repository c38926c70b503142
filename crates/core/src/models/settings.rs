use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

use super::analytics::ChannelShare;

/// Process-wide configuration. Fixed for the lifetime of a tracker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency manual entries are typed in (e.g., "GTQ").
    pub source_currency: String,

    /// Currency every stored metric is expressed in (e.g., "BRL").
    pub display_currency: String,

    /// Symbol shown next to display-currency amounts.
    pub currency_symbol: String,

    /// Multiplier from source to display currency.
    pub conversion_rate: f64,

    /// Shipping charged per order, in source currency, when an entry has none.
    pub default_shipping_per_order: f64,

    /// How the ad budget is split between platforms.
    pub ad_channels: Vec<ChannelShare>,

    /// Optional API keys for external collaborators.
    /// Keys: provider name (e.g., "gemini"). Values: the API key string.
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_currency: "GTQ".to_string(),
            display_currency: "BRL".to_string(),
            currency_symbol: "R$".to_string(),
            conversion_rate: 0.64,
            default_shipping_per_order: 33.0,
            ad_channels: vec![
                ChannelShare::new("Facebook Ads", 70.0),
                ChannelShare::new("Google Ads", 20.0),
                ChannelShare::new("TikTok Ads", 10.0),
            ],
            api_keys: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse a settings document. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can drive the entry pipeline.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (label, code) in [
            ("source", &self.source_currency),
            ("display", &self.display_currency),
        ] {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(CoreError::InvalidSettings(format!(
                    "{label} currency '{code}' must be exactly 3 uppercase ASCII letters"
                )));
            }
        }

        if !self.conversion_rate.is_finite() || self.conversion_rate <= 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "conversion rate must be a positive number, got {}",
                self.conversion_rate
            )));
        }

        if !self.default_shipping_per_order.is_finite() || self.default_shipping_per_order < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "default shipping per order must be non-negative, got {}",
                self.default_shipping_per_order
            )));
        }

        let mut total = 0.0;
        for channel in &self.ad_channels {
            if !channel.percent.is_finite() || channel.percent < 0.0 {
                return Err(CoreError::InvalidSettings(format!(
                    "ad channel '{}' has an invalid share of {}%",
                    channel.name, channel.percent
                )));
            }
            total += channel.percent;
        }
        // Tolerate float noise from shares like 33.3 + 33.3 + 33.4
        if total > 100.0 + 1e-9 {
            return Err(CoreError::InvalidSettings(format!(
                "ad channel shares add up to {total}%, more than 100%"
            )));
        }

        Ok(())
    }
}
