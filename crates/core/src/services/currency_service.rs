use crate::models::settings::Settings;

/// Converts source-currency amounts into the display currency.
///
/// The rate is a configuration constant (e.g., 1 GTQ = 0.64 BRL), there is
/// no live lookup and no runtime mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyService {
    rate: f64,
}

impl CurrencyService {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.conversion_rate)
    }

    /// The source → display multiplier.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Convert an amount from source to display currency.
    /// E.g., with a rate of 0.64, `to_display(1000.0)` → 640.0
    #[must_use]
    pub fn to_display(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}
