pub mod analytics_service;
pub mod currency_service;
pub mod entry_service;
pub mod insight_service;
pub mod period_service;
