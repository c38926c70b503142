pub mod analytics;
pub mod dashboard;
pub mod insight;
pub mod metric;
pub mod period;
pub mod product;
pub mod settings;
