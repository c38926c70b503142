pub mod traits;

// Insight provider implementations
pub mod gemini;
