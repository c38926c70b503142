use thiserror::Error;

/// Unified error type for the entire trackinggt-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The metric computations themselves (period filtering, aggregation,
/// entry ingestion) are total and never produce one of these.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input / Configuration ───────────────────────────────────────
    #[error("Entry validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── Session ─────────────────────────────────────────────────────
    #[error("Not logged in")]
    NotAuthenticated,

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No insight provider configured")]
    NoInsightProvider,
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // The insight endpoint carries its API key in the query string,
        // and reqwest errors echo the full URL.
        let msg = e.to_string();
        CoreError::Network(redact_query(&msg))
    }
}

/// Strip everything after the first `?` so query parameters never reach logs.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact_query;

    #[test]
    fn redacts_query_parameters() {
        let msg = "error sending request for url (https://host/v1?key=secret)";
        let out = redact_query(msg);
        assert!(!out.contains("secret"));
        assert!(out.ends_with("?<query redacted>"));
    }

    #[test]
    fn leaves_plain_messages_alone() {
        assert_eq!(redact_query("connection refused"), "connection refused");
    }
}
