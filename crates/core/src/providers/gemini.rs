use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::insight::Insight;
use crate::models::metric::DailyMetric;
use super::traits::InsightProvider;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const PROVIDER: &str = "Gemini";

/// Google Gemini provider for financial insights.
///
/// - **Auth**: API key, sent as the `key` query parameter.
/// - **Endpoint**: `/models/{model}:generateContent`
/// - **Output**: the model is asked for a bare JSON array of
///   `{ "title", "description" }` objects.
pub struct GeminiInsightProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    currency: String,
}

impl GeminiInsightProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
            currency: "BRL".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the provider at another host (proxies, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Currency the metric amounts are expressed in, quoted in the prompt.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

// ── Gemini API request/response types ───────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl InsightProvider for GeminiInsightProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_insights(&self, metrics: &[DailyMetric]) -> Result<Vec<Insight>, CoreError> {
        let prompt = build_prompt(metrics, &self.currency)?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: 0.4,
            },
        };

        let resp = self.client.post(self.endpoint()).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("generateContent returned HTTP {status}"),
            });
        }

        let resp: GenerateResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse response: {e}"),
        })?;

        let text = resp
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .find(|t| !t.trim().is_empty())
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: "Response contained no text candidate".into(),
            })?;

        parse_insights(&text)
    }
}

/// Prompt asking for three to five short insights about the window.
pub(crate) fn build_prompt(metrics: &[DailyMetric], currency: &str) -> Result<String, CoreError> {
    let data = serde_json::to_string(metrics)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize metrics: {e}")))?;
    Ok(format!(
        "You are a financial analyst for a cash-on-delivery e-commerce store in Guatemala. \
         All amounts are in {currency}. Daily metrics (revenue, ad_spend, shipping_costs, \
         product_costs, net_profit, orders):\n{data}\n\
         Reply with a JSON array of 3 to 5 objects, each with a short \"title\" and a \
         one-sentence \"description\", focused on profitability, ad efficiency (ROI, ROAS, CAC) \
         and cost control. Reply with the JSON array only."
    ))
}

/// Parse the model's text into insights, tolerating a Markdown code fence.
pub(crate) fn parse_insights(text: &str) -> Result<Vec<Insight>, CoreError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end().trim_end_matches("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Model reply is not a JSON list of insights: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_bare_json_array() {
        let out = parse_insights(r#"[{"title":"ROAS","description":"Healthy."}]"#).unwrap();
        assert_eq!(out, vec![Insight::new("ROAS", "Healthy.")]);
    }

    #[test]
    fn parses_fenced_json_array() {
        let text = "```json\n[{\"title\":\"CAC\",\"description\":\"Rising.\"}]\n```";
        let out = parse_insights(text).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "CAC");
    }

    #[test]
    fn rejects_prose() {
        let err = parse_insights("Your store is doing great!").unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[test]
    fn prompt_embeds_metrics_and_currency() {
        let metric = DailyMetric {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            revenue: 640.0,
            ad_spend: 128.0,
            shipping_costs: 211.2,
            product_costs: 32.0,
            net_profit: 268.8,
            orders: 10,
        };
        let prompt = build_prompt(&[metric], "BRL").unwrap();
        assert!(prompt.contains("BRL"));
        assert!(prompt.contains("2024-03-15"));
        assert!(prompt.contains("268.8"));
    }

    #[test]
    fn endpoint_carries_model_and_key() {
        let provider = GeminiInsightProvider::new("k123")
            .with_model("gemini-test")
            .with_base_url("http://localhost:9999/");
        assert_eq!(
            provider.endpoint(),
            "http://localhost:9999/models/gemini-test:generateContent?key=k123"
        );
    }
}
