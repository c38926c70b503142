// ═══════════════════════════════════════════════════════════════════
// Provider Tests — GeminiInsightProvider against a local HTTP stub
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use trackinggt_core::errors::CoreError;
use trackinggt_core::models::metric::DailyMetric;
use trackinggt_core::providers::gemini::GeminiInsightProvider;
use trackinggt_core::providers::traits::InsightProvider;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn sample_metrics() -> Vec<DailyMetric> {
    vec![DailyMetric {
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        revenue: 640.0,
        ad_spend: 128.0,
        shipping_costs: 211.2,
        product_costs: 32.0,
        net_profit: 268.8,
        orders: 10,
    }]
}

/// Serve exactly one HTTP request with the given status and JSON body.
/// Returns the base URL and a handle resolving to the raw request text.
async fn serve_once(status: &'static str, body: String) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then as much body as Content-Length announces
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{addr}"), handle)
}

fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}

// ═══════════════════════════════════════════════════════════════════
// Gemini
// ═══════════════════════════════════════════════════════════════════

mod gemini {
    use super::*;

    #[test]
    fn provider_name() {
        assert_eq!(GeminiInsightProvider::new("key").name(), "Gemini");
    }

    #[tokio::test]
    async fn parses_insights_from_first_candidate() {
        let text = r#"[{"title":"Healthy ROAS","description":"Revenue is 5x ad spend."},{"title":"Shipping","description":"Negotiate rates."}]"#;
        let (base, server) = serve_once("200 OK", candidate_body(text)).await;

        let provider = GeminiInsightProvider::new("secret-key")
            .with_base_url(base)
            .with_model("test-model");
        let insights = provider.get_insights(&sample_metrics()).await.unwrap();

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].title, "Healthy ROAS");
        assert_eq!(insights[1].description, "Negotiate rates.");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /models/test-model:generateContent?key=secret-key"));
        assert!(request.contains("2024-03-15"));
        assert!(request.contains("responseMimeType"));
    }

    #[tokio::test]
    async fn accepts_fenced_reply() {
        let text = "```json\n[{\"title\":\"CAC\",\"description\":\"Rising.\"}]\n```";
        let (base, _server) = serve_once("200 OK", candidate_body(text)).await;

        let provider = GeminiInsightProvider::new("k").with_base_url(base);
        let insights = provider.get_insights(&sample_metrics()).await.unwrap();
        assert_eq!(insights[0].title, "CAC");
    }

    #[tokio::test]
    async fn http_error_status_is_api_error() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}".to_string()).await;

        let provider = GeminiInsightProvider::new("k").with_base_url(base);
        match provider.get_insights(&sample_metrics()).await.unwrap_err() {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "Gemini");
                assert!(message.contains("500"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_candidates_is_api_error() {
        let (base, _server) = serve_once("200 OK", r#"{"candidates":[]}"#.to_string()).await;

        let provider = GeminiInsightProvider::new("k").with_base_url(base);
        assert!(matches!(
            provider.get_insights(&sample_metrics()).await.unwrap_err(),
            CoreError::Api { .. }
        ));
    }

    #[tokio::test]
    async fn prose_reply_is_api_error() {
        let (base, _server) = serve_once("200 OK", candidate_body("All good!")).await;

        let provider = GeminiInsightProvider::new("k").with_base_url(base);
        assert!(matches!(
            provider.get_insights(&sample_metrics()).await.unwrap_err(),
            CoreError::Api { .. }
        ));
    }

    #[tokio::test]
    async fn network_error_redacts_api_key() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            GeminiInsightProvider::new("very-secret").with_base_url(format!("http://{addr}"));
        match provider.get_insights(&sample_metrics()).await.unwrap_err() {
            CoreError::Network(msg) => assert!(!msg.contains("very-secret")),
            other => panic!("Expected Network error, got {:?}", other),
        }
    }
}
