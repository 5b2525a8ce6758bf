use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::http_client::{HttpClient, HttpRequest};
use crate::parse::{self, ParseError};
use crate::provider::{FetchOutcome, FetchRequest, Provider, ProviderError, ProviderId};
use crate::{GeminiConfig, GroundingSource, Query};

const FALLBACK_SOURCE_TITLE: &str = "Untitled Source";

/// Gemini-backed provider: one grounded generateContent call per fetch.
///
/// The adapter owns transport and text-to-JSON extraction only; the payload it
/// returns is untrusted and goes through the validator at the session boundary.
pub struct GeminiAdapter {
    config: GeminiConfig,
    http: Arc<dyn HttpClient>,
}

impl GeminiAdapter {
    pub fn new(config: GeminiConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn prompt(query: &Query) -> String {
        format!(
            "For the company or stock ticker \"{query}\", find the most recent financial data \
available from public sources. I need the following four metrics:\n\
1. Current stock price in its native trading currency.\n\
2. Free Cash Flow (FCF) per share TTM (Trailing Twelve Months) in the same native currency.\n\
3. Weighted Average Cost of Capital (WACC) as a percentage (e.g., 8.5 for 8.5%).\n\
4. The ISO 4217 currency code for the stock price and FCF (e.g., \"USD\", \"EUR\", \"JPY\").\n\
\n\
Please provide your response as a single, clean JSON object with no extra text, formatting, \
or markdown. The JSON object should have the keys: \"stockPrice\", \"fcfPerShare\", \"wacc\", \
and \"currency\". The values for the first three keys should be numbers only. The currency \
should be a string. If you cannot find a specific value, return null for that key. For example:\n\
{{\n\
  \"stockPrice\": 150.75,\n\
  \"fcfPerShare\": 5.20,\n\
  \"wacc\": 8.5,\n\
  \"currency\": \"USD\"\n\
}}"
        )
    }

    fn build_request(&self, query: &Query) -> HttpRequest {
        let body = json!({
            "contents": [{ "parts": [{ "text": Self::prompt(query) }] }],
            "tools": [{ "googleSearch": {} }],
        });

        HttpRequest::post_json(self.endpoint(), &body)
            .with_header("x-goog-api-key", self.config.api_key.clone())
            .with_timeout_ms(self.config.timeout_ms)
    }

    async fn fetch_inner(&self, req: &FetchRequest) -> Result<FetchOutcome, ProviderError> {
        if !self.ready() {
            return Err(ProviderError::invalid_request(
                "gemini provider requires an API key",
            ));
        }

        let response = self
            .http
            .execute(self.build_request(&req.query))
            .await
            .map_err(|error| ProviderError::unavailable(error.message()))?;

        if !response.is_success() {
            return Err(classify_status(response.status, &response.body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response.body)
            .map_err(|error| {
                ProviderError::malformed_response(format!("unexpected response shape: {error}"))
            })?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::empty_response("response contained no candidates"))?;

        let sources = candidate
            .grounding_metadata
            .map(|metadata| normalize_sources(metadata.grounding_chunks))
            .unwrap_or_default();

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let data = parse::extract_json_object(&text).map_err(|error| match error {
            ParseError::EmptyText => {
                ProviderError::empty_response("received an empty response from the API")
            }
            other => ProviderError::malformed_response(other.to_string()),
        })?;

        Ok(FetchOutcome { data, sources })
    }
}

impl Provider for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn ready(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    fn fetch<'a>(
        &'a self,
        req: &'a FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<FetchOutcome, ProviderError>> + Send + 'a>> {
        Box::pin(self.fetch_inner(req))
    }
}

fn classify_status(status: u16, body: &str) -> ProviderError {
    let detail = body.trim();
    let detail = if detail.is_empty() { "<empty body>" } else { detail };
    match status {
        429 => ProviderError::rate_limited(format!("provider returned 429: {detail}")),
        400..=499 => {
            ProviderError::invalid_request(format!("provider returned {status}: {detail}"))
        }
        _ => ProviderError::unavailable(format!("provider returned {status}: {detail}")),
    }
}

fn normalize_sources(chunks: Vec<GroundingChunk>) -> Vec<GroundingSource> {
    chunks
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.unwrap_or_default();
            if uri.is_empty() {
                return None;
            }
            let title = web
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| String::from(FALLBACK_SOURCE_TITLE));
            Some(GroundingSource::new(uri, title))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_query_and_keys() {
        let query = Query::parse("Apple Inc.").expect("valid");
        let prompt = GeminiAdapter::prompt(&query);

        assert!(prompt.contains("\"Apple Inc.\""));
        assert!(prompt.contains("stockPrice"));
        assert!(prompt.contains("fcfPerShare"));
        assert!(prompt.contains("wacc"));
        assert!(prompt.contains("currency"));
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let adapter = GeminiAdapter::new(
            GeminiConfig::new("key").with_base_url("https://example.test/v1/"),
            Arc::new(crate::http_client::NoopHttpClient),
        );
        assert_eq!(
            adapter.endpoint(),
            "https://example.test/v1/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn build_request_carries_api_key_header_and_search_tool() {
        let adapter = GeminiAdapter::new(
            GeminiConfig::new("key-123"),
            Arc::new(crate::http_client::NoopHttpClient),
        );
        let request = adapter.build_request(&Query::parse("AAPL").expect("valid"));

        assert_eq!(
            request.headers.get("x-goog-api-key").map(String::as_str),
            Some("key-123")
        );
        assert!(request
            .body
            .as_deref()
            .is_some_and(|body| body.contains("googleSearch")));
    }

    #[test]
    fn uri_less_chunks_are_dropped_and_titles_defaulted() {
        let chunks = vec![
            GroundingChunk {
                web: Some(WebSource {
                    uri: Some(String::from("https://example.test/filing")),
                    title: None,
                }),
            },
            GroundingChunk {
                web: Some(WebSource {
                    uri: None,
                    title: Some(String::from("orphan title")),
                }),
            },
            GroundingChunk { web: None },
        ];

        let sources = normalize_sources(chunks);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, FALLBACK_SOURCE_TITLE);
    }

    #[test]
    fn adapter_without_key_is_not_ready() {
        let adapter = GeminiAdapter::new(
            GeminiConfig::new("  "),
            Arc::new(crate::http_client::NoopHttpClient),
        );
        assert!(!adapter.ready());
    }
}
