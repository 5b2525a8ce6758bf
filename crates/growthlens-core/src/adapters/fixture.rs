use std::future::Future;
use std::pin::Pin;

use serde_json::{json, Value};

use crate::provider::{FetchOutcome, FetchRequest, Provider, ProviderError, ProviderId};
use crate::{GroundingSource, Query};

/// Deterministic offline provider.
///
/// Serves seeded payloads derived from the query bytes, so the full
/// fetch-validate-derive pipeline works without network or credentials. Tests
/// use the scripted modes to exercise malformed payloads and provider failure.
#[derive(Debug, Clone, Default)]
pub struct FixtureAdapter {
    mode: FixtureMode,
}

#[derive(Debug, Clone, Default)]
enum FixtureMode {
    #[default]
    Seeded,
    Fixed(Value),
    Failing(ProviderError),
}

impl FixtureAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return the given payload, regardless of query.
    pub fn with_payload(payload: Value) -> Self {
        Self {
            mode: FixtureMode::Fixed(payload),
        }
    }

    /// Always fail with the given provider error.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            mode: FixtureMode::Failing(error),
        }
    }

    fn seeded_payload(query: &Query) -> Value {
        let seed = query_seed(query);
        json!({
            "stockPrice": 80.0 + (seed % 800) as f64 / 10.0,
            "fcfPerShare": 2.0 + (seed % 60) as f64 / 10.0,
            "wacc": 6.0 + (seed % 50) as f64 / 10.0,
            "currency": "USD",
        })
    }

    fn seeded_sources(query: &Query) -> Vec<GroundingSource> {
        let slug: String = query
            .as_str()
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() {
                    ch.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();

        vec![GroundingSource::new(
            format!("https://fixture.growthlens.invalid/{slug}"),
            format!("Fixture data for {query}"),
        )]
    }
}

impl Provider for FixtureAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn ready(&self) -> bool {
        true
    }

    fn fetch<'a>(
        &'a self,
        req: &'a FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<FetchOutcome, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            match &self.mode {
                FixtureMode::Seeded => Ok(FetchOutcome {
                    data: Self::seeded_payload(&req.query),
                    sources: Self::seeded_sources(&req.query),
                }),
                FixtureMode::Fixed(payload) => Ok(FetchOutcome {
                    data: payload.clone(),
                    sources: Vec::new(),
                }),
                FixtureMode::Failing(error) => Err(error.clone()),
            }
        })
    }
}

fn query_seed(query: &Query) -> u64 {
    query.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}
