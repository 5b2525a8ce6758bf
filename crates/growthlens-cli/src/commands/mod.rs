mod analyze;
mod providers;
mod session;
mod whatif;

use std::sync::Arc;

use growthlens_core::{
    Envelope, EnvelopeError, EnvelopeMeta, FixtureAdapter, GeminiAdapter, GeminiConfig, Provider,
    ProviderId, ReqwestHttpClient,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command, ProviderArgs, ProviderSelector};
use crate::error::CliError;

const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub provider: Option<ProviderId>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            provider: None,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Option<Envelope<Value>>, CliError> {
    let command_result = match &cli.command {
        Command::Analyze(args) => analyze::run(args).await?,
        Command::Whatif(args) => whatif::run(args)?,
        Command::Providers(args) => providers::run(args)?,
        Command::Session(args) => {
            session::run(args).await?;
            return Ok(None);
        }
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
        provider,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        provider,
        latency_ms,
    )?;

    for warning in warnings {
        meta.push_warning(warning);
    }

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(Some(envelope))
}

pub(crate) struct SelectedProvider {
    pub provider: Arc<dyn Provider>,
    pub warnings: Vec<String>,
}

/// Build the provider for a fetching command.
///
/// The Gemini client is constructed explicitly from flags/environment at call
/// time; there is no shared process-wide client.
pub(crate) fn select_provider(args: &ProviderArgs) -> Result<SelectedProvider, CliError> {
    let config = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .map(GeminiConfig::new)
        .or_else(GeminiConfig::from_env)
        .map(|config| config.with_timeout_ms(args.timeout_ms));

    match args.provider {
        ProviderSelector::Fixture => Ok(SelectedProvider {
            provider: Arc::new(FixtureAdapter::new()),
            warnings: Vec::new(),
        }),
        ProviderSelector::Gemini => {
            let config = config.ok_or_else(|| {
                CliError::Command(format!(
                    "gemini provider requires --api-key or the {} environment variable",
                    GeminiConfig::API_KEY_VAR
                ))
            })?;
            Ok(SelectedProvider {
                provider: Arc::new(GeminiAdapter::new(config, Arc::new(ReqwestHttpClient::new()))),
                warnings: Vec::new(),
            })
        }
        ProviderSelector::Auto => match config {
            Some(config) => Ok(SelectedProvider {
                provider: Arc::new(GeminiAdapter::new(config, Arc::new(ReqwestHttpClient::new()))),
                warnings: Vec::new(),
            }),
            None => Ok(SelectedProvider {
                provider: Arc::new(FixtureAdapter::new()),
                warnings: vec![format!(
                    "no {} configured; serving deterministic fixture data",
                    GeminiConfig::API_KEY_VAR
                )],
            }),
        },
    }
}
