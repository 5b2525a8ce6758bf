use growthlens_core::{GeminiConfig, ProviderId};
use serde_json::json;

use crate::cli::ProvidersArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ProvidersArgs) -> Result<CommandResult, CliError> {
    let gemini_ready = GeminiConfig::from_env().is_some();

    let mut providers = Vec::with_capacity(ProviderId::ALL.len());
    for id in ProviderId::ALL {
        let mut entry = match id {
            ProviderId::Gemini => json!({
                "id": id.as_str(),
                "ready": gemini_ready,
                "requires_api_key": true,
                "description": "LLM-backed grounded search over public financial data",
            }),
            ProviderId::Fixture => json!({
                "id": id.as_str(),
                "ready": true,
                "requires_api_key": false,
                "description": "deterministic offline data seeded from the query",
            }),
        };

        if args.verbose {
            if let ProviderId::Gemini = id {
                entry["model"] = json!(GeminiConfig::DEFAULT_MODEL);
                entry["base_url"] = json!(GeminiConfig::DEFAULT_BASE_URL);
                entry["api_key_var"] = json!(GeminiConfig::API_KEY_VAR);
            }
        }

        providers.push(entry);
    }

    Ok(CommandResult::ok(json!({ "providers": providers })))
}
