use std::time::Instant;

use growthlens_core::{EnvelopeError, FetchRequest, Query, Session, SessionState};
use serde_json::json;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &AnalyzeArgs) -> Result<CommandResult, CliError> {
    let query = Query::parse(&args.query)?;
    let selected = super::select_provider(&args.provider)?;
    let provider_id = selected.provider.id();

    let mut session = Session::new();
    let ticket = session.begin_fetch(query);
    let request = FetchRequest::new(ticket.query().clone());

    let started = Instant::now();
    let outcome = selected.provider.fetch(&request).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    session.complete_fetch(&ticket, outcome);

    match session.state() {
        SessionState::Ready(analysis) => {
            let data = json!({
                "query": analysis.query.as_str(),
                "record": &analysis.record,
                "growth": {
                    "rate": analysis.growth.rate,
                    "percent": analysis.growth.as_percent(),
                },
                "sources": &analysis.sources,
            });

            Ok(CommandResult::ok(data)
                .with_provider(provider_id)
                .with_latency(latency_ms)
                .with_warnings(selected.warnings))
        }
        SessionState::Failed { query, failure } => {
            let error = EnvelopeError::new(failure.code, failure.message.clone())?
                .with_retryable(failure.retryable)
                .with_provider(provider_id);

            let data = json!({ "query": query.as_str(), "status": "failed" });

            Ok(CommandResult::ok(data)
                .with_provider(provider_id)
                .with_latency(latency_ms)
                .with_warnings(selected.warnings)
                .with_errors(vec![error]))
        }
        // A matching ticket always completes to Ready or Failed.
        other => Err(CliError::Command(format!(
            "fetch did not complete (state '{}')",
            other.name()
        ))),
    }
}
