use growthlens_core::{Field, FinancialRecord, Query, Session};
use serde_json::{json, Value};

use crate::cli::WhatifArgs;
use crate::error::CliError;

use super::CommandResult;

/// Offline recompute: seed a Ready session from explicit inputs, then replay
/// each `--set` edit through the `Ready -> Ready` self-loop.
pub fn run(args: &WhatifArgs) -> Result<CommandResult, CliError> {
    let record = FinancialRecord::new(
        args.stock_price,
        args.fcf_per_share,
        args.wacc,
        args.currency.clone(),
    )?;

    let query = Query::parse("what-if")?;
    let mut session = Session::seeded(query, record, Vec::new());

    let initial_rate = session
        .analysis()
        .ok_or_else(|| CliError::Command(String::from("what-if session failed to seed")))?
        .growth
        .rate;

    let mut steps: Vec<Value> = Vec::with_capacity(args.edits.len());
    for raw in &args.edits {
        let (field, value) = parse_edit(raw)?;
        let analysis = session.edit(field, value)?;
        steps.push(json!({
            "field": field.as_str(),
            "value": value,
            "rate": analysis.growth.rate,
        }));
    }

    let analysis = session
        .analysis()
        .ok_or_else(|| CliError::Command(String::from("what-if session lost its record")))?;

    let data = json!({
        "record": &analysis.record,
        "growth": {
            "rate": analysis.growth.rate,
            "percent": analysis.growth.as_percent(),
        },
        "initialRate": initial_rate,
        "steps": steps,
    });

    Ok(CommandResult::ok(data))
}

fn parse_edit(raw: &str) -> Result<(Field, f64), CliError> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(CliError::Command(format!(
            "--set expects FIELD=VALUE, got '{raw}'"
        )));
    };

    let field: Field = field.parse().map_err(CliError::Validation)?;
    let value: f64 = value.trim().parse().map_err(|_| {
        CliError::Command(format!(
            "--set value for '{field}' must be a number, got '{value}'"
        ))
    })?;

    Ok((field, value))
}
