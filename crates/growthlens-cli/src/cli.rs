//! CLI argument definitions for growthlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Fetch metrics for a query and derive the implicit growth rate |
//! | `whatif` | Recompute the rate offline from explicit inputs and edits |
//! | `session` | Interactive fetch/adjust loop |
//! | `providers` | List provider readiness |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |

use clap::{Args, Parser, Subcommand, ValueEnum};

/// growthlens - market-implied growth rate analyzer
///
/// Retrieves stock price, FCF per share (TTM) and WACC for a company or
/// ticker, derives the implicit growth rate the market price implies, and
/// lets you adjust the inputs to see the rate recompute.
#[derive(Debug, Parser)]
#[command(
    name = "growthlens",
    author,
    version,
    about = "Market-implied growth rate analyzer"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Provider selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderSelector {
    /// Gemini when an API key is configured, deterministic fixture otherwise.
    Auto,
    /// Use the Gemini provider (requires GEMINI_API_KEY or --api-key).
    Gemini,
    /// Use the deterministic offline fixture provider.
    Fixture,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch metrics for a ticker or company name and derive the growth rate.
    ///
    /// # Examples
    ///
    ///   growthlens analyze AAPL
    ///   growthlens analyze "Apple Inc." --pretty
    ///   growthlens analyze GOOGL --provider fixture
    Analyze(AnalyzeArgs),

    /// Recompute the growth rate offline from explicit inputs.
    ///
    /// Applies each --set edit in order, re-deriving after every one.
    ///
    /// # Examples
    ///
    ///   growthlens whatif --stock-price 150.75 --fcf-per-share 5.20 --wacc 8.5
    ///   growthlens whatif --stock-price 100 --fcf-per-share 3 --wacc 8 \
    ///       --set wacc=9.5 --set stock-price=120
    Whatif(WhatifArgs),

    /// Interactive fetch/adjust loop.
    ///
    /// Commands inside the session: fetch <query>, set <field> <value>,
    /// show, sources, help, quit.
    Session(SessionArgs),

    /// List providers and whether they are ready to serve fetches.
    Providers(ProvidersArgs),
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Ticker symbol or company name (e.g. GOOGL, "Apple Inc.").
    pub query: String,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

/// Arguments for the `whatif` command.
#[derive(Debug, Args)]
pub struct WhatifArgs {
    /// Stock price in native currency units.
    #[arg(long)]
    pub stock_price: f64,

    /// Free cash flow per share (TTM) in native currency units.
    #[arg(long)]
    pub fcf_per_share: f64,

    /// WACC in percentage units (8.5 means 8.5%).
    #[arg(long)]
    pub wacc: f64,

    /// ISO 4217 currency code used for display.
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Field edit applied after the initial derivation, FIELD=VALUE.
    /// Repeatable; applied in order with a re-derivation after each.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub edits: Vec<String>,
}

/// Arguments for the `session` command.
#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub provider: ProviderArgs,
}

/// Arguments for the `providers` command.
#[derive(Debug, Args)]
pub struct ProvidersArgs {
    /// Include configuration details per provider.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

/// Provider construction options shared by fetching commands.
#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// Provider selection strategy.
    #[arg(long, value_enum, default_value_t = ProviderSelector::Auto)]
    pub provider: ProviderSelector,

    /// Gemini API key; falls back to the GEMINI_API_KEY environment variable.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Provider request timeout in milliseconds.
    #[arg(long, default_value_t = 15_000)]
    pub timeout_ms: u64,
}
