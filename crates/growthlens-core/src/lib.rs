//! Core contracts for growthlens.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The implicit growth derivation engine
//! - The fetch/edit session state machine
//! - Provider trait, adapters and HTTP transport
//! - Response envelope and structured errors

pub mod adapters;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod growth;
pub mod http_client;
pub mod parse;
pub mod provider;
pub mod session;
pub mod validate;

pub use adapters::{FixtureAdapter, GeminiAdapter};
pub use config::GeminiConfig;
pub use domain::{Field, FinancialRecord, GroundingSource, Query, UtcDateTime};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use growth::{derive, GrowthResult};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use parse::{extract_json_object, ParseError};
pub use provider::{
    FetchOutcome, FetchRequest, Provider, ProviderError, ProviderErrorKind, ProviderId,
};
pub use session::{
    Analysis, Completion, FetchTicket, Session, SessionError, SessionFailure, SessionState,
};
pub use validate::{validate, REQUIRED_FIELDS};
