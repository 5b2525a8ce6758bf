//! Session state machine for the fetch/edit contract.
//!
//! States: `Empty -> Loading -> {Ready, Failed}`, with a `Ready -> Ready`
//! self-loop on field edits (re-derivation only, no re-fetch). A new fetch from
//! any state passes through `Loading` again and discards prior results.
//!
//! Overlapping fetches: every fetch is tagged with a monotonically increasing
//! generation. A completion whose generation is not the latest is reported as
//! stale and ignored, so a slow first response can never overwrite a fresher
//! one. The last fetch *issued* wins, not the last to resolve.

use thiserror::Error;

use crate::{
    derive, validate, Field, FinancialRecord, FetchOutcome, GroundingSource, GrowthResult,
    ProviderError, Query, ValidationError,
};

/// One fetch-and-validate cycle's worth of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub query: Query,
    pub record: FinancialRecord,
    pub growth: GrowthResult,
    pub sources: Vec<GroundingSource>,
}

/// Why a session entered `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFailure {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl SessionFailure {
    fn from_provider(error: &ProviderError) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
            retryable: error.retryable(),
        }
    }

    fn from_validation(error: &ValidationError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            retryable: false,
        }
    }
}

/// Observable session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Empty,
    Loading { query: Query, generation: u64 },
    Ready(Analysis),
    Failed { query: Query, failure: SessionFailure },
}

impl SessionState {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading { .. } => "loading",
            Self::Ready(_) => "ready",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Handle identifying one issued fetch. Must be passed back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    query: Query,
    generation: u64,
}

impl FetchTicket {
    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// How a completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Ready,
    Failed,
    /// A newer fetch superseded this one; the session state was not touched.
    Stale,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("no record to edit in state '{state}'")]
    NoActiveRecord { state: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Single-user session owning the current record/result pair.
///
/// Owned by one logical user; all mutation happens through `begin_fetch`,
/// `complete_fetch`, and `edit`. There is no multi-writer scenario.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    generation: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Empty
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Ready` directly with a locally supplied record, bypassing the
    /// provider. Used by offline what-if flows and tests.
    pub fn seeded(query: Query, record: FinancialRecord, sources: Vec<GroundingSource>) -> Self {
        let growth = derive(&record);
        Self {
            state: SessionState::Ready(Analysis {
                query,
                record,
                growth,
                sources,
            }),
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Transition to `Loading`, discarding any prior result.
    pub fn begin_fetch(&mut self, query: Query) -> FetchTicket {
        self.generation += 1;
        self.state = SessionState::Loading {
            query: query.clone(),
            generation: self.generation,
        };
        FetchTicket {
            query,
            generation: self.generation,
        }
    }

    /// Apply a fetch outcome. Validation and derivation both happen here, so
    /// a `Ready` state always holds a validated record with a fresh result.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<FetchOutcome, ProviderError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            return Completion::Stale;
        }

        match outcome {
            Ok(fetched) => match validate(&fetched.data) {
                Ok(record) => {
                    let growth = derive(&record);
                    self.state = SessionState::Ready(Analysis {
                        query: ticket.query.clone(),
                        record,
                        growth,
                        sources: fetched.sources,
                    });
                    Completion::Ready
                }
                Err(error) => {
                    self.state = SessionState::Failed {
                        query: ticket.query.clone(),
                        failure: SessionFailure::from_validation(&error),
                    };
                    Completion::Failed
                }
            },
            Err(error) => {
                self.state = SessionState::Failed {
                    query: ticket.query.clone(),
                    failure: SessionFailure::from_provider(&error),
                };
                Completion::Failed
            }
        }
    }

    /// `Ready -> Ready` self-loop: overwrite one field and re-derive in full.
    pub fn edit(&mut self, field: Field, value: f64) -> Result<&Analysis, SessionError> {
        let state = self.state.name();
        let SessionState::Ready(analysis) = &mut self.state else {
            return Err(SessionError::NoActiveRecord { state });
        };

        analysis.record.set(field, value)?;
        analysis.growth = derive(&analysis.record);
        Ok(analysis)
    }

    /// Current analysis, if the session is `Ready`.
    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.state {
            SessionState::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }
}
