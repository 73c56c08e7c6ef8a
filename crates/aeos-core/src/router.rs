//! First-match dispatcher.
//!
//! The [`Router`] borrows a sealed registry and, for each query, offers it to
//! every division in registration order. The first division that accepts the
//! query processes it and its envelope is returned unmodified; later
//! divisions are never consulted. A failure inside `process` is a hard
//! failure for that request.

use tracing::{debug, info, warn};

use crate::division::{Division, DivisionError};
use crate::envelope::ResultEnvelope;
use crate::registry::{Registry, Sealed};

/// Errors surfaced by a dispatch call.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No division accepted the query and no catch-all is registered.
    #[error("no division accepts query {query:?}")]
    NoHandler { query: String },

    /// The selected division failed while processing the query.
    #[error("division {division:?} failed on query {query:?}: {source}")]
    DivisionProcessing {
        division: String,
        query: String,
        #[source]
        source: DivisionError,
    },

    /// Direct routing named a division that is not registered.
    #[error("unknown division: {0}")]
    UnknownDivision(String),
}

/// A dispatch result tagged with the division that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed {
    /// Name of the handling division.
    pub division: String,
    /// The division's envelope, unmodified.
    pub envelope: ResultEnvelope,
}

/// First-match router over a sealed registry.
#[derive(Debug, Clone, Copy)]
pub struct Router<'r> {
    registry: &'r Registry<Sealed>,
}

impl<'r> Router<'r> {
    pub fn new(registry: &'r Registry<Sealed>) -> Self {
        Self { registry }
    }

    /// Dispatch a query and return the handling division's envelope.
    pub fn dispatch(&self, query: &str) -> Result<ResultEnvelope, DispatchError> {
        self.route(query).map(|routed| routed.envelope)
    }

    /// Dispatch a query and report which division handled it.
    pub fn route(&self, query: &str) -> Result<Routed, DispatchError> {
        for division in self.registry.iter() {
            if division.can_handle(query) {
                debug!(division = division.name(), "Division accepted query");
                return invoke(division, query);
            }
            debug!(division = division.name(), "Division declined query");
        }

        warn!(
            query,
            divisions = self.registry.len(),
            "No division accepted query"
        );
        Err(DispatchError::NoHandler {
            query: query.to_string(),
        })
    }

    /// Send a query straight to the division with the given id or name,
    /// bypassing its predicate.
    pub fn dispatch_to(&self, target: &str, query: &str) -> Result<Routed, DispatchError> {
        let division = self
            .registry
            .get(target)
            .ok_or_else(|| DispatchError::UnknownDivision(target.to_string()))?;
        debug!(division = division.name(), target, "Direct routing");
        invoke(division, query)
    }

    /// Names of every division whose predicate accepts the query, in
    /// registration order. Only the first would be dispatched to.
    pub fn candidates(&self, query: &str) -> Vec<&'r str> {
        self.registry
            .iter()
            .filter(|d| d.can_handle(query))
            .map(|d| d.name())
            .collect()
    }
}

fn invoke(division: &dyn Division, query: &str) -> Result<Routed, DispatchError> {
    match division.process(query) {
        Ok(envelope) => {
            info!(
                division = division.name(),
                cost = envelope.cost,
                tools = envelope.tool_usage.len(),
                "Query dispatched"
            );
            Ok(Routed {
                division: division.name().to_string(),
                envelope,
            })
        }
        Err(source) => {
            warn!(division = division.name(), error = %source, "Division failed");
            Err(DispatchError::DivisionProcessing {
                division: division.name().to_string(),
                query: query.to_string(),
                source,
            })
        }
    }
}
