//! Division fixtures.
//!
//! [`ScriptedDivision`] is a hand-driven test double: it accepts or rejects
//! according to a flag, counts how often it was asked, and can be told to
//! fail in `process`. The scenario helpers build the small registries used
//! across the dispatch tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use aeos_core::{
    Case, ConfigurationError, CoreDivision, Division, DivisionBuilder, DivisionError,
    KeywordDivision, PredicateKind, Registry, ResultEnvelope, Sealed,
};
use tracing::debug;

/// Flat cost of the scenario Earth division.
pub const EARTH_FLAT_COST: f64 = 0.02;

/// Response of the scenario Earth division's weather case.
pub const WEATHER_RESPONSE: &str = "W: global weather matrix";

/// Response of the scenario Earth division's disaster case.
pub const DISASTER_RESPONSE: &str = "D: disaster forecast";

/// A test double with scripted behaviour.
pub struct ScriptedDivision {
    name: String,
    accepts: bool,
    failure: Option<String>,
    cost: f64,
    capabilities: Vec<String>,
    asked: Arc<AtomicUsize>,
}

impl ScriptedDivision {
    /// A division that accepts every query iff `accepts`.
    pub fn new(name: &str, accepts: bool) -> Self {
        Self {
            name: name.to_string(),
            accepts,
            failure: None,
            cost: 0.001,
            capabilities: vec!["Scripted".to_string()],
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make `process` fail with the given message.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Shared counter of `can_handle` calls, readable after the division has
    /// been moved into a registry.
    pub fn asked(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.asked)
    }

    /// The envelope this division returns for `query` when it succeeds.
    pub fn expected_envelope(name: &str, query: &str, cost: f64) -> ResultEnvelope {
        ResultEnvelope::new(format!("{name} answered {query:?}"), cost)
    }
}

impl Division for ScriptedDivision {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn can_handle(&self, _query: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.accepts
    }

    fn process(&self, query: &str) -> Result<ResultEnvelope, DivisionError> {
        debug!(division = %self.name, "Scripted division processing");
        match &self.failure {
            Some(message) => Err(DivisionError::Processing(message.clone())),
            None => Ok(Self::expected_envelope(&self.name, query, self.cost)),
        }
    }
}

/// Earth division with ordered cases `weather → W`, `disaster → D`.
pub fn scenario_earth() -> Result<KeywordDivision, ConfigurationError> {
    DivisionBuilder::new("Earth Intelligence")
        .id("eid")
        .capabilities(["Weather Analysis", "Disaster Forecast"])
        .cost(EARTH_FLAT_COST)
        .predicate(PredicateKind::Keywords)
        .case(
            Case::new("weather", ["weather"])
                .respond(WEATHER_RESPONSE)
                .tool("Global Atmos Scan", "Multi-Region", "Map Generated"),
        )
        .case(
            Case::new("disaster", ["disaster"])
                .respond(DISASTER_RESPONSE)
                .tool("Risk Prediction Model", "Seismic Sensors", "Alert"),
        )
        .build()
}

/// `[Earth (keywords), Core fallback (always)]`, sealed.
pub fn scenario_registry() -> Result<Registry<Sealed>, ConfigurationError> {
    let mut registry = Registry::new();
    registry.register(scenario_earth()?)?;
    registry.register(CoreDivision::new())?;
    Ok(registry.seal())
}

/// A single division with overlapping groups `flood → X`, `disaster → Y`.
pub fn overlapping_groups() -> Result<KeywordDivision, ConfigurationError> {
    DivisionBuilder::new("Hazards")
        .id("hz")
        .case(Case::new("caseX", ["flood"]).respond("X"))
        .case(Case::new("caseY", ["disaster"]).respond("Y"))
        .build()
}
