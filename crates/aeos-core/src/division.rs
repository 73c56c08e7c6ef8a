//! Divisions: capability-scoped query handlers.
//!
//! A [`Division`] answers two questions about a query: whether it accepts it
//! ([`Division::can_handle`]) and what it produces for it
//! ([`Division::process`]). Both must be pure functions of the query so a
//! single instance can serve concurrent dispatches without locking.
//!
//! [`KeywordDivision`] is the data-driven implementation used by the catalog
//! and by config-defined divisions. Its classification is an ordered list of
//! [`Case`]s evaluated top to bottom, first match wins:
//!
//! ```text
//! query ──lowercase──▶ case[0].keywords? ──no──▶ case[1].keywords? ──no──▶ … ──▶ fallback response
//!                             │yes                      │yes
//!                             ▼                         ▼
//!                      case[0].outcome           case[1].outcome
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::envelope::{ResultEnvelope, ToolUsage};
use crate::registry::ConfigurationError;

/// A capability-scoped query handler.
pub trait Division: Send + Sync {
    /// Stable human-readable name, unique within a registry.
    fn name(&self) -> &str;

    /// Short routing code used for direct routing.
    fn id(&self) -> &str {
        self.name()
    }

    /// One-line summary for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Advertised capability tags. Not used for matching.
    fn capabilities(&self) -> &[String];

    /// Flat cost charged per invocation.
    fn cost(&self) -> f64;

    /// Whether this division accepts every query.
    fn accepts_all(&self) -> bool {
        false
    }

    /// Whether this is the designated catch-all that must be registered last.
    fn is_fallback(&self) -> bool {
        false
    }

    /// Whether this division accepts the query.
    fn can_handle(&self, query: &str) -> bool;

    /// Produce the result envelope for an accepted query.
    fn process(&self, query: &str) -> Result<ResultEnvelope, DivisionError>;
}

/// Errors raised by a division while processing a query.
#[derive(Debug, thiserror::Error)]
pub enum DivisionError {
    #[error("division processing failed: {0}")]
    Processing(String),
}

/// Which acceptance policy a division uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredicateKind {
    /// Accept iff the lower-cased query contains a trigger keyword.
    #[default]
    Keywords,
    /// Accept every query.
    Always,
}

impl PredicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredicateKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keywords" => Ok(Self::Keywords),
            "always" => Ok(Self::Always),
            other => Err(ConfigurationError::UnknownPredicate(other.to_string())),
        }
    }
}

/// A resolved acceptance predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Always,
    Keywords(Vec<String>),
}

impl Predicate {
    fn accepts(&self, lowered_query: &str) -> bool {
        match self {
            Self::Always => true,
            Self::Keywords(keywords) => contains_any(lowered_query, keywords),
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

fn lowercase_all<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect()
}

/// The fixed result associated with a case.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub response: String,
    pub tool_usage: Vec<ToolUsage>,
    pub logs: Vec<String>,
}

impl Outcome {
    fn envelope(&self, cost: f64) -> ResultEnvelope {
        ResultEnvelope {
            response: self.response.clone(),
            tool_usage: self.tool_usage.clone(),
            logs: self.logs.clone(),
            cost,
        }
    }
}

/// A keyword group paired with the outcome it selects.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    label: String,
    keywords: Vec<String>,
    outcome: Outcome,
}

impl Case {
    /// Create a case matching any of `keywords` (case-insensitive).
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            keywords: lowercase_all(keywords),
            outcome: Outcome {
                response: String::new(),
                tool_usage: Vec::new(),
                logs: Vec::new(),
            },
        }
    }

    /// Set the response text.
    pub fn respond(mut self, response: impl Into<String>) -> Self {
        self.outcome.response = response.into();
        self
    }

    /// Append a tool usage record.
    pub fn tool(
        mut self,
        tool: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.outcome.tool_usage.push(ToolUsage::new(tool, input, output));
        self
    }

    /// Append an audit log line.
    pub fn log(mut self, line: impl Into<String>) -> Self {
        self.outcome.logs.push(line.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lower-cased keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether an already lower-cased query selects this case.
    pub fn matches(&self, lowered_query: &str) -> bool {
        contains_any(lowered_query, &self.keywords)
    }
}

/// Fluent builder for [`KeywordDivision`].
///
/// # Example
///
/// ```
/// use aeos_core::{Case, DivisionBuilder, PredicateKind};
///
/// let earth = DivisionBuilder::new("Earth")
///     .id("eid")
///     .cost(0.02)
///     .predicate(PredicateKind::Keywords)
///     .case(Case::new("weather", ["weather"]).respond("GLOBAL WEATHER MATRIX"))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DivisionBuilder {
    name: String,
    id: Option<String>,
    description: String,
    capabilities: Vec<String>,
    cost: f64,
    predicate: PredicateKind,
    triggers: Vec<String>,
    cases: Vec<Case>,
    fallback_response: Option<String>,
}

impl DivisionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            description: String::new(),
            capabilities: Vec::new(),
            cost: 0.0,
            predicate: PredicateKind::default(),
            triggers: Vec::new(),
            cases: Vec::new(),
            fallback_response: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn predicate(mut self, predicate: PredicateKind) -> Self {
        self.predicate = predicate;
        self
    }

    /// Explicit trigger keywords for [`PredicateKind::Keywords`].
    ///
    /// When never called, the union of all case keywords is used.
    pub fn triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.triggers = lowercase_all(triggers);
        self
    }

    /// Append a case. Cases are matched in the order they are added.
    pub fn case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    pub fn fallback_response(mut self, response: impl Into<String>) -> Self {
        self.fallback_response = Some(response.into());
        self
    }

    /// Validate and build the division.
    pub fn build(self) -> Result<KeywordDivision, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::Invalid {
            division: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if self.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(invalid("id must not be empty".to_string()));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(invalid(format!(
                "cost must be a non-negative number, got {}",
                self.cost
            )));
        }
        for (i, case) in self.cases.iter().enumerate() {
            if case.keywords.is_empty() || case.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(invalid(format!(
                    "case {i} ({:?}) needs at least one non-empty keyword",
                    case.label
                )));
            }
            if case.outcome.response.trim().is_empty() {
                return Err(invalid(format!(
                    "case {i} ({:?}) has an empty response",
                    case.label
                )));
            }
        }

        let fallback_response = self
            .fallback_response
            .clone()
            .unwrap_or_else(|| format!("{} is online. Select a capability.", self.name));
        if fallback_response.trim().is_empty() {
            return Err(invalid("fallback response must not be empty".to_string()));
        }

        let predicate = match self.predicate {
            PredicateKind::Always => Predicate::Always,
            PredicateKind::Keywords => {
                let triggers = if self.triggers.is_empty() {
                    let mut union: Vec<String> = Vec::new();
                    for keyword in self.cases.iter().flat_map(|c| c.keywords.iter()) {
                        if !union.contains(keyword) {
                            union.push(keyword.clone());
                        }
                    }
                    union
                } else {
                    self.triggers.clone()
                };
                if triggers.is_empty() {
                    return Err(invalid(
                        "keyword predicate needs at least one trigger keyword".to_string(),
                    ));
                }
                if triggers.iter().any(|t| t.trim().is_empty()) {
                    return Err(invalid("trigger keywords must not be empty".to_string()));
                }
                Predicate::Keywords(triggers)
            }
        };

        let id = self
            .id
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase());

        Ok(KeywordDivision {
            name: self.name,
            id,
            description: self.description,
            capabilities: self.capabilities,
            cost: self.cost,
            predicate,
            cases: self.cases,
            fallback_response,
        })
    }
}

/// A division whose classification is an ordered list of keyword cases.
#[derive(Debug, Clone)]
pub struct KeywordDivision {
    name: String,
    id: String,
    description: String,
    capabilities: Vec<String>,
    cost: f64,
    predicate: Predicate,
    cases: Vec<Case>,
    fallback_response: String,
}

impl KeywordDivision {
    /// Cases in match order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Trigger keywords, or `None` for an always-accepting division.
    pub fn triggers(&self) -> Option<&[String]> {
        match &self.predicate {
            Predicate::Always => None,
            Predicate::Keywords(keywords) => Some(keywords),
        }
    }

    pub fn predicate_kind(&self) -> PredicateKind {
        match self.predicate {
            Predicate::Always => PredicateKind::Always,
            Predicate::Keywords(_) => PredicateKind::Keywords,
        }
    }

    pub fn fallback_response(&self) -> &str {
        &self.fallback_response
    }

    /// The case an accepted query would select, if any.
    pub fn classify(&self, query: &str) -> Option<&Case> {
        let lowered = query.to_lowercase();
        self.cases.iter().find(|case| case.matches(&lowered))
    }
}

impl Division for KeywordDivision {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn accepts_all(&self) -> bool {
        matches!(self.predicate, Predicate::Always)
    }

    fn can_handle(&self, query: &str) -> bool {
        self.predicate.accepts(&query.to_lowercase())
    }

    fn process(&self, query: &str) -> Result<ResultEnvelope, DivisionError> {
        match self.classify(query) {
            Some(case) => {
                debug!(division = %self.name, case = %case.label, "Matched case");
                Ok(case.outcome.envelope(self.cost))
            }
            None => {
                debug!(division = %self.name, "No case matched, using fallback response");
                Ok(ResultEnvelope::new(self.fallback_response.clone(), self.cost))
            }
        }
    }
}

/// The always-accepting catch-all registered last.
///
/// Echoes the query back in a generic acknowledgement and charges nothing.
#[derive(Debug, Clone)]
pub struct CoreDivision {
    capabilities: Vec<String>,
}

impl CoreDivision {
    pub const NAME: &'static str = "AEOS Core";
    pub const ID: &'static str = "core";

    pub fn new() -> Self {
        Self {
            capabilities: vec!["General Routing".to_string()],
        }
    }
}

impl Default for CoreDivision {
    fn default() -> Self {
        Self::new()
    }
}

impl Division for CoreDivision {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn id(&self) -> &str {
        Self::ID
    }

    fn description(&self) -> &str {
        "Catch-all for queries no specialised division accepts."
    }

    fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    fn cost(&self) -> f64 {
        0.0
    }

    fn accepts_all(&self) -> bool {
        true
    }

    fn is_fallback(&self) -> bool {
        true
    }

    fn can_handle(&self, _query: &str) -> bool {
        true
    }

    fn process(&self, query: &str) -> Result<ResultEnvelope, DivisionError> {
        Ok(ResultEnvelope::new(
            format!("AEOS Core processing: \"{query}\". Routing to appropriate division."),
            0.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn weather_disaster(predicate: PredicateKind) -> KeywordDivision {
        DivisionBuilder::new("Earth")
            .id("eid")
            .cost(0.02)
            .predicate(predicate)
            .case(
                Case::new("weather", ["weather"])
                    .respond("W")
                    .tool("Global Atmos Scan", "Multi-Region", "Map Generated"),
            )
            .case(Case::new("disaster", ["disaster", "forecast"]).respond("D"))
            .fallback_response("Earth is online.")
            .build()
            .unwrap()
    }

    #[test]
    fn test_keyword_predicate_is_case_insensitive() {
        let div = weather_disaster(PredicateKind::Keywords);
        assert!(div.can_handle("What's the WEATHER today"));
        assert!(div.can_handle("disaster"));
        assert!(!div.can_handle("tell me a joke"));
    }

    #[test]
    fn test_always_predicate_accepts_everything() {
        let div = weather_disaster(PredicateKind::Always);
        assert!(div.accepts_all());
        assert!(div.can_handle("tell me a joke"));
        assert!(div.can_handle(""));
        assert_eq!(div.triggers(), None);
    }

    #[test]
    fn test_triggers_default_to_case_keyword_union() {
        let div = weather_disaster(PredicateKind::Keywords);
        assert_eq!(
            div.triggers().unwrap(),
            &["weather".to_string(), "disaster".to_string(), "forecast".to_string()]
        );
    }

    #[test]
    fn test_explicit_triggers_are_lowercased() {
        let div = DivisionBuilder::new("Audit")
            .triggers(["AUDIT", "Ledger"])
            .build()
            .unwrap();
        assert!(div.can_handle("run the audit"));
        assert!(div.can_handle("LEDGER check"));
        assert!(!div.can_handle("weather"));
    }

    #[test]
    fn test_process_returns_case_outcome_with_flat_cost() {
        let div = weather_disaster(PredicateKind::Keywords);
        let envelope = div.process("what's the weather today").unwrap();
        assert_eq!(envelope.response, "W");
        assert_eq!(envelope.cost, 0.02);
        assert_eq!(envelope.tool_usage.len(), 1);
        assert_eq!(envelope.tool_usage[0].tool, "Global Atmos Scan");
        assert!(envelope.logs.is_empty());
    }

    #[test]
    fn test_first_listed_case_wins_on_overlap() {
        let div = weather_disaster(PredicateKind::Keywords);
        let envelope = div.process("weather disaster").unwrap();
        assert_eq!(envelope.response, "W");

        let envelope = div.process("disaster then weather").unwrap();
        assert_eq!(envelope.response, "W");
    }

    #[test]
    fn test_no_case_match_uses_fallback_envelope() {
        let div = weather_disaster(PredicateKind::Always);
        let envelope = div.process("tell me a joke").unwrap();
        assert_eq!(envelope, ResultEnvelope::new("Earth is online.", 0.02));
    }

    #[test]
    fn test_default_fallback_response_names_division() {
        let div = DivisionBuilder::new("OPS")
            .predicate(PredicateKind::Always)
            .build()
            .unwrap();
        assert_eq!(div.fallback_response(), "OPS is online. Select a capability.");
        assert_eq!(div.id(), "ops");
    }

    #[test]
    fn test_classify_enumerates_each_case() {
        let div = weather_disaster(PredicateKind::Keywords);
        for case in div.cases() {
            let query = format!("please {}", case.keywords()[0]);
            assert_eq!(div.classify(&query).map(Case::label), Some(case.label()));
            assert_eq!(div.process(&query).unwrap().response, case.outcome().response);
        }
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let err = DivisionBuilder::new("  ")
            .predicate(PredicateKind::Always)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Invalid { .. }));
    }

    #[test]
    fn test_build_rejects_blank_id() {
        for id in ["", "   "] {
            let err = DivisionBuilder::new("Earth")
                .id(id)
                .predicate(PredicateKind::Always)
                .build()
                .unwrap_err();
            assert_eq!(err.to_string(), "invalid division \"Earth\": id must not be empty");
        }
    }

    #[test]
    fn test_build_rejects_negative_or_nan_cost() {
        for cost in [-0.01, f64::NAN, f64::INFINITY] {
            let result = DivisionBuilder::new("Bad")
                .predicate(PredicateKind::Always)
                .cost(cost)
                .build();
            assert!(result.is_err(), "cost {cost} should be rejected");
        }
    }

    #[test]
    fn test_build_rejects_keyword_predicate_without_keywords() {
        let err = DivisionBuilder::new("Silent").build().unwrap_err();
        assert!(err.to_string().contains("trigger keyword"));
    }

    #[test]
    fn test_build_rejects_empty_case_keyword() {
        let result = DivisionBuilder::new("Greedy")
            .case(Case::new("everything", [""]).respond("matched"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_empty_case_response() {
        let result = DivisionBuilder::new("Mute")
            .case(Case::new("mute", ["mute"]))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_predicate_kind_parsing() {
        assert_eq!("keywords".parse::<PredicateKind>().unwrap(), PredicateKind::Keywords);
        assert_eq!("always".parse::<PredicateKind>().unwrap(), PredicateKind::Always);
        assert!("regex".parse::<PredicateKind>().is_err());
        assert_eq!(PredicateKind::Always.to_string(), "always");
    }

    #[test]
    fn test_core_division_echoes_query() {
        let core = CoreDivision::new();
        assert!(core.is_fallback());
        assert!(core.can_handle("anything at all"));
        let envelope = core.process("tell me a joke").unwrap();
        assert_eq!(
            envelope.response,
            "AEOS Core processing: \"tell me a joke\". Routing to appropriate division."
        );
        assert_eq!(envelope.cost, 0.0);
        assert!(envelope.tool_usage.is_empty());
        assert!(envelope.logs.is_empty());
    }

    #[test]
    fn test_process_is_deterministic() {
        let div = weather_disaster(PredicateKind::Keywords);
        assert_eq!(
            div.process("forecast please").unwrap(),
            div.process("forecast please").unwrap()
        );
    }
}
