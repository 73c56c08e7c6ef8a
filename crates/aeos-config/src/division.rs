//! TOML schema for operator-defined divisions.
//!
//! Each `[[divisions]]` table describes one keyword-routed division: its
//! identity, flat cost, predicate, and an ordered list of cases. Case order
//! in the file is the match order at runtime.
//!
//! ## TOML Example
//!
//! ```toml
//! [[divisions]]
//! name = "OPS - Operations"
//! id = "ops"
//! capabilities = ["Incident Review", "Change Calendar"]
//! cost = 0.01
//! fallback_response = "OPS is online. Select an operations capability."
//!
//! [[divisions.cases]]
//! label = "incident"
//! keywords = ["incident", "outage"]
//! response = "INCIDENT REPORT: no open incidents."
//! logs = ["Paging on-call rotation."]
//! tools = [{ tool = "Pager", input = "Rotation", output = "Paged" }]
//! ```

use serde::{Deserialize, Serialize};

/// A single division definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionConfig {
    /// Human-readable name; must be unique across the registry.
    pub name: String,

    /// Short routing code. Defaults to the lower-cased name.
    #[serde(default)]
    pub id: Option<String>,

    /// One-line summary shown in listings.
    #[serde(default)]
    pub description: String,

    /// Advertised capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Flat cost charged for every invocation.
    #[serde(default)]
    pub cost: f64,

    /// Predicate override: "keywords" or "always". Inherits `router.predicate`.
    #[serde(default)]
    pub predicate: Option<String>,

    /// Trigger keywords for the keyword predicate. When empty, the union of
    /// all case keywords is used.
    #[serde(default)]
    pub triggers: Vec<String>,

    /// Response returned when no case matches.
    #[serde(default)]
    pub fallback_response: Option<String>,

    /// Ordered cases, first match wins.
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

impl DivisionConfig {
    /// The routing id, falling back to the lower-cased name.
    pub fn effective_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    /// The no-match response, falling back to a generic "online" line.
    pub fn effective_fallback_response(&self) -> String {
        self.fallback_response
            .clone()
            .unwrap_or_else(|| format!("{} is online. Select a capability.", self.name))
    }
}

/// One keyword group and the outcome it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Label used in logs and listings.
    #[serde(default)]
    pub label: String,

    /// Keywords; any one appearing in the query selects this case.
    pub keywords: Vec<String>,

    /// Response text returned verbatim.
    pub response: String,

    /// Audit log lines attached to the envelope.
    #[serde(default)]
    pub logs: Vec<String>,

    /// Tool usage records attached to the envelope, in order.
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

/// A tool usage record as written in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub tool: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
}
