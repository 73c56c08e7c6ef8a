//! Result envelope, the structured output of every division.
//!
//! Presentation, billing, and audit consumers depend on these exact field
//! names: `response`, `tool_usage`, `logs`, `cost`.

use serde::{Deserialize, Serialize};

/// One internal action taken while producing a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUsage {
    /// Tool name (e.g. "Global Atmos Scan").
    pub tool: String,
    /// Description of what was fed to the tool.
    pub input: String,
    /// Description of what the tool produced.
    pub output: String,
}

impl ToolUsage {
    pub fn new(tool: impl Into<String>, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

/// The structured result of a single dispatch.
///
/// Every field is always present. A division that found no matching case
/// still returns a generic `response`, empty `tool_usage` and `logs`, and
/// its flat `cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Text for the end user.
    pub response: String,

    /// Tool invocations in the order they happened.
    #[serde(default)]
    pub tool_usage: Vec<ToolUsage>,

    /// Free-text audit notes.
    #[serde(default)]
    pub logs: Vec<String>,

    /// Estimated cost of this invocation. Never negative.
    pub cost: f64,
}

impl ResultEnvelope {
    /// Create an envelope with no tool usage or logs.
    pub fn new(response: impl Into<String>, cost: f64) -> Self {
        Self {
            response: response.into(),
            tool_usage: Vec::new(),
            logs: Vec::new(),
            cost,
        }
    }

    /// Append a tool usage record.
    pub fn with_tool(mut self, usage: ToolUsage) -> Self {
        self.tool_usage.push(usage);
        self
    }

    /// Append an audit log line.
    pub fn with_log(mut self, line: impl Into<String>) -> Self {
        self.logs.push(line.into());
        self
    }
}
