//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use aeos_config::{AppConfig, CaseConfig, DivisionConfig, ToolConfig};

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .without_catalog()
///     .division(TestConfigBuilder::keyword_division("OPS", "ops", &["incident"]))
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn predicate(mut self, predicate: &str) -> Self {
        self.config.router.predicate = predicate.to_string();
        self
    }

    pub fn without_catalog(mut self) -> Self {
        self.config.router.catalog = false;
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.config.router.fallback = false;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn ledger_capacity(mut self, capacity: usize) -> Self {
        self.config.ledger.capacity = capacity;
        self
    }

    pub fn division(mut self, division: DivisionConfig) -> Self {
        self.config.divisions.push(division);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }

    /// A division with one case per keyword. Each case responds with
    /// `"<NAME>: <keyword>"` and records one tool call.
    pub fn keyword_division(name: &str, id: &str, keywords: &[&str]) -> DivisionConfig {
        DivisionConfig {
            name: name.to_string(),
            id: Some(id.to_string()),
            description: String::new(),
            capabilities: keywords.iter().map(|k| k.to_string()).collect(),
            cost: 0.01,
            predicate: None,
            triggers: Vec::new(),
            fallback_response: None,
            cases: keywords
                .iter()
                .map(|keyword| CaseConfig {
                    label: keyword.to_string(),
                    keywords: vec![keyword.to_string()],
                    response: format!("{name}: {keyword}"),
                    logs: Vec::new(),
                    tools: vec![ToolConfig {
                        tool: format!("{name} Tool"),
                        input: keyword.to_string(),
                        output: "Done".to_string(),
                    }],
                })
                .collect(),
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
