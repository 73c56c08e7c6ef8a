//! Registry assembly from configuration.
//!
//! Registration order is fixed: catalog divisions (when `router.catalog`),
//! then `[[divisions]]` in file order, then the core fallback (when
//! `router.fallback`).

use aeos_config::{AppConfig, ConfigError, DivisionConfig};
use tracing::info;

use crate::catalog;
use crate::division::{Case, DivisionBuilder, KeywordDivision, PredicateKind};
use crate::registry::{ConfigurationError, Registry, Sealed};

/// Errors from turning an [`AppConfig`] into a sealed registry.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] ConfigurationError),
}

/// Validate the configuration and build a sealed registry from it.
pub fn build_registry(config: &AppConfig) -> Result<Registry<Sealed>, BuildError> {
    config.validate()?;
    let default_predicate: PredicateKind = config.router.predicate.parse()?;

    let mut registry = Registry::new();
    if config.router.catalog {
        for division in catalog::divisions(default_predicate)? {
            registry.register(division)?;
        }
    }
    for division in &config.divisions {
        registry.register(division_from_config(division, default_predicate)?)?;
    }
    if config.router.fallback {
        registry.register(catalog::core_fallback())?;
    }

    info!(
        predicate = %default_predicate,
        catalog = config.router.catalog,
        custom = config.divisions.len(),
        fallback = config.router.fallback,
        "Registry assembled from config"
    );
    Ok(registry.seal())
}

/// Build one keyword division from its TOML definition.
pub fn division_from_config(
    config: &DivisionConfig,
    default_predicate: PredicateKind,
) -> Result<KeywordDivision, ConfigurationError> {
    let predicate = match &config.predicate {
        Some(kind) => kind.parse()?,
        None => default_predicate,
    };

    let mut builder = DivisionBuilder::new(config.name.clone())
        .id(config.effective_id())
        .description(config.description.clone())
        .capabilities(config.capabilities.iter().cloned())
        .cost(config.cost)
        .predicate(predicate)
        .fallback_response(config.effective_fallback_response());
    if !config.triggers.is_empty() {
        builder = builder.triggers(&config.triggers);
    }

    for (i, case) in config.cases.iter().enumerate() {
        let label = if case.label.is_empty() {
            format!("case-{i}")
        } else {
            case.label.clone()
        };
        let mut built = Case::new(label, &case.keywords).respond(case.response.clone());
        for tool in &case.tools {
            built = built.tool(tool.tool.clone(), tool.input.clone(), tool.output.clone());
        }
        for line in &case.logs {
            built = built.log(line.clone());
        }
        builder = builder.case(built);
    }

    builder.build()
}
