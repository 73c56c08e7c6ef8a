#![deny(unsafe_code)]

//! AEOS division router core.
//!
//! A free-text query is offered to each registered [`Division`] in
//! registration order; the first one whose predicate accepts it produces a
//! [`ResultEnvelope`]. Registries are built once, sealed, and then shared
//! read-only across any number of concurrent dispatch calls.

/// Registry assembly from [`aeos_config::AppConfig`].
pub mod assembly;
/// Built-in division catalog (Earth, Enterprise, DeFi, Human Interaction).
pub mod catalog;
/// Division trait, predicates, cases, and the keyword-routed implementation.
pub mod division;
/// Uniform result contract returned by every division.
pub mod envelope;
/// Cost and audit accumulator for dispatch results.
pub mod ledger;
/// Two-phase (open → sealed) division registry.
pub mod registry;
/// First-match dispatcher over a sealed registry.
pub mod router;

pub use assembly::{BuildError, build_registry};
pub use division::{
    Case, CoreDivision, Division, DivisionBuilder, DivisionError, KeywordDivision, Outcome,
    PredicateKind,
};
pub use envelope::{ResultEnvelope, ToolUsage};
pub use ledger::{AuditRecord, CostLedger, DivisionTotals};
pub use registry::{ConfigurationError, Open, Registry, Sealed};
pub use router::{DispatchError, Routed, Router};
