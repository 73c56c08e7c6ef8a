//! Two-phase division registry.
//!
//! Enforces the lifecycle `Open → Sealed` at compile time: divisions can
//! only be added while the registry is open, and only a sealed registry can
//! hand out a [`Router`].
//!
//! ```text
//! Registry<Open>
//!     → .register(division)   // repeatable, validated
//!     → .seal()
//!         → Registry<Sealed>  // immutable, Send + Sync, share via Arc
//!             → .router()
//! ```
//!
//! Registration order is significant: it is the only tie-break when more
//! than one division accepts a query.

use std::fmt;
use std::marker::PhantomData;

use tracing::{info, warn};

use crate::division::Division;
use crate::router::Router;

/// Errors detected while assembling a registry. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("division name {0:?} is already registered")]
    DuplicateName(String),

    #[error("division id {0:?} is already registered")]
    DuplicateId(String),

    #[error("division {division:?} is unreachable: fallback {fallback:?} is already registered")]
    UnreachableAfterFallback { division: String, fallback: String },

    #[error("invalid division {division:?}: {reason}")]
    Invalid { division: String, reason: String },

    #[error("unknown predicate {0:?}, expected \"keywords\" or \"always\"")]
    UnknownPredicate(String),
}

/// Open state: accepting registrations.
pub struct Open;

/// Sealed state: read-only and dispatchable.
pub struct Sealed;

/// An ordered collection of divisions, parameterized by lifecycle state.
pub struct Registry<S> {
    divisions: Vec<Box<dyn Division>>,
    _state: PhantomData<S>,
}

impl Registry<Open> {
    /// Create an empty, open registry.
    pub fn new() -> Self {
        Self {
            divisions: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Append a division.
    ///
    /// Names and ids are compared case-insensitively. Nothing may follow a
    /// designated fallback division.
    pub fn register(&mut self, division: impl Division + 'static) -> Result<(), ConfigurationError> {
        self.register_boxed(Box::new(division))
    }

    /// Append an already boxed division.
    pub fn register_boxed(&mut self, division: Box<dyn Division>) -> Result<(), ConfigurationError> {
        if let Some(fallback) = self.divisions.iter().find(|d| d.is_fallback()) {
            return Err(ConfigurationError::UnreachableAfterFallback {
                division: division.name().to_string(),
                fallback: fallback.name().to_string(),
            });
        }
        if self
            .divisions
            .iter()
            .any(|d| d.name().eq_ignore_ascii_case(division.name()))
        {
            return Err(ConfigurationError::DuplicateName(division.name().to_string()));
        }
        if self
            .divisions
            .iter()
            .any(|d| d.id().eq_ignore_ascii_case(division.id()))
        {
            return Err(ConfigurationError::DuplicateId(division.id().to_string()));
        }
        if let Some(catch_all) = self.divisions.iter().find(|d| d.accepts_all()) {
            warn!(
                division = division.name(),
                shadowed_by = catch_all.name(),
                "Division is only reachable by direct routing"
            );
        }

        self.divisions.push(division);
        Ok(())
    }

    /// Freeze the registry. No further registrations are possible.
    pub fn seal(self) -> Registry<Sealed> {
        info!(
            divisions = self.divisions.len(),
            has_fallback = self.divisions.iter().any(|d| d.accepts_all()),
            "Registry sealed"
        );
        Registry {
            divisions: self.divisions,
            _state: PhantomData,
        }
    }
}

impl Default for Registry<Open> {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry<Sealed> {
    /// Borrow a router over this registry.
    pub fn router(&self) -> Router<'_> {
        Router::new(self)
    }
}

impl<S> Registry<S> {
    /// Divisions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Division> + '_ {
        self.divisions.iter().map(|d| d.as_ref())
    }

    /// Division names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|d| d.name()).collect()
    }

    /// Look up a division by id or name, case-insensitively. Ids win.
    pub fn get(&self, target: &str) -> Option<&dyn Division> {
        self.iter()
            .find(|d| d.id().eq_ignore_ascii_case(target))
            .or_else(|| self.iter().find(|d| d.name().eq_ignore_ascii_case(target)))
    }

    /// Whether any registered division accepts every query.
    pub fn has_catch_all(&self) -> bool {
        self.divisions.iter().any(|d| d.accepts_all())
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("divisions", &self.names())
            .finish()
    }
}
