//! Engine configuration.

use crate::error::SearchError;

/// Duplicate-handling and budget configuration for one engine instance.
///
/// Passed at construction; there is no process-wide configuration. Partial
/// state comparison (which fields count toward identity) is a domain
/// concern and lives on the domain object, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfigV1 {
    /// Reinsert improved CLOSED nodes into OPEN. When disabled, improved
    /// duplicates are parked in the `incons` set instead of being
    /// re-expanded in the current pass.
    pub reopening: bool,
    /// Hard cap on node expansions across all anytime iterations.
    pub max_expansions: u64,
    /// Count violations of heuristic consistency
    /// (`h(parent) > cost + h(child)`) in a warning counter. Never fatal.
    pub check_consistency: bool,
}

impl EngineConfigV1 {
    /// Validate the configuration before any expansion happens.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for a zero expansion budget.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidConfig {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfigV1 {
    fn default() -> Self {
        Self {
            reopening: true,
            max_expansions: u64::MAX,
            check_consistency: false,
        }
    }
}
