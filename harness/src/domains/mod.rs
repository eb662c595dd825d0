//! Concrete `SearchDomainV1` implementations.

pub mod fifteen;
pub mod grid;

pub use fifteen::FifteenPuzzle;
pub use grid::GridDomain;

/// A domain instance that fails its own construction-time checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The instance description is internally inconsistent.
    InvalidInstance { detail: String },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstance { detail } => {
                write!(f, "invalid domain instance: {detail}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
