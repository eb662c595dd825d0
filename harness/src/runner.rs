//! Batch runner with a per-instance fault boundary.
//!
//! A panicking domain must not take a whole benchmark batch down, so every
//! instance runs behind `catch_unwind` and a fault is reported as an
//! outcome alongside the completed instances. This requires the unwinding
//! panic strategy; the workspace profiles pin `panic = "unwind"`.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use wayfinder_search::contract::SearchDomainV1;
use wayfinder_search::result::SearchResultV1;

/// What happened to one instance.
#[derive(Debug)]
pub enum InstanceOutcome<D: SearchDomainV1> {
    /// The search ran to a normal termination.
    Completed(SearchResultV1<D>),
    /// The instance panicked; `detail` carries the panic payload when it
    /// was a string.
    Faulted { detail: String },
}

impl<D: SearchDomainV1> InstanceOutcome<D> {
    #[must_use]
    pub fn result(&self) -> Option<&SearchResultV1<D>> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Faulted { .. } => None,
        }
    }
}

/// Outcomes of a batch, keyed by instance id.
#[derive(Debug)]
pub struct BatchReport<D: SearchDomainV1> {
    pub outcomes: BTreeMap<String, InstanceOutcome<D>>,
}

impl<D: SearchDomainV1> BatchReport<D> {
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, InstanceOutcome::Completed(_)))
            .count()
    }

    #[must_use]
    pub fn faulted(&self) -> usize {
        self.outcomes.len() - self.completed()
    }
}

/// Run one instance behind the fault boundary.
pub fn run_guarded<D, F>(run: F) -> InstanceOutcome<D>
where
    D: SearchDomainV1,
    F: FnOnce() -> SearchResultV1<D>,
{
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(result) => InstanceOutcome::Completed(result),
        Err(payload) => InstanceOutcome::Faulted {
            detail: panic_detail(payload.as_ref()),
        },
    }
}

/// Run every instance of a batch; a fault in one instance does not stop
/// the others.
pub fn run_batch<D, I, F>(instances: I) -> BatchReport<D>
where
    D: SearchDomainV1,
    I: IntoIterator<Item = (String, F)>,
    F: FnOnce() -> SearchResultV1<D>,
{
    let outcomes = instances
        .into_iter()
        .map(|(id, run)| (id, run_guarded(run)))
        .collect();
    BatchReport { outcomes }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
