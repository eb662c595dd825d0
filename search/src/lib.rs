//! Wayfinder Search: anytime best-first search with PAC early termination.
//!
//! This crate provides the search layer. It depends only on
//! `wayfinder_kernel` — it does NOT depend on `wayfinder_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_kernel  ←  wayfinder_search  ←  wayfinder_harness
//! (packed keys)        (queues, engine)     (domains, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchDomainV1`] — capability contract a problem domain implements
//! - [`BestFirstEngine`] — the generic expansion loop over an [`OpenList`]
//! - [`AnytimeSearch`] — resumable search with incumbent tracking
//! - [`PacConditionV1`] — pluggable statistical/provable stopping policies
//! - [`SearchResultV1`] — solutions, counters, and the `fmin` lower bound
//!
//! [`SearchDomainV1`]: contract::SearchDomainV1
//! [`BestFirstEngine`]: engine::BestFirstEngine
//! [`AnytimeSearch`]: anytime::AnytimeSearch
//! [`PacConditionV1`]: pac::PacConditionV1
//! [`OpenList`]: queue::OpenList
//! [`SearchResultV1`]: result::SearchResultV1

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod anytime;
pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod fcounter;
pub mod node;
pub mod pac;
pub mod queue;
pub mod result;

#[cfg(test)]
pub(crate) mod testdomain;
