//! Wayfinder Harness: concrete domains and batch orchestration.
//!
//! The harness supplies what the search crate deliberately leaves out:
//! real problem domains implementing `SearchDomainV1` (sliding-tile
//! puzzle, grid pathfinding), a batch runner that fences each instance
//! behind `catch_unwind`, and JSON loading of PAC benchmark statistics.
//!
//! The harness does NOT implement search logic — it delegates to
//! `wayfinder_search`. Domains provide state, operators, and heuristics
//! only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod domains;
pub mod runner;
pub mod stats_io;
