//! Wayfinder Kernel: dependency-free primitives for the search layer.
//!
//! # API Surface
//!
//! - [`packed`] -- `PackedKey`, the compact bit-packed state identity used
//!   for duplicate detection, plus its writer/reader
//! - [`fbits`] -- order-preserving bit representation of non-negative
//!   `f64` keys, used by the f-value counter
//!
//! # Module Dependency Direction
//!
//! `packed` and `fbits` are leaves; neither depends on the other, and the
//! kernel depends on nothing internal or external.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fbits;
pub mod packed;
