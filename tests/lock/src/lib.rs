//! Shared fixtures for the cross-crate lock tests.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fixtures;
