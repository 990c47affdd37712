//! # strand-core — Foundational Primitives for the Strand Agent
//!
//! Dependency-leaf crate for the Strand device agent. Everything here
//! must be usable on constrained targets: no allocation on the hot
//! path, no panics, no `unsafe`.
//!
//! ## Contents
//!
//! - [`numeric`] — byte-at-a-time integer and real scanners for text
//!   arriving from configuration prompts and telemetry parameters.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `strand-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod numeric;

pub use numeric::{parse_integer, parse_real, NumericError};
