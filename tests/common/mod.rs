//! Common test utilities for Strata contract and scenario tests.
//!
//! This module provides:
//! - `BackendFixture`: a storage facade over each backend, with its temp dir
//! - Fixtures: legacy objects used across scenarios

#![allow(dead_code)]

pub mod fixtures;

pub use backends::*;
pub use fixtures::*;
