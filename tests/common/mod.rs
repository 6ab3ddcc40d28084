//! Shared test utilities for integration tests.
//! Included by test files, never compiled as a test binary itself.
#![allow(dead_code)]

pub mod fixtures;
pub mod mock;
