//! Type-level dependency classification and concurrent aggregation over
//! Java source trees.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
