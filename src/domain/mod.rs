pub mod classifier;
pub mod edge;
pub mod error;
pub mod graph;
pub mod policy;
pub mod ports;
pub mod report;
pub mod source_tree;
pub mod syntax;
