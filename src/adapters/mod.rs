//! Infrastructure adapters: file system access and the Java front end.

pub mod fs;
pub mod java;
