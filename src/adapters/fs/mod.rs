pub mod discovery;
pub mod reader;
