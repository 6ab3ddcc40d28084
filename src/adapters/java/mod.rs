//! Java language support: tree-sitter based parsing and name resolution.

pub mod jdk;
pub mod parser;
pub mod resolver;
pub mod test_detector;

pub use parser::JavaSyntaxParser;
pub use resolver::{JavaResolverConfigurator, JavaTypeResolver, SourceIndex};
