use std::collections::BTreeSet;

const PRIMITIVES: [&str; 8] = [
    "byte", "short", "int", "long", "float", "double", "boolean", "char",
];

/// Standard-library namespaces excluded unless configured otherwise.
pub const DEFAULT_EXCLUDED_PREFIXES: [&str; 8] = [
    "java.lang.",
    "java.util.",
    "java.io.",
    "java.math.",
    "java.time.",
    "java.text.",
    "java.nio.",
    "java.net.",
];

/// Decides which resolved target names become dependency edges.
///
/// [`ExclusionPolicy::should_include`] returns `true` for names to keep; an edge
/// is emitted only when it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    excluded_prefixes: BTreeSet<String>,
    include_imports: bool,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES)
    }
}

impl ExclusionPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
            include_imports: false,
        }
    }

    pub fn with_imports(mut self, include_imports: bool) -> Self {
        self.include_imports = include_imports;
        self
    }

    pub fn exclude_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.excluded_prefixes.insert(prefix);
        }
    }

    pub fn excluded_prefixes(&self) -> impl Iterator<Item = &str> {
        self.excluded_prefixes.iter().map(String::as_str)
    }

    pub fn include_imports(&self) -> bool {
        self.include_imports
    }

    /// Keep `target` as a dependency of `unit_name`?
    pub fn should_include(&self, target: &str, unit_name: &str) -> bool {
        if target.is_empty() || target == "void" || is_primitive(target) || is_array(target) {
            return false;
        }
        if self
            .excluded_prefixes
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()))
        {
            return false;
        }
        target != unit_name
    }
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

pub fn is_array(name: &str) -> bool {
    name.ends_with("[]")
}
