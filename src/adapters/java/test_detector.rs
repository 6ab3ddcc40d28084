/// Java test source detector
///
/// Conventions:
/// - *Test.java / *Tests.java files
/// - src/test/ directories
/// - test/ directories
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaTestDetector;

impl JavaTestDetector {
    /// `path` is relative to the analysis root, `/`-separated.
    pub fn is_test_source(&self, path: &str) -> bool {
        if path.contains("/src/test/")
            || path.starts_with("src/test/")
            || path.contains("/test/")
            || path.starts_with("test/")
        {
            return true;
        }

        path.split('/').next_back().is_some_and(|filename| {
            filename.ends_with("Test.java") || filename.ends_with("Tests.java")
        })
    }
}
