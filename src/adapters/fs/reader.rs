use crate::domain::ports::SourceReader;
use std::path::Path;

/// File system source reader implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSourceReader;

impl FileSourceReader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceReader for FileSourceReader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        let bytes = std::fs::read(path)?;
        // Sources with a stray non-UTF-8 byte in a comment are still worth parsing.
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }
}
