//! Input Loading
//!
//! Amalgamators read every input through a [`ContentLoader`], so the same
//! code runs against the real tree and against in-memory fixtures.

use ev_amalgamate_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Source of raw file contents, keyed by the path string given on input
pub trait ContentLoader {
    /// Read the whole file at `path` as UTF-8 text
    fn load(&self, path: &str) -> Result<String>;
}

/// Loader reading from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl ContentLoader for FsLoader {
    fn load(&self, path: &str) -> Result<String> {
        let raw = std::fs::read_to_string(Path::new(path)).map_err(|e| Error::read(path, e))?;
        let content = normalize_newlines(raw);
        debug!("Loaded {} ({} bytes)", path, content.len());
        Ok(content)
    }
}

/// Turn `\r\n` and lone `\r` line endings into `\n`
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Loader backed by a path-to-content map
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl ContentLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            Error::read(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_loader_reads_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("list.c");
        std::fs::write(&path, "/* π */\nint x;\n").unwrap();

        let content = FsLoader.load(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "/* π */\nint x;\n");
    }

    #[test]
    fn test_fs_loader_normalizes_line_endings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("crlf.h");
        std::fs::write(&path, "int a;\r\n#include \"x.h\"\r\nint b;\rint c;\n").unwrap();

        let content = FsLoader.load(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "int a;\n#include \"x.h\"\nint b;\nint c;\n");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\n\r\nb".into()), "a\n\nb");
        assert_eq!(normalize_newlines("a\n\rb\r".into()), "a\n\nb\n");
        assert_eq!(normalize_newlines("plain\n".into()), "plain\n");
    }

    #[test]
    fn test_fs_loader_missing_file_names_path() {
        let err = FsLoader.load("does/not/exist.c").unwrap_err();
        assert!(matches!(&err, Error::Read { path, .. } if path == Path::new("does/not/exist.c")));
        assert!(err.to_string().contains("does/not/exist.c"));
    }

    #[test]
    fn test_fs_loader_rejects_invalid_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("latin1.c");
        std::fs::write(&path, [0x2f, 0x2a, 0xe9, 0x2a, 0x2f]).unwrap();

        assert!(FsLoader.load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with_file("ev.h", "x");
        assert_eq!(loader.load("ev.h").unwrap(), "x");
        assert!(matches!(loader.load("other.h"), Err(Error::Read { .. })));
    }
}
