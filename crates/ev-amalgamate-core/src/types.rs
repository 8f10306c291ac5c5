//! Core type definitions

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Ordered list of input file paths
///
/// Order is preserved verbatim into the output. Paths are kept as strings
/// because header resolution matches logical names against the path text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileList(Vec<String>);

impl FileList {
    /// Create a list from already separated paths, dropping empty entries
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            paths
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        )
    }

    /// Parse a comma separated path sequence
    pub fn from_delimited(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// The first path, which header amalgamation expands from
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for FileList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The six categorized lists making up the merged source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLists {
    /// Internal headers shared by every platform
    pub headers: FileList,
    /// Windows-only internal headers
    pub headers_win: FileList,
    /// Unix-only internal headers
    pub headers_unix: FileList,
    /// Sources shared by every platform
    pub sources: FileList,
    /// Windows-only sources
    pub sources_win: FileList,
    /// Unix-only sources
    pub sources_unix: FileList,
}

impl SourceLists {
    /// Total number of files across all six lists
    pub fn file_count(&self) -> usize {
        [
            &self.headers,
            &self.headers_win,
            &self.headers_unix,
            &self.sources,
            &self.sources_win,
            &self.sources_unix,
        ]
        .iter()
        .map(|l| l.len())
        .sum()
    }
}

/// A local quoted include (`#include "name.h"`) found in a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Logical name without the `.h` suffix, e.g. `ev/async`
    pub name: String,
    /// Directive text exactly as it appears in the buffer
    pub text: String,
    /// Byte offset of the first character of the directive
    pub start: usize,
    /// Byte offset one past the closing quote
    pub end: usize,
}

impl IncludeDirective {
    /// Byte span of the directive in its host buffer
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delimited_keeps_order() {
        let list = FileList::from_delimited("src/b.c,src/a.c,src/c.c");
        assert_eq!(list.as_slice(), ["src/b.c", "src/a.c", "src/c.c"]);
        assert_eq!(list.root(), Some("src/b.c"));
    }

    #[test]
    fn test_empty_segments_dropped() {
        assert!(FileList::from_delimited("").is_empty());
        let list = FileList::from_delimited("a.h,,b.h,");
        assert_eq!(list.len(), 2);
        assert_eq!(list.root(), Some("a.h"));
    }

    #[test]
    fn test_file_count() {
        let lists = SourceLists {
            headers: FileList::from_delimited("a.h,b.h"),
            sources_unix: FileList::from_delimited("unix/loop.c"),
            ..Default::default()
        };
        assert_eq!(lists.file_count(), 3);
    }
}
