//! ev-amalgamate Engine
//!
//! Merges a multi-file C library into one header and one source file.
//!
//! ## Modules
//!
//! - `include` - Local include scanning and inert-comment rewriting
//! - `header` - Fixed-point header inlining
//! - `source` - Banner and platform-block concatenation of sources
//! - `preamble` - License and generated-file warning blocks
//! - `loader` - File content loading
//! - `orchestrator` - One end-to-end run writing both artifacts

pub mod header;
pub mod include;
pub mod loader;
pub mod orchestrator;
pub mod preamble;
pub mod source;

pub use header::{amalgamate_header, inline_headers, ExpandOptions};
pub use loader::{ContentLoader, FsLoader, MemoryLoader};
pub use orchestrator::{run, run_with, Artifact, Invocation, Report};
pub use preamble::Preamble;
pub use source::{amalgamate_source, SourceSettings};
