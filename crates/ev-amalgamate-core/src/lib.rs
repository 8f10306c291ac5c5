//! ev-amalgamate Core
//!
//! Core types, configuration and errors shared by the amalgamation engine
//! and the command-line tool.

pub mod config;
pub mod error;
pub mod types;

pub use config::AmalgamateConfig;
pub use error::{Error, Result};
pub use types::*;
