//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Amalgamation configuration
///
/// Every field has a default matching the libev build, so an empty JSON
/// object is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmalgamateConfig {
    /// License text wrapped into the head of both artifacts
    pub license_path: PathBuf,

    /// File name of the merged header inside the output directory
    pub header_name: String,

    /// File name of the merged source inside the output directory
    pub source_name: String,

    /// Build-mode define emitted first in the merged source
    pub build_define: String,

    /// Feature-test define emitted after the build-mode define
    pub feature_define: String,

    /// Preprocessor condition selecting the windows blocks
    pub platform_condition: String,

    /// Tool name quoted in the generated-file warning
    pub generator: String,

    /// Where users are asked to report improvements
    pub report_url: String,

    /// Upper bound on header resolution steps; `None` never gives up
    pub max_expansions: Option<usize>,
}

impl Default for AmalgamateConfig {
    fn default() -> Self {
        Self {
            license_path: PathBuf::from("LICENSE"),
            header_name: "ev.h".into(),
            source_name: "ev.c".into(),
            build_define: "EV_AMALGAMATE_BUILD".into(),
            feature_define: "_GNU_SOURCE".into(),
            platform_condition: "defined(_WIN32)".into(),
            generator: "ev-amalgamate".into(),
            report_url: "https://github.com/qgymib/libev".into(),
            max_expansions: None,
        }
    }
}

impl AmalgamateConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// The canonical include line the merged source uses for the merged header
    pub fn header_include_line(&self) -> String {
        format!("#include \"{}\"", self.header_name)
    }

    /// Check that the artifact names can be joined onto the output directory
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("header_name", &self.header_name),
            ("source_name", &self.source_name),
        ] {
            if name.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", field)));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(Error::Config(format!(
                    "{} must be a bare file name, got '{}'",
                    field, name
                )));
            }
        }

        if self.header_name == self.source_name {
            return Err(Error::Config(format!(
                "header_name and source_name are both '{}'",
                self.header_name
            )));
        }

        if self.max_expansions == Some(0) {
            return Err(Error::Config("max_expansions must be at least 1".into()));
        }

        Ok(())
    }
}
