//! Artifact Preamble
//!
//! License and generated-file warning comment blocks placed at the top of
//! both merged artifacts.

use chrono::{DateTime, Local};
use ev_amalgamate_core::{AmalgamateConfig, Error, Result};
use std::path::Path;
use tracing::debug;

use crate::loader::normalize_newlines;

/// Timestamp layout used in the warning block, e.g. `2024-05-01 09:30:00.123456`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Rendered comment blocks shared by the header and the source artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    license: String,
    warning: String,
}

impl Preamble {
    /// Build the preamble from license text and a generation time
    pub fn new(
        license_text: &str,
        config: &AmalgamateConfig,
        generated_at: &DateTime<Local>,
    ) -> Self {
        Self {
            license: license_block(license_text),
            warning: warning_block(
                &config.generator,
                &config.report_url,
                &generated_at.format(TIMESTAMP_FORMAT).to_string(),
            ),
        }
    }

    /// Read the configured license file and stamp the current local time
    pub fn from_config(config: &AmalgamateConfig) -> Result<Self> {
        let license = read_license(&config.license_path)?;
        Ok(Self::new(&license, config, &Local::now()))
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn warning(&self) -> &str {
        &self.warning
    }

    /// Append both blocks to `out`
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.license);
        out.push_str(&self.warning);
    }
}

fn read_license(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    debug!("Loaded license from {:?}", path);
    Ok(normalize_newlines(text))
}

/// Wrap license text as a `/** ... */` block, one ` * ` line per input line
pub fn license_block(text: &str) -> String {
    let mut block = String::from("/**\n");
    for line in text.lines() {
        block.push_str(" * ");
        block.push_str(line);
        block.push('\n');
    }
    block.push_str(" */\n");
    block
}

/// Generated-file warning carrying the generation timestamp
pub fn warning_block(generator: &str, report_url: &str, timestamp: &str) -> String {
    format!(
        "/**\n\
         \x20* WARNING:\n\
         \x20* This file is automatically generated by {generator}, any modifications to\n\
         \x20* it will be overwritten by next generation.\n\
         \x20* If you have any improvements / feature requests, please kindly report it to\n\
         \x20* {report_url} so it can be kept.\n\
         \x20*\n\
         \x20* GENERATE DATE: {timestamp}\n\
         \x20*/\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_license_block() {
        let block = license_block("MIT License\n\nCopyright (c) qgymib\n");
        assert_eq!(
            block,
            "/**\n * MIT License\n * \n * Copyright (c) qgymib\n */\n"
        );
    }

    #[test]
    fn test_license_block_crlf_and_empty() {
        assert_eq!(license_block("a\r\nb"), "/**\n * a\n * b\n */\n");
        assert_eq!(license_block(""), "/**\n */\n");
    }

    #[test]
    fn test_warning_block_timestamp() {
        let config = AmalgamateConfig::default();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let preamble = Preamble::new("MIT", &config, &at);

        assert!(preamble
            .warning()
            .contains(" * GENERATE DATE: 2024-05-01 09:30:00.000000\n"));
        assert!(preamble.warning().starts_with("/**\n * WARNING:\n"));
        assert!(preamble.warning().ends_with(" */\n"));
        assert!(preamble.warning().contains("generated by ev-amalgamate,"));
    }

    #[test]
    fn test_write_to_orders_license_first() {
        let config = AmalgamateConfig::default();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let preamble = Preamble::new("MIT", &config, &at);

        let mut out = String::new();
        preamble.write_to(&mut out);
        assert!(out.starts_with("/**\n * MIT\n */\n/**\n * WARNING:"));
    }

    #[test]
    fn test_missing_license_is_read_error() {
        let config = AmalgamateConfig {
            license_path: "no/such/LICENSE".into(),
            ..Default::default()
        };
        assert!(matches!(
            Preamble::from_config(&config),
            Err(Error::Read { .. })
        ));
    }
}
