//! Source Amalgamation
//!
//! Concatenates internal headers and sources into one translation unit.
//! Every file gets a banner naming its path and has its local includes
//! rewritten into inert comments. Windows and unix content is gated by a
//! single `#if` split into three marked parts.

use ev_amalgamate_core::{AmalgamateConfig, FileList, Result, SourceLists};
use tracing::debug;

use crate::include;
use crate::loader::ContentLoader;
use crate::preamble::Preamble;

const BANNER_RULE: &str =
    "///////////////////////////////////////////////////////////////////////////////";

/// Constants emitted at the top of the merged source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// Build-mode define, e.g. `EV_AMALGAMATE_BUILD`
    pub build_define: String,
    /// Feature-test define, e.g. `_GNU_SOURCE`
    pub feature_define: String,
    /// Include line for the merged header
    pub header_include: String,
    /// Condition selecting windows content, e.g. `defined(_WIN32)`
    pub platform_condition: String,
}

impl From<&AmalgamateConfig> for SourceSettings {
    fn from(config: &AmalgamateConfig) -> Self {
        Self {
            build_define: config.build_define.clone(),
            feature_define: config.feature_define.clone(),
            header_include: config.header_include_line(),
            platform_condition: config.platform_condition.clone(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self::from(&AmalgamateConfig::default())
    }
}

/// Traceability banner placed before each file's contents
pub fn banner(path: &str) -> String {
    format!("{BANNER_RULE}\n// file: {path}\n{BANNER_RULE}\n")
}

/// The three parts of a platform conditional
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPart {
    Open,
    Else,
    Close,
}

impl MarkerPart {
    /// Position of this part within the conditional, counting from 1
    pub fn ordinal(self) -> usize {
        match self {
            MarkerPart::Open => 1,
            MarkerPart::Else => 2,
            MarkerPart::Close => 3,
        }
    }
}

/// Preprocessor line for one part, tagged with the conditional it belongs to
pub fn platform_marker(part: MarkerPart, condition: &str) -> String {
    let directive = format!("#if {}", condition);
    let head = match part {
        MarkerPart::Open => directive.as_str(),
        MarkerPart::Else => "#else",
        MarkerPart::Close => "#endif",
    };
    format!(
        "\n{} /* {} `{}' ({}/3) */\n",
        head,
        include::MARKER,
        directive,
        part.ordinal()
    )
}

struct SourceWriter<'a, L> {
    out: String,
    loader: &'a L,
    condition: &'a str,
}

impl<L: ContentLoader> SourceWriter<'_, L> {
    fn file(&mut self, path: &str) -> Result<()> {
        let data = self.loader.load(path)?;
        self.out.push_str(&banner(path));
        self.out.push_str(&include::rewrite(&data));
        debug!("Appended {}", path);
        Ok(())
    }

    fn files(&mut self, list: &FileList) -> Result<()> {
        for path in list.iter() {
            self.file(path)?;
        }
        Ok(())
    }

    fn platform_block(&mut self, windows: &FileList, unix: &FileList) -> Result<()> {
        self.out.push_str(&platform_marker(MarkerPart::Open, self.condition));
        self.files(windows)?;
        self.out.push_str(&platform_marker(MarkerPart::Else, self.condition));
        self.files(unix)?;
        self.out.push_str(&platform_marker(MarkerPart::Close, self.condition));
        Ok(())
    }
}

/// Produce the merged source
///
/// Fails on the first file that cannot be read; nothing is returned for a
/// partially assembled source.
pub fn amalgamate_source<L: ContentLoader>(
    lists: &SourceLists,
    preamble: &Preamble,
    settings: &SourceSettings,
    loader: &L,
) -> Result<String> {
    let mut writer = SourceWriter {
        out: String::new(),
        loader,
        condition: &settings.platform_condition,
    };

    preamble.write_to(&mut writer.out);
    writer.out.push_str(&format!(
        "#define {}\n#define {}\n{}\n",
        settings.build_define, settings.feature_define, settings.header_include
    ));

    writer.files(&lists.headers)?;
    writer.platform_block(&lists.headers_win, &lists.headers_unix)?;
    writer.files(&lists.sources)?;
    writer.platform_block(&lists.sources_win, &lists.sources_unix)?;

    debug!("Merged source assembled from {} files", lists.file_count());
    Ok(writer.out)
}
