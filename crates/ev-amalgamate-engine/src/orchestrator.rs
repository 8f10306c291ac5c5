//! Amalgamation Run
//!
//! Drives both amalgamators for one invocation and writes the two
//! artifacts. The header is written before the source is assembled, so a
//! failure in the source phase leaves an already written header in place.

use ev_amalgamate_core::{AmalgamateConfig, Error, FileList, Result, SourceLists};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::header::{amalgamate_header, ExpandOptions};
use crate::loader::{ContentLoader, FsLoader};
use crate::preamble::Preamble;
use crate::source::{amalgamate_source, SourceSettings};

/// Inputs for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Directory receiving both artifacts, created if missing
    pub out_dir: PathBuf,
    /// Public headers; the first one is the expansion root
    pub public_headers: FileList,
    /// Internal headers and sources for the merged source
    pub sources: SourceLists,
}

/// A written artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: usize,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub header: Artifact,
    pub source: Artifact,
}

/// Run against the filesystem, reading the license named by `config`
///
/// The configuration is validated before the license is read.
pub fn run(invocation: &Invocation, config: &AmalgamateConfig) -> Result<Report> {
    config.validate()?;
    let preamble = Preamble::from_config(config)?;
    write_artifacts(invocation, config, &preamble, &FsLoader)
}

/// Run with an explicit preamble and loader; artifacts always go to disk
pub fn run_with<L: ContentLoader>(
    invocation: &Invocation,
    config: &AmalgamateConfig,
    preamble: &Preamble,
    loader: &L,
) -> Result<Report> {
    config.validate()?;
    write_artifacts(invocation, config, preamble, loader)
}

fn write_artifacts<L: ContentLoader>(
    invocation: &Invocation,
    config: &AmalgamateConfig,
    preamble: &Preamble,
    loader: &L,
) -> Result<Report> {
    ensure_dir(&invocation.out_dir)?;

    let options = ExpandOptions {
        max_expansions: config.max_expansions,
    };
    let header = amalgamate_header(&invocation.public_headers, preamble, loader, options)?;
    let header = write_artifact(&invocation.out_dir.join(&config.header_name), &header)?;

    let settings = SourceSettings::from(config);
    let source = amalgamate_source(&invocation.sources, preamble, &settings, loader)?;
    let source = write_artifact(&invocation.out_dir.join(&config.source_name), &source)?;

    Ok(Report { header, source })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_artifact(path: &Path, content: &str) -> Result<Artifact> {
    std::fs::write(path, content).map_err(|e| Error::write(path, e))?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(Artifact {
        path: path.to_path_buf(),
        bytes: content.len(),
    })
}
