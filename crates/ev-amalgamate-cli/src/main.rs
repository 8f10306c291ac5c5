//! ev-amalgamate CLI
//!
//! Merges the libev headers and sources into `<out>/ev.h` and `<out>/ev.c`.

use anyhow::{Context, Result};
use clap::Parser;
use ev_amalgamate_core::{AmalgamateConfig, FileList, SourceLists};
use ev_amalgamate_engine::{run, Invocation};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ev-amalgamate")]
#[command(author, version, about = "Amalgamate libev headers and sources", long_about = None)]
struct Cli {
    /// Output directory, created if missing
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Public headers; the first one is the expansion root
    #[arg(long = "public_hdr", value_name = "FILES", value_delimiter = ',', required = true)]
    public_hdr: Vec<String>,

    /// Internal headers shared by all platforms
    #[arg(long = "src_hdr", value_name = "FILES", value_delimiter = ',', required = true)]
    src_hdr: Vec<String>,

    /// Windows-only internal headers
    #[arg(long = "src_hdr_os_win", value_name = "FILES", value_delimiter = ',', required = true)]
    src_hdr_os_win: Vec<String>,

    /// Unix-only internal headers
    #[arg(long = "src_hdr_os_unix", value_name = "FILES", value_delimiter = ',', required = true)]
    src_hdr_os_unix: Vec<String>,

    /// Sources shared by all platforms
    #[arg(long = "src", value_name = "FILES", value_delimiter = ',', required = true)]
    src: Vec<String>,

    /// Windows-only sources
    #[arg(long = "src_os_win", value_name = "FILES", value_delimiter = ',', required = true)]
    src_os_win: Vec<String>,

    /// Unix-only sources
    #[arg(long = "src_os_unix", value_name = "FILES", value_delimiter = ',', required = true)]
    src_os_unix: Vec<String>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// License file wrapped into both artifacts (default: LICENSE)
    #[arg(long, value_name = "FILE")]
    license: Option<PathBuf>,

    /// Abort header inlining after this many splices
    #[arg(long, value_name = "N")]
    max_expansions: Option<usize>,

    /// Log every loaded file and splice
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<AmalgamateConfig> {
        let mut config = match &self.config {
            Some(path) => AmalgamateConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AmalgamateConfig::default(),
        };

        if let Some(license) = &self.license {
            config.license_path = license.clone();
        }
        if self.max_expansions.is_some() {
            config.max_expansions = self.max_expansions;
        }

        Ok(config)
    }

    fn invocation(self) -> Invocation {
        Invocation {
            out_dir: self.out,
            public_headers: FileList::new(self.public_hdr),
            sources: SourceLists {
                headers: FileList::new(self.src_hdr),
                headers_win: FileList::new(self.src_hdr_os_win),
                headers_unix: FileList::new(self.src_hdr_os_unix),
                sources: FileList::new(self.src),
                sources_win: FileList::new(self.src_os_win),
                sources_unix: FileList::new(self.src_os_unix),
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.load_config()?;
    let invocation = cli.invocation();
    debug!(
        "{} public headers, {} internal files",
        invocation.public_headers.len(),
        invocation.sources.file_count()
    );

    let report = run(&invocation, &config)
        .with_context(|| format!("amalgamating into {}", invocation.out_dir.display()))?;

    info!(
        "Amalgamation complete: {} ({} bytes), {} ({} bytes)",
        report.header.path.display(),
        report.header.bytes,
        report.source.path.display(),
        report.source.bytes
    );

    Ok(())
}
