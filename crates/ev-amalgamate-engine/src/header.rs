//! Header Amalgamation
//!
//! Inlines local includes into a single self-contained header, starting
//! from the first entry of the public-header list.
//!
//! The buffer is rescanned from the start after every splice, so expansion
//! always happens leftmost-first. The loop stops once no local include is
//! left. An include cycle, or a name that no candidate path contains, keeps
//! the loop going forever unless [`ExpandOptions::max_expansions`] is set.
//!
//! Only the header body is scanned; the preamble is prepended afterwards, so
//! a quoted include inside the license text is never expanded.

use ev_amalgamate_core::{Error, FileList, IncludeDirective, Result};
use tracing::debug;

use crate::include;
use crate::loader::ContentLoader;
use crate::preamble::Preamble;

/// Tuning for the expansion loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Give up after this many resolution steps
    pub max_expansions: Option<usize>,
}

/// Outcome of a single resolution step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A directive was replaced by the contents of `path`
    Spliced { name: String, path: String },
    /// The leftmost directive names no candidate; the buffer is unchanged
    Unresolved { name: String },
    /// No local include left
    FixedPoint,
}

/// First candidate whose path contains `name`, in list order
///
/// Plain substring containment: `"ev/tcp"` also matches `"include/ev/tcp_ext.h"`
/// if that path comes first.
pub fn resolve<'a>(name: &str, candidates: &'a FileList) -> Option<&'a str> {
    candidates.iter().find(|path| path.contains(name))
}

/// Replace the leftmost local include in `buffer` with the file it names
pub fn expand_step<L: ContentLoader>(
    buffer: &mut String,
    candidates: &FileList,
    loader: &L,
) -> Result<Step> {
    let Some(directive) = include::find_first(buffer) else {
        return Ok(Step::FixedPoint);
    };

    let Some(path) = resolve(&directive.name, candidates) else {
        return Ok(Step::Unresolved {
            name: directive.name,
        });
    };

    let content = loader.load(path)?;
    splice(buffer, &directive, &content);
    debug!("Inlined {} from {}", directive.text, path);

    Ok(Step::Spliced {
        name: directive.name,
        path: path.to_string(),
    })
}

fn splice(buffer: &mut String, directive: &IncludeDirective, content: &str) {
    buffer.replace_range(directive.span(), content);
}

/// Expand every local include reachable from the root of `headers`
///
/// Returns the bare inlined text, without preamble.
pub fn inline_headers<L: ContentLoader>(
    headers: &FileList,
    loader: &L,
    options: ExpandOptions,
) -> Result<String> {
    let Some(root) = headers.root() else {
        return Err(Error::Config("public header list is empty".into()));
    };

    let mut buffer = loader.load(root)?;
    let mut expansions = 0usize;

    loop {
        let name = match expand_step(&mut buffer, headers, loader)? {
            Step::FixedPoint => break,
            Step::Spliced { name, .. } | Step::Unresolved { name } => name,
        };

        expansions += 1;
        if let Some(limit) = options.max_expansions {
            if expansions >= limit && include::count(&buffer) > 0 {
                return Err(Error::ExpansionLimit { limit, name });
            }
        }
    }

    debug!("Header fixed point reached after {} splices", expansions);
    Ok(buffer)
}

/// Produce the merged header: preamble followed by the inlined text
pub fn amalgamate_header<L: ContentLoader>(
    headers: &FileList,
    preamble: &Preamble,
    loader: &L,
    options: ExpandOptions,
) -> Result<String> {
    let body = inline_headers(headers, loader, options)?;

    let mut content = String::with_capacity(body.len() + 1024);
    preamble.write_to(&mut content);
    content.push_str(&body);
    Ok(content)
}
