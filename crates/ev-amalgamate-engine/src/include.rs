//! Local Include Scanning
//!
//! Finds `#include "name.h"` directives and rewrites them into inert
//! comments. Angle-bracket includes and quoted names with characters other
//! than word characters, `-` and `/` never match.

use ev_amalgamate_core::IncludeDirective;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Marker prefix placed in every comment this tool generates
pub const MARKER: &str = "AMALGAMATE:";

static LOCAL_INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"#\s*include\s+"([-\w/]+)\.h""#).expect("local include pattern is valid")
});

fn to_directive(caps: &Captures<'_>) -> Option<IncludeDirective> {
    let whole = caps.get(0)?;
    let name = caps.get(1)?;
    Some(IncludeDirective {
        name: name.as_str().to_string(),
        text: whole.as_str().to_string(),
        start: whole.start(),
        end: whole.end(),
    })
}

/// Find the leftmost local include in `buffer`
pub fn find_first(buffer: &str) -> Option<IncludeDirective> {
    LOCAL_INCLUDE
        .captures(buffer)
        .and_then(|c| to_directive(&c))
}

/// Count local includes in `buffer`
pub fn count(buffer: &str) -> usize {
    LOCAL_INCLUDE.find_iter(buffer).count()
}

/// Wrap a directive as `/* AMALGAMATE: <directive> */`
pub fn inert_comment(directive: &str) -> String {
    format!("/* {} {} */", MARKER, directive)
}

/// Replace every local include with its inert comment form
///
/// Used for files going into the merged source, where the directives have
/// to stay visible without being interpreted by the compiler.
pub fn rewrite(content: &str) -> String {
    LOCAL_INCLUDE
        .replace_all(content, |caps: &Captures<'_>| inert_comment(&caps[0]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_first_is_leftmost() {
        let buffer = "int a;\n#include \"ev/tcp.h\"\n#include \"ev/udp.h\"\n";
        let directive = find_first(buffer).unwrap();
        assert_eq!(directive.name, "ev/tcp");
        assert_eq!(directive.text, "#include \"ev/tcp.h\"");
        assert_eq!(&buffer[directive.span()], directive.text);
    }

    #[test]
    fn test_whitespace_variants_match() {
        let buffer = "#  include   \"ev-common.h\"\n#include\t\"threadpool.h\"";
        assert_eq!(count(buffer), 2);
        assert_eq!(find_first(buffer).unwrap().name, "ev-common");
        assert_eq!(
            rewrite(buffer),
            "/* AMALGAMATE: #  include   \"ev-common.h\" */\n\
             /* AMALGAMATE: #include\t\"threadpool.h\" */"
        );
    }

    #[test]
    fn test_unsupported_forms_ignored() {
        let buffer = concat!(
            "#include <stdio.h>\n",
            "#include \"ev.hpp\"\n",
            "#include \"some file.h\"\n",
            "#include \"../up.h\"\n",
            "#include MACRO_HEADER\n",
        );
        assert!(find_first(buffer).is_none());
        assert_eq!(count(buffer), 0);
        assert_eq!(rewrite(buffer), buffer);
    }

    #[test]
    fn test_rewrite_only_wraps_quoted_form() {
        let input = "#include \"foo.h\"\n#include <bar.h>\n";
        let output = rewrite(input);
        assert_eq!(
            output,
            "/* AMALGAMATE: #include \"foo.h\" */\n#include <bar.h>\n"
        );
    }

    #[test]
    fn test_rewrite_preserves_directive_text() {
        let input = "#   include \"win/winapi.h\" // tail";
        assert_eq!(
            rewrite(input),
            "/* AMALGAMATE: #   include \"win/winapi.h\" */ // tail"
        );
        // the directive text survives inside the comment
        assert_eq!(count(&rewrite(input)), 1);
    }

    #[test]
    fn test_count() {
        let buffer = "#include \"a.h\"\n#include <b.h>\n#include \"c/d.h\"\n";
        assert_eq!(count(buffer), 2);
        assert_eq!(count(""), 0);
    }
}
