use regex::Regex;
use std::sync::OnceLock;

use crate::wire::FileSet;

/// Literal marker that opens every file in a generator response.
pub const FILE_MARKER: &str = "File:";

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"{}\s+", regex::escape(FILE_MARKER))).expect("static regex")
    })
}

/// Split raw generator text into files.
///
/// Text before the first marker is preamble and is dropped, so a response
/// without any marker yields an empty set. Never fails: a segment whose name
/// trims to nothing is skipped, a segment without a newline becomes an empty
/// file, and a repeated path keeps only its last content.
pub fn parse(raw: &str) -> FileSet {
    let mut files = FileSet::new();
    for segment in marker_re().split(raw).skip(1) {
        let (name, body) = match segment.find('\n') {
            Some(idx) => (&segment[..idx], &segment[idx + 1..]),
            None => (segment, ""),
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        files.insert(name, body.trim());
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_files_without_extra_whitespace() {
        let files = parse("File: a.txt\nhello\nFile: b.txt\nworld");
        assert_eq!(files.paths(), vec!["a.txt", "b.txt"]);
        assert_eq!(files.get("a.txt"), Some("hello"));
        assert_eq!(files.get("b.txt"), Some("world"));
    }

    #[test]
    fn no_marker_means_empty_set() {
        assert!(parse("no markers here").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn preamble_is_dropped() {
        let files = parse("Sure! Here is your site.\n\nFile: index.html\n<h1>Hi</h1>\n");
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("index.html"), Some("<h1>Hi</h1>"));
    }

    #[test]
    fn nested_paths_and_blank_names() {
        let raw = "File: assets/js/main.js\nconsole.log(1);\nFile: \nFile: assets/css/custom.css\nbody{}";
        let files = parse(raw);
        assert_eq!(files.paths(), vec!["assets/js/main.js", "assets/css/custom.css"]);
        assert_eq!(files.get("assets/js/main.js"), Some("console.log(1);"));
    }

    #[test]
    fn duplicate_path_last_write_wins() {
        let files = parse("File: a.txt\nfirst\nFile: b.txt\nmid\nFile: a.txt\nsecond");
        assert_eq!(files.get("a.txt"), Some("second"));
        assert_eq!(files.paths(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn trailing_marker_without_newline_is_empty_file() {
        let files = parse("File: a.txt\nx\nFile: README.md");
        assert_eq!(files.get("README.md"), Some(""));
    }

    #[test]
    fn multiline_content_keeps_inner_layout() {
        let files = parse("File: styles.css\n\nbody {\n  margin: 0;\n}\n\n");
        assert_eq!(files.get("styles.css"), Some("body {\n  margin: 0;\n}"));
    }
}
