//! Link file parsing
//!
//! This module turns one file's content into link entries and per-line
//! parse errors. Parsing is total: every non-blank, non-comment line
//! resolves to exactly one entry or one error, and a parse never fails
//! as a whole.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::types::{LinkEntry, LinkEntryError, ParseError, ParseReason};

use std::path::Path;

/// One `"description" -> "url"` pair per line. Anchored so trailing junk
/// (including embedded unescaped quotes) fails the structural match instead
/// of being guessed at.
const QUOTED_ARROW_PATTERN: &str = r#"^"([^"]*)"[ \t]*->[ \t]*"([^"]*)"$"#;

static QUOTED_ARROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(QUOTED_ARROW_PATTERN).expect("Failed to compile quoted-arrow line pattern")
});

/// What one parse pass produced: entries for well-formed lines, errors for
/// the rest. Line counts of the two always sum to the number of non-blank,
/// non-comment lines in the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub entries: Vec<LinkEntry>,
    pub errors: Vec<ParseError>,
}

/// The file formats the parser understands, keyed by file extension.
///
/// Adding a format means adding one variant here, one extension arm in
/// `for_path`, and one parse function below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// The standard `.dokk` format: `"description" -> "url"`, one per line,
    /// `#` comments and blank lines ignored.
    QuotedArrow,
}

impl FileFormat {
    /// Select a format for a path by its extension, case-insensitively.
    /// Unknown extensions get `None`; the scanner filters those out before
    /// any content is read.
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "dokk" => Some(Self::QuotedArrow),
            _ => None,
        }
    }

    /// Parse one file's content into entries and errors.
    pub fn parse(&self, content: &str, source_file: &Path) -> ParseOutcome {
        match self {
            Self::QuotedArrow => parse_quoted_arrow(content, source_file),
        }
    }
}

fn parse_quoted_arrow(content: &str, source_file: &Path) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = (index + 1) as u64;
        let line = raw_line.trim();

        // Blank lines and full-line comments carry no information
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(captures) = QUOTED_ARROW.captures(line) else {
            outcome.errors.push(ParseError::new(
                source_file,
                line_number,
                line,
                ParseReason::MalformedSyntax,
            ));
            continue;
        };

        match LinkEntry::new(&captures[1], &captures[2], source_file, line_number) {
            Ok(entry) => outcome.entries.push(entry),
            Err(LinkEntryError::EmptyDescription) => outcome.errors.push(ParseError::new(
                source_file,
                line_number,
                line,
                ParseReason::EmptyDescription,
            )),
            Err(LinkEntryError::UnsupportedScheme) => outcome.errors.push(ParseError::new(
                source_file,
                line_number,
                line,
                ParseReason::UnsupportedScheme,
            )),
            Err(LinkEntryError::InvalidLineNumber) => {
                // Line numbers here are always >= 1; classify rather than drop
                // so totality holds even if this is ever reached.
                log::debug!("unexpected line number error at {source_file:?}:{line_number}");
                outcome.errors.push(ParseError::new(
                    source_file,
                    line_number,
                    line,
                    ParseReason::MalformedSyntax,
                ));
            }
        }
    }

    outcome
}
