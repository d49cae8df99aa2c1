use serde::Serialize;

use std::fmt;
use std::path::{Path, PathBuf};

/// Represents one description -> URL mapping read from a link file.
///
/// This type tracks where the link was declared within the source files,
/// including the exact line number and file path for reporting purposes.
/// Entries are immutable once constructed; equality is structural over all
/// four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEntry {
    /// The human-readable label for the link
    pub description: String,
    /// The link target, always an `http://` or `https://` URL
    pub url: String,
    /// Path of the file the entry was read from
    pub source_file: PathBuf,
    /// Line number where the entry was declared (1-indexed)
    pub line_number: u64,
}

/// Errors that can occur when constructing a `LinkEntry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEntryError {
    /// Description is missing or empty after trimming
    EmptyDescription,
    /// URL does not start with an accepted scheme
    UnsupportedScheme,
    /// Line number is invalid (zero)
    InvalidLineNumber,
}

impl fmt::Display for LinkEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required and cannot be empty"),
            Self::UnsupportedScheme => write!(f, "URL must start with http:// or https://"),
            Self::InvalidLineNumber => write!(f, "Line number must be greater than 0"),
        }
    }
}

impl std::error::Error for LinkEntryError {}

impl LinkEntry {
    /// Create a new LinkEntry with validation.
    ///
    /// Both description and URL are trimmed before validation, matching the
    /// on-disk format where insignificant whitespace may surround either
    /// field inside the quotes.
    pub fn new(
        description: &str,
        url: &str,
        source_file: &Path,
        line_number: u64,
    ) -> Result<Self, LinkEntryError> {
        let description = description.trim();
        let url = url.trim();

        if description.is_empty() {
            return Err(LinkEntryError::EmptyDescription);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LinkEntryError::UnsupportedScheme);
        }
        if line_number == 0 {
            return Err(LinkEntryError::InvalidLineNumber);
        }

        Ok(Self {
            description: description.to_string(),
            url: url.to_string(),
            source_file: source_file.to_path_buf(),
            line_number,
        })
    }

    /// Create a new LinkEntry without validation.
    ///
    /// For internal use where validation has already been performed.
    #[allow(dead_code)] // Used in tests but not in main code
    pub(crate) fn new_unchecked(
        description: &str,
        url: &str,
        source_file: &Path,
        line_number: u64,
    ) -> Self {
        Self {
            description: description.to_string(),
            url: url.to_string(),
            source_file: source_file.to_path_buf(),
            line_number,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl fmt::Display for LinkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.description, self.url)
    }
}

/// Why a line (or a whole file) failed to produce an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseReason {
    /// Line did not match the quoted-arrow grammar
    MalformedSyntax,
    /// URL scheme is not http or https
    UnsupportedScheme,
    /// Description was empty after unquoting
    EmptyDescription,
    /// File could not be opened or read at all
    UnreadableFile,
}

impl ParseReason {
    /// Stable identifier used in reports and statistics keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedSyntax => "malformed_syntax",
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::EmptyDescription => "empty_description",
            Self::UnreadableFile => "unreadable_file",
        }
    }
}

impl fmt::Display for ParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable, per-line parse failure.
///
/// Produced for each offending line; never aborts parsing of the remaining
/// file or the surrounding scan. `UnreadableFile` errors apply to a whole
/// file and carry line number 0 and an empty raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub source_file: PathBuf,
    pub line_number: u64,
    pub raw_line: String,
    pub reason: ParseReason,
}

impl ParseError {
    pub fn new(source_file: &Path, line_number: u64, raw_line: &str, reason: ParseReason) -> Self {
        Self {
            source_file: source_file.to_path_buf(),
            line_number,
            raw_line: raw_line.to_string(),
            reason,
        }
    }

    /// A whole-file failure (permission denied, vanished between listing and
    /// read). Carries no line information.
    pub fn unreadable(source_file: &Path) -> Self {
        Self::new(source_file, 0, "", ParseReason::UnreadableFile)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason == ParseReason::UnreadableFile {
            write!(f, "{}: {}", self.source_file.display(), self.reason)
        } else {
            write!(
                f,
                "{}:{}: {}: {}",
                self.source_file.display(),
                self.line_number,
                self.reason,
                self.raw_line
            )
        }
    }
}

/// Why a stored entry's URL was flagged by post-hoc validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueReason {
    /// URL parses but has no host component
    MissingHost,
    /// URL does not parse as a URL at all
    Malformed(String),
    /// Scheme is outside the configured allowed set
    DisallowedScheme(String),
    /// Host is outside the configured allow-list
    HostNotAllowed(String),
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHost => write!(f, "URL has no host"),
            Self::Malformed(detail) => write!(f, "URL is malformed: {detail}"),
            Self::DisallowedScheme(scheme) => write!(f, "scheme '{scheme}' is not allowed"),
            Self::HostNotAllowed(host) => write!(f, "host '{host}' is not on the allow-list"),
        }
    }
}

/// A post-hoc, informational validation finding. Never blocks listing or
/// export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub entry: LinkEntry,
    pub reason: IssueReason,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry.description, self.reason)
    }
}

/// Deterministic per-source-file display tag, assigned round-robin over a
/// fixed palette in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(u8);

impl ColorTag {
    /// Number of distinct tags before assignment wraps around.
    pub const PALETTE_SIZE: usize = 7;

    /// Tag for the `position`-th distinct source file (0-indexed).
    pub fn assign(position: usize) -> Self {
        Self((position % Self::PALETTE_SIZE) as u8)
    }

    pub fn index(&self) -> usize {
        usize::from(self.0)
    }
}

/// Which schemes and hosts entries are allowed to use. Applied by
/// `Catalog::validate` as informational findings; the catalog contents are
/// never filtered by policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityPolicy {
    /// Accepted URL schemes
    pub allowed_schemes: Vec<String>,
    /// Optional host allow-list; `None` allows any host
    pub allowed_hosts: Option<Vec<String>>,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            allowed_hosts: None,
        }
    }
}

impl SecurityPolicy {
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes.iter().any(|s| s == scheme)
    }

    pub fn allows_host(&self, host: &str) -> bool {
        match &self.allowed_hosts {
            Some(hosts) => hosts.iter().any(|h| h.eq_ignore_ascii_case(host)),
            None => true,
        }
    }
}
