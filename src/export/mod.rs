//! Catalog export
//!
//! Pure conversions from an ordered slice of entries to one of the three
//! fixed serializations. Exporters never see parse errors; error reporting
//! stays with the catalog's caller.

use crate::core::constants::output_formats;
use crate::core::error::{DokkupError, Result};
use crate::core::types::LinkEntry;

use std::fmt;
use std::str::FromStr;

/// The supported export serializations.
///
/// Adding a format means adding one variant and one render arm; there is no
/// strategy hierarchy behind this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `"description" -> "url"`, one per line. Round-trips through the
    /// parser.
    Text,
    /// JSON array of `{description, url, sourceFile, lineNumber}` objects
    /// with stable key order.
    Json,
    /// Markdown bullet list, `- [description](url)`.
    Markdown,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => output_formats::TEXT,
            Self::Json => output_formats::JSON,
            Self::Markdown => output_formats::MARKDOWN,
        }
    }

    /// Render entries to the serialization this format stands for.
    pub fn render(&self, entries: &[LinkEntry]) -> Result<String> {
        match self {
            Self::Text => Ok(render_text(entries)),
            Self::Json => render_json(entries),
            Self::Markdown => Ok(render_markdown(entries)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = DokkupError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            output_formats::TEXT => Ok(Self::Text),
            output_formats::JSON => Ok(Self::Json),
            output_formats::MARKDOWN => Ok(Self::Markdown),
            other => Err(DokkupError::InvalidArgument(format!(
                "Unknown output format '{other}'. Expected one of: {}",
                output_formats::ALL.join(", ")
            ))),
        }
    }
}

fn render_text(entries: &[LinkEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push('"');
        out.push_str(entry.description());
        out.push_str("\" -> \"");
        out.push_str(entry.url());
        out.push_str("\"\n");
    }
    out
}

fn render_json(entries: &[LinkEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(|err| DokkupError::Export(err.to_string()))
}

fn render_markdown(entries: &[LinkEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str("- [");
        out.push_str(entry.description());
        out.push_str("](");
        out.push_str(entry.url());
        out.push_str(")\n");
    }
    out
}
