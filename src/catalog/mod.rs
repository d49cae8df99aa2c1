//! The in-memory link catalog
//!
//! A `Catalog` owns the aggregated entries and parse errors of one scan
//! session, plus the deterministic per-file color tag assignment. It is
//! read-only after population: every query below is pure, and a rescan
//! replaces the whole catalog instead of mutating it in place.

use rustc_hash::{FxHashMap, FxHashSet};
use url::Url;

use crate::core::error::Result;
use crate::core::types::{
    ColorTag, IssueReason, LinkEntry, ParseError, ParseReason, SecurityPolicy, ValidationIssue,
};
use crate::export::ExportFormat;

use std::path::{Path, PathBuf};

/// Aggregated result of one scan pass.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Entries in scan order: file-path order, then in-file line order
    entries: Vec<LinkEntry>,
    /// Parse errors in the same order
    errors: Vec<ParseError>,
    /// Distinct source files in first-seen order
    files: Vec<PathBuf>,
    /// Stable source-file display tags
    color_tags: FxHashMap<PathBuf, ColorTag>,
    /// Policy applied by `validate`
    policy: SecurityPolicy,
}

/// Counts derived from a catalog in a single pass. All zero for an empty
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_entries: usize,
    pub total_files: usize,
    pub total_errors: usize,
    pub entries_per_file: FxHashMap<PathBuf, usize>,
    pub errors_by_reason: FxHashMap<ParseReason, usize>,
    pub unique_domains: usize,
}

impl Catalog {
    /// Assemble a catalog from one scan's output. Color tags are assigned
    /// round-robin over the palette in the order `files` were encountered,
    /// so an unchanged tree always produces the same assignment.
    pub fn from_scan(
        entries: Vec<LinkEntry>,
        errors: Vec<ParseError>,
        files: Vec<PathBuf>,
        policy: SecurityPolicy,
    ) -> Self {
        let color_tags = files
            .iter()
            .enumerate()
            .map(|(position, file)| (file.clone(), ColorTag::assign(position)))
            .collect();

        Self {
            entries,
            errors,
            files,
            color_tags,
            policy,
        }
    }

    /// All entries, in scan order.
    pub fn all(&self) -> &[LinkEntry] {
        &self.entries
    }

    /// All parse errors, in scan order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Distinct source files in first-seen order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.errors.is_empty()
    }

    /// The display tag assigned to a source file during the scan.
    pub fn color_tag(&self, file: &Path) -> Option<ColorTag> {
        self.color_tags.get(file).copied()
    }

    /// Entry at a 1-based position in `all()`.
    pub fn entry(&self, index: usize) -> Option<&LinkEntry> {
        if index == 0 {
            return None;
        }
        self.entries.get(index - 1)
    }

    /// Resolve 1-based positions against `all()`. Selected entries keep
    /// their original relative order regardless of how the indices were
    /// given; out-of-range indices are returned separately so the caller
    /// can report them.
    pub fn select_indices(&self, indices: &[usize]) -> (Vec<LinkEntry>, Vec<usize>) {
        let mut wanted: Vec<usize> = indices.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        let mut selected = Vec::new();
        let mut invalid = Vec::new();
        for index in wanted {
            match self.entry(index) {
                Some(entry) => selected.push(entry.clone()),
                None => invalid.push(index),
            }
        }
        (selected, invalid)
    }

    /// Entries matching a predicate, in scan order. Pure and non-mutating.
    pub fn filter<P>(&self, predicate: P) -> Vec<LinkEntry>
    where
        P: Fn(&LinkEntry) -> bool,
    {
        self.entries
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }

    /// Entries whose description contains `term`, case-insensitively.
    pub fn search(&self, term: &str) -> Vec<LinkEntry> {
        let needle = term.to_lowercase();
        self.filter(|entry| entry.description().to_lowercase().contains(&needle))
    }

    /// Derive counts in a single pass over stored entries and errors.
    pub fn statistics(&self) -> Stats {
        let mut entries_per_file: FxHashMap<PathBuf, usize> = FxHashMap::default();
        let mut domains: FxHashSet<String> = FxHashSet::default();

        for entry in &self.entries {
            *entries_per_file
                .entry(entry.source_file().to_path_buf())
                .or_insert(0) += 1;
            if let Ok(url) = Url::parse(entry.url())
                && let Some(host) = url.host_str()
            {
                domains.insert(host.to_lowercase());
            }
        }

        let mut errors_by_reason: FxHashMap<ParseReason, usize> = FxHashMap::default();
        for error in &self.errors {
            *errors_by_reason.entry(error.reason).or_insert(0) += 1;
        }

        Stats {
            total_entries: self.entries.len(),
            total_files: self.files.len(),
            total_errors: self.errors.len(),
            entries_per_file,
            errors_by_reason,
            unique_domains: domains.len(),
        }
    }

    /// Re-examine every stored entry's URL for structural problems beyond
    /// the parser's scheme-prefix check, and for security-policy findings.
    /// Purely syntactic: no network requests are made.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for entry in &self.entries {
            let reason = match Url::parse(entry.url()) {
                Err(url::ParseError::EmptyHost) => Some(IssueReason::MissingHost),
                Err(err) => Some(IssueReason::Malformed(err.to_string())),
                Ok(url) => {
                    if !self.policy.allows_scheme(url.scheme()) {
                        Some(IssueReason::DisallowedScheme(url.scheme().to_string()))
                    } else {
                        match url.host_str() {
                            None => Some(IssueReason::MissingHost),
                            Some(host) if !self.policy.allows_host(host) => {
                                Some(IssueReason::HostNotAllowed(host.to_string()))
                            }
                            Some(_) => None,
                        }
                    }
                }
            };

            if let Some(reason) = reason {
                issues.push(ValidationIssue {
                    entry: entry.clone(),
                    reason,
                });
            }
        }

        issues
    }

    /// Render entries with the given exporter. `subset` defaults to
    /// `all()`; callers may pass any filtered selection instead.
    pub fn export(&self, format: ExportFormat, subset: Option<&[LinkEntry]>) -> Result<String> {
        format.render(subset.unwrap_or(&self.entries))
    }
}
