use ignore::WalkBuilder;
use rustc_hash::FxHashSet;

use crate::catalog::Catalog;
use crate::core::constants::scanning;
use crate::core::error::{DokkupError, Result};
use crate::core::types::{LinkEntry, ParseError, SecurityPolicy};
use crate::parser::FileFormat;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Parameters for one scan pass. Built once (usually from `Config`) and
/// passed down; there is no global state behind a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Directory levels below the root that will be visited
    pub max_depth: usize,
    /// Recognized file extensions, lowercase and without the dot
    pub extensions: HashSet<String>,
    /// Policy handed to the resulting catalog for `validate`
    pub policy: SecurityPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let mut extensions = HashSet::new();
        extensions.insert(scanning::DEFAULT_EXTENSION.to_string());
        Self {
            recursive: true,
            max_depth: scanning::DEFAULT_MAX_DEPTH,
            extensions,
            policy: SecurityPolicy::default(),
        }
    }
}

/// Walks a directory tree and aggregates every recognized link file into a
/// fresh `Catalog`.
///
/// One scan is one blocking call that reads files sequentially in lexical
/// path order, so repeated scans of an unchanged tree produce identical
/// entry ordering and identical color-tag assignment. The catalog is built
/// off to the side: a failed or cancelled scan leaves the caller's previous
/// snapshot untouched.
#[derive(Debug, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan `root` to completion.
    pub fn scan(&self, root: &Path) -> Result<Catalog> {
        self.scan_with_cancel(root, &AtomicBool::new(false))
    }

    /// Scan `root`, checking `cancel` at every file boundary. A cancelled
    /// scan returns `DokkupError::Cancelled` and produces no catalog.
    pub fn scan_with_cancel(&self, root: &Path, cancel: &AtomicBool) -> Result<Catalog> {
        // An unscannable root is a fatal condition, distinct from a scan
        // that found nothing.
        if !root.exists() {
            return Err(DokkupError::RootNotFound(root.display().to_string()));
        }
        if !root.is_dir() {
            return Err(DokkupError::NotADirectory(root.display().to_string()));
        }

        let files = self.collect_files(root);

        let mut entries: Vec<LinkEntry> = Vec::new();
        let mut errors: Vec<ParseError> = Vec::new();

        for file in &files {
            if cancel.load(Ordering::Relaxed) {
                return Err(DokkupError::Cancelled);
            }

            let format = FileFormat::for_path(file).unwrap_or(FileFormat::QuotedArrow);

            // Each file is opened, read fully and closed before the next
            // one; invalid byte sequences are decoded permissively instead
            // of failing the scan.
            match fs::read(file) {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes);
                    let outcome = format.parse(&content, file);
                    log::debug!(
                        "{}: {} entries, {} errors",
                        file.display(),
                        outcome.entries.len(),
                        outcome.errors.len()
                    );
                    entries.extend(outcome.entries);
                    errors.extend(outcome.errors);
                }
                Err(err) => {
                    log::warn!("Could not read {}: {err}", file.display());
                    errors.push(ParseError::unreadable(file));
                }
            }
        }

        Ok(Catalog::from_scan(
            entries,
            errors,
            files,
            self.options.policy.clone(),
        ))
    }

    /// Enumerate recognized files under `root` in lexical path order,
    /// without visiting any real file twice even when symlinks alias it.
    fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        let depth = if self.options.recursive {
            self.options.max_depth
        } else {
            1
        };

        let walker = WalkBuilder::new(root)
            .max_depth(Some(depth))
            .follow_links(true)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Symlink loops and unreadable directories surface here;
                // they are diagnostics, not scan failures.
                Err(err) => {
                    log::warn!("Skipping unreadable path: {err}");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if !self.has_recognized_extension(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        // Global lexical sort makes the scan order independent of walk
        // internals and stable across runs.
        files.sort();

        // Symlinked duplicates of the same real file would double its
        // entries; keep the first path in sort order.
        let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
        files.retain(|path| {
            let real = fs::canonicalize(path).unwrap_or_else(|_| path.clone());
            seen.insert(real)
        });

        files
    }

    fn has_recognized_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| self.options.extensions.contains(&ext))
    }
}
