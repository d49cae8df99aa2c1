//! Human-readable rendering of catalogs, statistics and reports

use crate::catalog::{Catalog, Stats};
use crate::core::constants::display;
use crate::core::types::{LinkEntry, ParseError, ParseReason, ValidationIssue};
use crate::ui::color::{Colors, hyperlink, paint, palette_color};

/// Print a numbered link list, one entry per line, colored by the entry's
/// source-file tag so links from the same file read as a group.
pub fn display_entries(catalog: &Catalog, entries: &[LinkEntry], color: bool) {
    for (position, entry) in entries.iter().enumerate() {
        let file_color = catalog
            .color_tag(entry.source_file())
            .map(palette_color)
            .unwrap_or(Colors::WHITE);

        println!(
            "{:3}. {}",
            position + 1,
            paint(entry.description(), file_color, color)
        );
        println!("     {}", hyperlink(entry.url(), color));
    }
}

/// Print the one-line scan summary shown before a listing.
pub fn display_scan_summary(catalog: &Catalog, color: bool) {
    let stats = catalog.statistics();
    println!(
        "{} Found {} link(s) in {} file(s)",
        paint(display::FILE_GLYPH, Colors::BRIGHT_CYAN, color),
        stats.total_entries,
        stats.total_files
    );
    if stats.total_errors > 0 {
        println!(
            "{} {} line(s) could not be parsed (run with --verbose for details)",
            paint(display::WARNING_GLYPH, Colors::BRIGHT_YELLOW, color),
            stats.total_errors
        );
    }
    println!();
}

/// Report parse errors alongside successful results, never instead of them.
/// Goes to stderr so stdout stays machine-consumable.
pub fn display_parse_errors(errors: &[ParseError], color: bool) {
    if errors.is_empty() {
        return;
    }

    eprintln!(
        "{} {} problem(s) while parsing:",
        paint(display::WARNING_GLYPH, Colors::BRIGHT_YELLOW, color),
        errors.len()
    );
    for error in errors {
        if error.reason == ParseReason::UnreadableFile {
            eprintln!(
                "  {} (unreadable file)",
                paint(&error.source_file.display().to_string(), Colors::DIM, color)
            );
        } else {
            eprintln!(
                "  {}:{} [{}] {}",
                paint(&error.source_file.display().to_string(), Colors::DIM, color),
                error.line_number,
                error.reason,
                error.raw_line
            );
        }
    }
    eprintln!();
}

/// Print catalog statistics.
pub fn display_statistics(stats: &Stats, color: bool) {
    let label = |text: &str| paint(text, Colors::BRIGHT_CYAN, color);

    println!("{}: {}", label("Total links"), stats.total_entries);
    println!("{}: {}", label("Total files"), stats.total_files);
    println!("{}: {}", label("Parse errors"), stats.total_errors);
    println!("{}: {}", label("Unique domains"), stats.unique_domains);

    if !stats.entries_per_file.is_empty() {
        println!("\n{}:", label("Links per file"));
        let mut per_file: Vec<_> = stats.entries_per_file.iter().collect();
        per_file.sort();
        for (file, count) in per_file {
            println!("  {} {}: {}", display::FILE_GLYPH, file.display(), count);
        }
    }

    if !stats.errors_by_reason.is_empty() {
        println!("\n{}:", label("Errors by reason"));
        let mut by_reason: Vec<_> = stats.errors_by_reason.iter().collect();
        by_reason.sort_by_key(|(reason, _)| reason.as_str());
        for (reason, count) in by_reason {
            println!("  {reason}: {count}");
        }
    }
}

/// Print validation findings, or a success line when there are none.
pub fn display_validation_issues(issues: &[ValidationIssue], color: bool) {
    if issues.is_empty() {
        println!(
            "{} All links are structurally valid",
            paint(display::SUCCESS_GLYPH, Colors::BRIGHT_GREEN, color)
        );
        return;
    }

    println!(
        "{} Found {} invalid link(s):",
        paint(display::ERROR_GLYPH, Colors::BRIGHT_RED, color),
        issues.len()
    );
    for issue in issues {
        println!(
            "  {}: {}",
            paint(issue.entry.description(), Colors::BOLD, color),
            issue.reason
        );
        println!(
            "     {} {}:{}",
            display::FILE_GLYPH,
            issue.entry.source_file().display(),
            issue.entry.line_number()
        );
        println!("     {}", issue.entry.url());
    }
}
