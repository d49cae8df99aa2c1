//! Property-based tests for dokkup using proptest
//!
//! These tests generate random inputs to check the parser's totality and
//! round-trip guarantees across a wide range of potential file contents.

use proptest::prelude::*;

use dokkup::{ExportFormat, FileFormat, LinkEntry, ParseReason};

use std::path::Path;

/// Descriptions without quotes, leading `#`, or surrounding whitespace, so
/// rendering them and parsing them back is lossless
fn description_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9_.-]{0,24}"
}

/// Well-formed http/https URLs
fn url_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[a-z0-9]{1,10}", "[a-z]{2,5}")
            .prop_map(|(host, tld)| format!("https://{host}.{tld}")),
        ("[a-z0-9]{1,10}", "[a-z]{2,5}", "[a-z0-9/]{0,20}")
            .prop_map(|(host, tld, path)| format!("http://{host}.{tld}/{path}")),
        (1024..65535u16).prop_map(|port| format!("http://localhost:{port}")),
    ]
}

/// URLs with a scheme the format rejects
fn rejected_url_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just("ftp"),
            Just("gopher"),
            Just("file"),
            Just("mailto"),
            Just("javascript"),
        ],
        "[a-z0-9.]{1,15}",
    )
        .prop_map(|(scheme, rest)| format!("{scheme}://{rest}"))
}

/// Arbitrary printable single lines (no newlines)
fn arbitrary_line_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,60}"
}

fn parse(content: &str) -> dokkup::ParseOutcome {
    FileFormat::QuotedArrow.parse(content, Path::new("prop.dokk"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Parsing is total: it terminates on any input, and every non-blank,
    /// non-comment line is classified as exactly one entry or one error.
    #[test]
    fn test_parse_is_total(lines in prop::collection::vec(arbitrary_line_strategy(), 0..30)) {
        let content = lines.join("\n");
        let outcome = parse(&content);

        let significant = lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .count();

        prop_assert_eq!(outcome.entries.len() + outcome.errors.len(), significant);
    }

    /// Valid lines always parse into entries with 1-based line numbers
    /// pointing at the right line.
    #[test]
    fn test_valid_lines_parse(
        pairs in prop::collection::vec((description_strategy(), url_strategy()), 1..10)
    ) {
        let content: String = pairs
            .iter()
            .map(|(description, url)| format!("\"{description}\" -> \"{url}\"\n"))
            .collect();
        let outcome = parse(&content);

        prop_assert!(outcome.errors.is_empty());
        prop_assert_eq!(outcome.entries.len(), pairs.len());
        for (index, entry) in outcome.entries.iter().enumerate() {
            prop_assert_eq!(entry.line_number(), (index + 1) as u64);
            prop_assert_eq!(entry.description(), pairs[index].0.as_str());
            prop_assert_eq!(entry.url(), pairs[index].1.as_str());
        }
    }

    /// Exporting entries as text and re-parsing the export yields the same
    /// descriptions and URLs in the same order.
    #[test]
    fn test_text_export_round_trips(
        pairs in prop::collection::vec((description_strategy(), url_strategy()), 0..10)
    ) {
        let entries: Vec<LinkEntry> = pairs
            .iter()
            .enumerate()
            .map(|(index, (description, url))| {
                LinkEntry::new(description, url, Path::new("source.dokk"), (index + 1) as u64)
                    .expect("strategy produces valid entries")
            })
            .collect();

        let text = ExportFormat::Text.render(&entries).expect("text export cannot fail");
        let reparsed = parse(&text);

        prop_assert!(reparsed.errors.is_empty());
        prop_assert_eq!(reparsed.entries.len(), entries.len());
        for (old, new) in entries.iter().zip(reparsed.entries.iter()) {
            prop_assert_eq!(old.description(), new.description());
            prop_assert_eq!(old.url(), new.url());
        }
    }

    /// A structurally valid line with a rejected scheme yields exactly one
    /// UnsupportedScheme error and no entries.
    #[test]
    fn test_rejected_schemes_become_errors(
        description in description_strategy(),
        url in rejected_url_strategy()
    ) {
        let outcome = parse(&format!("\"{description}\" -> \"{url}\""));

        prop_assert!(outcome.entries.is_empty());
        prop_assert_eq!(outcome.errors.len(), 1);
        prop_assert_eq!(outcome.errors[0].reason, ParseReason::UnsupportedScheme);
    }

    /// JSON export is always parseable and preserves entry count and order.
    #[test]
    fn test_json_export_is_always_valid(
        pairs in prop::collection::vec((description_strategy(), url_strategy()), 0..10)
    ) {
        let entries: Vec<LinkEntry> = pairs
            .iter()
            .map(|(description, url)| {
                LinkEntry::new(description, url, Path::new("source.dokk"), 1)
                    .expect("strategy produces valid entries")
            })
            .collect();

        let json = ExportFormat::Json.render(&entries).expect("JSON export failed");
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("export must be valid JSON");

        let array = parsed.as_array().expect("export must be a JSON array");
        prop_assert_eq!(array.len(), entries.len());
        for (value, entry) in array.iter().zip(entries.iter()) {
            prop_assert_eq!(value["description"].as_str(), Some(entry.description()));
            prop_assert_eq!(value["url"].as_str(), Some(entry.url()));
        }
    }
}
