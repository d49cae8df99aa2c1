//! Color and terminal formatting utilities

use crate::core::types::ColorTag;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    // Colors
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const MAGENTA: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const WHITE: &'static str = "\x1b[37m";

    // Bright colors
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_BLUE: &'static str = "\x1b[94m";
    pub const BRIGHT_MAGENTA: &'static str = "\x1b[95m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Per-source-file display palette, indexed by `ColorTag`. Assignment order
/// matches the original round-robin scheme, so the same tree always shows
/// the same colors.
const PALETTE: [&str; ColorTag::PALETTE_SIZE] = [
    Colors::BRIGHT_RED,
    Colors::BRIGHT_GREEN,
    Colors::BRIGHT_YELLOW,
    Colors::BRIGHT_BLUE,
    Colors::BRIGHT_MAGENTA,
    Colors::BRIGHT_CYAN,
    Colors::BRIGHT_WHITE,
];

/// The ANSI color assigned to a source-file tag.
pub fn palette_color(tag: ColorTag) -> &'static str {
    PALETTE[tag.index() % PALETTE.len()]
}

/// Apply color to text when formatting is enabled.
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Wrap a URL in an OSC 8 hyperlink sequence when the terminal supports it.
pub fn hyperlink(url: &str, enabled: bool) -> String {
    if enabled && supports_hyperlinks() {
        format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
    } else {
        url.to_string()
    }
}

/// Check if the current environment supports ANSI formatting
pub fn supports_formatting() -> bool {
    // Check if colors are explicitly disabled
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Disable formatting when running tests
    if cfg!(test) {
        return false;
    }

    // Check TERM environment variable
    if let Ok(term) = std::env::var("TERM") {
        return term != "dumb" && !term.is_empty();
    }

    false
}

/// Check if the current terminal understands OSC 8 hyperlinks
pub fn supports_hyperlinks() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    let term_program = std::env::var("TERM_PROGRAM").unwrap_or_default();
    let known_programs = ["iTerm.app", "WezTerm", "vscode", "ghostty"];

    known_programs.iter().any(|p| term_program.contains(p))
        || std::env::var("VTE_VERSION").is_ok()
        || std::env::var("WT_SESSION").is_ok()
}
