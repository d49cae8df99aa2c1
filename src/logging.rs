use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // A second call (library consumers, tests) keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log scan start information
pub fn log_scan_start(root: &Path, recursive: bool, max_depth: usize) {
    info!(
        "Scanning {} (recursive={recursive}, max_depth={max_depth})",
        root.display()
    );
}

/// Log scan completion
pub fn log_scan_complete(entries: usize, files: usize, errors: usize, duration_ms: u128) {
    if errors == 0 {
        info!("Scan complete: {entries} link(s) from {files} file(s) ({duration_ms}ms)");
    } else {
        warn!(
            "Scan complete: {entries} link(s) from {files} file(s), {errors} parse error(s) ({duration_ms}ms)"
        );
    }
}

/// Log an export operation
pub fn log_export(format: &str, entry_count: usize, target: Option<&Path>) {
    match target {
        Some(path) => info!("Exported {entry_count} link(s) as {format} to {}", path.display()),
        None => debug!("Rendered {entry_count} link(s) as {format}"),
    }
}

/// Log validation results
pub fn log_validation(checked: usize, issues: usize) {
    if issues == 0 {
        info!("Validated {checked} link(s), no issues");
    } else {
        warn!("Validated {checked} link(s), {issues} issue(s) found");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_initialization_modes() {
        // Only the first call installs a logger; the rest are no-ops
        init_logger(true, false);
        init_logger(false, true);
        init_logger(false, false);
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        log_scan_start(Path::new("/tmp"), true, 10);
        log_scan_complete(10, 2, 0, 15);
        log_scan_complete(10, 2, 3, 15);
        log_export("json", 5, None);
        log_export("text", 5, Some(Path::new("out.txt")));
        log_validation(10, 0);
        log_validation(10, 2);
        log_error("something failed", None);

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        log_error("something failed", Some(&io_error));
    }

    #[test]
    fn test_log_helpers_with_empty_and_special_input() {
        log_error("", None);
        log_export("", 0, None);
        log_scan_start(Path::new(""), false, 0);
        log_error("unicode: äöü ñ", None);
    }
}
